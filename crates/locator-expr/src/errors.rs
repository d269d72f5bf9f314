//! Error types for the expression engine

use spotter_core_types::GeometryError;
use thiserror::Error;

/// Expression engine error enumeration
///
/// Syntax and literal errors are raised while tokenizing/parsing; resolution
/// errors come from the finder backend. Nothing here is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Scanner hit a character sequence that is not part of the grammar
    #[error("unknown token: '{0}'")]
    UnknownToken(String),

    /// Input produced zero tokens
    #[error("empty expression")]
    EmptyExpression,

    /// Locator literal names a typename missing from the registry
    #[error("unknown locator type: '{0}'")]
    UnknownLocatorType(String),

    /// Locator literal arguments do not fit the typename's constructor
    #[error("malformed '{type_name}' locator: {reason}")]
    MalformedLocator { type_name: String, reason: String },

    /// Alias lookup missed in the alias store
    #[error("unknown alias: '{0}'")]
    UnknownAlias(String),

    /// Value rule could not start at the current token
    #[error("expected locator or parentheses")]
    ExpectedValue,

    /// Token stream ended in the middle of a rule
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Wrong token where a specific one was required
    #[error("expected '{expected}', was '{was}'")]
    UnexpectedToken { expected: String, was: String },

    /// Geometry failure while constructing a locator literal
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Finder backend failure during resolution
    #[error("finder backend failure: {0}")]
    Backend(String),

    /// Programming defect inside the resolver; never suppressed
    #[error("internal resolver defect: {0}")]
    Internal(String),
}
