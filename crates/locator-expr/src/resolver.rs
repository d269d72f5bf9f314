//! Expression resolver
//!
//! Evaluates a parsed AST against an injected [`Finder`] backend. The
//! current anchor is threaded explicitly through the recursion, so
//! independent `dispatch` calls are safe from multiple threads as long as
//! the finder itself is reentrant. No timeouts or retries happen here;
//! callers needing polling wrap `dispatch` externally.

use crate::ast::{AstNode, BoolOp};
use crate::errors::ExprError;
use crate::parser::Parser;
use crate::registry::LocatorRegistry;
use crate::tokenizer::Tokenizer;
use crate::types::Locator;
use tracing::debug;

/// Current anchor for a finder call, and the element type of results
///
/// `Undefined` means "no anchor yet, search globally"; it is also the
/// result of a satisfied negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Anchor<M> {
    Undefined,
    Match(M),
}

impl<M> Anchor<M> {
    /// The concrete match, if any
    pub fn as_match(&self) -> Option<&M> {
        match self {
            Anchor::Undefined => None,
            Anchor::Match(value) => Some(value),
        }
    }
}

/// Finder backend seam
///
/// Turns a locator leaf plus the current anchor into zero or more matches.
/// The resolver only requires equality (chain deduplication) and a total
/// order (final sort) of the match payload; backends whose matches carry
/// non-deterministic fields will under-collapse during dedup.
pub trait Finder<M> {
    fn find(&mut self, context: &Anchor<M>, locator: &Locator) -> Result<Vec<M>, ExprError>;
}

impl<M, F> Finder<M> for F
where
    F: FnMut(&Anchor<M>, &Locator) -> Result<Vec<M>, ExprError>,
{
    fn find(&mut self, context: &Anchor<M>, locator: &Locator) -> Result<Vec<M>, ExprError> {
        self(context, locator)
    }
}

/// Expression resolver over a locator registry
pub struct Resolver {
    registry: LocatorRegistry,
}

impl Resolver {
    /// Create a resolver using the given registry for literal parsing
    pub fn new(registry: LocatorRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing literal parsing
    pub fn registry(&self) -> &LocatorRegistry {
        &self.registry
    }

    /// Tokenize and parse an expression without resolving it
    pub fn parse(&self, expression: &str) -> Result<AstNode, ExprError> {
        let tokens = Tokenizer::new(&self.registry).tokenize(expression)?;
        Parser::new(tokens).parse()
    }

    /// Resolve an expression to a sorted, deduplicated match list
    pub fn dispatch<M, F>(&self, expression: &str, finder: &mut F) -> Result<Vec<Anchor<M>>, ExprError>
    where
        M: Clone + Eq + Ord,
        F: Finder<M>,
    {
        let ast = self.parse(expression)?;
        debug!(expression, "dispatching locator expression");
        let mut matches = self.resolve(&ast, &Anchor::Undefined, finder)?;
        matches.sort();
        matches.dedup();
        Ok(matches)
    }

    fn resolve<M, F>(
        &self,
        node: &AstNode,
        context: &Anchor<M>,
        finder: &mut F,
    ) -> Result<Vec<Anchor<M>>, ExprError>
    where
        M: Clone + Eq + Ord,
        F: Finder<M>,
    {
        match node {
            AstNode::Leaf(locator) => {
                let found = finder.find(context, locator)?;
                debug!(locator = %locator, matches = found.len(), "leaf resolved");
                Ok(found.into_iter().map(Anchor::Match).collect())
            }

            AstNode::Not(inner) => {
                // negation succeeds exactly when the inner value found nothing
                if self.resolve(inner, context, finder)?.is_empty() {
                    Ok(vec![Anchor::Undefined])
                } else {
                    Ok(Vec::new())
                }
            }

            AstNode::Expression {
                lhs,
                op: BoolOp::And,
                rhs,
            } => {
                let left = self.resolve(lhs, context, finder)?;
                if left.is_empty() {
                    return Ok(Vec::new());
                }
                let right = self.resolve(rhs, context, finder)?;
                if right.is_empty() {
                    return Ok(Vec::new());
                }
                // both branches matched: concatenate their matches
                let mut combined = left;
                combined.extend(right);
                Ok(combined)
            }

            AstNode::Expression {
                lhs,
                op: BoolOp::Or,
                rhs,
            } => {
                let left = self.resolve(lhs, context, finder)?;
                if !left.is_empty() {
                    // short-circuit: rhs must not be evaluated
                    return Ok(left);
                }
                self.resolve(rhs, context, finder)
            }

            AstNode::Chain(links) => {
                let (first, rest) = links
                    .split_first()
                    .ok_or_else(|| ExprError::Internal("chain without links".to_string()))?;
                let mut bases = self.resolve(first, context, finder)?;
                for link in rest {
                    let mut candidates: Vec<Anchor<M>> = Vec::new();
                    for base in &bases {
                        for found in self.resolve(link, base, finder)? {
                            if !candidates.contains(&found) {
                                candidates.push(found);
                            }
                        }
                    }
                    bases = candidates;
                }
                Ok(bases)
            }
        }
    }
}
