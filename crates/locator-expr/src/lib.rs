//! Locator expression engine
//!
//! This crate implements the textual locator expression language:
//! - Locator leaf variants with a typename registry for literal parsing
//! - Tokenizer over the operator grammar (`then/+`, `and/&&/&`, `or/||/|`,
//!   `not/!`, parentheses, locator literals)
//! - Recursive-descent parser producing a small AST
//! - Resolver evaluating the AST against an injected finder backend
//!
//! Backends (screen capture, UI trees, OCR, template matching) live behind
//! the [`Finder`] seam; this crate is agnostic to the match payload beyond
//! equality and ordering.

pub mod ast;
pub mod errors;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod tokenizer;
pub mod types;

pub use ast::*;
pub use errors::*;
pub use parser::*;
pub use registry::*;
pub use resolver::*;
pub use tokenizer::*;
pub use types::*;
