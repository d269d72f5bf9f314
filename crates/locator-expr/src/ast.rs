//! Expression AST
//!
//! Built bottom-up by the parser and never mutated afterwards. A tagged
//! union with exhaustive matching: adding or removing a node kind is a
//! compile-time-checked change.

use crate::types::Locator;
use serde::{Deserialize, Serialize};

/// Boolean operator joining two expression branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

/// AST node enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstNode {
    /// A single locator leaf
    Leaf(Locator),

    /// Negation; stacks right-associatively
    Not(Box<AstNode>),

    /// Boolean combination; AND/OR fold strictly left to right
    Expression {
        lhs: Box<AstNode>,
        op: BoolOp,
        rhs: Box<AstNode>,
    },

    /// Sequential resolution; each link re-anchors on the previous results
    Chain(Vec<AstNode>),
}

impl AstNode {
    /// Convenience leaf constructor
    pub fn leaf(locator: Locator) -> Self {
        AstNode::Leaf(locator)
    }

    /// Convenience negation constructor
    pub fn not(value: AstNode) -> Self {
        AstNode::Not(Box::new(value))
    }

    /// Convenience expression constructor
    pub fn expression(lhs: AstNode, op: BoolOp, rhs: AstNode) -> Self {
        AstNode::Expression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}
