//! Recursive-descent syntax parser
//!
//! Grammar, with one-token lookahead over a materialized token list:
//!
//! ```text
//! chain      := expression (THEN expression)*
//! expression := value ((AND | OR) value)*
//! value      := NOT value | LOCATOR | LPAREN chain RPAREN
//! ```
//!
//! AND and OR carry no relative precedence: they fold left in encounter
//! order. A chain of one link degenerates to that link.

use crate::ast::{AstNode, BoolOp};
use crate::errors::ExprError;
use crate::tokenizer::Token;

/// Parser over a token list, with an explicit cursor
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    /// Create a parser over the given tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Parse the whole token list into an AST
    pub fn parse(mut self) -> Result<AstNode, ExprError> {
        let root = self.chain()?;
        if let Some(token) = self.peek() {
            return Err(ExprError::UnexpectedToken {
                expected: "end of expression".to_string(),
                was: token.to_string(),
            });
        }
        Ok(root)
    }

    fn chain(&mut self) -> Result<AstNode, ExprError> {
        let mut links = vec![self.expression()?];
        while matches!(self.peek(), Some(Token::Then)) {
            self.advance();
            links.push(self.expression()?);
        }
        if links.len() == 1 {
            // single-link chain degenerates to its one element
            Ok(links.remove(0))
        } else {
            Ok(AstNode::Chain(links))
        }
    }

    fn expression(&mut self) -> Result<AstNode, ExprError> {
        let mut lhs = self.value()?;
        loop {
            let op = match self.peek() {
                Some(Token::And) => BoolOp::And,
                Some(Token::Or) => BoolOp::Or,
                _ => break,
            };
            self.advance();
            let rhs = self.value()?;
            lhs = AstNode::expression(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn value(&mut self) -> Result<AstNode, ExprError> {
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some(Token::Not) => {
                self.advance();
                Ok(AstNode::not(self.value()?))
            }
            Some(Token::Locator(locator)) => {
                let leaf = AstNode::Leaf(locator.clone());
                self.advance();
                Ok(leaf)
            }
            Some(Token::LParen) => {
                self.advance();
                let node = self.chain()?;
                self.expect(&Token::RParen)?;
                Ok(node)
            }
            Some(_) => Err(ExprError::ExpectedValue),
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ExprError> {
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some(token) if token == expected => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(ExprError::UnexpectedToken {
                expected: expected.to_string(),
                was: token.to_string(),
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LocatorRegistry;
    use crate::tokenizer::Tokenizer;
    use crate::types::Locator;
    use spotter_core_types::Point;

    fn parse(input: &str) -> Result<AstNode, ExprError> {
        let registry = LocatorRegistry::new();
        let tokens = Tokenizer::new(&registry).tokenize(input)?;
        Parser::new(tokens).parse()
    }

    fn point_leaf(x: i32, y: i32) -> AstNode {
        AstNode::Leaf(Locator::Point(Point::new(x, y)))
    }

    #[test]
    fn and_or_fold_left_without_precedence() {
        let ast = parse("point:1,1 and point:2,2 or point:3,3").unwrap();
        assert_eq!(
            ast,
            AstNode::expression(
                AstNode::expression(point_leaf(1, 1), BoolOp::And, point_leaf(2, 2)),
                BoolOp::Or,
                point_leaf(3, 3),
            )
        );
    }

    #[test]
    fn not_stacks_right_associatively() {
        let ast = parse("!!!!!point:1,1").unwrap();
        let mut node = ast;
        for _ in 0..5 {
            node = match node {
                AstNode::Not(inner) => *inner,
                other => panic!("expected Not, got {:?}", other),
            };
        }
        assert_eq!(node, point_leaf(1, 1));
    }

    #[test]
    fn parentheses_group_without_wrapping() {
        assert_eq!(parse("(((point:1,1)))").unwrap(), point_leaf(1, 1));
    }

    #[test]
    fn chain_folds_links_in_order() {
        let ast = parse("point:1,1 then point:2,2 + point:3,3").unwrap();
        assert_eq!(
            ast,
            AstNode::Chain(vec![point_leaf(1, 1), point_leaf(2, 2), point_leaf(3, 3)])
        );
    }

    #[test]
    fn single_link_chain_is_its_element() {
        assert_eq!(parse("point:1,1").unwrap(), point_leaf(1, 1));
    }

    #[test]
    fn parenthesized_chain_nests() {
        let ast = parse("(point:1,1 then point:2,2) and point:3,3").unwrap();
        assert_eq!(
            ast,
            AstNode::expression(
                AstNode::Chain(vec![point_leaf(1, 1), point_leaf(2, 2)]),
                BoolOp::And,
                point_leaf(3, 3),
            )
        );
    }

    #[test]
    fn missing_value_fails() {
        assert_eq!(parse("and point:1,1"), Err(ExprError::ExpectedValue));
        assert_eq!(parse("point:1,1 and )"), Err(ExprError::ExpectedValue));
    }

    #[test]
    fn truncated_expression_fails() {
        assert_eq!(parse("point:1,1 and"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("(point:1,1"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("!"), Err(ExprError::UnexpectedEnd));
    }

    #[test]
    fn mismatched_closing_paren_reports_both_tokens() {
        assert_eq!(
            parse("(point:1,1 point:2,2)"),
            Err(ExprError::UnexpectedToken {
                expected: ")".to_string(),
                was: "point:2,2".to_string(),
            })
        );
    }

    #[test]
    fn trailing_tokens_fail() {
        assert_eq!(
            parse("point:1,1 ) point:2,2"),
            Err(ExprError::UnexpectedToken {
                expected: "end of expression".to_string(),
                was: ")".to_string(),
            })
        );
    }
}
