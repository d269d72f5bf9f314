//! Expression tokenizer
//!
//! Greedy left-to-right scan over the operator grammar: `then`/`+`,
//! `and`/`&&`/`&`, `or`/`||`/`|`, `not`/`!`, parentheses, and locator
//! literals. Word operators only match on a boundary, so `thence` scans as
//! a literal. Locator literals are comma-joined runs of barewords and
//! double-quoted segments; each one is handed to the registry for parsing.

use crate::errors::ExprError;
use crate::registry::LocatorRegistry;
use crate::types::Locator;
use std::fmt;

/// Token enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Then,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Locator(Locator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Then => write!(f, "then"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Locator(locator) => write!(f, "{}", locator),
        }
    }
}

/// Tokenizer over a raw expression string
pub struct Tokenizer<'a> {
    registry: &'a LocatorRegistry,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer backed by the given literal registry
    pub fn new(registry: &'a LocatorRegistry) -> Self {
        Self { registry }
    }

    /// Scan the input into an ordered token list
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, ExprError> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut cursor = 0;

        while cursor < chars.len() {
            let ch = chars[cursor];
            if ch.is_whitespace() {
                cursor += 1;
                continue;
            }

            if let Some((token, width)) = scan_operator(&chars, cursor) {
                tokens.push(token);
                cursor += width;
                continue;
            }

            let end = scan_literal(&chars, cursor)?;
            if end == cursor {
                return Err(ExprError::UnknownToken(ch.to_string()));
            }
            let raw: String = chars[cursor..end].iter().collect();
            cursor = end;

            tokens.push(match raw.as_str() {
                "then" => Token::Then,
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                _ => Token::Locator(self.registry.parse_literal(&raw)?),
            });
        }

        if tokens.is_empty() {
            return Err(ExprError::EmptyExpression);
        }
        Ok(tokens)
    }
}

/// Match a symbol operator at the cursor, longest first
fn scan_operator(chars: &[char], cursor: usize) -> Option<(Token, usize)> {
    match (chars[cursor], chars.get(cursor + 1).copied()) {
        ('&', Some('&')) => Some((Token::And, 2)),
        ('|', Some('|')) => Some((Token::Or, 2)),
        ('&', _) => Some((Token::And, 1)),
        ('|', _) => Some((Token::Or, 1)),
        ('+', _) => Some((Token::Then, 1)),
        ('!', _) => Some((Token::Not, 1)),
        ('(', _) => Some((Token::LParen, 1)),
        (')', _) => Some((Token::RParen, 1)),
        _ => None,
    }
}

/// Scan a locator literal: comma-joined segments of barewords and quotes
///
/// Returns the exclusive end index. A comma only continues the literal when
/// another segment follows it.
fn scan_literal(chars: &[char], start: usize) -> Result<usize, ExprError> {
    let mut cursor = scan_segment(chars, start)?;
    if cursor == start {
        return Ok(start);
    }
    while cursor < chars.len() && chars[cursor] == ',' {
        let after = scan_segment(chars, cursor + 1)?;
        if after == cursor + 1 {
            break;
        }
        cursor = after;
    }
    Ok(cursor)
}

/// Scan one segment: a run of bareword characters and quoted strings
fn scan_segment(chars: &[char], start: usize) -> Result<usize, ExprError> {
    let mut cursor = start;
    while cursor < chars.len() {
        let ch = chars[cursor];
        if ch == '"' {
            let close = chars[cursor + 1..]
                .iter()
                .position(|&c| c == '"')
                .ok_or_else(|| {
                    ExprError::UnknownToken(chars[cursor..].iter().collect::<String>())
                })?;
            cursor += close + 2;
        } else if is_bareword_char(ch) {
            cursor += 1;
        } else {
            break;
        }
    }
    Ok(cursor)
}

/// Characters allowed in an unquoted literal segment
fn is_bareword_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')' | '"' | ',' | '&' | '|' | '!' | '+')
}
