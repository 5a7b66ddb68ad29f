use std::fmt;

use crate::puzzle::{Glyph, Operator, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Glyph(Glyph),
    Number(Value),
    Operator(Operator),
    LeftParen,
    RightParen,
    Equals,
    Question,
    Space,
}

impl Token {
    pub fn glyph(self) -> Option<Glyph> {
        match self {
            Token::Glyph(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Glyph(g) => write!(f, "{}", g),
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(o) => write!(f, "{}", o),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Equals => write!(f, "="),
            Token::Question => write!(f, "?"),
            Token::Space => write!(f, " "),
        }
    }
}
