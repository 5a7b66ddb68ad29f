use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, ParseErrorType};
use crate::parse::Token;
use crate::puzzle::Operator;

pub type IndexedToken = (usize, Token);

pub struct TokenIterator<'a> {
    chars: Peekable<CharIndices<'a>>,
    offset: usize,
}

impl<'a> TokenIterator<'a> {
    /// Token indices are reported relative to the start of a larger input
    pub fn with_offset(s: &'a str, offset: usize) -> Self {
        TokenIterator {
            chars: s.char_indices().peekable(),
            offset,
        }
    }

    pub fn next_skip_space(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        loop {
            match self.next() {
                Ok(Some((_, Token::Space))) => {}
                next => return next,
            }
        }
    }

    pub fn next(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        let (idx, c) = match self.chars.peek() {
            Some(&v) => v,
            None => return Ok(None),
        };
        let index = self.offset + idx;
        self.chars.next();
        let token = if c.is_whitespace() {
            while self.chars.peek().map_or(false, |&(_, c)| c.is_whitespace()) {
                self.chars.next();
            }
            Token::Space
        } else if c.is_ascii_digit() {
            let mut s = c.to_string();
            while let Some(&(_, c)) = self.chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                s.push(c);
                self.chars.next();
            }
            match s.parse() {
                Ok(n) => Token::Number(n),
                Err(_) => return Err(ParseError::new(ParseErrorType::InvalidNumber, s, index)),
            }
        } else if let Some(o) = Operator::from_symbol(c) {
            Token::Operator(o)
        } else {
            match c {
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '=' => Token::Equals,
                '?' => Token::Question,
                c if is_glyph(c) => Token::Glyph(c),
                c => return Err(ParseError::new(ParseErrorType::InvalidToken, c, index)),
            }
        };
        Ok(Some((index, token)))
    }
}

/// Any visible character that is not part of the clue syntax
pub fn is_glyph(c: char) -> bool {
    !(c.is_whitespace()
        || c.is_control()
        || c.is_ascii_digit()
        || c.is_ascii_punctuation()
        || Operator::from_symbol(c).is_some())
}
