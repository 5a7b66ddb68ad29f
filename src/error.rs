use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

use crate::puzzle::Glyph;

/// The requested puzzle size can not be generated from the catalogs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("difficulty unavailable: minimum size {min} is greater than maximum size {max}")]
    RangeInverted { min: usize, max: usize },
    #[error("difficulty unavailable: {requested} glyphs requested, at least {min} are needed")]
    TooFewGlyphs { requested: usize, min: usize },
    #[error("difficulty unavailable: {requested} glyphs requested, only {available} exist")]
    TooManyGlyphs { requested: usize, available: usize },
    #[error("difficulty unavailable: {requested} values requested, only {available} exist")]
    TooFewValues { requested: usize, available: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("clues do not determine the value of {}", glyph_list(.unsolved))]
    Unsolvable { unsolved: Vec<Glyph> },
    #[error("clue contradicts the deduced values: {clue}")]
    Contradiction { clue: String },
    #[error("clue has no positive integer solution for {glyph}: {clue}")]
    Unsatisfiable { glyph: Glyph, clue: String },
}

fn glyph_list(glyphs: &[Glyph]) -> String {
    itertools::join(glyphs, ", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid puzzle: {}", msg)]
pub struct InvalidPuzzle {
    msg: String,
}

impl InvalidPuzzle {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl From<SolveError> for InvalidPuzzle {
    fn from(error: SolveError) -> Self {
        Self::new(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum PuzzleFromFileError {
    #[error("error reading puzzle file")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParsePuzzleError),
}

#[derive(Debug, Error)]
pub enum ParsePuzzleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    InvalidPuzzle(#[from] InvalidPuzzle),
}

pub const UNEXPECTED_END: ParseError = ParseError::from_type(ParseErrorType::UnexpectedEnd);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct ParseError {
    error_type: ParseErrorType,
    token: Option<String>,
    index: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(error_type: ParseErrorType, token: impl Display, index: usize) -> Self {
        Self {
            error_type,
            token: Some(token.to_string()),
            index: Some(index),
        }
    }

    pub(crate) const fn from_type(error_type: ParseErrorType) -> Self {
        Self {
            error_type,
            token: None,
            index: None,
        }
    }

    pub fn error_type(&self) -> ParseErrorType {
        self.error_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
    DuplicateGlyph,
    InvalidId,
    InvalidNumber,
    InvalidToken,
    MissingQuestion,
    UnexpectedEnd,
    UnexpectedToken,
    UnrecognizedClue,
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorType::DuplicateGlyph => "Duplicate glyph",
            ParseErrorType::InvalidId => "Invalid puzzle id",
            ParseErrorType::InvalidNumber => "Invalid number",
            ParseErrorType::InvalidToken => "Invalid token",
            ParseErrorType::MissingQuestion => "Missing question clue",
            ParseErrorType::UnexpectedEnd => "Unexpected end",
            ParseErrorType::UnexpectedToken => "Unexpected token",
            ParseErrorType::UnrecognizedClue => "Unrecognized clue",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        if let Some(index) = &self.index {
            write!(f, " at {}", index)?;
        }
        Ok(())
    }
}
