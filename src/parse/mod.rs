//! Parse clues and puzzles from text

use itertools::Itertools;
use linked_hash_map::LinkedHashMap;

use crate::error::{
    InvalidPuzzle, ParseError, ParseErrorType::*, ParsePuzzleError, UNEXPECTED_END,
};
use crate::puzzle::{Clue, Glyph, Operator, Puzzle, PuzzleId, ScaledLayout, Value};
use crate::solve::Solver;
use token_iterator::TokenIterator;

pub(crate) use token::Token;

mod token;
mod token_iterator;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

const PLUS: Token = Token::Operator(Operator::Add);
const MINUS: Token = Token::Operator(Operator::Subtract);
const TIMES: Token = Token::Operator(Operator::Multiply);

/// parse a single `Clue` in the form produced by its `Display` implementation
pub fn parse_clue(s: &str) -> Result<Clue> {
    parse_clue_at(s, 0)
}

fn parse_clue_at(s: &str, offset: usize) -> Result<Clue> {
    let mut iter = TokenIterator::with_offset(s, offset);
    let mut tokens = Vec::new();
    while let Some((_, token)) = iter.next_skip_space()? {
        tokens.push(token);
    }
    if tokens.is_empty() {
        return Err(UNEXPECTED_END);
    }
    let clue = match *tokens.as_slice() {
        [Token::Glyph(a), TIMES, Token::Glyph(b), Token::Equals, Token::Number(product)]
            if a == b =>
        {
            Clue::Square { glyph: a, product }
        }
        [Token::Glyph(glyph), PLUS, Token::Glyph(other), Token::Equals, Token::Number(total)]
            if glyph != other =>
        {
            Clue::Sum {
                glyph,
                other,
                total,
            }
        }
        [
            Token::Glyph(first),
            PLUS,
            Token::Glyph(second),
            PLUS,
            Token::Glyph(glyph),
            Token::Equals,
            Token::Number(total),
        ] if distinct(&[first, second, glyph]) => Clue::TripleSum {
            first,
            second,
            glyph,
            total,
        },
        [
            Token::LeftParen,
            Token::Number(m1),
            TIMES,
            Token::Glyph(first),
            Token::RightParen,
            PLUS,
            Token::LeftParen,
            Token::Number(m2),
            TIMES,
            Token::Glyph(second),
            Token::RightParen,
            Token::Equals,
            Token::Glyph(glyph),
        ] if distinct(&[first, second, glyph]) => Clue::Combination {
            terms: [(m1, first), (m2, second)],
            glyph,
        },
        [
            Token::LeftParen,
            Token::Number(multiplier),
            TIMES,
            Token::Glyph(glyph),
            Token::RightParen,
            PLUS,
            Token::Glyph(other),
            Token::Equals,
            Token::Number(total),
        ] if glyph != other => scaled(glyph, multiplier, other, total, ScaledLayout::ScaledFirst),
        [
            Token::Glyph(other),
            PLUS,
            Token::LeftParen,
            Token::Number(multiplier),
            TIMES,
            Token::Glyph(glyph),
            Token::RightParen,
            Token::Equals,
            Token::Number(total),
        ] if glyph != other => scaled(glyph, multiplier, other, total, ScaledLayout::ScaledLast),
        [
            Token::LeftParen,
            Token::Number(multiplier),
            TIMES,
            Token::Glyph(glyph),
            Token::RightParen,
            Token::Equals,
            Token::Number(total),
            MINUS,
            Token::Glyph(other),
        ] if glyph != other => scaled(glyph, multiplier, other, total, ScaledLayout::Isolated),
        [
            Token::Number(total),
            MINUS,
            Token::Glyph(other),
            Token::Equals,
            Token::LeftParen,
            Token::Number(multiplier),
            TIMES,
            Token::Glyph(glyph),
            Token::RightParen,
        ] if glyph != other => scaled(glyph, multiplier, other, total, ScaledLayout::Reversed),
        [Token::Glyph(glyph), Token::Equals, Token::Question] => Clue::Question { glyph },
        _ => return Err(ParseError::new(UnrecognizedClue, s.trim(), offset)),
    };
    Ok(clue)
}

fn scaled(
    glyph: Glyph,
    multiplier: Value,
    other: Glyph,
    total: Value,
    layout: ScaledLayout,
) -> Clue {
    Clue::Scaled {
        glyph,
        multiplier,
        other,
        total,
        layout,
    }
}

fn distinct(glyphs: &[Glyph]) -> bool {
    glyphs.iter().unique().count() == glyphs.len()
}

/// parse a `Puzzle` from a string: the id, the glyphs (question glyph first), then one clue per
/// line.
///
/// The values are recovered by solving the clues, so the clues must determine every glyph.
pub fn parse_puzzle(s: &str) -> Result<Puzzle, ParsePuzzleError> {
    let mut lines = lines_with_offsets(s).filter(|(_, line)| !line.trim().is_empty());
    let (offset, line) = lines.next().ok_or(UNEXPECTED_END)?;
    let id = parse_id(line, offset)?;
    let (offset, line) = lines.next().ok_or(UNEXPECTED_END)?;
    let glyphs = parse_glyphs(line, offset)?;
    let clues: Vec<Clue> = lines
        .map(|(offset, line)| parse_clue_at(line, offset))
        .collect::<Result<_>>()?;
    let question = match clues.last() {
        Some(&Clue::Question { glyph }) => glyph,
        _ => return Err(ParseError::from_type(MissingQuestion).into()),
    };
    check_clues(&glyphs, &clues, question)?;
    let values = solve_values(&glyphs, &clues)?;
    let solution = values[&question];
    Ok(Puzzle::new(id, glyphs, values, clues, solution))
}

fn lines_with_offsets(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.split('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len() + 1;
        Some((start, line.trim_end_matches('\r')))
    })
}

fn parse_id(line: &str, offset: usize) -> Result<PuzzleId> {
    let trimmed = line.trim();
    let index = offset + line.len() - line.trim_start().len();
    trimmed
        .parse()
        .map_err(|_| ParseError::new(InvalidId, trimmed, index))
}

fn parse_glyphs(line: &str, offset: usize) -> Result<Vec<Glyph>> {
    let mut iter = TokenIterator::with_offset(line, offset);
    let mut glyphs = Vec::new();
    while let Some((index, token)) = iter.next_skip_space()? {
        let glyph = token
            .glyph()
            .ok_or_else(|| ParseError::new(UnexpectedToken, token, index))?;
        if glyphs.contains(&glyph) {
            return Err(ParseError::new(DuplicateGlyph, glyph, index));
        }
        glyphs.push(glyph);
    }
    if glyphs.is_empty() {
        return Err(UNEXPECTED_END);
    }
    Ok(glyphs)
}

fn check_clues(glyphs: &[Glyph], clues: &[Clue], question: Glyph) -> Result<(), InvalidPuzzle> {
    if question != glyphs[0] {
        return Err(InvalidPuzzle::new(format!(
            "question glyph {} must be listed first",
            question
        )));
    }
    let equations = &clues[..clues.len() - 1];
    if equations.iter().any(Clue::is_question) {
        return Err(InvalidPuzzle::new("more than one question clue"));
    }
    if equations.len() != glyphs.len() {
        return Err(InvalidPuzzle::new(format!(
            "{} glyphs but {} equation clues",
            glyphs.len(),
            equations.len()
        )));
    }
    if let Some(glyph) = clues
        .iter()
        .flat_map(Clue::glyphs)
        .find(|glyph| !glyphs.contains(glyph))
    {
        return Err(InvalidPuzzle::new(format!(
            "clue mentions unlisted glyph {}",
            glyph
        )));
    }
    Ok(())
}

fn solve_values(
    glyphs: &[Glyph],
    clues: &[Clue],
) -> Result<LinkedHashMap<Glyph, Value>, InvalidPuzzle> {
    let solution = Solver::new(clues).solve()?;
    let mut values = LinkedHashMap::new();
    for &glyph in glyphs {
        let value = solution
            .value(glyph)
            .ok_or_else(|| InvalidPuzzle::new(format!("no clue determines {}", glyph)))?;
        if values.values().any(|&v| v == value) {
            return Err(InvalidPuzzle::new(format!(
                "{} shares the value {} with another glyph",
                glyph, value
            )));
        }
        values.insert(glyph, value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use crate::error::{ParseError, ParseErrorType, ParsePuzzleError};
    use crate::parse::{parse_clue, parse_puzzle};
    use crate::puzzle::{Clue, ScaledLayout};

    const PUZZLE: &str = "\
        42\n\
        ■ ● ▲\n\
        ▲ × ▲ = 49\n\
        (2 × ■) + ● = 34\n\
        ● + ▲ = 19\n\
        ■ = ?\n";

    #[test]
    fn empty() {
        assert!(parse_clue("").is_err());
        assert!(parse_puzzle("").is_err());
    }

    #[test]
    fn clue_shapes() {
        let clues = [
            "■ × ■ = 49",
            "● + ■ = 19",
            "■ + ● + ▲ = 30",
            "(2 × ■) + (3 × ●) = ▲",
            "(3 × ◆) + ★ = 41",
            "★ + (3 × ◆) = 41",
            "(3 × ◆) = 41 - ★",
            "41 - ★ = (3 × ◆)",
            "▲ = ?",
        ];
        for &s in &clues {
            assert_eq!(s, parse_clue(s).unwrap().to_string());
        }
    }

    #[test]
    fn loose_spacing() {
        assert_eq!(
            Clue::Scaled {
                glyph: '◆',
                multiplier: 3,
                other: '★',
                total: 41,
                layout: ScaledLayout::Reversed,
            },
            parse_clue("  41-★=(3*◆) ").unwrap()
        );
    }

    #[test]
    fn unrecognized() {
        let error = parse_clue("■ + ■ = 4").unwrap_err();
        assert_eq!(ParseErrorType::UnrecognizedClue, error.error_type());
        let error = parse_clue("■ × ● = 4").unwrap_err();
        assert_eq!(ParseErrorType::UnrecognizedClue, error.error_type());
        assert!(parse_clue("■ = 4 ?").is_err());
    }

    #[test]
    fn puzzle() {
        let puzzle = parse_puzzle(PUZZLE).unwrap();
        assert_eq!(42, puzzle.id());
        assert_eq!(&['■', '●', '▲'], puzzle.glyphs());
        assert_eq!(Some(11), puzzle.value('■'));
        assert_eq!(Some(12), puzzle.value('●'));
        assert_eq!(Some(7), puzzle.value('▲'));
        assert_eq!(11, puzzle.solution());
        assert_eq!(PUZZLE, puzzle.to_string());
    }

    #[test]
    fn missing_question() {
        let s = PUZZLE.replace("■ = ?\n", "");
        match parse_puzzle(&s) {
            Err(ParsePuzzleError::Parse(e)) => {
                assert_eq!(ParseErrorType::MissingQuestion, e.error_type())
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn clue_error_index() {
        let s = PUZZLE.replace("● + ▲ = 19", "● + ▲ = ;");
        let index = s.find(';').unwrap();
        match parse_puzzle(&s) {
            Err(ParsePuzzleError::Parse(e)) => {
                assert_eq!(ParseError::new(ParseErrorType::InvalidToken, ';', index), e)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_puzzles() {
        let unlisted = PUZZLE.replace("● + ▲ = 19", "● + ◆ = 19");
        let unsolvable = PUZZLE.replace("▲ × ▲ = 49", "■ + ▲ = 18");
        let question_not_first = PUZZLE.replace("■ = ?", "● = ?");
        let contradiction = PUZZLE.replace("● + ▲ = 19", "● + ▲ = 20");
        for s in &[unlisted, unsolvable, question_not_first, contradiction] {
            match parse_puzzle(s) {
                Err(ParsePuzzleError::InvalidPuzzle(_)) => {}
                other => panic!("expected an invalid puzzle: {:?}", other),
            }
        }
    }

    #[test]
    fn duplicate_glyph() {
        let s = PUZZLE.replace("■ ● ▲", "■ ● ■");
        match parse_puzzle(&s) {
            Err(ParsePuzzleError::Parse(e)) => {
                assert_eq!(ParseErrorType::DuplicateGlyph, e.error_type())
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
