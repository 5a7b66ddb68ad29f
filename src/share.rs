//! Daily and practice seeds, and the text players share after a game

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate, Utc};
use itertools::Itertools;

use crate::puzzle::{Puzzle, PuzzleId, Value};

pub const MAX_GUESSES: usize = 3;

const HASHTAG: &str = "#playglyph";
const URL: &str = "https://play-glyph.com";
const CORRECT: char = '🟩';
const WRONG: char = '⬛';

/// The seed of the puzzle for `date`, written as `YYYYMMDD`
pub fn daily_seed(date: NaiveDate) -> PuzzleId {
    let year = u64::try_from(date.year()).unwrap_or_default();
    year * 10000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

/// The seed of today's puzzle in UTC
pub fn today_seed() -> PuzzleId {
    daily_seed(Utc::now().date_naive())
}

/// A seed from the current time, in milliseconds since the epoch
pub fn practice_seed() -> PuzzleId {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// The date of a daily seed, or `None` if the seed is not a date
pub fn daily_date(seed: PuzzleId) -> Option<NaiveDate> {
    if !(10_000_101..=99_991_231).contains(&seed) {
        return None;
    }
    let year = i32::try_from(seed / 10000).ok()?;
    let month = u32::try_from(seed / 100 % 100).ok()?;
    let day = u32::try_from(seed % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The result of one game, rendered as share text by `Display`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareCard {
    puzzle_id: PuzzleId,
    solution: Value,
    guesses: Vec<Value>,
}

impl ShareCard {
    /// The game ends at the first correct guess, and only the first `MAX_GUESSES` guesses count
    pub fn new(puzzle_id: PuzzleId, solution: Value, mut guesses: Vec<Value>) -> Self {
        if let Some(i) = guesses.iter().position(|&guess| guess == solution) {
            guesses.truncate(i + 1);
        }
        guesses.truncate(MAX_GUESSES);
        Self {
            puzzle_id,
            solution,
            guesses,
        }
    }

    pub fn for_puzzle(puzzle: &Puzzle, guesses: Vec<Value>) -> Self {
        Self::new(puzzle.id(), puzzle.solution(), guesses)
    }

    pub fn guesses(&self) -> &[Value] {
        &self.guesses
    }

    pub fn is_win(&self) -> bool {
        self.guesses.contains(&self.solution)
    }

    /// `S/3` on a win or `X/3` otherwise
    pub fn score(&self) -> String {
        if self.is_win() {
            format!("{}/{}", self.guesses.len(), MAX_GUESSES)
        } else {
            format!("X/{}", MAX_GUESSES)
        }
    }

    fn squares(&self) -> String {
        self.guesses
            .iter()
            .map(|&guess| if guess == self.solution { CORRECT } else { WRONG })
            .collect()
    }
}

impl Display for ShareCard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let date = daily_date(self.puzzle_id)
            .map(|date| date.format("(%d.%m.%y)").to_string());
        let parts = std::iter::once(HASHTAG.to_string())
            .chain(date)
            .chain(vec![self.score(), self.squares(), URL.to_string()]);
        write!(f, "{}", parts.format(" "))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{daily_date, daily_seed, practice_seed, ShareCard};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_seeds() {
        assert_eq!(20250101, daily_seed(date(2025, 1, 1)));
        assert_eq!(20241231, daily_seed(date(2024, 12, 31)));
        assert_eq!(Some(date(2025, 1, 1)), daily_date(20250101));
        assert_eq!(None, daily_date(20250230));
        assert_eq!(None, daily_date(42));
        assert_eq!(None, daily_date(practice_seed()));
    }

    #[test]
    fn win() {
        let card = ShareCard::new(20250101, 11, vec![9, 11]);
        assert!(card.is_win());
        assert_eq!(
            "#playglyph (01.01.25) 2/3 ⬛🟩 https://play-glyph.com",
            card.to_string()
        );
    }

    #[test]
    fn loss() {
        let card = ShareCard::new(20250314, 11, vec![1, 2, 3, 4]);
        assert!(!card.is_win());
        assert_eq!(3, card.guesses().len());
        assert_eq!(
            "#playglyph (14.03.25) X/3 ⬛⬛⬛ https://play-glyph.com",
            card.to_string()
        );
    }

    #[test]
    fn guesses_after_a_win_are_ignored() {
        let card = ShareCard::new(20250101, 11, vec![11, 5]);
        assert_eq!(&[11], card.guesses());
        assert_eq!(
            "#playglyph (01.01.25) 1/3 🟩 https://play-glyph.com",
            card.to_string()
        );
        let card = ShareCard::new(20250101, 11, vec![3, 11, 11]);
        assert_eq!("2/3", card.score());
    }

    #[test]
    fn practice_has_no_date() {
        let card = ShareCard::new(1_735_689_600_000, 7, vec![7]);
        assert_eq!("#playglyph 1/3 🟩 https://play-glyph.com", card.to_string());
    }
}
