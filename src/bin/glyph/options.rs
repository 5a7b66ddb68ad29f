use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use glyph::share::{daily_seed, practice_seed, today_seed, MAX_GUESSES};
use glyph::{GenerateOptions, PuzzleId, Value};

#[derive(Clone)]
pub(crate) struct Options {
    output_path: Option<PathBuf>,
    source: Source,
    solve: bool,
    reveal: bool,
    json: bool,
    guesses: Vec<Value>,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else {
            let seed = if let Some(s) = matches.value_of("seed") {
                parse_value(s, "seed")?
            } else if matches.is_present("practice") {
                practice_seed()
            } else if let Some(s) = matches.value_of("daily") {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("invalid date: {}", s))?;
                daily_seed(date)
            } else {
                today_seed()
            };
            let mut options = GenerateOptions::default().with_easy(matches.is_present("easy"));
            if let (Some(min), Some(max)) = (matches.value_of("min"), matches.value_of("max")) {
                let (min, max) = (parse_value(min, "min")?, parse_value(max, "max")?);
                options = options.with_difficulty(min..=max);
            }
            Source::Generate(Generate {
                seed,
                count: matches
                    .value_of("count")
                    .map_or(Ok(1), |s| parse_value(s, "count"))?,
                options,
            })
        };
        let guesses = matches
            .values_of("guess")
            .into_iter()
            .flatten()
            .map(|s| parse_value(s, "guess"))
            .collect::<Result<Vec<Value>>>()?;
        if guesses.len() > MAX_GUESSES {
            bail!("at most {} guesses are allowed", MAX_GUESSES);
        }
        Ok(Self {
            output_path: matches.value_of("output_path").map(PathBuf::from),
            source,
            solve: matches.is_present("solve"),
            reveal: matches.is_present("reveal"),
            json: matches.is_present("json"),
            guesses,
        })
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn solve(&self) -> bool {
        self.solve
    }

    pub fn reveal(&self) -> bool {
        self.reveal
    }

    pub fn json(&self) -> bool {
        self.json
    }

    /// guesses to score in share text
    pub fn guesses(&self) -> &[Value] {
        &self.guesses
    }
}

fn parse_value<T: FromStr>(s: &str, name: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse()
        .with_context(|| format!("invalid {}: {}", name, s))
}

#[derive(Clone)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(Generate),
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub seed: PuzzleId,
    pub count: u64,
    pub options: GenerateOptions,
}

impl Generate {
    /// consecutive seeds starting from `seed`
    pub fn seeds(&self) -> Result<RangeInclusive<PuzzleId>> {
        let last = self
            .count
            .checked_sub(1)
            .and_then(|n| self.seed.checked_add(n));
        match last {
            Some(last) => Ok(self.seed..=last),
            None => bail!("cannot generate {} puzzles from seed {}", self.count, self.seed),
        }
    }
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, Arg, ArgGroup};

    App::new("Glyph")
        .about("Generate and solve glyph puzzles")
        .group(ArgGroup::with_name("source").args(&["seed", "daily", "practice", "input"]))
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .help("generate the puzzle for a seed")
                .display_order(1),
        )
        .arg(
            Arg::with_name("daily")
                .short("d")
                .long("daily")
                .takes_value(true)
                .min_values(0)
                .value_name("YYYY-MM-DD")
                .help("generate the daily puzzle for a date (today by default)")
                .display_order(1),
        )
        .arg(
            Arg::with_name("practice")
                .short("p")
                .long("practice")
                .help("generate a practice puzzle from the current time")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read a glyph puzzle from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("min")
                .long("min")
                .takes_value(true)
                .value_name("N")
                .requires("max")
                .conflicts_with("input")
                .help("the fewest glyphs in a generated puzzle"),
        )
        .arg(
            Arg::with_name("max")
                .long("max")
                .takes_value(true)
                .value_name("N")
                .requires("min")
                .conflicts_with("input")
                .help("the most glyphs in a generated puzzle"),
        )
        .arg(
            Arg::with_name("easy")
                .short("e")
                .long("easy")
                .conflicts_with("input")
                .help("only use square and sum clues"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .conflicts_with("input")
                .help("the number of puzzles to generate from consecutive seeds"),
        )
        .arg(
            Arg::with_name("solve")
                .short("s")
                .long("solve")
                .help("solve the puzzle(s) by deduction"),
        )
        .arg(
            Arg::with_name("reveal")
                .short("r")
                .long("reveal")
                .help("print the value of every glyph except the question"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print puzzles as JSON"),
        )
        .arg(
            Arg::with_name("guess")
                .short("g")
                .long("guess")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("N")
                .help("score a guess and print share text (up to 3)"),
        )
        .arg(
            Arg::with_name("output_path")
                .long("output-path")
                .short("o")
                .takes_value(true)
                .value_name("DIR")
                .help("directory to save puzzle files"),
        )
}
