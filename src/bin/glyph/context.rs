use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use glyph::Puzzle;
use tempfile::NamedTempFile;

use crate::options::Options;

pub(crate) struct Context {
    options: Options,
}

impl Context {
    pub fn new(options: Options) -> Result<Self> {
        if let Some(path) = options.output_path() {
            if !path.exists() {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    if !parent.exists() {
                        bail!("Path does not exist: {}", parent.display());
                    }
                }
                fs::create_dir(&path)
                    .with_context(|| format!("Error creating output path: {}", path.display()))?;
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Saves the puzzle as `puzzle_<id>` in the output path, if there is one
    pub fn save_puzzle(&self, puzzle: &Puzzle) -> Result<Option<PathBuf>> {
        match self.options.output_path() {
            Some(dir) => write_puzzle(dir, puzzle).map(Some),
            None => Ok(None),
        }
    }
}

/// Writes through a temporary file so a partly written puzzle never appears.
/// Fails rather than replace an existing file.
fn write_puzzle(dir: &Path, puzzle: &Puzzle) -> Result<PathBuf> {
    let path = dir.join(format!("puzzle_{}", puzzle.id()));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Error creating file in {}", dir.display()))?;
    file.write_all(puzzle.to_string().as_bytes())?;
    file.persist_noclobber(&path)
        .with_context(|| format!("Error saving puzzle to {}", path.display()))?;
    Ok(path)
}
