//! Export of matches, games and positions to files or stdout.
//!
//! This module handles:
//! - Destination parsing ("-" is stdout)
//! - Per-game file names for multi-file match export
//! - Overwrite confirmation before the first write
//! - Opening, writing and closing each output
//!
//! Text is produced by the `game` module; nothing here formats.

use super::game::{ExportContext, GameExport, game_text, position_text};
use super::stats::StatisticsContext;
use crate::types::Match;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where export output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output; written to but never closed
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn parse(arg: &str) -> Result<Self, String> {
        match arg.trim() {
            "" => Err("You must specify a file to export to".to_string()),
            "-" => Ok(Destination::Stdout),
            path => Ok(Destination::File(PathBuf::from(path))),
        }
    }

    /// Destination of game `index` in a multi-file export
    pub fn for_game(&self, index: usize) -> Destination {
        match self {
            Destination::Stdout => Destination::Stdout,
            Destination::File(base) => Destination::File(filename_for_game(base, index)),
        }
    }

    /// Whether writing here would replace an existing file
    pub fn would_overwrite(&self) -> bool {
        match self {
            Destination::Stdout => false,
            Destination::File(path) => path.exists(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => write!(f, "-"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// File name for game `index` (0-based)
///
/// The first game keeps `base`; later games get a zero-padded index before
/// the extension: `match.txt`, `match_001.txt`, `match_002.txt`.
pub fn filename_for_game(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}_{:03}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{:03}", stem, index),
    };
    base.with_file_name(name)
}

/// Asks whether an existing file may be replaced
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

/// Overwrites without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl ConfirmOverwrite for AlwaysOverwrite {
    fn confirm_overwrite(&self, _path: &Path) -> bool {
        true
    }
}

/// Result of an export that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Destinations written, in order
    Written(Vec<Destination>),
    /// The user declined to overwrite; nothing was written
    Declined,
}

/// Ask before the first write; `false` means the export must stop
fn confirm(dest: &Destination, prompt: &dyn ConfirmOverwrite) -> bool {
    match dest {
        Destination::File(path) if dest.would_overwrite() => prompt.confirm_overwrite(path),
        _ => true,
    }
}

/// Write `text` to `dest`, opening and releasing the handle around the write
fn write_text(dest: &Destination, text: &str) -> Result<(), String> {
    debug!("Writing {} bytes to {}", text.len(), dest);
    match dest {
        Destination::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
        Destination::File(path) => {
            let file = File::create(path).map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(text.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
        }
    }
}

fn check_game_index(m: &Match, index: usize) -> Result<(), String> {
    if m.games.is_empty() {
        return Err("No games in match".to_string());
    }
    if index >= m.games.len() {
        return Err(format!("Game {} does not exist (match has {} games)", index + 1, m.games.len()));
    }
    Ok(())
}

/// Export every game of a match
///
/// A file destination gets one file per game, each a complete document.
/// Stdout gets all games in one stream, with the epilogue after the last.
/// Files written before a failure are left in place.
pub fn export_match(
    m: &Match,
    dest: &Destination,
    overwrite: &dyn ConfirmOverwrite,
    ctx: &ExportContext<'_>,
) -> Result<ExportOutcome, String> {
    check_game_index(m, 0)?;
    if !confirm(dest, overwrite) {
        return Ok(ExportOutcome::Declined);
    }

    let mut totals = StatisticsContext::new();
    let mut written = Vec::with_capacity(m.games.len());
    let last = m.games.len() - 1;
    for (index, game) in m.games.iter().enumerate() {
        let target = dest.for_game(index);
        let job = GameExport {
            index,
            is_last: index == last,
            with_epilogue: index == last || target != Destination::Stdout,
        };
        let text = game_text(game, job, &mut totals, ctx);
        write_text(&target, &text)?;
        written.push(target);
    }
    Ok(ExportOutcome::Written(written))
}

/// Export one game (0-based `index`) as a standalone document
pub fn export_game(
    m: &Match,
    index: usize,
    dest: &Destination,
    overwrite: &dyn ConfirmOverwrite,
    ctx: &ExportContext<'_>,
) -> Result<ExportOutcome, String> {
    check_game_index(m, index)?;
    if !confirm(dest, overwrite) {
        return Ok(ExportOutcome::Declined);
    }

    let job = GameExport { index, is_last: false, with_epilogue: true };
    let text = game_text(&m.games[index], job, &mut StatisticsContext::new(), ctx);
    write_text(dest, &text)?;
    Ok(ExportOutcome::Written(vec![dest.clone()]))
}

/// Export one position of game `index`; see [`position_text`] for `record`
pub fn export_position(
    m: &Match,
    index: usize,
    record: Option<usize>,
    dest: &Destination,
    overwrite: &dyn ConfirmOverwrite,
    ctx: &ExportContext<'_>,
) -> Result<ExportOutcome, String> {
    check_game_index(m, index)?;
    let text = position_text(&m.games[index], index, record, ctx)?;
    if !confirm(dest, overwrite) {
        return Ok(ExportOutcome::Declined);
    }

    write_text(dest, &text)?;
    Ok(ExportOutcome::Written(vec![dest.clone()]))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
