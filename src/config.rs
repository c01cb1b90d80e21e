/// Configuration resolution module
///
/// This module handles:
/// - Building ExportSettings from defaults, the settings file and CLI flags
/// - Locating and loading the match equity table
/// - Locating the stored-statistics file
/// - Choosing the message locale
use crate::cli::CliArgs;
use crate::history::JsonStatsStore;
use crate::locale::{Catalog, English, Locale};
use crate::met::MatchEquityTable;
use crate::report::{ExportSettings, OutputUnits};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Build the complete export settings from CLI arguments
///
/// Later layers win: built-in defaults, then the settings file, then
/// command-line flags. An explicit `--config` must exist; the default
/// location is only read when present.
pub fn build_settings(args: &CliArgs) -> Result<ExportSettings, String> {
    debug!("Building export settings from CLI args");

    let mut settings = match optional_path(args.config.as_ref(), args.get_config_path(), "settings file")? {
        Some(path) => load_settings_file(&path)?,
        None => ExportSettings::default(),
    };

    apply_overrides(&mut settings, args);
    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

/// Parse a TOML settings file; missing keys keep their defaults
pub fn load_settings_file(path: &Path) -> Result<ExportSettings, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let settings: ExportSettings =
        toml::from_str(&text).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Apply command-line flags on top of file settings
fn apply_overrides(settings: &mut ExportSettings, args: &CliArgs) {
    let filter = &mut settings.filter;
    if args.no_analysis {
        filter.include_analysis = false;
    }
    if args.no_annotations {
        filter.include_annotations = false;
    }
    if args.no_match_info {
        filter.include_match_info = false;
    }
    if args.no_statistics {
        filter.include_statistics = false;
    }
    if let Some(moves) = args.moves {
        filter.max_moves = moves;
    }
    if args.mwc {
        settings.units = OutputUnits::Mwc;
    }
    if let Some(digits) = args.digits {
        settings.digits = digits;
    }
}

/// Resolve a path that may be given explicitly or found at a default location
///
/// Returns `Ok(None)` when nothing was given and the default does not exist.
fn optional_path(explicit: Option<&PathBuf>, default: PathBuf, what: &str) -> Result<Option<PathBuf>, String> {
    match explicit {
        Some(path) if !path.exists() => Err(format!("{} {} does not exist", capitalize(what), path.display())),
        Some(path) => Ok(Some(path.clone())),
        None if default.exists() => {
            debug!("Using default {} at {:?}", what, default);
            Ok(Some(default))
        }
        None => Ok(None),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Load the match equity table, if one is configured
///
/// Without a table, MWC output falls back to equities.
pub fn load_met(args: &CliArgs) -> Result<Option<MatchEquityTable>, String> {
    optional_path(args.met.as_ref(), args.get_met_path(), "match equity table")?
        .map(|path| MatchEquityTable::load(&path))
        .transpose()
}

/// Open the stored-statistics file, if one is configured
///
/// A store that cannot be read is treated as empty.
pub fn open_stats_store(args: &CliArgs) -> Option<JsonStatsStore> {
    let path = args.stats_db.clone().or_else(|| Some(args.get_stats_path()).filter(|p| p.exists()))?;
    Some(JsonStatsStore::open(&path))
}

/// The message locale: a catalog from `--locale`, otherwise English
pub fn load_locale(args: &CliArgs) -> Result<Box<dyn Locale>, String> {
    match &args.locale {
        Some(path) => Ok(Box::new(Catalog::load(path)?)),
        None => Ok(Box::new(English)),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
