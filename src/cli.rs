use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Get the default configuration directory for gammon-report
/// Uses platform-specific config directories:
/// - Linux: ~/.config/gammon-report
/// - macOS: ~/Library/Application Support/gammon-report
/// - Windows: %APPDATA%/gammon-report
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir().map(|p| p.join("gammon-report")).unwrap_or_else(|| PathBuf::from(".gammon-report"))
}

/// What part of the match to export
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every game; one file per game when writing to a file
    #[default]
    Match,
    /// A single game
    Game,
    /// A single position
    Position,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "gammon-report")]
#[command(about = "Export analysed backgammon matches as plain-text reports")]
#[command(version)]
pub struct CliArgs {
    /// Match file to export (JSON)
    #[arg(value_name = "MATCH")]
    pub input: PathBuf,

    /// Output file, or "-" for standard output
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Export the whole match, one game, or one position
    #[arg(long, value_enum, default_value_t = Scope::Match)]
    pub scope: Scope,

    /// Game to export (1-based); defaults to the last game
    #[arg(long, short = 'g', value_name = "N")]
    pub game: Option<usize>,

    /// Record to show for --scope position (1-based); defaults to the end of the game
    #[arg(long, short = 'r', value_name = "N")]
    pub record: Option<usize>,

    /// Settings file (TOML)
    /// Default: ~/.config/gammon-report/config.toml when it exists
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stored player statistics (JSON)
    /// Default: ~/.config/gammon-report/stats.json when it exists
    #[arg(long, value_name = "PATH")]
    pub stats_db: Option<PathBuf>,

    /// Match equity table used for MWC output (JSON)
    /// Default: ~/.config/gammon-report/met.json when it exists
    #[arg(long, value_name = "PATH")]
    pub met: Option<PathBuf>,

    /// Message catalog for translated output (TOML)
    #[arg(long, value_name = "PATH")]
    pub locale: Option<PathBuf>,

    /// Overwrite existing files without asking
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Leave out cube and move analysis
    #[arg(long)]
    pub no_analysis: bool,

    /// Leave out record annotations
    #[arg(long)]
    pub no_annotations: bool,

    /// Leave out the match information block
    #[arg(long)]
    pub no_match_info: bool,

    /// Leave out game, match and stored statistics
    #[arg(long)]
    pub no_statistics: bool,

    /// Number of ranked moves listed per play
    #[arg(long, value_name = "N")]
    pub moves: Option<usize>,

    /// Show match winning chances instead of equities in match play
    #[arg(long)]
    pub mwc: bool,

    /// Decimal places for equities
    #[arg(long, value_name = "N")]
    pub digits: Option<usize>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        self.output_arg()?;

        if self.record.is_some() && self.scope != Scope::Position {
            return Err("--record can only be used with --scope position".to_string());
        }

        if self.game == Some(0) {
            return Err("Games are numbered from 1".to_string());
        }
        if self.record == Some(0) {
            return Err("Records are numbered from 1".to_string());
        }

        if self.moves == Some(0) {
            return Err("--moves must be at least 1".to_string());
        }
        if self.digits.is_some_and(|d| d > 6) {
            return Err("--digits must be between 0 and 6".to_string());
        }

        Ok(())
    }

    /// The destination argument; missing or blank is an error
    pub fn output_arg(&self) -> Result<&str, String> {
        match self.output.as_deref() {
            Some(out) if !out.trim().is_empty() => Ok(out),
            _ => Err("You must specify a file to export to".to_string()),
        }
    }

    /// 0-based game index, or `None` for the last game
    pub fn game_index(&self) -> Option<usize> {
        self.game.map(|g| g - 1)
    }

    /// 0-based record index
    pub fn record_index(&self) -> Option<usize> {
        self.record.map(|r| r - 1)
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| default_config_dir().join("config.toml"))
    }

    pub fn get_stats_path(&self) -> PathBuf {
        self.stats_db.clone().unwrap_or_else(|| default_config_dir().join("stats.json"))
    }

    pub fn get_met_path(&self) -> PathBuf {
        self.met.clone().unwrap_or_else(|| default_config_dir().join("met.json"))
    }
}
