//! Report generation module - text export of recorded games.
//!
//! This module handles:
//! - Export settings and the display filter
//! - Selecting which cube and move analysis to print
//! - Formatting decision points, analysis and statistics
//! - Traversing games and writing matches, games and positions
//!
//! Board diagrams are drawn by the board_format module.
//!
//! # Module Organization
//!
//! - `types` - Export settings (DisplayFilter, OutputUnits, ExportSettings)
//! - `units` - Equity vs. match-winning-chance formatting
//! - `select` - Cube/move analysis selection and beaver/raccoon memory
//! - `format` - Prologue, headers, board labels, match info, epilogue
//! - `analysis` - Action lines, cube analysis table, move analysis
//! - `stats` - Statistics aggregation and rendering
//! - `game` - Game and position traversal
//! - `export` - Destinations, file naming, overwrite confirmation

mod analysis;
mod export;
mod format;
mod game;
mod select;
mod stats;
mod types;
mod units;

// Re-export settings types
pub use types::{ExportSettings, OutputUnits};

// Re-export statistics
pub use stats::{StatisticsContext, update_from_game};

// Re-export traversal context
pub use game::ExportContext;

// Re-export export functions
pub use export::{
    AlwaysOverwrite, ConfirmOverwrite, Destination, ExportOutcome, export_game, export_match, export_position,
};
