//! Report type definitions for export settings.
//!
//! This module defines which parts of a game the text export includes:
//! the display filter for move and cube analysis, output units and the
//! number of digits printed for equities.

use crate::types::Skill;
use serde::{Deserialize, Serialize};

/// Unit for equity differences and luck values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnits {
    /// Raw cubeful equity: "+0.123"
    #[default]
    Equity,
    /// Match-winning chances in percent: "+1.234%"
    Mwc,
}

/// Which skill labels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillFilter {
    pub very_bad: bool,
    pub bad: bool,
    pub doubtful: bool,
    pub unmarked: bool,
}

impl Default for SkillFilter {
    fn default() -> Self {
        Self { very_bad: true, bad: true, doubtful: true, unmarked: false }
    }
}

impl SkillFilter {
    /// Show everything, including unmarked decisions
    pub fn all() -> Self {
        Self { very_bad: true, bad: true, doubtful: true, unmarked: true }
    }

    /// Show nothing
    pub fn none() -> Self {
        Self { very_bad: false, bad: false, doubtful: false, unmarked: false }
    }

    pub fn allows(&self, skill: Skill) -> bool {
        match skill {
            Skill::VeryBad => self.very_bad,
            Skill::Bad => self.bad,
            Skill::Doubtful => self.doubtful,
            Skill::None => self.unmarked,
        }
    }
}

/// Cube decisions shown, by skill and by decision category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeFilter {
    pub skills: SkillFilter,
    /// Decisions where the player actually doubled
    pub actual: bool,
    /// Decisions the engine marked as close
    pub close: bool,
    /// Doubles that should have been offered but were not
    pub missed: bool,
}

impl Default for CubeFilter {
    fn default() -> Self {
        Self { skills: SkillFilter::default(), actual: true, close: true, missed: true }
    }
}

/// Display-filter policy for one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFilter {
    /// Move analysis shown for these skill labels
    pub moves: SkillFilter,
    pub cube: CubeFilter,
    pub include_analysis: bool,
    pub include_annotations: bool,
    pub include_match_info: bool,
    pub include_statistics: bool,
    /// Ranked alternatives listed per move (best and played move always shown)
    pub max_moves: usize,
    /// Print win probabilities under each listed move
    pub move_probabilities: bool,
}

impl Default for DisplayFilter {
    fn default() -> Self {
        Self {
            moves: SkillFilter::default(),
            cube: CubeFilter::default(),
            include_analysis: true,
            include_annotations: true,
            include_match_info: true,
            include_statistics: true,
            max_moves: 5,
            move_probabilities: true,
        }
    }
}

/// Everything that shapes the text of an export.
///
/// Deserialized from the settings file:
///
/// ```toml
/// units = "mwc"
/// digits = 2
///
/// [filter]
/// max_moves = 3
///
/// [filter.moves]
/// unmarked = true
///
/// [filter.cube]
/// close = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub filter: DisplayFilter,
    pub units: OutputUnits,
    /// Decimal places for equities
    pub digits: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { filter: DisplayFilter::default(), units: OutputUnits::Equity, digits: 3 }
    }
}
