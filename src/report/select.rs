//! Cube and move analysis selection.
//!
//! This module handles:
//! - Deciding per record whether cube analysis is printed
//! - Deciding whether move analysis is printed
//! - Beaver/raccoon detection across a Double → Take/Drop pair
//!
//! Every decision here is a pure function of its inputs. The only memory is
//! [`CubeExchange`], which the game exporter owns and threads through the
//! records of one game.

use super::types::DisplayFilter;
use crate::state::MatchState;
use crate::types::{CubeDecision, Decision, Skill};

/// Kind of double, seen from the state just before the `Double` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleType {
    #[default]
    Normal,
    /// The doubled player turns the cube straight back
    Beaver,
    /// The original doubler turns a beavered cube again
    Raccoon,
}

impl DoubleType {
    pub fn classify(state: &MatchState) -> Self {
        if !state.doubled {
            DoubleType::Normal
        } else if state.turn != state.on_move {
            DoubleType::Beaver
        } else {
            DoubleType::Raccoon
        }
    }
}

/// Double type remembered from a `Double` record until its response
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeExchange {
    pending: DoubleType,
}

impl CubeExchange {
    /// Classify `decision` and update the remembered double type
    ///
    /// `state` must be the state before the record is applied. A `Take` or
    /// `Drop` reports the type of the double it answers and closes the
    /// exchange.
    pub fn advance(&mut self, decision: &Decision<'_>, state: &MatchState) -> DoubleType {
        match decision {
            Decision::Normal(_) => {
                self.pending = DoubleType::Normal;
                DoubleType::Normal
            }
            Decision::Double(_) => {
                self.pending = DoubleType::classify(state);
                self.pending
            }
            Decision::Take(_) | Decision::Drop(_) => std::mem::take(&mut self.pending),
        }
    }
}

/// How a cube decision came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeDecisionContext {
    /// The player actually doubled
    pub doubled: bool,
    /// Skill label of the doubling decision; `Skill::None` when not judged
    pub double_skill: Skill,
    /// Skill label of the take/drop decision; `Skill::None` when not judged
    pub take_skill: Skill,
}

/// Whether the full cube analysis table is printed for a decision
pub fn should_show_cube_analysis(decision: &CubeDecision, ctx: &CubeDecisionContext, filter: &DisplayFilter) -> bool {
    if decision.evaluation.method.is_none() {
        return false;
    }

    let cube = &filter.cube;
    let actual = ctx.doubled;
    let missed = decision.missed_double && !ctx.doubled;

    (actual && cube.actual)
        || (decision.close && cube.close)
        || (missed && cube.missed)
        || cube.skills.allows(ctx.double_skill)
        || cube.skills.allows(ctx.take_skill)
}

/// Whether move analysis is printed for a move with this skill label
pub fn should_show_move_analysis(skill: Skill, filter: &DisplayFilter) -> bool {
    filter.moves.allows(skill)
}

/// What the cube part of a record's analysis shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CubeSection<'a> {
    Hidden,
    /// Fixed notice for beavers and raccoons
    CannotAnalyse,
    Table {
        decision: &'a CubeDecision,
        doubled: bool,
        /// `Some(true)` for a take, `Some(false)` for a drop
        take: Option<bool>,
    },
}

/// Select the cube section for a decision record
pub fn cube_section<'a>(decision: &Decision<'a>, double_type: DoubleType, filter: &DisplayFilter) -> CubeSection<'a> {
    let (cube, ctx, take) = match *decision {
        Decision::Normal(mv) => {
            let ctx = CubeDecisionContext { doubled: false, double_skill: mv.cube_skill, take_skill: Skill::None };
            (mv.cube.as_ref(), ctx, None)
        }
        Decision::Double(action) => {
            if double_type != DoubleType::Normal {
                return CubeSection::CannotAnalyse;
            }
            let ctx = CubeDecisionContext { doubled: true, double_skill: action.skill, take_skill: Skill::None };
            (action.cube.as_ref(), ctx, None)
        }
        Decision::Take(action) | Decision::Drop(action) => {
            if double_type != DoubleType::Normal {
                return CubeSection::CannotAnalyse;
            }
            let ctx = CubeDecisionContext { doubled: true, double_skill: Skill::None, take_skill: action.skill };
            (action.cube.as_ref(), ctx, Some(matches!(decision, Decision::Take(_))))
        }
    };

    match cube {
        Some(cube) if should_show_cube_analysis(cube, &ctx, filter) => {
            CubeSection::Table { decision: cube, doubled: ctx.doubled, take }
        }
        _ => CubeSection::Hidden,
    }
}

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;
