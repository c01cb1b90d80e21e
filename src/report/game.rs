//! Game traversal for text export.
//!
//! This module handles replaying one game's records in order and producing
//! its text: prologue, one header/board/analysis block per decision record,
//! the result line, statistics and the epilogue.
//!
//! A game goes through three phases: waiting for its `GameInfo` record,
//! replaying moves, and the closing blocks once the records run out. A
//! record sequence that breaks this order is a defect in the input model
//! and panics.

use super::analysis::analysis;
use super::format::{annotation, board_header, epilogue, game_result, match_info_block, prologue, render_board};
use super::select::CubeExchange;
use super::stats::{StatisticsContext, game_statistics, render};
use super::types::ExportSettings;
use crate::board_format::BoardRenderer;
use crate::history::StatsStore;
use crate::locale::{Locale, fill};
use crate::met::MatchEquityTable;
use crate::state::MatchState;
use crate::types::{Decision, Game, GameInfo, MatchInfo, MoveRecord, RecordKind};
use chrono::NaiveDate;
use log::debug;

/// Everything an export reads besides the game itself
pub struct ExportContext<'a> {
    pub settings: &'a ExportSettings,
    pub players: &'a [String; 2],
    pub info: &'a MatchInfo,
    pub renderer: &'a dyn BoardRenderer,
    pub locale: &'a dyn Locale,
    pub met: Option<&'a MatchEquityTable>,
    pub history: Option<&'a dyn StatsStore>,
    pub generated_on: NaiveDate,
    pub generator: &'a str,
}

/// Where a game sits in the export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameExport {
    /// 0-based game number
    pub index: usize,
    /// Last game of the match; adds the match statistics
    pub is_last: bool,
    /// Finish with the generation epilogue
    pub with_epilogue: bool,
}

/// Traversal phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingGameInfo,
    InGame,
    GameEnded,
}

impl Phase {
    /// Phase after reading `kind`, the record at 0-based `position` of game `game`
    fn read(self, kind: &RecordKind, game: usize, position: usize) -> Phase {
        match (self, kind) {
            (Phase::AwaitingGameInfo, RecordKind::GameInfo(_)) => Phase::InGame,
            (Phase::AwaitingGameInfo, other) => {
                panic!("game {} must start with a game_info record, found {}", game + 1, other.tag())
            }
            (Phase::InGame, RecordKind::GameInfo(_)) => {
                panic!("game {} has a second game_info record at position {}", game + 1, position + 1)
            }
            (Phase::InGame, _) => Phase::InGame,
            (Phase::GameEnded, other) => panic!("game {} has a {} record after its end", game + 1, other.tag()),
        }
    }

    /// Phase once the records run out
    fn end(self, game: usize) -> Phase {
        match self {
            Phase::AwaitingGameInfo => panic!("game {} has no records", game + 1),
            Phase::InGame | Phase::GameEnded => Phase::GameEnded,
        }
    }
}

/// The leading `GameInfo` of a game
fn game_info(game: &Game, index: usize) -> &GameInfo {
    match game.records.first().map(|r| &r.kind) {
        Some(RecordKind::GameInfo(info)) => info,
        Some(other) => panic!("game {} must start with a game_info record, found {}", index + 1, other.tag()),
        None => panic!("game {} has no records", index + 1),
    }
}

/// Fill in the parts of the state a decision record implies
///
/// A chequer play makes its player the roller with its dice; an initial
/// double is offered by the player holding the turn.
fn prepare_state(state: &mut MatchState, decision: &Decision<'_>) {
    match decision {
        Decision::Normal(mv) => state.begin_turn(mv.player, mv.dice),
        Decision::Double(action) if !state.doubled => {
            state.on_move = action.player;
            state.turn = action.player;
            state.dice = None;
        }
        Decision::Double(_) | Decision::Take(_) | Decision::Drop(_) => {}
    }
}

/// Header, board and analysis for one decision record
fn decision_block(
    state: &mut MatchState,
    exchange: &mut CubeExchange,
    decision: &Decision<'_>,
    move_index: Option<usize>,
    ctx: &ExportContext<'_>,
) -> String {
    prepare_state(state, decision);
    let double_type = exchange.advance(decision, state);

    let mut out = board_header(state, move_index, ctx.players, ctx.locale);
    out.push_str(&render_board(state, ctx.players, ctx.renderer, ctx.locale));
    out.push_str(&analysis(state, decision, double_type, ctx));
    out
}

fn annotation_block(record: &MoveRecord, ctx: &ExportContext<'_>) -> String {
    match &record.annotation {
        Some(text) if ctx.settings.filter.include_annotations => annotation(text, ctx.locale),
        _ => String::new(),
    }
}

fn prologue_block(state: &MatchState, ctx: &ExportContext<'_>) -> String {
    let mut out = prologue(state, ctx.players, ctx.locale);
    if ctx.settings.filter.include_match_info && !ctx.info.is_empty() {
        out.push_str(&match_info_block(ctx.info, ctx.players, ctx.locale));
        out.push('\n');
    }
    out
}

/// Text of one game
///
/// The game's statistics are merged into `totals`, which holds the running
/// match total when `job.is_last` asks for it to be printed.
pub fn game_text(game: &Game, job: GameExport, totals: &mut StatisticsContext, ctx: &ExportContext<'_>) -> String {
    debug!("Exporting game {} ({} records)", job.index + 1, game.records.len());

    let info = game_info(game, job.index);
    let game_stats = info.stats.unwrap_or_else(|| game_statistics(game));

    let mut phase = Phase::AwaitingGameInfo;
    let mut state = MatchState::default();
    let mut exchange = CubeExchange::default();
    let mut move_index = 0;
    let mut out = String::new();

    for (i, record) in game.records.iter().enumerate() {
        phase = phase.read(&record.kind, job.index, i);
        match &record.kind {
            RecordKind::GameInfo(info) => {
                out.push_str(&prologue_block(&MatchState::from_game_info(info), ctx));
                totals.merge(&game_stats);
            }
            kind => {
                if let Some(decision) = kind.as_decision() {
                    out.push_str(&decision_block(&mut state, &mut exchange, &decision, Some(move_index), ctx));
                    move_index += 1;
                }
            }
        }

        out.push_str(&annotation_block(record, ctx));
        state.apply(record);
    }

    phase = phase.end(job.index);
    debug!("Game {} {:?} after {} decisions", job.index + 1, phase, move_index);

    if let Some(winner) = info.winner {
        out.push_str(&game_result(&ctx.players[winner], info.points, ctx.locale));
        out.push_str("\n\n");
    }

    if ctx.settings.filter.include_statistics {
        out.push_str(&fill(&ctx.locale.tr("Game statistics for game {}"), &[&(job.index + 1)]));
        out.push_str("\n\n");
        out.push_str(&render(&game_stats, ctx.players, info.match_length, ctx.locale));
        out.push_str("\n\n");

        if job.is_last {
            out.push_str(&match_statistics(totals, info.match_length, ctx));
        }
    }

    if job.with_epilogue {
        out.push_str(&epilogue(ctx.generated_on, ctx.generator, ctx.locale));
    }
    out
}

/// Match or session totals, then any stored history for the player pair
fn match_statistics(totals: &StatisticsContext, match_length: u32, ctx: &ExportContext<'_>) -> String {
    let title = if match_length > 0 { "Match statistics" } else { "Session statistics" };
    let mut out = ctx.locale.tr(title).into_owned();
    out.push_str("\n\n");
    out.push_str(&render(totals, ctx.players, match_length, ctx.locale));
    out.push_str("\n\n");

    let history = ctx.history.and_then(|store| store.lookup(&ctx.players[0], &ctx.players[1]));
    if let Some(history) = history {
        debug!("Found stored statistics for {} vs {}", ctx.players[0], ctx.players[1]);
        out.push('\n');
        out.push_str(&ctx.locale.tr("Statistics from database"));
        out.push_str("\n\n");
        out.push_str(&render(&history, ctx.players, 0, ctx.locale));
        out.push_str("\n\n");
    }
    out
}

/// Text of a single position
///
/// With `record` (0-based index into the game's records) the position
/// before that decision is shown together with its analysis. Without it the
/// final position of the game is shown with no move number.
pub fn position_text(
    game: &Game,
    game_index: usize,
    record: Option<usize>,
    ctx: &ExportContext<'_>,
) -> Result<String, String> {
    let info = game_info(game, game_index);
    let end = match record {
        Some(i) if i >= game.records.len() => {
            return Err(format!("Game {} has only {} records", game_index + 1, game.records.len()));
        }
        Some(i) => i,
        None => game.records.len(),
    };

    let mut state = MatchState::from_game_info(info);
    let mut exchange = CubeExchange::default();
    let mut move_index = 0;
    for earlier in &game.records[..end] {
        if let Some(decision) = earlier.kind.as_decision() {
            prepare_state(&mut state, &decision);
            exchange.advance(&decision, &state);
            move_index += 1;
        }
        state.apply(earlier);
    }

    let mut out = prologue_block(&state, ctx);
    match record {
        Some(i) => {
            let target = &game.records[i];
            let Some(decision) = target.kind.as_decision() else {
                return Err(format!(
                    "Record {} of game {} is a {} record, not a move or cube decision",
                    i + 1,
                    game_index + 1,
                    target.kind.tag()
                ));
            };
            out.push_str(&decision_block(&mut state, &mut exchange, &decision, Some(move_index), ctx));
            out.push_str(&annotation_block(target, ctx));
        }
        None => {
            out.push_str(&board_header(&state, None, ctx.players, ctx.locale));
            out.push_str(&render_board(&state, ctx.players, ctx.renderer, ctx.locale));
        }
    }

    out.push_str(&epilogue(ctx.generated_on, ctx.generator, ctx.locale));
    Ok(out)
}

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;
