//! Text formatting for single decision points.
//!
//! This module handles:
//! - The game prologue (score line, match length, Crawford notes)
//! - Board headers ("Move number 3: alice to play 31")
//! - Board panel labels, the diagram and the pip count line
//! - The match information block, annotations, result line and epilogue
//!
//! Every function takes the state and names it needs and returns text; none
//! of them write anywhere.

use crate::board_format::{BoardLabels, BoardRenderer};
use crate::ids::{match_id, position_id};
use crate::locale::{Locale, fill};
use crate::state::MatchState;
use crate::types::{MatchInfo, SYMBOLS, opponent};
use chrono::NaiveDate;

const RESIGNATIONS: [&str; 3] = ["single game", "gammon", "backgammon"];

/// "The score (after 2 games) is: alice 1, bob 3 (match to 5 points)"
pub fn prologue(state: &MatchState, players: &[String; 2], locale: &dyn Locale) -> String {
    let games = i64::from(state.games_played);
    let mut out = fill(
        &locale.ntr(
            "The score (after {} game) is: {} {}, {} {}",
            "The score (after {} games) is: {} {}, {} {}",
            games,
        ),
        &[&games, &players[0], &state.score[0], &players[1], &state.score[1]],
    );

    if state.match_length > 0 {
        let n = i64::from(state.match_length);
        out.push_str(&fill(&locale.ntr(" (match to {} point)", " (match to {} points)", n), &[&n]));
        if state.match_length > 1 {
            if state.crawford {
                out.push_str(&locale.tr(", Crawford game"));
            }
            if state.post_crawford {
                out.push_str(&locale.tr(", post-Crawford play"));
            }
        }
    }

    out.push_str("\n\n");
    out
}

/// Header line for a decision point
///
/// `move_index` is 0-based; `None` omits the move number, as position
/// exports do.
pub fn board_header(
    state: &MatchState,
    move_index: Option<usize>,
    players: &[String; 2],
    locale: &dyn Locale,
) -> String {
    let mut out = String::new();
    if let Some(i) = move_index {
        out.push_str(&fill(&locale.tr("Move number {}: "), &[&(i + 1)]));
    }

    if state.resigned > 0 {
        let points = i64::from(state.resigned) * i64::from(state.cube);
        out.push_str(&fill(
            &locale.ntr("{} resigns {} point", "{} resigns {} points", points),
            &[&players[state.turn], &points],
        ));
    } else if let Some([d0, d1]) = state.dice {
        out.push_str(&fill(&locale.tr("{} to play {}{}"), &[&players[state.on_move], &d0, &d1]));
    } else if state.doubled {
        out.push_str(&fill(&locale.tr("{} doubles to {}"), &[&players[opponent(state.turn)], &(state.cube * 2)]));
    } else {
        out.push_str(&fill(&locale.tr("{} on roll, cube decision?"), &[&players[state.on_move]]));
    }

    out.push_str("\n\n");
    out
}

/// Side labels for the board diagram
pub fn board_labels(state: &MatchState, players: &[String; 2], locale: &dyn Locale) -> BoardLabels {
    let mut labels = BoardLabels::default();
    for p in 0..2 {
        labels.names[p] = format!("{}: {}", SYMBOLS[p], players[p]);
        let score = i64::from(state.score[p]);
        labels.scores[p] = fill(&locale.ntr("{} point", "{} points", score), &[&score]);
    }

    let match_text = |with_cube: bool| -> String {
        let n = i64::from(state.match_length);
        if state.match_length == 1 {
            fill(&locale.ntr("{} point match", "{} points match", n), &[&n])
        } else if state.crawford {
            format!(
                "{} ({})",
                fill(&locale.ntr("{} point match", "{} points match", n), &[&n]),
                locale.tr("Crawford game")
            )
        } else if with_cube {
            fill(&locale.ntr("{} point match (Cube: {})", "{} points match (Cube: {})", n), &[&n, &state.cube])
        } else {
            fill(&locale.ntr("{} point match", "{} points match", n), &[&n])
        }
    };

    if state.doubled {
        let offerer = opponent(state.turn);
        labels.notes[offerer] = Some(fill(&locale.tr("Cube offered at {}"), &[&(state.cube * 2)]));
    } else {
        let note = match state.dice {
            Some([d0, d1]) => fill(&locale.tr("Rolled {}{}"), &[&d0, &d1]),
            None if !state.game_over => locale.tr("On roll").into_owned(),
            None => String::new(),
        };
        labels.notes[state.on_move] = Some(note);

        match state.cube_owner {
            None => {
                labels.center = Some(if state.match_length > 0 {
                    match_text(true)
                } else {
                    fill(&locale.tr("(Cube: {})"), &[&state.cube])
                });
            }
            Some(owner) => {
                labels.names[owner] = fill(
                    &locale.tr("{}: {} (Cube: {})"),
                    &[&SYMBOLS[owner], &players[owner], &state.cube],
                );
                if state.match_length > 0 {
                    labels.center = Some(match_text(false));
                }
            }
        }
    }

    if state.resigned > 0 {
        let kind = RESIGNATIONS[usize::from(state.resigned.min(3)) - 1];
        let suffix = fill(&locale.tr(", resigns {}"), &[&locale.tr(kind)]);
        labels.notes[state.turn].get_or_insert_with(String::new).push_str(&suffix);
    }

    labels
}

/// Board diagram from the side of the player on roll, then pip counts
pub fn render_board(
    state: &MatchState,
    players: &[String; 2],
    renderer: &dyn BoardRenderer,
    locale: &dyn Locale,
) -> String {
    let labels = board_labels(state, players, locale);
    let mut out = renderer.render_diagram(&state.board, state.on_move, &labels, &position_id(state), &match_id(state));
    out.push_str(&pip_count_line(state, locale));
    out
}

/// "Pip counts: O 167, X 163"
///
/// Counts are reported per player, so they do not depend on which side the
/// diagram was drawn from.
pub fn pip_count_line(state: &MatchState, locale: &dyn Locale) -> String {
    let [o, x] = state.board.pip_counts();
    format!("{} O {}, X {}\n\n", locale.tr("Pip counts:"), o, x)
}

/// "Match Information:" block; only fields that are present are printed
pub fn match_info_block(info: &MatchInfo, players: &[String; 2], locale: &dyn Locale) -> String {
    let mut out = String::new();
    out.push_str(&locale.tr("Match Information:"));
    out.push('\n');

    for (player, rating) in players.iter().zip(info.ratings.iter()) {
        if let Some(rating) = rating {
            out.push_str(&fill(&locale.tr("{}'s rating: {}"), &[player, rating]));
            out.push('\n');
        }
    }

    if let Some(date) = info.date.and_then(|d| NaiveDate::from_ymd_opt(d.year, d.month, d.day)) {
        out.push_str(&fill(&locale.tr("Date: {}"), &[&date.format("%x")]));
        out.push('\n');
    }

    let fields = [
        ("Event: {}", &info.event),
        ("Round: {}", &info.round),
        ("Place: {}", &info.place),
        ("Annotator: {}", &info.annotator),
        ("Comments: {}", &info.comment),
    ];
    for (template, value) in fields {
        if let Some(value) = value {
            out.push_str(&fill(&locale.tr(template), &[value]));
            out.push('\n');
        }
    }

    out
}

/// Free-text annotation attached to a record
pub fn annotation(text: &str, locale: &dyn Locale) -> String {
    format!("{}\n{}\n", locale.tr("Annotation:"), text)
}

/// "alice wins 2 points"
pub fn game_result(winner: &str, points: u32, locale: &dyn Locale) -> String {
    let n = i64::from(points);
    fill(&locale.ntr("{} wins {} point", "{} wins {} points", n), &[&winner, &n])
}

/// Closing line with the generation date and generator identity
pub fn epilogue(generated_on: NaiveDate, generator: &str, locale: &dyn Locale) -> String {
    let mut out = fill(&locale.tr("Output generated {} by {}"), &[&generated_on.format("%Y-%m-%d"), &generator]);
    out.push_str("\n\n");
    out
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
