//! Analysis text for decision records.
//!
//! This module handles:
//! - The action line ("* alice moves 8/5 6/5", "* bob doubles")
//! - The cube analysis table (equities, standard deviations, proper action)
//! - Move analysis: skill and luck alerts, the roll line, ranked moves
//!
//! What gets printed is decided by the `select` module; this module only
//! turns the selected parts into text.

use super::game::ExportContext;
use super::select::{CubeSection, DoubleType, cube_section, should_show_move_analysis};
use super::units::ValueFormat;
use crate::board_format::{format_move, pad_right};
use crate::locale::fill;
use crate::state::MatchState;
use crate::types::{CubeAction, CubeDecision, CubeEquities, Decision, Luck, NormalMove};

/// Action line plus selected analysis for one decision record
///
/// `state` is the state just before the record is applied.
pub fn analysis(state: &MatchState, decision: &Decision<'_>, double_type: DoubleType, ctx: &ExportContext<'_>) -> String {
    let mut out = match decision {
        Decision::Normal(mv) => action_line_normal(state, mv, ctx),
        Decision::Double(action) => action_line_cube(action, "doubles", ctx),
        Decision::Take(action) => action_line_cube(action, "accepts", ctx),
        Decision::Drop(action) => action_line_cube(action, "rejects", ctx),
    };

    if !ctx.settings.filter.include_analysis {
        return out;
    }

    match cube_section(decision, double_type, &ctx.settings.filter) {
        CubeSection::Hidden => {}
        CubeSection::CannotAnalyse => {
            out.push_str(&ctx.locale.tr("Cannot analyse beaver nor raccoons!"));
            out.push('\n');
        }
        CubeSection::Table { decision, doubled, take } => {
            out.push_str(&cube_analysis_table(state, decision, doubled, take, ctx));
        }
    }

    if let Decision::Normal(mv) = decision {
        out.push_str(&move_analysis(state, mv, ctx));
    }

    out
}

fn action_line_normal(state: &MatchState, mv: &NormalMove, ctx: &ExportContext<'_>) -> String {
    let name = &ctx.players[mv.player];
    let mut out = match &mv.play {
        Some(play) => fill(&ctx.locale.tr("* {} moves {}"), &[name, &format_move(&state.board, mv.player, play)]),
        None if mv.moves.is_empty() => fill(&ctx.locale.tr("* {} cannot move"), &[name]),
        None => String::new(),
    };
    out.push('\n');
    out
}

fn action_line_cube(action: &CubeAction, verb: &str, ctx: &ExportContext<'_>) -> String {
    format!("* {} {}\n\n", ctx.players[action.player], ctx.locale.tr(verb))
}

/// Cube alternatives in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CubeOption {
    NoDouble,
    DoubleTake,
    DoublePass,
}

/// Best cube action and the table row it corresponds to
fn proper_action(eq: &CubeEquities, redouble: bool) -> (&'static str, CubeOption) {
    if eq.double() > eq.no_double {
        if eq.double_take < eq.double_pass {
            (if redouble { "Redouble, take" } else { "Double, take" }, CubeOption::DoubleTake)
        } else {
            (if redouble { "Redouble, pass" } else { "Double, pass" }, CubeOption::DoublePass)
        }
    } else if eq.double_take > eq.double_pass {
        (if redouble { "Too good to redouble, pass" } else { "Too good to double, pass" }, CubeOption::NoDouble)
    } else {
        (if redouble { "No redouble, take" } else { "No double, take" }, CubeOption::NoDouble)
    }
}

fn actual_action(doubled: bool, take: Option<bool>, redouble: bool) -> &'static str {
    match (doubled, take, redouble) {
        (false, _, false) => "No double",
        (false, _, true) => "No redouble",
        (true, None, false) => "Double",
        (true, None, true) => "Redouble",
        (true, Some(true), false) => "Double, take",
        (true, Some(true), true) => "Redouble, take",
        (true, Some(false), false) => "Double, pass",
        (true, Some(false), true) => "Redouble, pass",
    }
}

/// Full cube analysis table
fn cube_analysis_table(
    state: &MatchState,
    decision: &CubeDecision,
    doubled: bool,
    take: Option<bool>,
    ctx: &ExportContext<'_>,
) -> String {
    let locale = ctx.locale;
    let units = ValueFormat::new(&ctx.settings, ctx.met, state);
    let eval = &decision.evaluation;
    let eq = &eval.equities;
    let redouble = state.cube_owner.is_some();
    let (proper, proper_row) = proper_action(eq, redouble);
    let optimal = eq.optimal();

    let mut out = String::new();
    out.push_str(&locale.tr("Cube analysis"));
    out.push('\n');
    out.push_str(&fill(&locale.tr("Evaluation: {}"), &[&eval.method.describe()]));
    out.push('\n');

    if let Some(cubeless) = eval.cubeless_equity {
        out.push_str(&fill(&locale.tr("Cubeless equity: {}"), &[&units.value(cubeless).trim()]));
        out.push('\n');
    }
    if let Some(probs) = &eval.probs {
        out.push_str(&fill(&locale.tr("Win probabilities: {}"), &[&probability_line(probs, ctx.settings.digits)]));
        out.push('\n');
    }

    out.push_str(&locale.tr("Cubeful equities:"));
    out.push('\n');
    let rows = [
        (CubeOption::NoDouble, if redouble { "No redouble" } else { "No double" }, eq.no_double),
        (CubeOption::DoubleTake, if redouble { "Redouble, take" } else { "Double, take" }, eq.double_take),
        (CubeOption::DoublePass, if redouble { "Redouble, pass" } else { "Double, pass" }, eq.double_pass),
    ];
    for (n, (option, label, equity)) in rows.into_iter().enumerate() {
        out.push_str(&format!("{}. {}{}", n + 1, pad_right(&locale.tr(label), 18), units.value(equity)));
        if option != proper_row {
            out.push_str(&format!(" ({})", units.delta(equity, optimal).trim()));
        }
        if let Some(sd) = &eval.std_devs {
            let spread = match option {
                CubeOption::NoDouble => sd.no_double,
                CubeOption::DoubleTake => sd.double_take,
                CubeOption::DoublePass => sd.double_pass,
            };
            out.push_str(&format!(" \u{b1} {}", units.spread(spread)));
        }
        out.push('\n');
    }

    out.push_str(&fill(&locale.tr("Proper cube action: {}"), &[&locale.tr(proper)]));
    out.push('\n');
    out.push_str(&fill(&locale.tr("Actual cube action: {}"), &[&locale.tr(actual_action(doubled, take, redouble))]));
    out.push_str("\n\n");
    out
}

/// "0.532 0.151 0.008 - 0.468 0.121 0.005"
fn probability_line(probs: &[f64; 5], digits: usize) -> String {
    let [win, win_g, win_bg, lose_g, lose_bg] = *probs;
    format!(
        "{:.p$} {:.p$} {:.p$} - {:.p$} {:.p$} {:.p$}",
        win,
        win_g,
        win_bg,
        1.0 - win,
        lose_g,
        lose_bg,
        p = digits
    )
}

/// Alerts, roll line and ranked moves for a chequer play
fn move_analysis(state: &MatchState, mv: &NormalMove, ctx: &ExportContext<'_>) -> String {
    let filter = &ctx.settings.filter;
    if !should_show_move_analysis(mv.skill, filter) {
        return String::new();
    }

    let locale = ctx.locale;
    let units = ValueFormat::new(&ctx.settings, ctx.met, state);
    let chosen = mv.chosen_index();
    let mut out = String::new();

    if mv.skill.is_bad() {
        out.push_str(&fill(&locale.tr("Alert: {} move"), &[&locale.tr(mv.skill.label())]));
        if let (Some(i), Some(best)) = (chosen, mv.moves.first()) {
            out.push_str(&format!(" ({})", units.delta(mv.moves[i].equity, best.equity)));
        }
        out.push('\n');
    }

    if mv.luck != Luck::None {
        out.push_str(&fill(&locale.tr("Alert: {} roll!"), &[&locale.tr(mv.luck.label())]));
        if let Some(value) = mv.luck_value {
            out.push_str(&format!(" ({})", units.delta(value, 0.0)));
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&fill(&locale.tr("Rolled {}{}"), &[&mv.dice[0], &mv.dice[1]]));
    match mv.luck_value {
        Some(value) => out.push_str(&format!(" ({}):\n", units.delta(value, 0.0).trim())),
        None => out.push_str(":\n"),
    }

    if mv.moves.is_empty() {
        let text = match &mv.play {
            Some(play) => format_move(&state.board, mv.player, play),
            None => locale.tr("Cannot move").into_owned(),
        };
        out.push_str(&format!("*    {}\n", text));
    } else {
        let label = if units.uses_mwc() { locale.tr("MWC:") } else { locale.tr("Eq.:") };
        let best = mv.moves[0].equity;
        for (i, ranked) in mv.moves.iter().enumerate() {
            let is_chosen = Some(i) == chosen;
            if i >= filter.max_moves && i != 0 && !is_chosen {
                continue;
            }
            out.push_str(if is_chosen { "*" } else { " " });
            out.push_str(&format!(
                "{:>4}. {} {} {} {}",
                i + 1,
                pad_right(&ranked.method.describe(), 18),
                pad_right(&format_move(&state.board, mv.player, &ranked.play), 28),
                label,
                units.value(ranked.equity)
            ));
            if i > 0 {
                out.push_str(&format!(" ({})", units.delta(ranked.equity, best)));
            }
            out.push('\n');
            if let (true, Some(probs)) = (filter.move_probabilities, &ranked.probs) {
                out.push_str(&format!("      {}\n", probability_line(probs, ctx.settings.digits)));
            }
        }
    }

    out.push_str("\n\n");
    out
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;
