/// Board formatting module - Pure rendering concerns
///
/// This module handles:
/// - ASCII board diagrams with side labels
/// - Move notation ("13/10 6/5*", "bar/22(2)")
/// - Display-width aware padding for player names
///
/// It accepts a board and pre-formatted labels from the report module and
/// never looks at the match being exported.
use crate::state::Board;
use crate::types::{BAR, Move, OFF, SYMBOLS, opponent};
use unicode_width::UnicodeWidthStr;

/// Text shown to the right of a diagram
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardLabels {
    /// Name line per player, e.g. "O: alice" or "X: bob (Cube: 2)"
    pub names: [String; 2],
    /// Score line per player
    pub scores: [String; 2],
    /// Roll, cube offer or resignation note next to a player
    pub notes: [Option<String>; 2],
    /// Cube or match-length text on the middle row
    pub center: Option<String>,
}

/// Turns a position into a diagram
pub trait BoardRenderer {
    /// Draw `board` with `perspective`'s home board at the bottom right
    fn render_diagram(
        &self,
        board: &Board,
        perspective: usize,
        labels: &BoardLabels,
        position_id: &str,
        match_id: &str,
    ) -> String;
}

/// Plain ASCII diagram, 44 columns plus labels
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiBoard;

/// Rows in the diagram body: border, 5 upper rows, bar row, 5 lower rows, border
const ROWS: usize = 13;
const MIDDLE_ROW: usize = 6;
const STACK_ROWS: usize = 5;

impl BoardRenderer for AsciiBoard {
    fn render_diagram(
        &self,
        board: &Board,
        perspective: usize,
        labels: &BoardLabels,
        position_id: &str,
        match_id: &str,
    ) -> String {
        let top = opponent(perspective);
        let bottom = perspective;

        let mut rows: Vec<String> = Vec::with_capacity(ROWS);
        rows.push(border(13..=18, 19..=24));
        for depth in 0..STACK_ROWS {
            rows.push(stack_row(board, perspective, [13, 14, 15, 16, 17, 18], [19, 20, 21, 22, 23, 24], bottom, depth));
        }
        rows.push(format!(" |{:18}|BAR|{:18}|", "", ""));
        for depth in (0..STACK_ROWS).rev() {
            rows.push(stack_row(board, perspective, [12, 11, 10, 9, 8, 7], [6, 5, 4, 3, 2, 1], top, depth));
        }
        rows.push(border_desc());

        let mut side: [Option<&str>; ROWS] = [None; ROWS];
        side[0] = Some(labels.names[top].as_str());
        side[1] = Some(labels.scores[top].as_str());
        side[STACK_ROWS] = labels.notes[top].as_deref();
        side[MIDDLE_ROW] = labels.center.as_deref();
        side[MIDDLE_ROW + 1] = labels.notes[bottom].as_deref();
        side[ROWS - 2] = Some(labels.scores[bottom].as_str());
        side[ROWS - 1] = Some(labels.names[bottom].as_str());

        let mut out = String::new();
        out.push_str(&format!(" Position ID: {}\n", position_id));
        out.push_str(&format!(" Match ID   : {}\n", match_id));
        for (row, label) in rows.iter().zip(side.iter()) {
            match label {
                Some(text) if !text.is_empty() => out.push_str(&format!("{}     {}\n", row, text)),
                _ => out.push_str(&format!("{}\n", row)),
            }
        }
        out
    }
}

/// Top border with point numbers 13-24
fn border(left: std::ops::RangeInclusive<u8>, right: std::ops::RangeInclusive<u8>) -> String {
    let join = |r: std::ops::RangeInclusive<u8>| r.map(|n| format!("{:->2}", n)).collect::<Vec<_>>().join("-");
    format!(" +{}------{}-+", join(left), join(right))
}

/// Bottom border with point numbers 12-1
fn border_desc() -> String {
    let join = |r: &[u8]| r.iter().map(|n| format!("{:->2}", n)).collect::<Vec<_>>().join("-");
    format!(" +{}------{}-+", join(&[12, 11, 10, 9, 8, 7]), join(&[6, 5, 4, 3, 2, 1]))
}

/// One row of chequer stacks
///
/// `bar_player` is the side whose bar chequers are drawn in this half.
fn stack_row(
    board: &Board,
    perspective: usize,
    left: [u8; 6],
    right: [u8; 6],
    bar_player: usize,
    depth: usize,
) -> String {
    let half = |points: [u8; 6]| points.iter().map(|&n| point_cell(board, perspective, n, depth)).collect::<String>();
    let bar = cell(board.count(bar_player, BAR), SYMBOLS[bar_player], depth);
    format!(" |{}|{}|{}|", half(left), bar, half(right))
}

/// Cell for point `n`, numbered from the perspective player's side
fn point_cell(board: &Board, perspective: usize, n: u8, depth: usize) -> String {
    let opp = opponent(perspective);
    let own = board.count(perspective, n);
    if own > 0 {
        return cell(own, SYMBOLS[perspective], depth);
    }
    cell(board.count(opp, 25 - n), SYMBOLS[opp], depth)
}

/// Three-character cell; the last row of a tall stack shows its height
fn cell(count: u8, symbol: char, depth: usize) -> String {
    let n = usize::from(count);
    if depth == STACK_ROWS - 1 && n > STACK_ROWS {
        format!("{:>2} ", n)
    } else if n > depth {
        format!(" {} ", symbol)
    } else {
        "   ".to_string()
    }
}

/// Format a move in standard notation, marking hits with `*`
///
/// Steps are listed from the highest starting point down and identical
/// steps are collapsed to "8/5(2)". `board` is the position before the move.
pub fn format_move(board: &Board, player: usize, mv: &Move) -> String {
    let mut opp_side = board.points[opponent(player)];
    let mut steps = mv.0.clone();
    steps.sort_by(|a, b| b[0].cmp(&a[0]));

    let mut parts: Vec<(String, usize)> = Vec::new();
    for [from, to] in steps {
        let hit = (1..=24).contains(&to) && {
            let idx = usize::from(24 - to);
            let blot = opp_side[idx] == 1;
            if blot {
                opp_side[idx] = 0;
            }
            blot
        };
        let text = format!("{}/{}{}", point_name(from), point_name(to), if hit { "*" } else { "" });
        match parts.last_mut() {
            Some((last, n)) if *last == text => *n += 1,
            _ => parts.push((text, 1)),
        }
    }

    parts
        .into_iter()
        .map(|(text, n)| if n > 1 { format!("{}({})", text, n) } else { text })
        .collect::<Vec<_>>()
        .join(" ")
}

fn point_name(point: u8) -> String {
    match point {
        BAR => "bar".to_string(),
        OFF => "off".to_string(),
        n => n.to_string(),
    }
}

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-align `s` in a field of `width` display columns
pub fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(padding))
}

/// Right-align `s` in a field of `width` display columns
pub fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(padding), s)
}

#[cfg(test)]
#[path = "board_format_test.rs"]
mod board_format_test;
