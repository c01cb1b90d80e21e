//! Statistics aggregation for exported games.
//!
//! This module handles accumulating per-player counts over the records of
//! a game, merging game contexts into match totals, and rendering a context
//! as a fixed-width table.
//!
//! Equity totals are kept in integer micro-equity units so that merging is
//! exactly associative and commutative.

use crate::board_format::{pad_left, pad_right};
use crate::locale::Locale;
use crate::types::{Decision, Game, Luck, Skill};
use serde::{Deserialize, Serialize};

/// Equity units per 1.0 equity
const MICRO: f64 = 1_000_000.0;

fn to_micro(equity: f64) -> i64 {
    (equity * MICRO).round() as i64
}

/// Counts for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    /// Chequer plays made
    pub moves: u32,
    /// Chequer plays with more than one candidate
    pub moves_unforced: u32,
    pub moves_doubtful: u32,
    pub moves_bad: u32,
    pub moves_very_bad: u32,
    /// Equity given up by chequer plays, in micro-equity
    pub move_loss: i64,

    /// Cube decisions with an evaluation attached
    pub cube_decisions: u32,
    pub doubles: u32,
    pub takes: u32,
    pub drops: u32,
    pub missed_doubles: u32,
    pub cube_doubtful: u32,
    pub cube_bad: u32,
    pub cube_very_bad: u32,

    pub very_lucky: u32,
    pub lucky: u32,
    pub unlucky: u32,
    pub very_unlucky: u32,
    /// Sum of luck values, in micro-equity
    pub luck_total: i64,
}

impl PlayerStats {
    fn merge(&mut self, other: &PlayerStats) {
        self.moves += other.moves;
        self.moves_unforced += other.moves_unforced;
        self.moves_doubtful += other.moves_doubtful;
        self.moves_bad += other.moves_bad;
        self.moves_very_bad += other.moves_very_bad;
        self.move_loss += other.move_loss;
        self.cube_decisions += other.cube_decisions;
        self.doubles += other.doubles;
        self.takes += other.takes;
        self.drops += other.drops;
        self.missed_doubles += other.missed_doubles;
        self.cube_doubtful += other.cube_doubtful;
        self.cube_bad += other.cube_bad;
        self.cube_very_bad += other.cube_very_bad;
        self.very_lucky += other.very_lucky;
        self.lucky += other.lucky;
        self.unlucky += other.unlucky;
        self.very_unlucky += other.very_unlucky;
        self.luck_total += other.luck_total;
    }

    fn count_move_skill(&mut self, skill: Skill) {
        match skill {
            Skill::VeryBad => self.moves_very_bad += 1,
            Skill::Bad => self.moves_bad += 1,
            Skill::Doubtful => self.moves_doubtful += 1,
            Skill::None => {}
        }
    }

    fn count_cube_skill(&mut self, skill: Skill) {
        match skill {
            Skill::VeryBad => self.cube_very_bad += 1,
            Skill::Bad => self.cube_bad += 1,
            Skill::Doubtful => self.cube_doubtful += 1,
            Skill::None => {}
        }
    }

    fn count_luck(&mut self, luck: Luck, value: Option<f64>) {
        match luck {
            Luck::VeryGood => self.very_lucky += 1,
            Luck::Good => self.lucky += 1,
            Luck::Bad => self.unlucky += 1,
            Luck::VeryBad => self.very_unlucky += 1,
            Luck::None => {}
        }
        if let Some(value) = value {
            self.luck_total += to_micro(value);
        }
    }
}

/// Per-player statistics over one or more games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsContext {
    pub games: u32,
    pub players: [PlayerStats; 2],
}

impl StatisticsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `other` into `self`
    pub fn merge(&mut self, other: &StatisticsContext) {
        self.games += other.games;
        for (dst, src) in self.players.iter_mut().zip(other.players.iter()) {
            dst.merge(src);
        }
    }

    /// The same context with the two players exchanged
    pub fn swapped(&self) -> Self {
        Self { games: self.games, players: [self.players[1], self.players[0]] }
    }
}

/// Scan one game's records into a fresh context
pub fn game_statistics(game: &Game) -> StatisticsContext {
    let mut ctx = StatisticsContext { games: 1, ..StatisticsContext::default() };

    for record in &game.records {
        let Some(decision) = record.kind.as_decision() else {
            continue;
        };
        let stats = &mut ctx.players[decision.player()];
        match decision {
            Decision::Normal(mv) => {
                stats.moves += 1;
                if mv.moves.len() > 1 {
                    stats.moves_unforced += 1;
                }
                stats.count_move_skill(mv.skill);
                if let Some(loss) = mv.equity_loss() {
                    stats.move_loss += to_micro(loss);
                }
                if let Some(cube) = mv.cube.as_ref().filter(|c| !c.evaluation.method.is_none()) {
                    stats.cube_decisions += 1;
                    if cube.missed_double {
                        stats.missed_doubles += 1;
                    }
                }
                stats.count_cube_skill(mv.cube_skill);
                stats.count_luck(mv.luck, mv.luck_value);
            }
            Decision::Double(action) | Decision::Take(action) | Decision::Drop(action) => {
                match decision {
                    Decision::Double(_) => stats.doubles += 1,
                    Decision::Take(_) => stats.takes += 1,
                    _ => stats.drops += 1,
                }
                if action.cube.as_ref().is_some_and(|c| !c.evaluation.method.is_none()) {
                    stats.cube_decisions += 1;
                }
                stats.count_cube_skill(action.skill);
            }
        }
    }

    ctx
}

/// Recompute a game's statistics and attach them to its `GameInfo`
pub fn update_from_game(game: &mut Game) -> StatisticsContext {
    let ctx = game_statistics(game);
    if let Some(info) = game.info_mut() {
        info.stats = Some(ctx);
    }
    ctx
}

const LABEL_WIDTH: usize = 26;
const VALUE_WIDTH: usize = 16;

/// Writer for the statistics table, one value column per player
struct StatsTable<'a> {
    out: String,
    locale: &'a dyn Locale,
    players: [&'a PlayerStats; 2],
}

impl StatsTable<'_> {
    fn row(&mut self, label: &str, left: &str, right: &str) {
        self.out.push_str(&pad_right(&self.locale.tr(label), LABEL_WIDTH));
        self.out.push_str(&pad_left(left, VALUE_WIDTH));
        self.out.push_str(&pad_left(right, VALUE_WIDTH));
        self.out.push('\n');
    }

    fn count(&mut self, label: &str, get: fn(&PlayerStats) -> u32) {
        let [a, b] = self.players;
        self.row(label, &get(a).to_string(), &get(b).to_string());
    }

    fn equity(&mut self, label: &str, get: fn(&PlayerStats) -> i64) {
        let [a, b] = self.players;
        self.row(label, &equity(get(a)), &equity(get(b)));
    }

    fn rule(&mut self) {
        self.out.push_str(&"━".repeat(LABEL_WIDTH + 2 * VALUE_WIDTH));
        self.out.push('\n');
    }
}

/// Render `ctx` as a two-column table, one column per player
///
/// Equity totals are labelled per game in session play and per match
/// (normalised) otherwise.
pub fn render(ctx: &StatisticsContext, players: &[String; 2], match_length: u32, locale: &dyn Locale) -> String {
    let mut table = StatsTable { out: String::new(), locale, players: [&ctx.players[0], &ctx.players[1]] };

    table.out.push_str(&pad_right("", LABEL_WIDTH));
    for name in players {
        table.out.push_str(&pad_left(name, VALUE_WIDTH));
    }
    table.out.push('\n');
    table.rule();

    let games = ctx.games.to_string();
    table.row("Games", &games, &games);
    table.count("Chequer plays", |s| s.moves);
    table.count("Unforced plays", |s| s.moves_unforced);
    table.count("Doubtful moves", |s| s.moves_doubtful);
    table.count("Bad moves", |s| s.moves_bad);
    table.count("Very bad moves", |s| s.moves_very_bad);
    if match_length > 0 {
        table.equity("Equity lost (EMG)", |s| -s.move_loss);
    } else {
        table.equity("Equity lost (ppg)", |s| -s.move_loss);
    }
    table.rule();

    table.count("Cube decisions", |s| s.cube_decisions);
    table.count("Doubles", |s| s.doubles);
    table.count("Takes", |s| s.takes);
    table.count("Drops", |s| s.drops);
    table.count("Missed doubles", |s| s.missed_doubles);
    table.count("Doubtful cube decisions", |s| s.cube_doubtful);
    table.count("Bad cube decisions", |s| s.cube_bad);
    table.count("Very bad cube decisions", |s| s.cube_very_bad);
    table.rule();

    table.count("Very lucky rolls", |s| s.very_lucky);
    table.count("Lucky rolls", |s| s.lucky);
    table.count("Unlucky rolls", |s| s.unlucky);
    table.count("Very unlucky rolls", |s| s.very_unlucky);
    table.equity("Luck total", |s| s.luck_total);

    table.out
}

/// Micro-equity as a signed three-decimal number
fn equity(micro: i64) -> String {
    let sign = if micro < 0 { '-' } else { '+' };
    let abs = micro.unsigned_abs();
    let thousandths = (abs + 500) / 1000;
    format!("{}{}.{:03}", sign, thousandths / 1000, thousandths % 1000)
}
