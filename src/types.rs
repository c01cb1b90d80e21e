/// Core data structures for recorded matches
///
/// This module defines the data model consumed by the report pipeline:
/// matches, games, move records and the pre-computed evaluation output
/// attached to them. Everything here is produced elsewhere (a match file
/// written by an analysis engine) and treated as immutable input.
use crate::report::StatisticsContext;
use crate::state::Board;
use serde::{Deserialize, Serialize};

/// Chequer symbols, indexed by player
pub const SYMBOLS: [char; 2] = ['O', 'X'];

/// The player who is not `player`
pub fn opponent(player: usize) -> usize {
    1 - player
}

/// A recorded match: both players, the match length and its games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub players: [String; 2],

    /// Points needed to win; 0 means unlimited (money/session) play
    #[serde(default)]
    pub match_length: u32,

    #[serde(default)]
    pub info: MatchInfo,

    pub games: Vec<Game>,
}

/// Free-form match metadata printed in the "Match Information" block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchInfo {
    pub ratings: [Option<String>; 2],
    pub date: Option<MatchDate>,
    pub event: Option<String>,
    pub round: Option<String>,
    pub place: Option<String>,
    pub annotator: Option<String>,
    pub comment: Option<String>,
}

impl MatchInfo {
    pub fn is_empty(&self) -> bool {
        self == &MatchInfo::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// One game: an ordered list of move records starting with `GameInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Game {
    pub records: Vec<MoveRecord>,
}

impl Game {
    /// The game's leading `GameInfo` payload, if the game is well formed
    pub fn info(&self) -> Option<&GameInfo> {
        match self.records.first().map(|r| &r.kind) {
            Some(RecordKind::GameInfo(info)) => Some(info),
            _ => None,
        }
    }

    pub fn info_mut(&mut self) -> Option<&mut GameInfo> {
        match self.records.first_mut().map(|r| &mut r.kind) {
            Some(RecordKind::GameInfo(info)) => Some(info),
            _ => None,
        }
    }
}

/// A single entry in a game's record list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(flatten)]
    pub kind: RecordKind,

    /// Free-text comment attached to this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl MoveRecord {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind, annotation: None }
    }

    pub fn annotated(kind: RecordKind, annotation: &str) -> Self {
        Self { kind, annotation: Some(annotation.to_string()) }
    }
}

/// Record payloads, one shape per tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordKind {
    GameInfo(GameInfo),
    Normal(NormalMove),
    Double(CubeAction),
    Take(CubeAction),
    Drop(CubeAction),
    Resign(Resignation),
    SetDice(SetDice),
    SetBoard(SetBoard),
    SetCubeValue(SetCubeValue),
    SetCubePosition(SetCubePosition),
}

impl RecordKind {
    /// Tag name as it appears in match files
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::GameInfo(_) => "game_info",
            RecordKind::Normal(_) => "normal",
            RecordKind::Double(_) => "double",
            RecordKind::Take(_) => "take",
            RecordKind::Drop(_) => "drop",
            RecordKind::Resign(_) => "resign",
            RecordKind::SetDice(_) => "set_dice",
            RecordKind::SetBoard(_) => "set_board",
            RecordKind::SetCubeValue(_) => "set_cube_value",
            RecordKind::SetCubePosition(_) => "set_cube_position",
        }
    }

    /// View this record as a decision point, if it is one
    ///
    /// Decision points are the records that get a header, a board and an
    /// analysis block in the report. All other tags only change state.
    pub fn as_decision(&self) -> Option<Decision<'_>> {
        match self {
            RecordKind::Normal(mv) => Some(Decision::Normal(mv)),
            RecordKind::Double(action) => Some(Decision::Double(action)),
            RecordKind::Take(action) => Some(Decision::Take(action)),
            RecordKind::Drop(action) => Some(Decision::Drop(action)),
            RecordKind::GameInfo(_)
            | RecordKind::Resign(_)
            | RecordKind::SetDice(_)
            | RecordKind::SetBoard(_)
            | RecordKind::SetCubeValue(_)
            | RecordKind::SetCubePosition(_) => None,
        }
    }
}

/// A borrowed decision-point record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    Normal(&'a NormalMove),
    Double(&'a CubeAction),
    Take(&'a CubeAction),
    Drop(&'a CubeAction),
}

impl Decision<'_> {
    /// The player who made this decision
    pub fn player(&self) -> usize {
        match self {
            Decision::Normal(mv) => mv.player,
            Decision::Double(action) | Decision::Take(action) | Decision::Drop(action) => action.player,
        }
    }
}

/// Per-game metadata; always the first record of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Score before this game
    pub score: [u32; 2],

    /// Points needed to win the match; 0 for money play
    #[serde(default)]
    pub match_length: u32,

    /// Number of games played before this one
    #[serde(default)]
    pub games_played: u32,

    /// This is the Crawford game
    #[serde(default)]
    pub crawford: bool,

    /// The Crawford game has already been played
    #[serde(default)]
    pub post_crawford: bool,

    #[serde(default)]
    pub winner: Option<usize>,

    #[serde(default)]
    pub points: u32,

    /// Starting position; the standard opening setup when absent
    #[serde(default)]
    pub board: Option<Board>,

    /// Statistics for this game, attached by the statistics pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatisticsContext>,
}

impl GameInfo {
    pub fn new(score: [u32; 2], match_length: u32, games_played: u32) -> Self {
        Self {
            score,
            match_length,
            games_played,
            crawford: false,
            post_crawford: false,
            winner: None,
            points: 0,
            board: None,
            stats: None,
        }
    }
}

/// A chequer play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalMove {
    pub player: usize,
    pub dice: [u8; 2],

    /// The move played; `None` when there was no legal move
    #[serde(default, rename = "move")]
    pub play: Option<Move>,

    /// Ranked candidate moves, best first
    #[serde(default)]
    pub moves: Vec<RankedMove>,

    /// Index of the played move in `moves`
    #[serde(default)]
    pub chosen: Option<usize>,

    #[serde(default)]
    pub skill: Skill,

    /// Cube decision analysed before the roll
    #[serde(default)]
    pub cube: Option<CubeDecision>,

    #[serde(default)]
    pub cube_skill: Skill,

    #[serde(default)]
    pub luck: Luck,

    #[serde(default)]
    pub luck_value: Option<f64>,
}

impl NormalMove {
    pub fn new(player: usize, dice: [u8; 2], play: Option<Move>) -> Self {
        Self {
            player,
            dice,
            play,
            moves: Vec::new(),
            chosen: None,
            skill: Skill::None,
            cube: None,
            cube_skill: Skill::None,
            luck: Luck::None,
            luck_value: None,
        }
    }

    /// Index of the played move in the ranked list
    ///
    /// Uses the recorded index when present, otherwise looks the played
    /// move up in the list.
    pub fn chosen_index(&self) -> Option<usize> {
        self.chosen.filter(|&i| i < self.moves.len()).or_else(|| {
            let play = self.play.as_ref()?;
            self.moves.iter().position(|m| &m.play == play)
        })
    }

    /// Equity given up by the played move relative to the best candidate
    pub fn equity_loss(&self) -> Option<f64> {
        let chosen = self.moves.get(self.chosen_index()?)?;
        let best = self.moves.first()?;
        Some(best.equity - chosen.equity)
    }
}

/// Payload of `double`, `take` and `drop` records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeAction {
    pub player: usize,

    #[serde(default)]
    pub cube: Option<CubeDecision>,

    #[serde(default)]
    pub skill: Skill,
}

impl CubeAction {
    pub fn new(player: usize) -> Self {
        Self { player, cube: None, skill: Skill::None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resignation {
    pub player: usize,
    /// 1 = single game, 2 = gammon, 3 = backgammon
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDice {
    pub player: usize,
    pub dice: [u8; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBoard {
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCubeValue {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCubePosition {
    pub owner: Option<usize>,
}

/// A chequer move as a list of `[from, to]` steps
///
/// Points are numbered 1-24 from the mover's side; 25 is the bar and 0 is
/// borne off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(pub Vec<[u8; 2]>);

pub const BAR: u8 = 25;
pub const OFF: u8 = 0;

/// A candidate move with its evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMove {
    #[serde(rename = "move")]
    pub play: Move,
    pub equity: f64,

    /// Win, win gammon, win backgammon, lose gammon, lose backgammon
    #[serde(default)]
    pub probs: Option<[f64; 5]>,

    #[serde(default)]
    pub method: EvalMethod,
}

/// Severity label assigned to a played move or cube action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    VeryBad,
    Bad,
    Doubtful,
    #[default]
    None,
}

impl Skill {
    /// Whether this label marks an error
    pub fn is_bad(self) -> bool {
        self != Skill::None
    }

    pub fn label(self) -> &'static str {
        match self {
            Skill::VeryBad => "very bad",
            Skill::Bad => "bad",
            Skill::Doubtful => "doubtful",
            Skill::None => "unmarked",
        }
    }
}

/// How fortunate a roll was relative to expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Luck {
    VeryBad,
    Bad,
    #[default]
    None,
    Good,
    VeryGood,
}

impl Luck {
    pub fn label(self) -> &'static str {
        match self {
            Luck::VeryBad => "very unlucky",
            Luck::Bad => "unlucky",
            Luck::None => "",
            Luck::Good => "lucky",
            Luck::VeryGood => "very lucky",
        }
    }
}

/// How an evaluation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalMethod {
    /// No evaluation available
    #[default]
    None,
    Evaluation {
        plies: u32,
        #[serde(default)]
        cubeful: bool,
    },
    Rollout {
        trials: u32,
    },
}

impl EvalMethod {
    pub fn is_none(&self) -> bool {
        matches!(self, EvalMethod::None)
    }

    /// Short description used in analysis tables ("2-ply cubeful", "Rollout")
    pub fn describe(&self) -> String {
        match self {
            EvalMethod::None => String::new(),
            EvalMethod::Evaluation { plies, cubeful: true } => format!("{}-ply cubeful", plies),
            EvalMethod::Evaluation { plies, cubeful: false } => format!("{}-ply cubeless", plies),
            EvalMethod::Rollout { trials } => format!("Rollout ({} trials)", trials),
        }
    }
}

/// Cubeful equities for the three cube alternatives
///
/// All values are from the point of view of the player holding the cube
/// decision (the potential doubler).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeEquities {
    pub no_double: f64,
    pub double_take: f64,
    pub double_pass: f64,
}

impl CubeEquities {
    /// Equity of doubling, assuming the opponent responds correctly
    pub fn double(&self) -> f64 {
        self.double_take.min(self.double_pass)
    }

    /// Equity of the best cube action
    pub fn optimal(&self) -> f64 {
        self.no_double.max(self.double())
    }
}

/// Evaluation output for one cube decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutput {
    #[serde(default)]
    pub method: EvalMethod,

    #[serde(default)]
    pub probs: Option<[f64; 5]>,

    #[serde(default)]
    pub cubeless_equity: Option<f64>,

    pub equities: CubeEquities,

    /// Standard deviations, available for rollouts
    #[serde(default)]
    pub std_devs: Option<CubeEquities>,
}

/// A cube decision together with the engine's classification of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeDecision {
    pub evaluation: EvaluationOutput,

    /// Alternatives are within the engine's closeness threshold
    #[serde(default)]
    pub close: bool,

    /// The engine says a double should be offered here
    #[serde(default)]
    pub missed_double: bool,
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
