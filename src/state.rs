/// Board position and match state replay
///
/// This module handles:
/// - The chequer layout (`Board`) and pip counts
/// - The working `MatchState` advanced one move record at a time
///
/// The board is stored absolutely: `points[p]` lists player `p`'s chequers
/// from `p`'s own side (index 0 is the ace point, index 24 the bar). Showing
/// the board from one player's side never changes the stored layout.
use crate::types::{BAR, GameInfo, Move, MoveRecord, OFF, RecordKind, opponent};
use log::debug;
use serde::{Deserialize, Serialize};

/// Chequers per side in standard backgammon
pub const CHEQUERS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub points: [[u8; 25]; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self { points: [[0; 25]; 2] }
    }

    /// Opening position
    pub fn standard() -> Self {
        let mut side = [0u8; 25];
        side[5] = 5;
        side[7] = 3;
        side[12] = 5;
        side[23] = 2;
        Self { points: [side, side] }
    }

    /// Chequers of `player` on point `point` (1-24 from their side, 25 = bar)
    pub fn count(&self, player: usize, point: u8) -> u8 {
        match point {
            1..=25 => self.points[player][usize::from(point) - 1],
            _ => 0,
        }
    }

    /// Chequers still on the board (including the bar)
    pub fn on_board(&self, player: usize) -> u32 {
        self.points[player].iter().map(|&n| u32::from(n)).sum()
    }

    /// Chequers already borne off
    pub fn borne_off(&self, player: usize) -> u32 {
        CHEQUERS.saturating_sub(self.on_board(player))
    }

    /// A side has borne off every chequer
    pub fn is_finished(&self) -> bool {
        self.on_board(0) == 0 || self.on_board(1) == 0
    }

    /// Pip counts, indexed by player
    pub fn pip_counts(&self) -> [u32; 2] {
        let pips = |side: &[u8; 25]| side.iter().enumerate().map(|(i, &n)| (i as u32 + 1) * u32::from(n)).sum();
        [pips(&self.points[0]), pips(&self.points[1])]
    }

    /// The two sides ordered as (opponent, perspective)
    ///
    /// This is the orientation used by the position key and by the diagram,
    /// where the perspective player sits at the bottom.
    pub fn oriented(&self, perspective: usize) -> [&[u8; 25]; 2] {
        [&self.points[opponent(perspective)], &self.points[perspective]]
    }

    /// Move chequers for `player`, sending any hit blot to the bar
    pub fn apply_move(&mut self, player: usize, mv: &Move) {
        let opp = opponent(player);
        for &[from, to] in &mv.0 {
            if (1..=BAR).contains(&from) {
                let slot = &mut self.points[player][usize::from(from) - 1];
                *slot = slot.saturating_sub(1);
            }
            if to == OFF || to > 24 {
                continue;
            }
            self.points[player][usize::from(to) - 1] += 1;

            let opp_index = usize::from(24 - to);
            if self.points[opp][opp_index] == 1 {
                self.points[opp][opp_index] = 0;
                self.points[opp][24] += 1;
            }
        }
    }
}

/// Working view of a match while a game is replayed
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub board: Board,
    /// Player owning the current turn (the roller)
    pub on_move: usize,
    /// Player who must act next; differs from `on_move` while a double is pending
    pub turn: usize,
    pub dice: Option<[u8; 2]>,
    pub cube: u32,
    pub cube_owner: Option<usize>,
    pub doubled: bool,
    /// 0 when nobody resigns, otherwise 1-3 (single game, gammon, backgammon)
    pub resigned: u8,
    pub score: [u32; 2],
    pub match_length: u32,
    pub games_played: u32,
    pub crawford: bool,
    pub post_crawford: bool,
    pub game_over: bool,
    /// The game ended on a dropped double
    pub dropped: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            board: Board::standard(),
            on_move: 0,
            turn: 0,
            dice: None,
            cube: 1,
            cube_owner: None,
            doubled: false,
            resigned: 0,
            score: [0, 0],
            match_length: 0,
            games_played: 0,
            crawford: false,
            post_crawford: false,
            game_over: false,
            dropped: false,
        }
    }
}

impl MatchState {
    /// State at the start of the game described by `info`
    pub fn from_game_info(info: &GameInfo) -> Self {
        Self {
            board: info.board.unwrap_or_default(),
            score: info.score,
            match_length: info.match_length,
            games_played: info.games_played,
            crawford: info.crawford,
            post_crawford: info.post_crawford,
            ..Self::default()
        }
    }

    /// Points the player still needs to win the match
    pub fn away(&self, player: usize) -> i64 {
        i64::from(self.match_length) - i64::from(self.score[player])
    }

    /// Make `player` the roller with `dice`, as a chequer-play record implies
    pub fn begin_turn(&mut self, player: usize, dice: [u8; 2]) {
        self.on_move = player;
        self.turn = player;
        self.dice = Some(dice);
    }

    /// Advance the state past one record
    pub fn apply(&mut self, record: &MoveRecord) {
        match &record.kind {
            RecordKind::GameInfo(info) => {
                debug!("New game: score {:?}, match to {}", info.score, info.match_length);
                *self = Self::from_game_info(info);
            }
            RecordKind::Normal(mv) => {
                if let Some(play) = &mv.play {
                    self.board.apply_move(mv.player, play);
                }
                let next = opponent(mv.player);
                self.on_move = next;
                self.turn = next;
                self.dice = None;
                self.doubled = false;
                self.resigned = 0;
                self.game_over = self.board.is_finished();
            }
            RecordKind::Double(action) => {
                if self.doubled {
                    // Beaver or raccoon: the pending double is accepted and
                    // immediately turned back
                    self.cube *= 2;
                    self.cube_owner = Some(action.player);
                } else {
                    self.doubled = true;
                }
                self.turn = opponent(action.player);
            }
            RecordKind::Take(action) => {
                self.cube *= 2;
                self.cube_owner = Some(action.player);
                self.doubled = false;
                self.turn = self.on_move;
            }
            RecordKind::Drop(_) => {
                self.doubled = false;
                self.game_over = true;
                self.dropped = true;
            }
            RecordKind::Resign(resign) => {
                self.resigned = resign.value;
                self.turn = resign.player;
            }
            RecordKind::SetDice(set) => self.begin_turn(set.player, set.dice),
            RecordKind::SetBoard(set) => self.board = set.board,
            RecordKind::SetCubeValue(set) => self.cube = set.value,
            RecordKind::SetCubePosition(set) => self.cube_owner = set.owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CubeAction, NormalMove};

    #[test]
    fn test_standard_pip_counts() {
        assert_eq!(Board::standard().pip_counts(), [167, 167]);
        assert_eq!(Board::standard().on_board(0), 15);
        assert_eq!(Board::standard().borne_off(1), 0);
    }

    #[test]
    fn test_apply_move_hits_blot() {
        let mut board = Board::empty();
        board.points[0][7] = 1; // player 0 on their 8-point
        board.points[1][20] = 1; // player 1 on their 21-point, player 0's 4-point
        board.apply_move(0, &Move(vec![[8, 4]]));

        assert_eq!(board.count(0, 4), 1);
        assert_eq!(board.count(0, 8), 0);
        assert_eq!(board.count(1, 21), 0);
        assert_eq!(board.count(1, 25), 1, "hit chequer goes to the bar");
    }

    #[test]
    fn test_bear_off_leaves_board() {
        let mut board = Board::empty();
        board.points[1][0] = 1;
        board.apply_move(1, &Move(vec![[1, 0]]));
        assert_eq!(board.on_board(1), 0);
        assert!(board.is_finished());
    }

    #[test]
    fn test_double_take_sequence() {
        let mut state = MatchState::default();
        state.apply(&MoveRecord::new(RecordKind::Double(CubeAction::new(0))));
        assert!(state.doubled);
        assert_eq!(state.turn, 1);

        state.apply(&MoveRecord::new(RecordKind::Take(CubeAction::new(1))));
        assert!(!state.doubled);
        assert_eq!(state.cube, 2);
        assert_eq!(state.cube_owner, Some(1));
        assert_eq!(state.turn, state.on_move);
    }

    #[test]
    fn test_drop_ends_game() {
        let mut state = MatchState::default();
        state.apply(&MoveRecord::new(RecordKind::Double(CubeAction::new(0))));
        state.apply(&MoveRecord::new(RecordKind::Drop(CubeAction::new(1))));
        assert!(state.game_over && state.dropped);
        assert!(!state.doubled);
        assert_eq!(state.cube, 1);
    }

    #[test]
    fn test_normal_move_passes_turn() {
        let mut state = MatchState::default();
        state.begin_turn(1, [3, 1]);
        let mv = NormalMove::new(1, [3, 1], Some(Move(vec![[8, 5], [6, 5]])));
        state.apply(&MoveRecord::new(RecordKind::Normal(mv)));

        assert_eq!(state.on_move, 0);
        assert_eq!(state.dice, None);
        assert_eq!(state.board.count(1, 5), 2);
        assert_eq!(state.board.pip_counts(), [167, 163]);
    }
}
