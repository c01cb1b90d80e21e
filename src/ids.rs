//! Position and match identifiers.
//!
//! Both identifiers are little-endian bit strings packed into bytes and
//! printed as unpadded base64, compatible with the IDs other backgammon
//! software shows under its board diagrams.

use crate::state::MatchState;
use base64::{Engine as _, engine::general_purpose};

/// Accumulates fields least-significant bit first
struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    fn with_capacity(bytes: usize) -> Self {
        Self { bytes: vec![0; bytes], len: 0 }
    }

    fn push_bit(&mut self, bit: bool) {
        if bit && self.len / 8 < self.bytes.len() {
            self.bytes[self.len / 8] |= 1 << (self.len % 8);
        }
        self.len += 1;
    }

    fn push(&mut self, value: u32, width: u32) {
        for i in 0..width {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    fn encode(&self) -> String {
        general_purpose::STANDARD_NO_PAD.encode(&self.bytes)
    }
}

/// 14-character position ID, seen from the player on roll
///
/// For the opponent first and then the player on roll, every point from 1 to
/// 24 plus the bar contributes one set bit per chequer followed by a clear
/// bit.
pub fn position_id(state: &MatchState) -> String {
    let mut bits = BitWriter::with_capacity(10);
    for side in state.board.oriented(state.on_move) {
        for &n in side.iter() {
            for _ in 0..n {
                bits.push_bit(true);
            }
            bits.push_bit(false);
        }
    }
    bits.encode()
}

/// 12-character match ID
pub fn match_id(state: &MatchState) -> String {
    let mut bits = BitWriter::with_capacity(9);

    bits.push(state.cube.max(1).trailing_zeros(), 4);
    bits.push(
        match state.cube_owner {
            Some(player) => player as u32,
            None => 3,
        },
        2,
    );
    bits.push(state.on_move as u32, 1);
    bits.push(u32::from(state.crawford), 1);
    let game_state = if state.dropped {
        4
    } else if state.resigned > 0 {
        3
    } else if state.game_over {
        2
    } else {
        1
    };
    bits.push(game_state, 3);
    bits.push(state.turn as u32, 1);
    bits.push(u32::from(state.doubled), 1);
    bits.push(u32::from(state.resigned), 2);
    let [d0, d1] = state.dice.unwrap_or([0, 0]);
    bits.push(u32::from(d0), 3);
    bits.push(u32::from(d1), 3);
    bits.push(state.match_length, 15);
    bits.push(state.score[0], 15);
    bits.push(state.score[1], 15);

    bits.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};

    #[test]
    fn test_opening_position_id() {
        let state = MatchState::default();
        assert_eq!(position_id(&state), "4HPwATDgc/ABMA");
    }

    #[test]
    fn test_position_id_is_symmetric_for_opening() {
        let mut state = MatchState::default();
        state.on_move = 1;
        assert_eq!(position_id(&state), "4HPwATDgc/ABMA");
    }

    #[test]
    fn test_match_id_length() {
        let mut state = MatchState::default();
        state.match_length = 7;
        state.score = [2, 4];
        state.dice = Some([3, 1]);
        assert_eq!(match_id(&state).len(), 12);
    }

    // Game state sits in bits 8-10 of the match key
    fn game_state(id: &str) -> u8 {
        let key = general_purpose::STANDARD_NO_PAD.decode(id).unwrap();
        key[1] & 0b111
    }

    #[test]
    fn test_match_id_game_state() {
        let mut state = MatchState::default();
        state.match_length = 5;
        assert_eq!(game_state(&match_id(&state)), 1);

        state.resigned = 2;
        assert_eq!(game_state(&match_id(&state)), 3);

        state.resigned = 0;
        state.game_over = true;
        assert_eq!(game_state(&match_id(&state)), 2);

        state.dropped = true;
        assert_eq!(game_state(&match_id(&state)), 4);
    }

    #[test]
    fn test_match_id_changes_with_score() {
        let mut a = MatchState::default();
        a.match_length = 5;
        let mut b = a.clone();
        b.score = [1, 0];
        assert_ne!(match_id(&a), match_id(&b));
    }
}
