/// Match equity table and equity-to-MWC conversion
///
/// This module handles:
/// - Loading a match equity table from JSON
/// - Match-winning chances for an away/away score
/// - Converting cubeful equity into match-winning chances
use crate::state::MatchState;
use crate::types::opponent;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Match-winning chances by score
///
/// `pre_crawford[i][j]` is the chance of the player needing `i + 1` points
/// against an opponent needing `j + 1`. `post_crawford[j]` is the chance of
/// the player needing 1 point once the Crawford game is over, against an
/// opponent needing `j + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEquityTable {
    pub pre_crawford: Vec<Vec<f64>>,
    #[serde(default)]
    pub post_crawford: Vec<f64>,
}

impl MatchEquityTable {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read match equity table {}: {}", path.display(), e))?;
        let table: MatchEquityTable = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse match equity table {}: {}", path.display(), e))?;
        table.validate()?;
        debug!("Loaded {}-point match equity table from {:?}", table.pre_crawford.len(), path);
        Ok(table)
    }

    fn validate(&self) -> Result<(), String> {
        if self.pre_crawford.is_empty() {
            return Err("Match equity table has no entries".to_string());
        }
        let n = self.pre_crawford.len();
        if self.pre_crawford.iter().any(|row| row.len() != n) {
            return Err(format!("Match equity table must be square ({} rows)", n));
        }
        Ok(())
    }

    /// Chance for a player `away` points from winning against `opp_away`
    pub fn mwc(&self, away: i64, opp_away: i64, post_crawford: bool) -> f64 {
        if away <= 0 {
            return 1.0;
        }
        if opp_away <= 0 {
            return 0.0;
        }
        if post_crawford && !self.post_crawford.is_empty() {
            if away == 1 && opp_away > 1 {
                return self.post_crawford[clamp_index(opp_away, self.post_crawford.len())];
            }
            if opp_away == 1 && away > 1 {
                return 1.0 - self.post_crawford[clamp_index(away, self.post_crawford.len())];
            }
        }
        let n = self.pre_crawford.len();
        self.pre_crawford[clamp_index(away, n)][clamp_index(opp_away, n)]
    }

    /// Convert cubeful equity for the player on roll into match-winning chances
    ///
    /// Interpolates linearly between winning and losing the current cube
    /// value: equity +1 is a certain win of `cube` points, -1 a certain loss.
    pub fn eq_to_mwc(&self, equity: f64, state: &MatchState) -> f64 {
        let me = state.on_move;
        let cube = i64::from(state.cube);
        let away_me = state.away(me);
        let away_opp = state.away(opponent(me));

        let win = self.mwc(away_me - cube, away_opp, state.post_crawford);
        let lose = self.mwc(away_me, away_opp - cube, state.post_crawford);
        equity * (win - lose) / 2.0 + (win + lose) / 2.0
    }
}

fn clamp_index(away: i64, len: usize) -> usize {
    (away.max(1) as usize - 1).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MatchEquityTable {
        MatchEquityTable {
            pre_crawford: vec![vec![0.5, 0.68, 0.75], vec![0.32, 0.5, 0.6], vec![0.25, 0.4, 0.5]],
            post_crawford: vec![0.5, 0.49, 0.32],
        }
    }

    #[test]
    fn test_mwc_lookup() {
        let met = table();
        assert_eq!(met.mwc(1, 1, false), 0.5);
        assert_eq!(met.mwc(1, 2, false), 0.68);
        assert_eq!(met.mwc(0, 2, false), 1.0);
        assert_eq!(met.mwc(2, -1, false), 0.0);
    }

    #[test]
    fn test_mwc_post_crawford() {
        let met = table();
        assert_eq!(met.mwc(1, 3, true), 0.32);
        assert!((met.mwc(3, 1, true) - 0.68).abs() < 1e-9);
    }

    #[test]
    fn test_mwc_clamps_long_matches() {
        let met = table();
        assert_eq!(met.mwc(9, 9, false), 0.5);
    }

    #[test]
    fn test_eq_to_mwc_interpolates() {
        let met = table();
        let state = MatchState { match_length: 3, ..MatchState::default() };
        // 3-away/3-away, cube 1: win -> 2-away/3-away, lose -> 3-away/2-away
        assert!((met.eq_to_mwc(1.0, &state) - 0.6).abs() < 1e-9);
        assert!((met.eq_to_mwc(-1.0, &state) - 0.4).abs() < 1e-9);
        assert!((met.eq_to_mwc(0.0, &state) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_ragged_table() {
        let met = MatchEquityTable { pre_crawford: vec![vec![0.5, 0.6], vec![0.4]], post_crawford: vec![] };
        assert!(met.validate().is_err());
    }
}
