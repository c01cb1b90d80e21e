/// Match file loading
///
/// This module handles:
/// - Reading a JSON match file into a `Match`
/// - Checking the record structure the exporter relies on
///
/// A file that loads here can be exported without tripping any of the
/// exporter's record-order assertions.
use crate::types::{Match, RecordKind};
use log::debug;
use std::fs;
use std::path::Path;

pub fn load_match(path: &Path) -> Result<Match, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read match file {}: {}", path.display(), e))?;
    let m: Match =
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse match file {}: {}", path.display(), e))?;
    validate_match(&m).map_err(|e| format!("Invalid match file {}: {}", path.display(), e))?;
    debug!("Loaded {} games between {} and {} from {:?}", m.games.len(), m.players[0], m.players[1], path);
    Ok(m)
}

/// Check that every game opens with exactly one `game_info` record and that
/// every player index is 0 or 1
pub fn validate_match(m: &Match) -> Result<(), String> {
    for (g, game) in m.games.iter().enumerate() {
        let Some(first) = game.records.first() else {
            return Err(format!("game {} has no records", g + 1));
        };
        if !matches!(first.kind, RecordKind::GameInfo(_)) {
            return Err(format!("game {} must start with a game_info record, found {}", g + 1, first.kind.tag()));
        }

        for (i, record) in game.records.iter().enumerate().skip(1) {
            if matches!(record.kind, RecordKind::GameInfo(_)) {
                return Err(format!("game {} has a second game_info record at position {}", g + 1, i + 1));
            }
            if let Some(player) = record_player(&record.kind).filter(|&p| p > 1) {
                return Err(format!("record {} of game {} names player {}", i + 1, g + 1, player));
            }
        }

        if let Some(winner) = game.info().and_then(|info| info.winner).filter(|&w| w > 1) {
            return Err(format!("game {} names player {} as winner", g + 1, winner));
        }
    }
    Ok(())
}

fn record_player(kind: &RecordKind) -> Option<usize> {
    match kind {
        RecordKind::Resign(resign) => Some(resign.player),
        RecordKind::SetDice(set) => Some(set.player),
        RecordKind::SetCubePosition(set) => set.owner,
        other => other.as_decision().map(|d| d.player()),
    }
}
