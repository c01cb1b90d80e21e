/// Tests for data structures serialization
///
/// These tests pin down the JSON shape of match files: record tags, field
/// renames and which fields may be left out.

#[cfg(test)]
mod tests {
    use crate::report::StatisticsContext;
    use crate::types::*;

    #[test]
    fn test_record_tags() {
        let records: Vec<MoveRecord> = serde_json::from_str(
            r#"[
                {"type": "game_info", "score": [1, 2], "match_length": 7, "games_played": 3, "crawford": true},
                {"type": "normal", "player": 1, "dice": [6, 6], "move": null},
                {"type": "double", "player": 0},
                {"type": "take", "player": 1, "skill": "doubtful"},
                {"type": "drop", "player": 1},
                {"type": "resign", "player": 0, "value": 2},
                {"type": "set_dice", "player": 0, "dice": [4, 2]},
                {"type": "set_cube_value", "value": 4},
                {"type": "set_cube_position", "owner": 1}
            ]"#,
        )
        .unwrap();

        let tags: Vec<&str> = records.iter().map(|r| r.kind.tag()).collect();
        assert_eq!(
            tags,
            vec!["game_info", "normal", "double", "take", "drop", "resign", "set_dice", "set_cube_value", "set_cube_position"]
        );

        match &records[0].kind {
            RecordKind::GameInfo(info) => {
                assert_eq!(info.score, [1, 2]);
                assert!(info.crawford);
                assert!(!info.post_crawford);
                assert_eq!(info.winner, None);
            }
            other => panic!("expected game_info, got {}", other.tag()),
        }
        match &records[3].kind {
            RecordKind::Take(action) => assert_eq!(action.skill, Skill::Doubtful),
            other => panic!("expected take, got {}", other.tag()),
        }
        assert!(records.iter().filter(|r| r.kind.as_decision().is_some()).count() == 4);
    }

    #[test]
    fn test_normal_move_with_analysis() {
        let record: MoveRecord = serde_json::from_str(
            r#"{
                "type": "normal",
                "player": 0,
                "dice": [3, 1],
                "move": [[8, 5], [6, 5]],
                "moves": [
                    {"move": [[8, 5], [6, 5]], "equity": 0.166, "method": {"kind": "evaluation", "plies": 2, "cubeful": true}},
                    {"move": [[24, 23], [13, 10]], "equity": 0.01, "probs": [0.5, 0.14, 0.01, 0.13, 0.01]}
                ],
                "skill": "very_bad",
                "luck": "very_good",
                "luck_value": 0.35,
                "cube": {
                    "evaluation": {
                        "method": {"kind": "rollout", "trials": 1296},
                        "equities": {"no_double": 0.1, "double_take": -0.2, "double_pass": 1.0}
                    },
                    "close": true
                },
                "annotation": "textbook"
            }"#,
        )
        .unwrap();

        assert_eq!(record.annotation.as_deref(), Some("textbook"));
        let RecordKind::Normal(mv) = &record.kind else {
            panic!("expected a normal record");
        };
        assert_eq!(mv.play, Some(Move(vec![[8, 5], [6, 5]])));
        assert_eq!(mv.chosen_index(), Some(0));
        assert_eq!(mv.moves[1].method, EvalMethod::None);
        assert_eq!(mv.skill, Skill::VeryBad);
        assert_eq!(mv.luck, Luck::VeryGood);
        assert_eq!(mv.cube_skill, Skill::None);

        let cube = mv.cube.as_ref().unwrap();
        assert!(cube.close);
        assert!(!cube.missed_double);
        assert_eq!(cube.evaluation.method, EvalMethod::Rollout { trials: 1296 });
        assert_eq!(cube.evaluation.equities.optimal(), 0.1);
    }

    #[test]
    fn test_match_info_defaults() {
        let m: Match = serde_json::from_str(
            r#"{"players": ["a", "b"], "info": {"event": "Club night", "date": {"year": 2024, "month": 3, "day": 9}}, "games": []}"#,
        )
        .unwrap();
        assert_eq!(m.match_length, 0);
        assert_eq!(m.info.event.as_deref(), Some("Club night"));
        assert_eq!(m.info.date, Some(MatchDate { year: 2024, month: 3, day: 9 }));
        assert!(!m.info.is_empty());
        assert!(MatchInfo::default().is_empty());
    }

    #[test]
    fn test_attached_statistics_survive_serialization() {
        let mut info = GameInfo::new([0, 0], 3, 0);
        let mut stats = StatisticsContext::new();
        stats.games = 1;
        stats.players[1].drops = 1;
        info.stats = Some(stats);

        let json = serde_json::to_string(&MoveRecord::new(RecordKind::GameInfo(info))).unwrap();
        assert!(json.contains("\"type\":\"game_info\""));
        let back: MoveRecord = serde_json::from_str(&json).unwrap();
        match back.kind {
            RecordKind::GameInfo(info) => assert_eq!(info.stats.map(|s| s.players[1].drops), Some(1)),
            other => panic!("expected game_info, got {}", other.tag()),
        }
    }
}
