/// Tests for game and position traversal

#[cfg(test)]
mod tests {
    use crate::board_format::AsciiBoard;
    use crate::history::StatsStore;
    use crate::locale::English;
    use crate::report::game::{ExportContext, GameExport, Phase, game_text, position_text};
    use crate::report::stats::StatisticsContext;
    use crate::report::types::{DisplayFilter, ExportSettings};
    use crate::types::{
        CubeAction, CubeDecision, CubeEquities, EvalMethod, EvaluationOutput, Game, GameInfo, MatchInfo, Move,
        MoveRecord, NormalMove, RecordKind, SetDice,
    };
    use chrono::NaiveDate;

    struct Fixture {
        settings: ExportSettings,
        players: [String; 2],
        info: MatchInfo,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_settings(ExportSettings::default())
        }

        fn with_settings(settings: ExportSettings) -> Self {
            Self { settings, players: ["A".to_string(), "B".to_string()], info: MatchInfo::default() }
        }

        fn ctx(&self) -> ExportContext<'_> {
            self.ctx_with_history(None)
        }

        fn ctx_with_history<'a>(&'a self, history: Option<&'a dyn StatsStore>) -> ExportContext<'a> {
            ExportContext {
                settings: &self.settings,
                players: &self.players,
                info: &self.info,
                renderer: &AsciiBoard,
                locale: &English,
                met: None,
                history,
                generated_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                generator: "gammon-report test",
            }
        }
    }

    struct FixedStore(StatisticsContext);

    impl StatsStore for FixedStore {
        fn lookup(&self, _player0: &str, _player1: &str) -> Option<StatisticsContext> {
            Some(self.0)
        }
    }

    fn info_record() -> MoveRecord {
        MoveRecord::new(RecordKind::GameInfo(GameInfo::new([0, 0], 0, 0)))
    }

    fn normal(player: usize, dice: [u8; 2], steps: Vec<[u8; 2]>) -> MoveRecord {
        MoveRecord::new(RecordKind::Normal(NormalMove::new(player, dice, Some(Move(steps)))))
    }

    fn evaluated_cube() -> CubeDecision {
        CubeDecision {
            evaluation: EvaluationOutput {
                method: EvalMethod::Evaluation { plies: 2, cubeful: true },
                probs: None,
                cubeless_equity: None,
                equities: CubeEquities { no_double: 0.4, double_take: 0.5, double_pass: 1.0 },
                std_devs: None,
            },
            close: false,
            missed_double: false,
        }
    }

    fn cube_record(kind: fn(CubeAction) -> RecordKind, player: usize) -> MoveRecord {
        let mut action = CubeAction::new(player);
        action.cube = Some(evaluated_cube());
        MoveRecord::new(kind(action))
    }

    fn job(index: usize) -> GameExport {
        GameExport { index, is_last: false, with_epilogue: false }
    }

    #[test]
    fn test_single_move_game() {
        let fixture = Fixture::new();
        let game = Game { records: vec![info_record(), normal(1, [3, 1], vec![[8, 5], [6, 5]])] };

        let text = game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());

        assert!(text.starts_with("The score (after 0 games) is: A 0, B 0\n\nMove number 1: B to play 31\n\n"));
        assert!(text.contains("Pip counts: O 167, X 167\n\n* B moves 8/5 6/5\n"));
        assert!(!text.contains("Alert"));
        assert!(!text.contains("Rolled 31:"));
        assert!(!text.contains("Cube analysis"));
        assert!(text.contains("Game statistics for game 1\n\n"));
        assert!(!text.contains("Session statistics"));
        assert!(!text.contains("Output generated"));
    }

    #[test]
    fn test_one_block_per_decision_in_order() {
        let fixture = Fixture::new();
        let game = Game {
            records: vec![
                info_record(),
                normal(0, [3, 1], vec![[8, 5], [6, 5]]),
                cube_record(RecordKind::Double, 1),
                cube_record(RecordKind::Take, 0),
                MoveRecord::new(RecordKind::SetDice(SetDice { player: 1, dice: [6, 5] })),
                normal(1, [6, 5], vec![[24, 13]]),
                cube_record(RecordKind::Double, 0),
                cube_record(RecordKind::Drop, 1),
            ],
        };

        let text = game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());

        let numbers: Vec<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix("Move number "))
            .map(|rest| rest.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(numbers, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(text.contains("Move number 2: B on roll, cube decision?\n\n"));
        assert!(text.contains("Move number 3: B doubles to 2\n\n"));
        assert!(text.contains("Move number 4: B to play 65\n\n"));
        assert!(text.contains("Move number 5: A on roll, cube decision?\n\n"));
        assert!(text.contains("* A accepts\n\n"));
        assert!(text.contains("* B rejects\n\n"));
    }

    #[test]
    fn test_beaver_is_not_analysed() {
        let fixture = Fixture::new();
        let game = Game {
            records: vec![
                info_record(),
                cube_record(RecordKind::Double, 0),
                cube_record(RecordKind::Double, 1),
                cube_record(RecordKind::Take, 0),
            ],
        };

        let text = game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());

        assert_eq!(text.matches("Cube analysis").count(), 1);
        assert_eq!(text.matches("Cannot analyse beaver nor raccoons!").count(), 2);
    }

    #[test]
    fn test_annotations_follow_their_record() {
        let fixture = Fixture::new();
        let mut game = Game { records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]])] };
        game.records[1].annotation = Some("Standard opening".to_string());

        let text = game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());
        assert!(text.contains("* A moves 8/5 6/5\nAnnotation:\nStandard opening\n"));

        let quiet = Fixture::with_settings(ExportSettings {
            filter: DisplayFilter { include_annotations: false, ..DisplayFilter::default() },
            ..ExportSettings::default()
        });
        let text = game_text(&game, job(0), &mut StatisticsContext::new(), &quiet.ctx());
        assert!(!text.contains("Standard opening"));
    }

    #[test]
    fn test_result_and_last_game_statistics() {
        let fixture = Fixture::new();
        let mut info = GameInfo::new([0, 0], 0, 0);
        info.winner = Some(0);
        info.points = 2;
        let game = Game {
            records: vec![MoveRecord::new(RecordKind::GameInfo(info)), normal(0, [3, 1], vec![[8, 5], [6, 5]])],
        };

        let stored = StatisticsContext { games: 12, ..StatisticsContext::default() };
        let store = FixedStore(stored);
        let ctx = fixture.ctx_with_history(Some(&store));
        let last = GameExport { index: 0, is_last: true, with_epilogue: true };
        let mut totals = StatisticsContext::new();
        let text = game_text(&game, last, &mut totals, &ctx);

        assert!(text.contains("A wins 2 points\n\n"));
        assert!(text.contains("Session statistics\n\n"));
        assert!(text.contains("\nStatistics from database\n\n"));
        assert!(text.ends_with("Output generated 2024-05-01 by gammon-report test\n\n"));
        assert_eq!(totals.games, 1);
        assert_eq!(totals.players[0].moves, 1);
    }

    #[test]
    fn test_statistics_can_be_disabled() {
        let fixture = Fixture::with_settings(ExportSettings {
            filter: DisplayFilter { include_statistics: false, ..DisplayFilter::default() },
            ..ExportSettings::default()
        });
        let game = Game { records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]])] };
        let last = GameExport { index: 0, is_last: true, with_epilogue: false };

        let text = game_text(&game, last, &mut StatisticsContext::new(), &fixture.ctx());
        assert!(!text.contains("statistics"));
    }

    #[test]
    #[should_panic(expected = "must start with a game_info record")]
    fn test_game_without_game_info_panics() {
        let fixture = Fixture::new();
        let game = Game { records: vec![normal(0, [3, 1], vec![[8, 5], [6, 5]])] };
        game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());
    }

    #[test]
    #[should_panic(expected = "second game_info record")]
    fn test_second_game_info_panics() {
        let fixture = Fixture::new();
        let game = Game { records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]]), info_record()] };
        game_text(&game, job(0), &mut StatisticsContext::new(), &fixture.ctx());
    }

    #[test]
    fn test_phase_transitions() {
        let info = RecordKind::GameInfo(GameInfo::new([0, 0], 0, 0));
        let double = RecordKind::Double(CubeAction::new(0));

        let phase = Phase::AwaitingGameInfo.read(&info, 0, 0);
        assert_eq!(phase, Phase::InGame);
        assert_eq!(phase.read(&double, 0, 1), Phase::InGame);
        assert_eq!(phase.end(0), Phase::GameEnded);
        assert_eq!(Phase::GameEnded.end(0), Phase::GameEnded);
    }

    #[test]
    #[should_panic(expected = "game 2 has no records")]
    fn test_ending_before_game_info_panics() {
        Phase::AwaitingGameInfo.end(1);
    }

    #[test]
    #[should_panic(expected = "game 1 has a double record after its end")]
    fn test_record_after_end_panics() {
        Phase::GameEnded.read(&RecordKind::Double(CubeAction::new(1)), 0, 4);
    }

    #[test]
    fn test_position_at_record() {
        let fixture = Fixture::new();
        let game = Game {
            records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]]), normal(1, [6, 4], vec![[24, 18], [13, 9]])],
        };

        let text = position_text(&game, 0, Some(2), &fixture.ctx()).unwrap();
        assert!(text.contains("Move number 2: B to play 64\n\n"));
        assert!(text.contains("* B moves 24/18 13/9\n"));
        assert!(!text.contains("Move number 1"));
        assert!(text.ends_with("Output generated 2024-05-01 by gammon-report test\n\n"));
    }

    #[test]
    fn test_position_at_end_of_game() {
        let fixture = Fixture::new();
        let game = Game { records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]])] };

        let text = position_text(&game, 0, None, &fixture.ctx()).unwrap();
        assert!(!text.contains("Move number"));
        assert!(text.contains("B on roll, cube decision?\n\n"));
        assert!(text.contains("Pip counts: O 163, X 167\n\n"));
        assert!(!text.contains("* A moves"));
    }

    #[test]
    fn test_position_rejects_bad_record() {
        let fixture = Fixture::new();
        let game = Game { records: vec![info_record(), normal(0, [3, 1], vec![[8, 5], [6, 5]])] };

        let err = position_text(&game, 0, Some(0), &fixture.ctx()).unwrap_err();
        assert!(err.contains("game_info record"));

        let err = position_text(&game, 0, Some(5), &fixture.ctx()).unwrap_err();
        assert_eq!(err, "Game 1 has only 2 records");
    }
}
