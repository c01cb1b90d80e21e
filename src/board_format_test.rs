/// Tests for board formatting module
///
/// These tests pin down the diagram layout and move notation, and check
/// that switching perspective only moves cells around.

#[cfg(test)]
mod tests {
    use crate::board_format::*;
    use crate::state::Board;
    use crate::types::Move;

    fn labels() -> BoardLabels {
        BoardLabels {
            names: ["O: alice".to_string(), "X: bob".to_string()],
            scores: ["0 points".to_string(), "0 points".to_string()],
            notes: [None, Some("Rolled 31".to_string())],
            center: Some("(Cube: 1)".to_string()),
        }
    }

    fn diagram(board: &Board, perspective: usize) -> String {
        AsciiBoard.render_diagram(board, perspective, &labels(), "4HPwATDgc/ABMA", "cAkAAAAAAAAA")
    }

    /// Every non-border cell character, ignoring layout
    fn cell_contents(diagram: &str) -> Vec<char> {
        let mut chars: Vec<char> = diagram
            .lines()
            .filter(|l| l.starts_with(" |"))
            .flat_map(|l| l[..44].chars())
            .filter(|c| matches!(c, 'O' | 'X' | '0'..='9'))
            .collect();
        chars.sort();
        chars
    }

    #[test]
    fn test_borders() {
        let text = diagram(&Board::standard(), 1);
        assert!(text.contains(" +13-14-15-16-17-18------19-20-21-22-23-24-+"));
        assert!(text.contains(" +12-11-10--9--8--7-------6--5--4--3--2--1-+"));
    }

    #[test]
    fn test_ids_are_printed() {
        let text = diagram(&Board::standard(), 1);
        assert!(text.starts_with(" Position ID: 4HPwATDgc/ABMA\n Match ID   : cAkAAAAAAAAA\n"));
    }

    #[test]
    fn test_perspective_player_labels_at_bottom() {
        let text = diagram(&Board::standard(), 1);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].ends_with("O: alice"));
        assert!(lines.last().unwrap().ends_with("X: bob"));

        let flipped = diagram(&Board::standard(), 0);
        let lines: Vec<&str> = flipped.lines().collect();
        assert!(lines[2].ends_with("X: bob"));
        assert!(lines.last().unwrap().ends_with("O: alice"));
    }

    #[test]
    fn test_opening_bottom_row() {
        let text = diagram(&Board::standard(), 1);
        let lines: Vec<&str> = text.lines().collect();
        // Bottom stack row: X's 13-point is top left for X, so the bottom
        // half holds O's midpoint (left) and X's 8- and 6-points
        let bottom = lines[lines.len() - 2];
        assert_eq!(&bottom[..44], " | O           X    |   | X              O |");
    }

    #[test]
    fn test_mirroring_keeps_cell_contents() {
        let mut board = Board::standard();
        board.apply_move(1, &Move(vec![[8, 5], [6, 5]]));
        board.points[0][24] = 1;

        let a = diagram(&board, 0);
        let b = diagram(&board, 1);
        assert_ne!(a, b);
        assert_eq!(cell_contents(&a), cell_contents(&b));
    }

    #[test]
    fn test_tall_stack_shows_count() {
        let mut board = Board::empty();
        board.points[1][5] = 7;
        let text = diagram(&board, 1);
        assert!(text.contains(" 7 "));
    }

    #[test]
    fn test_format_move_simple() {
        let board = Board::standard();
        assert_eq!(format_move(&board, 1, &Move(vec![[6, 5], [8, 5]])), "8/5 6/5");
    }

    #[test]
    fn test_format_move_collapses_doubles() {
        let board = Board::standard();
        assert_eq!(format_move(&board, 0, &Move(vec![[8, 5], [8, 5], [6, 3], [6, 3]])), "8/5(2) 6/3(2)");
    }

    #[test]
    fn test_format_move_marks_hit_once() {
        let mut board = Board::empty();
        board.points[0][12] = 2;
        board.points[1][14] = 1; // player 1's 15-point is player 0's 10-point
        let mv = Move(vec![[13, 10], [13, 10]]);
        assert_eq!(format_move(&board, 0, &mv), "13/10* 13/10");
    }

    #[test]
    fn test_format_move_bar_and_off() {
        let board = Board::empty();
        assert_eq!(format_move(&board, 0, &Move(vec![[25, 22]])), "bar/22");
        assert_eq!(format_move(&board, 0, &Move(vec![[2, 0]])), "2/off");
    }

    #[test]
    fn test_pad_helpers_use_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(display_width("日本"), 4);
        assert_eq!(pad_right("日本", 6), "日本  ");
    }
}
