use proptest::prelude::*;
use term2048::engine::{self, legal_moves, move_down, move_left, move_right, move_up};
use term2048::{execute_move, is_game_over, slide_and_merge, Grid, Move, TileT};

fn grid(rows: [[TileT; 4]; 4]) -> Grid {
    Grid::from_rows(&rows).unwrap()
}

#[test]
fn move_left_packs_and_scores() {
    let mut g = grid([[2, 2, 0, 0], [4, 4, 4, 0], [8, 0, 8, 8], [16, 0, 0, 16]]);
    let mut score = 0;
    assert!(move_left(&mut g, &mut score));
    assert_eq!(
        g,
        grid([[4, 0, 0, 0], [8, 4, 0, 0], [16, 8, 0, 0], [32, 0, 0, 0]])
    );
    assert_eq!(score, 60);
}

#[test]
fn move_right_mirrors_left() {
    let mut g = grid([[0, 0, 2, 2], [4, 0, 4, 4], [0, 8, 8, 8], [0, 16, 0, 16]]);
    let mut score = 0;
    assert!(move_right(&mut g, &mut score));
    assert_eq!(
        g,
        grid([[0, 0, 0, 4], [0, 0, 4, 8], [0, 0, 8, 16], [0, 0, 0, 32]])
    );
    assert_eq!(score, 60);
}

#[test]
fn move_up_and_down_on_columns() {
    let start = grid([[2, 4, 8, 16], [2, 4, 8, 16], [0, 0, 8, 16], [0, 0, 8, 16]]);

    let mut up = start.clone();
    let mut score = 0;
    assert!(move_up(&mut up, &mut score));
    assert_eq!(
        up,
        grid([[4, 8, 16, 32], [0, 0, 16, 32], [0, 0, 0, 0], [0, 0, 0, 0]])
    );
    assert_eq!(score, 108);

    let mut down = start;
    let mut score = 0;
    assert!(move_down(&mut down, &mut score));
    assert_eq!(
        down,
        grid([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 16, 32], [4, 8, 16, 32]])
    );
    assert_eq!(score, 108);
}

#[test]
fn score_accumulates_onto_running_total() {
    let mut g = grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let mut score = 100;
    assert!(execute_move(&mut g, Move::Left, &mut score));
    assert_eq!(score, 104);
}

#[test]
fn larger_grids_move_every_line() {
    let rows: Vec<Vec<TileT>> = vec![
        vec![2, 2, 2, 2, 2, 2],
        vec![0, 0, 0, 0, 0, 4],
        vec![0; 6],
        vec![0; 6],
        vec![0; 6],
        vec![8, 0, 0, 0, 0, 8],
    ];
    let mut g = Grid::from_rows(&rows).unwrap();
    let mut score = 0;
    assert!(execute_move(&mut g, Move::Left, &mut score));
    assert_eq!(g.to_rows()[0], vec![4, 4, 4, 0, 0, 0]);
    assert_eq!(g.to_rows()[1], vec![4, 0, 0, 0, 0, 0]);
    assert_eq!(g.to_rows()[5], vec![16, 0, 0, 0, 0, 0]);
    assert_eq!(score, 12 + 16);
}

#[test]
fn game_over_detection() {
    let mut g = grid([
        [2, 4, 8, 16],
        [32, 64, 128, 256],
        [512, 1024, 2048, 4096],
        [2, 4, 8, 16],
    ]);
    assert!(is_game_over(&g));
    assert!(legal_moves(&g).is_empty());

    // Equal horizontal neighbours.
    g.set(3, 3, 8).unwrap();
    assert!(!is_game_over(&g));
    g.set(3, 3, 16).unwrap();
    assert!(is_game_over(&g));

    // Equal vertical neighbours.
    g.set(1, 0, 2).unwrap();
    assert!(!is_game_over(&g));
    g.set(1, 0, 32).unwrap();

    // An empty cell.
    g.set(2, 2, 0).unwrap();
    assert!(!is_game_over(&g));
}

#[test]
fn game_over_agrees_with_legal_moves() {
    let g = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 8]]);
    assert!(is_game_over(&g));
    for move_ in Move::ALL {
        assert!(!engine::can_move(&g, move_));
    }
}

fn nonzero(line: &[TileT]) -> usize {
    line.iter().filter(|&&v| v != 0).count()
}

fn has_adjacent_pair(line: &[TileT]) -> bool {
    line.windows(2).any(|w| w[0] != 0 && w[0] == w[1])
}

fn line_strategy() -> impl Strategy<Value = Vec<TileT>> {
    (4usize..=6).prop_flat_map(|len| {
        prop::collection::vec(
            prop_oneof![3 => Just(0 as TileT), 5 => (1u32..8).prop_map(|p| (1 as TileT) << p)],
            len,
        )
    })
}

proptest! {
    #[test]
    fn slide_leaves_no_interior_gaps(mut line in line_strategy()) {
        slide_and_merge(&mut line);
        let packed = nonzero(&line);
        prop_assert!(line[..packed].iter().all(|&v| v != 0));
        prop_assert!(line[packed..].iter().all(|&v| v == 0));
    }

    #[test]
    fn slide_conserves_or_merges(line in line_strategy()) {
        let before = nonzero(&line);
        let total: TileT = line.iter().sum();
        let mut after = line.clone();
        let outcome = slide_and_merge(&mut after);

        prop_assert!(nonzero(&after) <= before);
        prop_assert_eq!(nonzero(&after) < before, outcome.score_delta > 0);
        prop_assert_eq!(after.iter().sum::<TileT>(), total);
        prop_assert_eq!(outcome.changed, after != line);
    }

    #[test]
    fn slide_is_idempotent_once_settled(mut line in line_strategy()) {
        slide_and_merge(&mut line);
        if !has_adjacent_pair(&line) {
            let settled = line.clone();
            let outcome = slide_and_merge(&mut line);
            prop_assert!(!outcome.changed);
            prop_assert_eq!(outcome.score_delta, 0);
            prop_assert_eq!(line, settled);
        }
    }
}
