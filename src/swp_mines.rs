// Mine placement and adjacency counting
// Runs once per game, on the first reveal

use rand::Rng;
use tracing::debug;

use crate::swp_board::{Board, Pos};

/// Randomly place the board's mines, never on `avoid`, then compute
/// adjacency counts. Uses rejection sampling: draw a uniform cell and retry
/// while it is already mined or excluded.
pub fn place_mines<R: Rng>(board: &mut Board, avoid: Option<Pos>, rng: &mut R) -> Vec<Pos> {
    let n = board.len();
    let avoid_idx = avoid.and_then(|p| board.index(p));
    // leave room for the avoided cell
    let free = if avoid_idx.is_some() { n - 1 } else { n };
    let mines = board.mine_count().min(free);

    for i in 0..n {
        board.cell_at_mut(i).has_mine = false;
    }

    let mut placed = Vec::with_capacity(mines);
    let mut draws = 0usize;
    while placed.len() < mines {
        let i = rng.gen_range(0..n);
        draws += 1;
        if Some(i) == avoid_idx || board.cell_at(i).has_mine {
            continue;
        }
        board.cell_at_mut(i).has_mine = true;
        placed.push(board.pos(i));
    }
    debug!(mines, draws, "placed mines");

    compute_adjacency(board);
    board.mark_seeded();
    placed
}

/// Store, for every mine-free cell, how many of its neighbors hold a mine.
/// Zero is stored as `None`.
pub fn compute_adjacency(board: &mut Board) {
    for i in 0..board.len() {
        let count = if board.cell_at(i).has_mine {
            0
        } else {
            board
                .neighbors(i)
                .iter()
                .filter(|&&n| board.cell_at(n).has_mine)
                .count() as u8
        };
        board.cell_at_mut(i).adjacent_mines = if count == 0 { None } else { Some(count) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swp_config::{BoardConfig, Difficulty};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mined(board: &Board) -> usize {
        board.cells().iter().filter(|c| c.has_mine).count()
    }

    #[test]
    fn places_exact_mine_count() {
        for d in Difficulty::PRESETS {
            let mut board = Board::new(d.config().unwrap());
            let mut rng = StdRng::seed_from_u64(42);
            let placed = place_mines(&mut board, Some(Pos::new(4, 4)), &mut rng);
            assert_eq!(placed.len(), d.params().2);
            assert_eq!(mined(&board), d.params().2);
            assert!(board.is_seeded());
        }
    }

    #[test]
    fn avoided_cell_stays_safe() {
        for seed in 0..50 {
            let mut board = Board::new(BoardConfig::default());
            let mut rng = StdRng::seed_from_u64(seed);
            place_mines(&mut board, Some(Pos::new(4, 4)), &mut rng);
            assert!(!board.cell(Pos::new(4, 4)).unwrap().has_mine);
        }
    }

    #[test]
    fn densest_board_leaves_only_the_avoided_cell() {
        let cfg = BoardConfig::validate(9, 9, 80).unwrap();
        let mut board = Board::new(cfg);
        let mut rng = StdRng::seed_from_u64(7);
        place_mines(&mut board, Some(Pos::new(0, 0)), &mut rng);
        assert_eq!(mined(&board), 80);
        let safe: Vec<Pos> = (0..board.len())
            .filter(|&i| !board.cell_at(i).has_mine)
            .map(|i| board.pos(i))
            .collect();
        assert_eq!(safe, vec![Pos::new(0, 0)]);
        assert_eq!(board.cell(Pos::new(0, 0)).unwrap().adjacent_mines, Some(3));
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = Board::new(BoardConfig::default());
        let mut b = Board::new(BoardConfig::default());
        place_mines(&mut a, Some(Pos::new(2, 3)), &mut StdRng::seed_from_u64(99));
        place_mines(&mut b, Some(Pos::new(2, 3)), &mut StdRng::seed_from_u64(99));
        assert_eq!(a.mine_positions(), b.mine_positions());
    }

    #[test]
    fn adjacency_for_corner_mine() {
        let board = Board::with_mines(BoardConfig::default(), &[Pos::new(0, 0)]);
        let adj = |r, c| board.cell(Pos::new(r, c)).unwrap().adjacent_mines;

        assert_eq!(adj(0, 1), Some(1));
        assert_eq!(adj(1, 0), Some(1));
        assert_eq!(adj(1, 1), Some(1));
        assert_eq!(adj(2, 2), None);
        assert_eq!(adj(0, 2), None);
        assert_eq!(adj(0, 0), None); // mined cells carry no count
    }

    #[test]
    fn adjacency_matches_brute_force() {
        let mut board = Board::new(Difficulty::Expert.config().unwrap());
        place_mines(&mut board, None, &mut StdRng::seed_from_u64(3));

        for row in 0..board.rows() {
            for col in 0..board.columns() {
                let cell = board.cell(Pos::new(row, col)).unwrap();
                if cell.has_mine {
                    continue;
                }
                let mut expected = 0u8;
                for r in row.saturating_sub(1)..=(row + 1).min(board.rows() - 1) {
                    for c in col.saturating_sub(1)..=(col + 1).min(board.columns() - 1) {
                        if (r, c) != (row, col) && board.cell(Pos::new(r, c)).unwrap().has_mine {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(cell.adjacent_mines.unwrap_or(0), expected, "at ({row}, {col})");
                assert_ne!(cell.adjacent_mines, Some(0));
            }
        }
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let mut ring = Vec::new();
        for r in 3..=5 {
            for c in 3..=5 {
                if (r, c) != (4, 4) {
                    ring.push(Pos::new(r, c));
                }
            }
        }
        let board = Board::with_mines(BoardConfig::default(), &ring);
        assert_eq!(board.cell(Pos::new(4, 4)).unwrap().adjacent_mines, Some(8));
        assert_eq!(board.cell(Pos::new(2, 2)).unwrap().adjacent_mines, Some(1));
        assert_eq!(board.cell(Pos::new(2, 4)).unwrap().adjacent_mines, Some(3));
    }
}
