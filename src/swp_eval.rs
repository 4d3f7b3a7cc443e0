// Win/loss evaluation and the end-of-game sweep

use crate::swp_board::{Board, Pos};
use crate::swp_flag::mines_remaining;

/// Which win condition fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinPath {
    /// Every mine carries a flag and no flag is misplaced
    AllMinesFlagged,
    /// The covered, unflagged cells are exactly the unflagged mines
    OnlyMinesLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    Won(WinPath),
    Lost,
}

/// Cells touched by the sweep after a win
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sweep {
    pub uncovered: Vec<Pos>,
    pub flagged: Vec<Pos>,
}

/// Inspect the board. A board without mines yet is always ongoing.
pub fn evaluate(board: &Board) -> Verdict {
    if !board.is_seeded() {
        return Verdict::Ongoing;
    }
    if board.cells().iter().any(|c| c.has_mine && !c.covered) {
        return Verdict::Lost;
    }

    let remaining = mines_remaining(board);

    if remaining == 0
        && board.flag_count() == board.mine_count()
        && board.cells().iter().all(|c| !c.flagged || c.has_mine)
    {
        return Verdict::Won(WinPath::AllMinesFlagged);
    }

    // every covered, unflagged cell must be a mine, not just match in number
    let mut open_count = 0i64;
    let mut all_mines = true;
    for c in board.cells().iter().filter(|c| c.covered && !c.flagged) {
        open_count += 1;
        all_mines &= c.has_mine;
    }
    if open_count == remaining && all_mines {
        return Verdict::Won(WinPath::OnlyMinesLeft);
    }

    Verdict::Ongoing
}

/// Finish the board for a win: uncover leftover safe cells after
/// `AllMinesFlagged`, flag leftover mines after `OnlyMinesLeft`.
pub fn sweep(board: &mut Board, path: WinPath) -> Sweep {
    let mut sweep = Sweep::default();
    for i in 0..board.len() {
        let cell = *board.cell_at(i);
        if !cell.covered {
            continue;
        }
        match path {
            WinPath::AllMinesFlagged if !cell.has_mine => {
                board.uncover(i);
                sweep.uncovered.push(board.pos(i));
            }
            WinPath::OnlyMinesLeft if cell.has_mine && !cell.flagged => {
                board.set_flag(i, true);
                sweep.flagged.push(board.pos(i));
            }
            _ => {}
        }
    }
    sweep
}
