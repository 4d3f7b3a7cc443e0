// Flag bookkeeping: toggle suspected-mine markers on covered cells

use crate::swp_board::{Board, Pos};

/// Outcome of a flag toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagResult {
    Flagged(Pos),
    Unflagged(Pos),
    /// Uncovered or out-of-bounds cell, nothing changed
    Ignored,
}

/// Flip the flag on a covered cell. Flag count is not capped, so the
/// remaining-mines counter may go negative.
pub fn toggle_flag(board: &mut Board, pos: Pos) -> FlagResult {
    let Some(i) = board.index(pos) else {
        return FlagResult::Ignored;
    };
    let cell = board.cell_at(i);
    if !cell.covered {
        return FlagResult::Ignored;
    }
    let flag = !cell.flagged;
    board.set_flag(i, flag);
    if flag {
        FlagResult::Flagged(pos)
    } else {
        FlagResult::Unflagged(pos)
    }
}

/// Mines minus flags, as shown on the counter
pub fn mines_remaining(board: &Board) -> i64 {
    board.mine_count() as i64 - board.flag_count() as i64
}
