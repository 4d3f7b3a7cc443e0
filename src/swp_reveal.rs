// Reveal engine: single-cell uncover, flood fill over blank regions, mine hits

use std::collections::VecDeque;

use tracing::debug;

use crate::swp_board::{Board, Pos};

/// What a reveal changed on the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealResult {
    /// Cells that went from covered to uncovered, in reveal order
    pub uncovered: Vec<Pos>,
    /// Flags swept away by the flood fill (each one gives a mine back to the counter)
    pub unflagged: Vec<Pos>,
    /// Set when the revealed cell held a mine
    pub exploded: Option<Pos>,
    /// On a mine hit, flagged cells that hold no mine
    pub misflagged: Vec<Pos>,
}

impl RevealResult {
    pub fn is_noop(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Reveal the cell at `pos`.
///
/// Covered, unflagged cells only; anything else is a no-op. A mine uncovers
/// every mine on the board. A blank cell (no mined neighbors) floods outward
/// through connected blank cells and stops at the ring of numbered cells
/// around them.
pub fn reveal(board: &mut Board, pos: Pos) -> RevealResult {
    let mut result = RevealResult::default();
    let Some(start) = board.index(pos) else {
        return result;
    };
    let cell = *board.cell_at(start);
    if !cell.covered || cell.flagged {
        return result;
    }

    if cell.has_mine {
        result.misflagged = board.misflagged();
        board.uncover(start);
        result.uncovered.push(pos);
        for i in 0..board.len() {
            if i != start && board.cell_at(i).has_mine && board.cell_at(i).covered {
                if board.uncover(i) {
                    result.unflagged.push(board.pos(i));
                }
                result.uncovered.push(board.pos(i));
            }
        }
        result.exploded = Some(pos);
        debug!(%pos, "mine revealed");
        return result;
    }

    board.uncover(start);
    result.uncovered.push(pos);
    if cell.is_blank() {
        flood_fill(board, start, &mut result);
    }
    debug!(%pos, uncovered = result.uncovered.len(), "revealed");
    result
}

// Worklist expansion: every blank cell taken from the queue uncovers all of
// its covered neighbors; only blank neighbors are queued in turn. Each cell
// is queued at most once since it is uncovered before being pushed.
fn flood_fill(board: &mut Board, start: usize, result: &mut RevealResult) {
    let mut queue = VecDeque::from([start]);
    while let Some(i) = queue.pop_front() {
        let neighbors: Vec<usize> = board.neighbors(i).to_vec();
        for n in neighbors {
            if !board.cell_at(n).covered {
                continue;
            }
            if board.uncover(n) {
                result.unflagged.push(board.pos(n));
            }
            result.uncovered.push(board.pos(n));
            if board.cell_at(n).is_blank() {
                queue.push_back(n);
            }
        }
    }
}
