// Grid data structure: cells, positions and the precomputed neighbor table

use crate::swp_config::BoardConfig;

/// A cell coordinate, zero-based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub has_mine: bool,
    /// Mined neighbors; `None` means there are none (and for mined cells, unused)
    pub adjacent_mines: Option<u8>,
    pub covered: bool,
    pub flagged: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            has_mine: false,
            adjacent_mines: None,
            covered: true,
            flagged: false,
        }
    }
}

impl Cell {
    /// Safe cell with no mined neighbors: the flood-fill trigger
    pub fn is_blank(&self) -> bool {
        !self.has_mine && self.adjacent_mines.is_none()
    }
}

// Moore neighborhood offsets, {-1,0,1}x{-1,0,1} without the center.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Indices of the in-bounds neighbors of one cell
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    idx: [usize; 8],
    len: u8,
}

impl Neighbors {
    pub fn as_slice(&self) -> &[usize] {
        &self.idx[..self.len as usize]
    }
}

/// Rectangular grid of `rows x columns` cells, stored row-major
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    mine_count: usize,
    cells: Vec<Cell>,
    neighbors: Vec<Neighbors>,
    flags: usize,
    seeded: bool,
}

impl Board {
    /// Create a fully covered board with no mines yet.
    /// Mines are placed on the first reveal so that cell can be kept safe.
    pub fn new(config: BoardConfig) -> Self {
        let (w, h) = (config.columns(), config.rows());
        Board {
            config,
            mine_count: config.mines(),
            cells: vec![Cell::default(); w * h],
            neighbors: neighbor_table(w, h),
            flags: 0,
            seeded: false,
        }
    }

    /// Build a board from a fixed mine layout. Positions out of bounds are
    /// ignored and duplicates count once; the board's mine count is the
    /// number of distinct cells actually mined, whatever `config.mines()` says.
    pub fn with_mines(config: BoardConfig, mines: &[Pos]) -> Self {
        let mut board = Board::new(config);
        for &pos in mines {
            if let Some(i) = board.index(pos) {
                board.cells[i].has_mine = true;
            }
        }
        board.mine_count = board.cells.iter().filter(|c| c.has_mine).count();
        crate::swp_mines::compute_adjacency(&mut board);
        board.seeded = true;
        board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn columns(&self) -> usize {
        self.config.columns()
    }

    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    /// (columns, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns(), self.rows())
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether mines have been placed and adjacency computed
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub(crate) fn mark_seeded(&mut self) {
        self.seeded = true;
    }

    /// Flat index for a position, `None` when out of bounds
    pub fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row < self.rows() && pos.col < self.columns() {
            Some(pos.row * self.columns() + pos.col)
        } else {
            None
        }
    }

    pub fn pos(&self, index: usize) -> Pos {
        Pos {
            row: index / self.columns(),
            col: index % self.columns(),
        }
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors[index].as_slice()
    }

    /// Number of flags currently placed
    pub fn flag_count(&self) -> usize {
        self.flags
    }

    /// Set or clear the flag on a covered cell, keeping the flag counter in step.
    /// Returns false when nothing changed.
    pub(crate) fn set_flag(&mut self, index: usize, flagged: bool) -> bool {
        let cell = &mut self.cells[index];
        if !cell.covered || cell.flagged == flagged {
            return false;
        }
        cell.flagged = flagged;
        if flagged {
            self.flags += 1;
        } else {
            self.flags -= 1;
        }
        true
    }

    /// Uncover a cell. A flag on it is removed first; returns whether a flag
    /// was swept away.
    pub(crate) fn uncover(&mut self, index: usize) -> bool {
        let was_flagged = self.set_flag(index, false);
        self.cells[index].covered = false;
        was_flagged
    }

    pub fn covered_count(&self) -> usize {
        self.cells.iter().filter(|c| c.covered).count()
    }

    pub fn mine_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_mine)
            .map(|(i, _)| self.pos(i))
            .collect()
    }

    /// Flagged cells that hold no mine
    pub fn misflagged(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.flagged && !c.has_mine)
            .map(|(i, _)| self.pos(i))
            .collect()
    }
}

fn neighbor_table(w: usize, h: usize) -> Vec<Neighbors> {
    let mut table = Vec::with_capacity(w * h);
    for row in 0..h {
        for col in 0..w {
            let mut n = Neighbors {
                idx: [0; 8],
                len: 0,
            };
            for (dr, dc) in OFFSETS {
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r >= 0 && c >= 0 && (r as usize) < h && (c as usize) < w {
                    n.idx[n.len as usize] = r as usize * w + c as usize;
                    n.len += 1;
                }
            }
            table.push(n);
        }
    }
    table
}
