// Game session: owns one board and drives the NotStarted -> Active -> Won/Lost
// state machine. Every command runs to completion and reports what changed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::swp_board::{Board, Pos};
use crate::swp_config::{BoardConfig, Difficulty};
use crate::swp_eval::{Verdict, WinPath, evaluate, sweep};
use crate::swp_flag::{FlagResult, mines_remaining, toggle_flag};
use crate::swp_mines::place_mines;
use crate::swp_reveal::reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Active,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Uncovered,
    Flagged,
    Unflagged,
}

/// One cell whose visible state changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub pos: Pos,
    pub kind: ChangeKind,
}

/// Result of a command: the state delta plus the status after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub changes: Vec<CellChange>,
    pub status: Status,
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// What a best-time store needs after a win
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinReport {
    pub difficulty: Difficulty,
    pub elapsed_seconds: u64,
}

pub struct GameSession {
    config: BoardConfig,
    board: Board,
    status: Status,
    elapsed: u64,
    win_path: Option<WinPath>,
    misflagged: Vec<Pos>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: BoardConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic mine placement for a given seed
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Play a fixed mine layout instead of a random one
    pub fn with_layout(config: BoardConfig, mines: &[Pos]) -> Self {
        let mut session = Self::with_rng(config, StdRng::from_entropy());
        session.board = Board::with_mines(config, mines);
        session
    }

    fn with_rng(config: BoardConfig, rng: StdRng) -> Self {
        GameSession {
            config,
            board: Board::new(config),
            status: Status::NotStarted,
            elapsed: 0,
            win_path: None,
            misflagged: Vec::new(),
            rng,
        }
    }

    /// Discard the current board and start over, always allowed
    pub fn new_game(&mut self, config: BoardConfig) {
        info!(
            difficulty = config.difficulty().name(),
            columns = config.columns(),
            rows = config.rows(),
            mines = config.mines(),
            "new game"
        );
        self.config = config;
        self.board = Board::new(config);
        self.status = Status::NotStarted;
        self.elapsed = 0;
        self.win_path = None;
        self.misflagged.clear();
    }

    /// Reveal a cell. The first accepted reveal generates the mines
    /// around it, so the opening move never hits one.
    pub fn reveal(&mut self, pos: Pos) -> Outcome {
        if self.status.is_terminal() {
            debug!(%pos, status = ?self.status, "reveal ignored, game over");
            return self.outcome(Vec::new());
        }
        match self.board.cell(pos) {
            Some(cell) if cell.covered && !cell.flagged => {}
            Some(_) => {
                debug!(%pos, "reveal ignored, cell not revealable");
                return self.outcome(Vec::new());
            }
            None => {
                debug!(%pos, "reveal ignored, out of bounds");
                return self.outcome(Vec::new());
            }
        }

        if !self.board.is_seeded() {
            place_mines(&mut self.board, Some(pos), &mut self.rng);
        }
        self.activate();

        let result = reveal(&mut self.board, pos);
        let mut changes: Vec<CellChange> = result
            .unflagged
            .iter()
            .map(|&pos| CellChange {
                pos,
                kind: ChangeKind::Unflagged,
            })
            .collect();
        changes.extend(result.uncovered.iter().map(|&pos| CellChange {
            pos,
            kind: ChangeKind::Uncovered,
        }));

        if result.exploded.is_some() {
            self.misflagged = result.misflagged;
            self.finish(Status::Lost);
            return self.outcome(changes);
        }

        self.settle(&mut changes);
        self.outcome(changes)
    }

    /// Toggle the flag on a covered cell
    pub fn toggle_flag(&mut self, pos: Pos) -> Outcome {
        if self.status.is_terminal() {
            debug!(%pos, status = ?self.status, "flag ignored, game over");
            return self.outcome(Vec::new());
        }

        let kind = match toggle_flag(&mut self.board, pos) {
            FlagResult::Flagged(_) => ChangeKind::Flagged,
            FlagResult::Unflagged(_) => ChangeKind::Unflagged,
            FlagResult::Ignored => {
                debug!(%pos, "flag ignored");
                return self.outcome(Vec::new());
            }
        };
        self.activate();

        let mut changes = vec![CellChange { pos, kind }];
        self.settle(&mut changes);
        self.outcome(changes)
    }

    /// One elapsed second. Only counts while the game is active.
    pub fn tick(&mut self) {
        if self.status == Status::Active {
            self.elapsed += 1;
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mines minus flags; negative when over-flagged
    pub fn mines_remaining(&self) -> i64 {
        mines_remaining(&self.board)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn win_path(&self) -> Option<WinPath> {
        self.win_path
    }

    /// Wrongly flagged cells, filled in when the game is lost
    pub fn misflagged(&self) -> &[Pos] {
        &self.misflagged
    }

    /// Only a board holding the configured mine count keeps its tier;
    /// a fixed layout with another count is reported as `Custom`.
    pub fn win_report(&self) -> Option<WinReport> {
        if self.status != Status::Won {
            return None;
        }
        let mines = self.board.mine_count();
        let difficulty = if mines == self.config.mines() {
            self.config.difficulty()
        } else {
            Difficulty::Custom {
                columns: self.config.columns(),
                rows: self.config.rows(),
                mines,
            }
        };
        Some(WinReport {
            difficulty,
            elapsed_seconds: self.elapsed,
        })
    }

    fn activate(&mut self) {
        if self.status == Status::NotStarted {
            self.status = Status::Active;
            debug!("game started");
        }
    }

    fn settle(&mut self, changes: &mut Vec<CellChange>) {
        match evaluate(&self.board) {
            Verdict::Ongoing => {}
            Verdict::Won(path) => {
                let done = sweep(&mut self.board, path);
                changes.extend(done.uncovered.into_iter().map(|pos| CellChange {
                    pos,
                    kind: ChangeKind::Uncovered,
                }));
                changes.extend(done.flagged.into_iter().map(|pos| CellChange {
                    pos,
                    kind: ChangeKind::Flagged,
                }));
                self.win_path = Some(path);
                self.finish(Status::Won);
            }
            Verdict::Lost => self.finish(Status::Lost),
        }
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        info!(
            status = ?status,
            elapsed = self.elapsed,
            difficulty = self.config.difficulty().name(),
            "game over"
        );
    }

    fn outcome(&self, changes: Vec<CellChange>) -> Outcome {
        Outcome {
            changes,
            status: self.status,
        }
    }
}
