// Minesweeper board engine
// The session owns all game state; settings, records and the console sit on top of it

pub mod swp_board; // Grid, cells and the neighbor table
pub mod swp_config; // Difficulty tiers and board validation
pub mod swp_console; // Plain-text frontend
pub mod swp_eval; // Win/loss evaluation
pub mod swp_flag; // Flag bookkeeping
pub mod swp_log; // Logging setup
pub mod swp_mines; // Mine placement and adjacency counts
pub mod swp_records; // Best times per difficulty
pub mod swp_reveal; // Reveal and flood fill
pub mod swp_session; // Game state machine
pub mod swp_settings; // TOML settings file

pub use swp_board::{Board, Cell, Pos};
pub use swp_config::{Adjustment, BoardConfig, ConfigError, Difficulty};
pub use swp_eval::{Verdict, WinPath};
pub use swp_records::{BestTimes, Record};
pub use swp_session::{CellChange, ChangeKind, GameSession, Outcome, Status, WinReport};
pub use swp_settings::{Settings, SettingsError};
