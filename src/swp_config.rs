// Board configuration and difficulty presets
// Validates custom dimensions and mine counts before a session is created

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MIN_COLUMNS: usize = 9;
pub const MAX_COLUMNS: usize = 36;
pub const MIN_ROWS: usize = 9;
pub const MAX_ROWS: usize = 24;

/// Largest allowed boxes-per-mine ratio, expressed in tenths (8.1)
/// so the density floor can be computed with integer arithmetic.
pub const MAX_RATIO_TENTHS: usize = 81;

/// Difficulty presets and custom settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,     // 9x9, 10 mines
    Intermediate, // 16x16, 40 mines
    Expert,       // 30x16, 99 mines
    Custom {
        columns: usize,
        rows: usize,
        mines: usize,
    },
}

impl Serialize for Difficulty {
    /// Serialize difficulty as its label (custom sizes live in separate fields)
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Difficulty, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Difficulty::from_name(&s).ok_or_else(|| serde::de::Error::custom("unknown difficulty"))
    }
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    /// Board parameters as (columns, rows, mines)
    pub fn params(&self) -> (usize, usize, usize) {
        match self {
            Difficulty::Beginner => (9, 9, 10),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (30, 16, 99),
            Difficulty::Custom {
                columns,
                rows,
                mines,
            } => (*columns, *rows, *mines),
        }
    }

    /// Stable label, used for records and in the settings file
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
            Difficulty::Custom { .. } => "Custom",
        }
    }

    /// Parse a label case-insensitively. `Custom` comes back with zero sizes;
    /// the caller fills them in from wherever the custom values are kept.
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name.to_ascii_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "expert" => Some(Difficulty::Expert),
            "custom" => Some(Difficulty::Custom {
                columns: 0,
                rows: 0,
                mines: 0,
            }),
            _ => None,
        }
    }

    pub fn is_preset(&self) -> bool {
        !matches!(self, Difficulty::Custom { .. })
    }

    /// Validated board configuration for this tier
    pub fn config(&self) -> Result<BoardConfig, ConfigError> {
        let (columns, rows, mines) = self.params();
        BoardConfig::validate(columns, rows, mines)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{axis} must be between {min} and {max}, got {value}")]
    DimensionOutOfRange {
        axis: Axis,
        value: usize,
        min: usize,
        max: usize,
    },
    #[error("{mines} mines do not fit a board of {cells} cells (at most {max})")]
    TooManyMines {
        mines: usize,
        cells: usize,
        max: usize,
    },
    #[error("{mines} mines are too sparse for a board of {cells} cells (at least {min})")]
    TooFewMines {
        mines: usize,
        cells: usize,
        min: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Columns,
    Rows,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Columns => f.write_str("columns"),
            Axis::Rows => f.write_str("rows"),
        }
    }
}

/// A change `BoardConfig::clamp` made to the requested values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Columns { requested: usize, applied: usize },
    Rows { requested: usize, applied: usize },
    Mines { requested: usize, applied: usize },
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (what, requested, applied) = match self {
            Adjustment::Columns { requested, applied } => ("columns", requested, applied),
            Adjustment::Rows { requested, applied } => ("rows", requested, applied),
            Adjustment::Mines { requested, applied } => ("mine count", requested, applied),
        };
        write!(f, "custom {} adjusted from {} to {}", what, requested, applied)
    }
}

/// Validated, immutable board parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    columns: usize,
    rows: usize,
    mines: usize,
    difficulty: Difficulty,
}

impl BoardConfig {
    /// Strict validation: every out-of-range value is rejected
    pub fn validate(columns: usize, rows: usize, mines: usize) -> Result<BoardConfig, ConfigError> {
        check_dimension(Axis::Columns, columns, MIN_COLUMNS, MAX_COLUMNS)?;
        check_dimension(Axis::Rows, rows, MIN_ROWS, MAX_ROWS)?;

        let cells = columns * rows;
        let max = max_mines(cells);
        if mines > max {
            return Err(ConfigError::TooManyMines { mines, cells, max });
        }
        let min = min_mines(cells);
        if mines < min {
            return Err(ConfigError::TooFewMines { mines, cells, min });
        }

        Ok(BoardConfig {
            columns,
            rows,
            mines,
            difficulty: preset_for(columns, rows, mines),
        })
    }

    /// Lenient construction for custom input: pulls every value into range
    /// and reports what was changed.
    pub fn clamp(columns: usize, rows: usize, mines: usize) -> (BoardConfig, Vec<Adjustment>) {
        let mut adjustments = Vec::new();

        let c = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        if c != columns {
            adjustments.push(Adjustment::Columns {
                requested: columns,
                applied: c,
            });
        }
        let r = rows.clamp(MIN_ROWS, MAX_ROWS);
        if r != rows {
            adjustments.push(Adjustment::Rows {
                requested: rows,
                applied: r,
            });
        }

        let cells = c * r;
        let m = mines.clamp(min_mines(cells), max_mines(cells));
        if m != mines {
            adjustments.push(Adjustment::Mines {
                requested: mines,
                applied: m,
            });
        }

        let cfg = BoardConfig {
            columns: c,
            rows: r,
            mines: m,
            difficulty: preset_for(c, r, m),
        };
        (cfg, adjustments)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }

    /// The tier this configuration belongs to (`Custom` unless it matches a preset)
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            columns: 9,
            rows: 9,
            mines: 10,
            difficulty: Difficulty::Beginner,
        }
    }
}

fn check_dimension(axis: Axis, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::DimensionOutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// At least one cell stays free so the first reveal can always be safe.
fn max_mines(cells: usize) -> usize {
    cells.saturating_sub(1)
}

// ceil(cells / 8.1)
fn min_mines(cells: usize) -> usize {
    (cells * 10).div_ceil(MAX_RATIO_TENTHS)
}

fn preset_for(columns: usize, rows: usize, mines: usize) -> Difficulty {
    Difficulty::PRESETS
        .into_iter()
        .find(|d| d.params() == (columns, rows, mines))
        .unwrap_or(Difficulty::Custom {
            columns,
            rows,
            mines,
        })
}
