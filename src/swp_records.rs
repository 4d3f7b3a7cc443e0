// Best completion times per preset difficulty
// The engine only reports (difficulty, seconds); this store decides what to keep

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::swp_config::Difficulty;
use crate::swp_session::WinReport;

/// Record entry for best completion time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub secs: u64,    // Completion time in seconds
    pub date: String, // Date in ISO format (YYYY-MM-DD)
}

/// Best time for each preset tier. Custom boards are not recorded.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BestTimes {
    pub beginner: Option<Record>,
    pub intermediate: Option<Record>,
    pub expert: Option<Record>,
}

impl BestTimes {
    pub fn get(&self, d: &Difficulty) -> Option<&Record> {
        match d {
            Difficulty::Beginner => self.beginner.as_ref(),
            Difficulty::Intermediate => self.intermediate.as_ref(),
            Difficulty::Expert => self.expert.as_ref(),
            Difficulty::Custom { .. } => None,
        }
    }

    fn slot(&mut self, d: &Difficulty) -> Option<&mut Option<Record>> {
        match d {
            Difficulty::Beginner => Some(&mut self.beginner),
            Difficulty::Intermediate => Some(&mut self.intermediate),
            Difficulty::Expert => Some(&mut self.expert),
            Difficulty::Custom { .. } => None,
        }
    }

    /// Keep `secs` if it beats the current best, dated today.
    /// Returns true when a new record was stored.
    pub fn submit(&mut self, d: &Difficulty, secs: u64) -> bool {
        let date = Local::now().format("%Y-%m-%d").to_string();
        self.submit_dated(d, secs, date)
    }

    pub fn submit_dated(&mut self, d: &Difficulty, secs: u64, date: String) -> bool {
        let Some(slot) = self.slot(d) else {
            return false;
        };
        if slot.as_ref().is_some_and(|best| best.secs <= secs) {
            return false;
        }
        info!(difficulty = d.name(), secs, "new best time");
        *slot = Some(Record { secs, date });
        true
    }

    pub fn submit_report(&mut self, report: &WinReport) -> bool {
        self.submit(&report.difficulty, report.elapsed_seconds)
    }
}
