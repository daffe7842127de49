//! Best runs of this process
//!
//! Keeps the top 10 fair play scores. Nothing is written to disk.

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 10;

/// Best runs, highest score first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scoreboard {
    pub entries: Vec<RunSummary>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score makes the board
    pub fn qualifies(&self, score: f32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a completed run. Returns the 1-based rank, or None if it didn't qualify.
    /// Equal scores keep the earlier run ahead.
    pub fn record(&mut self, summary: RunSummary) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, summary);
                i + 1
            }
            None => {
                self.entries.push(summary);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunSummary> {
        self.entries.first()
    }
}
