//! Execution history.
//!
//! Every target run through mk is recorded with the directory it was run
//! from. The list is stored most recent first and capped at
//! [`MAX_HISTORY_ENTRIES`].

use chrono::{DateTime, Local, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::file_handling::{read_yaml, write_yaml};
use crate::i18n::Messages;

pub const MAX_HISTORY_ENTRIES: usize = 50;

const HISTORY_FILE_DESCRIPTION: &str = "history";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub target: String,
    pub directory: String,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct History {
    path: String,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Loads the history stored at `path`. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self> {
        let entries = read_yaml(HISTORY_FILE_DESCRIPTION, path)?.unwrap_or_default();
        Ok(Self {
            path: path.to_string(),
            entries,
        })
    }

    /// Like [`History::load`], but starts empty when the file is corrupted.
    pub fn load_or_empty(path: &str) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Discarding unreadable history: {e}");
            Self {
                path: path.to_string(),
                entries: Vec::new(),
            }
        })
    }

    /// Records a run and saves the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be written.
    pub fn add(&mut self, target: &str, directory: &str) -> Result<()> {
        self.entries.insert(
            0,
            HistoryEntry {
                target: target.to_string(),
                directory: directory.to_string(),
                executed_at: Utc::now(),
            },
        );
        self.entries.truncate(MAX_HISTORY_ENTRIES);

        write_yaml(HISTORY_FILE_DESCRIPTION, &self.path, &self.entries)
    }

    /// Returns up to `count` entries, most recent first.
    #[must_use]
    pub fn recent(&self, count: usize) -> &[HistoryEntry] {
        &self.entries[..count.min(self.entries.len())]
    }
}

/// Describes how long ago `executed_at` was, relative to `now`.
#[must_use]
pub fn format_age(executed_at: DateTime<Utc>, now: DateTime<Utc>, messages: &Messages) -> String {
    let elapsed = now.signed_duration_since(executed_at);

    if elapsed.num_minutes() < 1 {
        messages.time_just_now.to_string()
    } else if elapsed.num_hours() < 1 {
        messages.time_minutes_ago(elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        messages.time_hours_ago(elapsed.num_hours())
    } else {
        executed_at
            .with_timezone(&Local)
            .format("%d/%m %H:%M")
            .to_string()
    }
}
