//! # History Module - Bounded Log of Past Calculations
//!
//! Every successful evaluation is recorded as `"<expression> = <result>"`. The log keeps the
//! newest entry first and holds at most [HISTORY_LIMIT] entries; older entries are dropped as
//! new ones arrive.
//!
//! The log is persisted as a JSON array of `{ "t": <epoch millis>, "v": <text> }` objects.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use web_time::SystemTime;

use crate::{HISTORY_LIMIT, Timestamp};

/// A single past calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the calculation happened, in milliseconds since the unix epoch
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    /// The calculation itself, e.g. `"7*6 = 42"`
    #[serde(rename = "v")]
    pub text: String,
}

impl HistoryEntry {
    /// The entry text with control characters replaced
    ///
    /// Persisted entries may have been edited by hand; they must never be able to inject
    /// escape sequences into a terminal.
    pub fn printable_text(&self) -> Cow<'_, str> {
        if self.text.chars().any(char::is_control) {
            Cow::Owned(
                self.text
                    .chars()
                    .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
                    .collect(),
            )
        } else {
            Cow::Borrowed(&self.text)
        }
    }

    /// The time of the calculation
    pub fn time(&self) -> SystemTime {
        let millis = u64::try_from(self.timestamp).unwrap_or_default();
        SystemTime::UNIX_EPOCH + web_time::Duration::from_millis(millis)
    }
}

/// Newest-first log of past calculations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a log from its persisted JSON
    ///
    /// Logs longer than [HISTORY_LIMIT] are truncated to their newest entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        entries.truncate(HISTORY_LIMIT);
        Ok(Self { entries })
    }

    /// Serialize the whole log
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Record a calculation
    ///
    /// The entry is placed first. If the log then exceeds [HISTORY_LIMIT], the oldest entry is
    /// dropped.
    ///
    /// ```rust
    /// use reckon::history::HistoryLog;
    ///
    /// let mut log = HistoryLog::new();
    /// log.push("1+1 = 2", 1);
    /// log.push("2+2 = 4", 2);
    ///
    /// assert_eq!(log.latest().unwrap().text, "2+2 = 4");
    /// assert_eq!(log.len(), 2);
    /// ```
    pub fn push(&mut self, text: impl Into<String>, timestamp: Timestamp) {
        self.entries.insert(
            0,
            HistoryEntry {
                timestamp,
                text: text.into(),
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Amount of entries in the log
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The current time in milliseconds since the unix epoch
pub fn now() -> Timestamp {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| Timestamp::try_from(elapsed.as_millis()).unwrap_or(Timestamp::MAX))
        .unwrap_or_default()
}
