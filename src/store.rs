//! Log store: offset-keyed multimap of decoder trace messages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All messages recorded at one bit offset during a decode pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Bit offset the decoder had reached when the messages were logged
    pub offset: usize,
    /// Messages in insertion order
    pub messages: Vec<String>,
}

impl LogEvent {
    /// Joined message text, one message per line (tooltip form)
    #[must_use]
    pub fn label(&self) -> String {
        self.messages.join("\n")
    }
}

/// Append-only multimap from bit offset to trace messages
///
/// Populated by exactly one decode pass, then read as a frozen snapshot by
/// the annotator. There is no deletion: the store is accumulate-then-read.
/// A new run starts from a fresh store; nothing accumulates across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStore {
    events: BTreeMap<usize, Vec<String>>,
}

impl LogStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the event at `offset`, creating it if absent
    ///
    /// Insertion order within one offset is preserved.
    pub fn record(&mut self, offset: usize, message: impl Into<String>) {
        self.events.entry(offset).or_default().push(message.into());
    }

    /// All events in offset-ascending order
    ///
    /// The annotator relies on this ordering; the backing map keeps offsets
    /// sorted so no separate sort step is needed.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogEvent> {
        self.events
            .iter()
            .map(|(&offset, messages)| LogEvent { offset, messages: messages.clone() })
            .collect()
    }

    /// Number of distinct offsets with at least one message
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no message has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Display lines in offset order, one per message: `[offset] message`
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().flat_map(|(&offset, messages)| {
            messages.iter().map(move |m| format!("[{offset}] {m}"))
        })
    }
}
