//! Log sinks: where a decode pass sends its trace messages.
//!
//! The sink is an explicit parameter of the decode call. The silent first
//! pass gets a [`DiscardSink`], the visible second pass a [`RecordingSink`];
//! no shared mutable destination is toggled between passes.

use crate::store::LogStore;

/// Receiver for decoder trace messages
///
/// The decoder calls this with its bit counter's current value as the
/// recorded offset; the counter must be monotonically non-decreasing over
/// a pass.
pub trait LogSink {
    fn log(&mut self, offset: usize, message: &str);
}

/// Sink that drops everything (the silent validation pass)
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn log(&mut self, _offset: usize, _message: &str) {}
}

/// Sink that records into a borrowed [`LogStore`]
#[derive(Debug)]
pub struct RecordingSink<'a> {
    store: &'a mut LogStore,
}

impl<'a> RecordingSink<'a> {
    #[must_use]
    pub fn new(store: &'a mut LogStore) -> Self {
        Self { store }
    }
}

impl LogSink for RecordingSink<'_> {
    fn log(&mut self, offset: usize, message: &str) {
        self.store.record(offset, message);
    }
}
