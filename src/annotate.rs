//! The sweep: merging bit indices with log events into per-bit annotations.

use serde::{Deserialize, Serialize};

use crate::color::{equidistributed_color, Rgb};
use crate::store::LogEvent;

/// How a bit is attributed to a log event during the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// A bit belongs to the first event strictly after it.
    ///
    /// Offsets are read from the decoder's counter *after* it consumes bits,
    /// so a message at offset `k` describes the bits leading up to `k`; this
    /// mode reproduces that attribution exactly. An event at offset 0 is
    /// consumed before bit 0 is assigned and never shows up on any bit.
    #[default]
    Trailing,
    /// A bit belongs to the most recent event at or before its offset.
    ///
    /// Behavior-changing alternative to [`SweepMode::Trailing`]: bits ahead
    /// of the first event get a degenerate ordinal-0 annotation, and event
    /// ranks are shifted up by one.
    Preceding,
}

/// Resolved annotation for one or more bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// 0-based rank among all annotations for this buffer, in offset order
    pub ordinal: usize,
    /// Offset of the originating event; `None` for the degenerate
    /// annotation covering bits past the last event (or a run with no
    /// events at all)
    pub source: Option<usize>,
    /// Joined message text of the originating event, empty when degenerate
    pub label: String,
    /// Derived solely from `ordinal`, never from offset or content
    pub color: Rgb,
}

/// Total map from every bit in `[0, 8 * len)` to exactly one annotation
///
/// Stored as an annotation table plus a dense per-bit index into it, so
/// per-bit lookup is O(1) and labels are not duplicated per bit.
///
/// Invariant: ordinals are monotonically non-decreasing in bit order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMap {
    annotations: Vec<Annotation>,
    index: Vec<u32>,
}

impl AnnotationMap {
    /// Number of bits covered
    #[must_use]
    pub fn bits(&self) -> usize {
        self.index.len()
    }

    /// True for an empty buffer
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Annotation for one bit, `None` out of range
    #[must_use]
    pub fn annotation(&self, bit: usize) -> Option<&Annotation> {
        let idx = *self.index.get(bit)?;
        Some(&self.annotations[idx as usize])
    }

    /// The distinct annotations actually assigned, in ordinal order
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Iterate `(bit, annotation)` in bit order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Annotation)> + '_ {
        self.index
            .iter()
            .enumerate()
            .map(|(bit, &idx)| (bit, &self.annotations[idx as usize]))
    }
}

/// Annotate every bit of a `len_bytes`-long buffer from an event snapshot
///
/// Single forward sweep, O(bits + events). `events` must be sorted by
/// offset ascending, which [`crate::LogStore::snapshot`] guarantees. With no
/// events at all every bit receives a single degenerate annotation with
/// ordinal 0 and an empty label.
#[must_use]
pub fn annotate(len_bytes: usize, events: &[LogEvent], mode: SweepMode) -> AnnotationMap {
    debug_assert!(
        events.windows(2).all(|w| w[0].offset < w[1].offset),
        "event snapshot must be offset-ascending"
    );
    match mode {
        SweepMode::Trailing => sweep_trailing(len_bytes * 8, events),
        SweepMode::Preceding => sweep_preceding(len_bytes * 8, events),
    }
}

fn sweep_trailing(bits: usize, events: &[LogEvent]) -> AnnotationMap {
    let total = events.len();
    let mut annotations: Vec<Annotation> = Vec::new();
    let mut index = Vec::with_capacity(bits);

    let mut cursor = events.iter();
    let mut current = cursor.next();
    let mut ordinal = 0usize;
    // Table slot for the current ordinal; cleared whenever the cursor moves
    let mut slot: Option<u32> = None;

    for bit in 0..bits {
        while current.is_some_and(|e| bit >= e.offset) {
            current = cursor.next();
            ordinal += 1;
            slot = None;
        }
        let idx = *slot.get_or_insert_with(|| {
            annotations.push(resolve(ordinal, total, current));
            (annotations.len() - 1) as u32
        });
        index.push(idx);
    }

    AnnotationMap { annotations, index }
}

fn sweep_preceding(bits: usize, events: &[LogEvent]) -> AnnotationMap {
    let total = events.len();
    let mut annotations: Vec<Annotation> = Vec::new();
    let mut index = Vec::with_capacity(bits);

    let mut upcoming = events.iter().peekable();
    let mut current: Option<&LogEvent> = None;
    // Ordinal 0 is the region ahead of the first event; event ranks follow
    let mut ordinal = 0usize;
    let mut slot: Option<u32> = None;

    for bit in 0..bits {
        while upcoming.peek().is_some_and(|e| e.offset <= bit) {
            current = upcoming.next();
            ordinal += 1;
            slot = None;
        }
        let idx = *slot.get_or_insert_with(|| {
            annotations.push(resolve(ordinal, total, current));
            (annotations.len() - 1) as u32
        });
        index.push(idx);
    }

    AnnotationMap { annotations, index }
}

fn resolve(ordinal: usize, total: usize, event: Option<&LogEvent>) -> Annotation {
    Annotation {
        ordinal,
        source: event.map(|e| e.offset),
        label: event.map(LogEvent::label).unwrap_or_default(),
        color: equidistributed_color(ordinal, total),
    }
}
