//! The two-pass trace driver.
//!
//! The dump needs the *finished* buffer and log store before anything can
//! render, but a decoder's log calls are interleaved with consuming bits it
//! has not finished validating. So each run decodes twice: once silently to
//! prove the decode succeeds, once recording into the real store. Both
//! passes must be deterministic or the bit-to-message correlation is
//! meaningless.

use crate::annotate::{annotate, AnnotationMap, SweepMode};
use crate::error::{DecodeError, TraceError};
use crate::sink::{DiscardSink, LogSink, RecordingSink};
use crate::store::LogStore;

/// The decoder collaborator
///
/// A lazy, finite, non-restartable sequence of decode steps. The driver
/// drains it to exhaustion; each step may log any number of messages
/// through the sink, tagging them with the decoder's own bit counter.
pub trait TraceDecoder {
    /// Advance one step, logging through `sink`
    ///
    /// Returns `Ok(false)` once the sequence is exhausted.
    fn step(&mut self, sink: &mut dyn LogSink) -> Result<bool, DecodeError>;
}

/// Everything one run produces: the frozen store and the per-bit map
///
/// Derived once per run; a re-invocation builds a fresh one and the old is
/// discarded, so nothing accumulates across runs.
#[derive(Debug, Clone)]
pub struct TraceRun {
    pub store: LogStore,
    pub map: AnnotationMap,
}

/// Run the two decode passes over `data` and annotate every bit
///
/// `make` constructs a fresh decoder for each pass (the step sequence is
/// non-restartable). Pass one runs with a [`DiscardSink`] purely to
/// validate the decode; pass two records into the store the annotator
/// consumes. A failure in either pass aborts before anything is rendered.
pub fn trace<D, F>(data: &[u8], mut make: F, mode: SweepMode) -> Result<TraceRun, TraceError>
where
    D: TraceDecoder,
    F: FnMut(&[u8]) -> D,
{
    drain(make(data), &mut DiscardSink)?;

    let mut store = LogStore::new();
    drain(make(data), &mut RecordingSink::new(&mut store))?;

    let map = annotate(data.len(), &store.snapshot(), mode);
    Ok(TraceRun { store, map })
}

/// Like [`trace`], but cross-checks that the passes agree
///
/// Records the first pass into a throwaway store (still never rendered) and
/// compares event offsets against the second. A decoder whose passes
/// diverge is not deterministic and its correlation would be invalid, so
/// this fails with [`TraceError::PassMismatch`] instead of rendering.
pub fn trace_verified<D, F>(data: &[u8], mut make: F, mode: SweepMode) -> Result<TraceRun, TraceError>
where
    D: TraceDecoder,
    F: FnMut(&[u8]) -> D,
{
    let mut first = LogStore::new();
    drain(make(data), &mut RecordingSink::new(&mut first))?;

    let mut store = LogStore::new();
    drain(make(data), &mut RecordingSink::new(&mut store))?;

    if first != store {
        return Err(TraceError::PassMismatch {
            pass_one: first.len(),
            pass_two: store.len(),
        });
    }

    let map = annotate(data.len(), &store.snapshot(), mode);
    Ok(TraceRun { store, map })
}

fn drain<D: TraceDecoder>(mut decoder: D, sink: &mut dyn LogSink) -> Result<(), TraceError> {
    while decoder.step(sink)? {}
    Ok(())
}
