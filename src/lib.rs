//! `bitlens` - Bit-level decoder trace visualization
//!
//! Renders a byte buffer as hex/binary/ASCII and attaches to every single
//! bit the decoder log message that was active when that bit was consumed,
//! so hovering a bit shows which decoding step produced it and hovering a
//! log line shows every bit it covers.
//!
//! # How it fits together
//!
//! A decoder (the external collaborator, see [`TraceDecoder`]) runs twice
//! over the buffer: a silent validation pass, then a recording pass that
//! feeds a [`LogStore`]. The sweep in [`annotate`] merges the buffer's bit
//! index sequence with the store's offset-sorted events into one
//! [`Annotation`] per bit, colored deterministically by ordinal. The
//! [`Dump`] lays the result out as classic 4-byte hexdump rows where every
//! binary digit is an individually addressable unit, and
//! [`resolve_selection`] turns a hover group back into its bit set and the
//! unsigned integer those bits spell.
//!
//! # Example
//! ```
//! use bitlens::{annotate, resolve_selection, Dump, LogStore, SweepMode};
//!
//! let data = [0x0b_u8];
//!
//! // A decode pass recorded two messages: the counter read 4 after the
//! // low nibble was consumed and 8 after the high one.
//! let mut store = LogStore::new();
//! store.record(4, "low nibble");
//! store.record(8, "high nibble");
//!
//! let map = annotate(data.len(), &store.snapshot(), SweepMode::Trailing);
//! let dump = Dump::build(&data, &map);
//!
//! // Hovering anything in the "low nibble" group reconstructs its value.
//! let sel = resolve_selection(Some(4), &dump);
//! assert_eq!(sel.pattern, "1011");
//! assert_eq!(sel.value, Some(11));
//! assert_eq!(sel.display(), "1011 (11, 0x0B)");
//! ```
//!
//! # Bit order
//!
//! Bit offsets are 0-indexed with the least significant bit of byte 0 as
//! bit 0 (`bit = byte_index * 8 + (7 - msb_first_position)`), matching a
//! decoder that consumes bits LSB-first within each byte. Display order
//! inside the binary column is MSB-first, so cell text reads naturally.
//!
//! # Invariants
//!
//! - The annotation map is total: every bit in `[0, 8 * len)` maps to
//!   exactly one annotation, and ordinals never decrease with bit position.
//! - Colors depend only on the annotation ordinal, never on offsets or
//!   message content, so identical traces recolor identically.
//! - A run is built from scratch every time: store, map and dump from the
//!   previous run are discarded before the next one starts.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

mod annotate;
mod color;
mod error;
mod render;
mod run;
mod select;
mod sink;
mod store;
mod surface;


// Re-export public API
pub use annotate::{annotate, Annotation, AnnotationMap, SweepMode};
pub use color::{equidistributed_color, Rgb};
pub use error::{DecodeError, TraceError};
pub use render::{BitCell, Dump, DumpRow, BYTES_PER_ROW};
pub use run::{trace, trace_verified, TraceDecoder, TraceRun};
pub use select::{pointer_enter, pointer_leave, resolve_selection, Selection};
pub use sink::{DiscardSink, LogSink, RecordingSink};
pub use store::{LogEvent, LogStore};
pub use surface::{Surface, TextSurface, TextUnit};
