//! Error types for trace capture and annotation.

use std::fmt;

/// Error reported by a decoder mid-pass
///
/// Carries the bit offset the decoder had reached when it failed, so the
/// failure can be surfaced in the same output region as normal trace lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Bit offset at the point of failure
    pub offset: usize,
    /// Decoder-supplied description of what went wrong
    pub message: String,
}

impl DecodeError {
    /// Create a decode error at the given bit offset
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self { offset, message: message.into() }
    }
}

/// Error returned when a trace run fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The decoder reported an error during one of the two passes
    Decode(DecodeError),
    /// The two decode passes recorded different event streams
    ///
    /// The bit-to-message correlation is only valid if the decoder is fully
    /// deterministic; rendering would silently attach wrong messages, so
    /// this is reported instead.
    PassMismatch {
        /// Events recorded by the first pass
        pass_one: usize,
        /// Events recorded by the second pass
        pass_two: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decode failed at bit {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for DecodeError {}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "{e}"),
            Self::PassMismatch { pass_one, pass_two } => {
                write!(
                    f,
                    "decode passes disagree ({pass_one} events vs {pass_two}); decoder is not deterministic"
                )
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::PassMismatch { .. } => None,
        }
    }
}

impl From<DecodeError> for TraceError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}
