//! Minimal contract for the host rendering surface.

use crate::color::Rgb;

/// One styled text unit appended to a surface
///
/// Bits carry a `group` (the originating event offset, the class used for
/// hover grouping) and a structured `bit` position index; plain layout text
/// carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub text: String,
    /// Foreground color, `None` for unstyled layout text
    pub style: Option<Rgb>,
    /// Hover-group key for bit units: offset of the originating event.
    /// `None` on layout text, and on bits past the last event (the tail
    /// group; `bit` still distinguishes those from layout text).
    pub group: Option<usize>,
    /// Position index of the bit this unit displays
    pub bit: Option<usize>,
    /// Tooltip text (the annotation label)
    pub tooltip: Option<String>,
}

impl TextUnit {
    /// Unstyled layout text (offsets, hex digits, brackets, padding)
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            group: None,
            bit: None,
            tooltip: None,
        }
    }
}

/// What the host rendering surface must support
///
/// Deliberately small: a scoped output region that can be cleared and
/// appended to, per-unit background highlighting addressed by bit position,
/// and a separate single-value display region. Everything else (layout,
/// pointer events) lives outside the crate.
pub trait Surface {
    /// Drop everything previously appended (a new render fully replaces the
    /// old dump before anything is drawn)
    fn clear(&mut self);

    /// Append one styled unit to the output region
    fn append(&mut self, unit: TextUnit);

    /// Toggle the highlighted background of the unit displaying `bit`
    fn set_unit_background(&mut self, bit: usize, highlighted: bool);

    /// Replace the text of the single-value display region
    fn set_value_text(&mut self, text: &str);
}

/// In-memory surface that keeps plain text and highlight state
///
/// Used by tests and by the CLI's text mode; styling is dropped, structure
/// is kept.
#[derive(Debug, Default)]
pub struct TextSurface {
    text: String,
    highlighted: std::collections::BTreeSet<usize>,
    value: String,
}

impl TextSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended since the last clear
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Currently highlighted bit positions, ascending
    #[must_use]
    pub fn highlighted(&self) -> Vec<usize> {
        self.highlighted.iter().copied().collect()
    }

    /// Current text of the value display region
    #[must_use]
    pub fn value_text(&self) -> &str {
        &self.value
    }
}

impl Surface for TextSurface {
    fn clear(&mut self) {
        self.text.clear();
        self.highlighted.clear();
    }

    fn append(&mut self, unit: TextUnit) {
        self.text.push_str(&unit.text);
    }

    fn set_unit_background(&mut self, bit: usize, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(bit);
        } else {
            self.highlighted.remove(&bit);
        }
    }

    fn set_value_text(&mut self, text: &str) {
        self.value.clear();
        self.value.push_str(text);
    }
}
