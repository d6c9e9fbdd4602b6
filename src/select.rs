//! Selection: group-wise highlighting and bit-span value reconstruction.

use crate::render::Dump;
use crate::surface::Surface;

/// The bits sharing one hover group, with their reconstructed value
///
/// Transient: rebuilt from scratch on every pointer-enter and discarded on
/// pointer-leave. Group membership is by originating event offset, not by
/// contiguous bit range, so adjacent and interleaved groups resolve
/// cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The group key that was resolved
    pub group: Option<usize>,
    /// Matching bit positions, ascending
    pub bits: Vec<usize>,
    /// Glyphs concatenated MSB-first (descending bit position)
    pub pattern: String,
    /// `pattern` parsed as an unsigned binary integer; `None` when the span
    /// is empty or wider than 128 bits
    pub value: Option<u128>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Text for the value display region: `1011 (11, 0x0B)`
    ///
    /// Pattern only when the value does not fit; empty for an empty
    /// selection.
    #[must_use]
    pub fn display(&self) -> String {
        match self.value {
            Some(v) => format!("{} ({}, 0x{:02X})", self.pattern, v, v),
            None => self.pattern.clone(),
        }
    }
}

/// Resolve which bits share `group` and what value they spell
///
/// Pure: consumes the dump structure only, so it is testable without a live
/// surface. Glyphs are concatenated in descending bit-position order
/// (natural MSB-first reading) even though cells were laid out in ascending
/// sweep order.
#[must_use]
pub fn resolve_selection(group: Option<usize>, dump: &Dump) -> Selection {
    let mut matched: Vec<(usize, char)> = dump
        .cells()
        .filter(|c| c.group == group)
        .map(|c| (c.bit, c.glyph))
        .collect();
    matched.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    let pattern: String = matched.iter().map(|&(_, g)| g).collect();
    let value = if pattern.is_empty() || pattern.len() > 128 {
        None
    } else {
        u128::from_str_radix(&pattern, 2).ok()
    };

    let mut bits: Vec<usize> = matched.into_iter().map(|(b, _)| b).collect();
    bits.reverse();

    Selection { group, bits, pattern, value }
}

/// Pointer-enter: highlight the group and show its value
///
/// Thin adapter applying a [`resolve_selection`] result to the surface.
pub fn pointer_enter(group: Option<usize>, dump: &Dump, surface: &mut dyn Surface) -> Selection {
    let selection = resolve_selection(group, dump);
    for &bit in &selection.bits {
        surface.set_unit_background(bit, true);
    }
    surface.set_value_text(&selection.display());
    selection
}

/// Pointer-leave: restore default backgrounds and clear the value display
pub fn pointer_leave(group: Option<usize>, dump: &Dump, surface: &mut dyn Surface) {
    let selection = resolve_selection(group, dump);
    for &bit in &selection.bits {
        surface.set_unit_background(bit, false);
    }
    surface.set_value_text("");
}
