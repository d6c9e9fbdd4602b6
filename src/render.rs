//! Hexdump layout: rows of hex bytes, per-bit binary cells, ASCII.

use crate::annotate::AnnotationMap;
use crate::color::Rgb;
use crate::surface::{Surface, TextUnit};

/// Bytes laid out per dump row
pub const BYTES_PER_ROW: usize = 4;

/// One rendered bit: an individually addressable interactive unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitCell {
    /// Position index of this bit in the buffer (LSB of byte 0 is bit 0)
    pub bit: usize,
    /// `'0'` or `'1'`
    pub glyph: char,
    /// Ordinal of the attributed annotation
    pub ordinal: usize,
    /// Offset of the originating event; the hover-group key
    pub group: Option<usize>,
    pub color: Rgb,
    /// Tooltip text (the annotation label)
    pub label: String,
}

/// One dump row: offset label, up to four bytes in three aligned columns
///
/// `hex` and `ascii` always hold [`BYTES_PER_ROW`] slots; `None` slots are
/// alignment placeholders on the final partial row. `bits` holds eight
/// cells per present byte, in display order (MSB of each byte first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRow {
    /// Byte offset of the first byte in this row
    pub offset: usize,
    pub hex: [Option<u8>; BYTES_PER_ROW],
    pub bits: Vec<BitCell>,
    pub ascii: [Option<char>; BYTES_PER_ROW],
}

/// Pure layout of a buffer plus its annotations
///
/// Built once per run and discarded on the next; rendering to a surface is
/// a separate step so the layout stays testable without a host surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dump {
    pub rows: Vec<DumpRow>,
}

impl Dump {
    /// Lay out `data` with one cell per bit
    ///
    /// `map` must cover exactly `8 * data.len()` bits; anything else is a
    /// caller bug.
    #[must_use]
    pub fn build(data: &[u8], map: &AnnotationMap) -> Self {
        assert_eq!(
            map.bits(),
            data.len() * 8,
            "annotation map covers {} bits but buffer has {}",
            map.bits(),
            data.len() * 8
        );

        let mut rows = Vec::with_capacity(data.len().div_ceil(BYTES_PER_ROW));
        for (row_idx, chunk) in data.chunks(BYTES_PER_ROW).enumerate() {
            let offset = row_idx * BYTES_PER_ROW;
            let mut hex = [None; BYTES_PER_ROW];
            let mut ascii = [None; BYTES_PER_ROW];
            let mut bits = Vec::with_capacity(chunk.len() * 8);

            for (i, &byte) in chunk.iter().enumerate() {
                hex[i] = Some(byte);
                ascii[i] = Some(if (32..=126).contains(&byte) {
                    byte as char
                } else {
                    '.'
                });

                // MSB first in display order; the MSB of byte k is bit 8k+7
                for n in (0..8).rev() {
                    let bit = (offset + i) * 8 + n;
                    let ann = map
                        .annotation(bit)
                        .expect("map covers every bit of the buffer");
                    bits.push(BitCell {
                        bit,
                        glyph: if byte >> n & 1 == 1 { '1' } else { '0' },
                        ordinal: ann.ordinal,
                        group: ann.source,
                        color: ann.color,
                        label: ann.label.clone(),
                    });
                }
            }

            rows.push(DumpRow { offset, hex, bits, ascii });
        }

        Dump { rows }
    }

    /// Flat iterator over every bit cell, in bit display order
    pub fn cells(&self) -> impl Iterator<Item = &BitCell> + '_ {
        self.rows.iter().flat_map(|r| r.bits.iter())
    }

    /// Emit the dump to a surface, fully replacing any prior render
    ///
    /// Produces the classic shape: `{offset:08x}` label, two hex digits per
    /// byte, a bracketed binary region with one styled unit per bit, a
    /// bracketed ASCII region, with blank placeholders keeping all three
    /// columns aligned on a final partial row.
    pub fn render_to(&self, surface: &mut dyn Surface) {
        surface.clear();
        for row in &self.rows {
            surface.append(TextUnit::plain(format!("{:08x}  ", row.offset)));
            for slot in &row.hex {
                match slot {
                    Some(b) => surface.append(TextUnit::plain(format!("{b:02x} "))),
                    None => surface.append(TextUnit::plain("   ")),
                }
            }
            surface.append(TextUnit::plain(" ["));
            let mut cells = row.bits.iter();
            for slot in &row.hex {
                if slot.is_some() {
                    for cell in cells.by_ref().take(8) {
                        surface.append(TextUnit {
                            text: cell.glyph.to_string(),
                            style: Some(cell.color),
                            group: cell.group,
                            bit: Some(cell.bit),
                            tooltip: Some(cell.label.clone()),
                        });
                    }
                    surface.append(TextUnit::plain(" "));
                } else {
                    surface.append(TextUnit::plain(" ".repeat(9)));
                }
            }
            surface.append(TextUnit::plain("] "));
            for slot in &row.ascii {
                match slot {
                    Some(c) => surface.append(TextUnit::plain(c.to_string())),
                    None => surface.append(TextUnit::plain(" ")),
                }
            }
            surface.append(TextUnit::plain("\n"));
        }
    }
}
