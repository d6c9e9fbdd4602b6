//! Visualize a decoder trace as an interactive SVG hexdump.
//!
//! Runs the bundled demonstration decoder over a buffer and renders every
//! bit colored by the trace message that consumed it. Hovering a bit (or a
//! trace line) highlights its whole group and shows the value the selected
//! bits spell.

use clap::Parser;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use bitlens::{
    trace_verified, BitCell, DecodeError, Dump, LogSink, LogStore, RecordingSink, SweepMode,
    TextSurface, TraceDecoder, TraceRun,
};

#[derive(Parser)]
#[command(name = "bitlens-viz")]
#[command(about = "Visualize a decoder trace as an interactive SVG hexdump")]
struct Args {
    /// Input file to trace
    #[arg(conflicts_with = "demo", required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Trace the UTF-8 bytes of this string instead of a file
    #[arg(short, long)]
    demo: Option<String>,

    /// Output SVG file (default: input with .svg extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a plain-text dump to stdout instead of writing SVG
    #[arg(long)]
    text: bool,

    /// Print the annotation table as JSON instead of writing SVG
    #[arg(long)]
    json: bool,

    /// Attribute bits to the most recent message at or before them instead
    /// of the message logged right after them (changes which message a bit
    /// highlights)
    #[arg(long)]
    corrected: bool,
}

// Layout constants
const MARGIN: usize = 20;
const ROW_HEIGHT: usize = 22;
const BIT_SIZE: usize = 13;
const BYTE_GAP: usize = 6;
const CHAR_WIDTH: usize = 8;
const HEX_X: usize = MARGIN + 9 * CHAR_WIDTH;
const BITS_X: usize = HEX_X + 13 * CHAR_WIDTH;
const ASCII_GAP: usize = 16;
const TRACE_GAP: usize = 40;

/// Demonstration decoder: walks the buffer LSB-first as tagged fields
///
/// Each step reads a 3-bit tag and then a `tag + 1`-bit payload, logging
/// after every read so each message's offset is the counter value once the
/// bits it describes were consumed. Stands in for a real decoder library;
/// fully deterministic by construction.
struct TagWalker {
    data: Vec<u8>,
    bit: usize,
}

impl TagWalker {
    fn new(data: &[u8]) -> Self {
        Self { data: data.to_vec(), bit: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.bit
    }

    /// Read `n` bits LSB-first within each byte (bit 0 = LSB of byte 0)
    fn read_bits(&mut self, n: usize) -> u32 {
        let mut value = 0u32;
        for i in 0..n {
            let bit = (self.data[self.bit / 8] >> (self.bit % 8)) & 1;
            value |= u32::from(bit) << i;
            self.bit += 1;
        }
        value
    }
}

impl TraceDecoder for TagWalker {
    fn step(&mut self, sink: &mut dyn LogSink) -> Result<bool, DecodeError> {
        if self.remaining() == 0 {
            return Ok(false);
        }
        if self.remaining() < 3 {
            let n = self.remaining();
            let value = self.read_bits(n);
            sink.log(self.bit, &format!("trailer: {n} bits = {value:#x}"));
            return Ok(true);
        }
        let tag = self.read_bits(3) as usize;
        sink.log(self.bit, &format!("tag = {tag}"));
        let take = (tag + 1).min(self.remaining());
        let value = self.read_bits(take);
        sink.log(self.bit, &format!("payload: {take} bits = {value:#x}"));
        Ok(true)
    }
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Hover-group class for a bit or trace line: `message-{offset}` for bits
/// attributed to an event, `message-end` for the tail past the last one
fn group_class(group: Option<usize>) -> String {
    match group {
        Some(offset) => format!("message-{offset}"),
        None => "message-end".to_string(),
    }
}

fn render_svg(data: &[u8], run: &TraceRun) -> String {
    let dump = Dump::build(data, &run.map);
    let events = run.store.snapshot();

    let dump_width =
        BITS_X + 4 * (8 * BIT_SIZE + BYTE_GAP) + ASCII_GAP + 6 * CHAR_WIDTH + MARGIN;
    let trace_y = MARGIN + 2 * ROW_HEIGHT;
    let dump_y = trace_y + events.len() * ROW_HEIGHT + TRACE_GAP;
    let total_height = dump_y + dump.rows.len() * ROW_HEIGHT + MARGIN;
    let total_width = dump_width.max(640);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" font-family="monospace" font-size="12">
  <style>
    .bit {{ stroke: #9e9e9e; stroke-width: 0.5; }}
    .bit-glyph {{ font-size: 10px; pointer-events: none; }}
    .trace-line {{ fill: #333; }}
    .highlight .bit {{ fill: #000 !important; }}
    .highlight .bit-glyph {{ fill: #fff; }}
    .highlight .trace-line {{ font-weight: bold; }}
    .section-title {{ font-size: 12px; font-weight: bold; fill: #333; }}
    .value-display {{ font-size: 13px; font-weight: bold; fill: #1976d2; }}
  </style>
  <rect width="100%" height="100%" fill="white"/>
"#
    );

    // Selection behavior, mirrored from the library's resolve_selection:
    // collect the hovered group's bits, order glyphs by descending bit
    // position, parse as binary and show all three representations.
    svg.push_str(
        r#"  <script type="text/javascript"><![CDATA[
    function setValue(t) {
      var el = document.getElementById('selected-bits');
      if (el) el.textContent = t;
    }
    function enter(cls) {
      var bits = [];
      document.querySelectorAll('.' + cls).forEach(function (el) {
        el.classList.add('highlight');
        var b = el.getAttribute('data-bit');
        if (b !== null) bits.push([parseInt(b, 10), el.getAttribute('data-glyph')]);
      });
      if (bits.length === 0) return;
      bits.sort(function (a, b) { return b[0] - a[0]; });
      var s = bits.map(function (p) { return p[1]; }).join('');
      var v = parseInt(s, 2);
      var hex = v.toString(16).toUpperCase();
      if (hex.length < 2) hex = '0' + hex;
      setValue(s + ' (' + v + ', 0x' + hex + ')');
    }
    function leave(cls) {
      document.querySelectorAll('.' + cls).forEach(function (el) {
        el.classList.remove('highlight');
      });
      setValue('');
    }
  ]]></script>
"#,
    );

    svg.push_str(&format!(
        "  <text x=\"{MARGIN}\" y=\"{}\" class=\"section-title\">TRACE ({} bytes, {} events, {} bits)</text>\n",
        MARGIN + 12,
        data.len(),
        run.store.len(),
        run.map.bits(),
    ));
    svg.push_str(&format!(
        "  <text x=\"{MARGIN}\" y=\"{}\" id=\"selected-bits\" class=\"value-display\"> </text>\n",
        MARGIN + 12 + ROW_HEIGHT,
    ));

    // Trace lines, colored like the bits they cover
    for (i, event) in events.iter().enumerate() {
        let y = trace_y + i * ROW_HEIGHT + 12;
        let cls = group_class(Some(event.offset));
        let color = run
            .map
            .annotations()
            .iter()
            .find(|a| a.source == Some(event.offset))
            .map_or_else(|| "#999".to_string(), |a| a.color.css());
        svg.push_str(&format!(
            "  <g class=\"{cls}\" onmouseover=\"enter('{cls}')\" onmouseout=\"leave('{cls}')\">\n"
        ));
        svg.push_str(&format!(
            "    <rect x=\"{}\" y=\"{}\" width=\"10\" height=\"10\" fill=\"{}\" class=\"bit\"/>\n",
            MARGIN,
            y - 9,
            color
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{y}\" class=\"trace-line\">[{}] {}</text>\n",
            MARGIN + 16,
            event.offset,
            esc(&event.messages.join(" | "))
        ));
        svg.push_str("  </g>\n");
    }

    svg.push_str(&format!(
        "  <text x=\"{MARGIN}\" y=\"{}\" class=\"section-title\">DUMP</text>\n",
        dump_y - 8
    ));

    for (row_idx, row) in dump.rows.iter().enumerate() {
        let y = dump_y + row_idx * ROW_HEIGHT + 12;
        svg.push_str(&format!(
            "  <text x=\"{MARGIN}\" y=\"{y}\">{:08x}</text>\n",
            row.offset
        ));

        let hex: String = row
            .hex
            .iter()
            .map(|slot| slot.map_or("   ".to_string(), |b| format!("{b:02x} ")))
            .collect();
        svg.push_str(&format!(
            "  <text x=\"{HEX_X}\" y=\"{y}\">{}</text>\n",
            hex.trim_end()
        ));

        let mut x = BITS_X;
        let mut cells = row.bits.iter();
        for slot in &row.hex {
            if slot.is_some() {
                for cell in cells.by_ref().take(8) {
                    svg.push_str(&bit_cell_svg(cell, x, y));
                    x += BIT_SIZE;
                }
            } else {
                x += 8 * BIT_SIZE;
            }
            x += BYTE_GAP;
        }

        let ascii: String = row
            .ascii
            .iter()
            .map(|slot| slot.unwrap_or(' '))
            .collect();
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{y}\">{}</text>\n",
            x + ASCII_GAP,
            esc(ascii.trim_end())
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn bit_cell_svg(cell: &BitCell, x: usize, y: usize) -> String {
    let cls = group_class(cell.group);
    let tooltip = if cell.label.is_empty() {
        "(no message)".to_string()
    } else {
        esc(&cell.label)
    };
    format!(
        concat!(
            "  <g class=\"{cls}\" data-bit=\"{bit}\" data-glyph=\"{glyph}\" ",
            "onmouseover=\"enter('{cls}')\" onmouseout=\"leave('{cls}')\">\n",
            "    <rect x=\"{x}\" y=\"{ry}\" width=\"{size}\" height=\"{size}\" fill=\"{fill}\" class=\"bit\"/>\n",
            "    <text x=\"{tx}\" y=\"{ty}\" text-anchor=\"middle\" class=\"bit-glyph\">{glyph}</text>\n",
            "    <title>{tooltip}</title>\n",
            "  </g>\n",
        ),
        cls = cls,
        bit = cell.bit,
        glyph = cell.glyph,
        x = x,
        ry = y - BIT_SIZE + 2,
        size = BIT_SIZE,
        fill = cell.color.css(),
        tx = x + BIT_SIZE / 2,
        ty = y - 1,
        tooltip = tooltip,
    )
}

fn main() {
    let args = Args::parse();

    let data = match (&args.demo, &args.input) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: failed to read {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        (None, None) => unreachable!("clap enforces input or --demo"),
    };

    let mode = if args.corrected {
        SweepMode::Preceding
    } else {
        SweepMode::Trailing
    };

    let run = match trace_verified(&data, |buf| TagWalker::new(buf), mode) {
        Ok(run) => run,
        Err(e) => {
            // Nothing was rendered; replay the pass so the failure shows up
            // after the trace lines that led to it, same as a good run.
            let mut partial = LogStore::new();
            let mut sink = RecordingSink::new(&mut partial);
            let mut decoder = TagWalker::new(&data);
            while matches!(decoder.step(&mut sink), Ok(true)) {}
            for line in partial.lines() {
                eprintln!("{line}");
            }
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(run.map.annotations())
            .expect("annotation table serializes");
        println!("{json}");
        return;
    }

    if args.text {
        for line in run.store.lines() {
            println!("{line}");
        }
        println!();
        let dump = Dump::build(&data, &run.map);
        let mut surface = TextSurface::new();
        dump.render_to(&mut surface);
        print!("{}", surface.contents());
        return;
    }

    let svg = render_svg(&data, &run);
    let output = args.output.unwrap_or_else(|| {
        args.input.as_ref().map_or_else(
            || PathBuf::from("bitlens.svg"),
            |p| {
                let mut p = p.clone();
                p.set_extension("svg");
                p
            },
        )
    });

    let mut file = File::create(&output).expect("Failed to create output file");
    file.write_all(svg.as_bytes()).expect("Failed to write SVG");

    println!("Generated: {}", output.display());
    println!(
        "{} bytes, {} events, {} bits annotated",
        data.len(),
        run.store.len(),
        run.map.bits()
    );
}
