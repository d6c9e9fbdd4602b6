#![no_main]

use bitlens::{annotate, resolve_selection, Dump, LogStore, SweepMode, TextSurface};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary buffers through the whole pipeline - layout, text
    // rendering, re-rendering and selection must not panic, and a second
    // render must fully replace the first.
    let mut store = LogStore::new();
    for (i, &b) in data.iter().enumerate().take(32) {
        store.record(usize::from(b) * (i + 1), format!("step {i}"));
    }

    let map = annotate(data.len(), &store.snapshot(), SweepMode::Trailing);
    let dump = Dump::build(data, &map);

    let mut surface = TextSurface::new();
    dump.render_to(&mut surface);
    let first = surface.contents().to_string();
    dump.render_to(&mut surface);
    assert_eq!(surface.contents(), first);

    for ann in map.annotations() {
        let sel = resolve_selection(ann.source, &dump);
        assert_eq!(sel.pattern.len(), sel.bits.len());
    }
});
