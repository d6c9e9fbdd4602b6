#![no_main]

use bitlens::{annotate, LogStore, SweepMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary event streams must never panic the sweep, and its two core
    // invariants must hold: the map is total over [0, 8L) and ordinals
    // never decrease.
    if data.is_empty() {
        return;
    }

    let len_bytes = (data[0] as usize) % 64;
    let mut store = LogStore::new();
    for chunk in data[1..].chunks(3) {
        if chunk.len() < 2 {
            break;
        }
        let offset = usize::from(u16::from_le_bytes([chunk[0], chunk[1]]));
        let msg = chunk.get(2).map_or(String::new(), |b| format!("m{b}"));
        store.record(offset, msg);
    }

    for mode in [SweepMode::Trailing, SweepMode::Preceding] {
        let map = annotate(len_bytes, &store.snapshot(), mode);
        assert_eq!(map.bits(), len_bytes * 8);
        let mut prev = 0usize;
        for (_, ann) in map.iter() {
            assert!(ann.ordinal >= prev);
            prev = ann.ordinal;
        }
    }
});
