#![no_main]

use libfuzzer_sys::fuzz_target;

use facture::store::{DRAFT_STORAGE_KEY, DraftStore, MemoryStore, load_draft};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary stored bytes — corrupt snapshots are errors, not panics.
        let mut store = MemoryStore::new();
        if store.put(DRAFT_STORAGE_KEY, s).is_ok() {
            let _ = load_draft(&store);
        }
    }
});
