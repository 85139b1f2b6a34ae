#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Lenient by contract — anything unparsable is zero, never a panic.
        let amount = facture::core::parse_amount(s);
        let _ = facture::words::to_words(amount, facture::core::Currency::Eur);
    }
});
