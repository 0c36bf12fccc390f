//! Fuzz target for the haplotype token parsers
//!
//! Feeds arbitrary strings to both grammars to find panics.

#![no_main]

use haplosearch::{parse_haplotype, Nomenclature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 1000 {
            return;
        }

        let _ = parse_haplotype(Nomenclature::Population, input);
        let _ = parse_haplotype(Nomenclature::Forensic, input);
    }
});
