//! Structured fuzz target for batch conversion
//!
//! Builds well-formed batch files from arbitrary references and samples so
//! that most inputs reach the encoder and the decode pre-pass instead of
//! failing at the header.

#![no_main]

use arbitrary::Arbitrary;
use haplosearch::batch::{convert_str, ConvertOptions, Direction};
use haplosearch::Nomenclature;
use libfuzzer_sys::fuzz_target;

const SYMBOLS: &[u8] = b"ACGTRYSWKMBDHVN-";

#[derive(Debug, Arbitrary)]
struct BatchInput {
    start: u16,
    forensic: bool,
    padding: bool,
    short_deletions: bool,
    /// Reference symbols, taken modulo the alphabet
    reference: Vec<u8>,
    /// One entry per sample; each symbol is taken modulo the alphabet
    samples: Vec<Vec<u8>>,
}

fn symbol(b: u8, alphabet: &[u8]) -> char {
    alphabet[b as usize % alphabet.len()] as char
}

fuzz_target!(|input: BatchInput| {
    if input.reference.is_empty() || input.reference.len() > 200 || input.samples.len() > 20 {
        return;
    }

    let flags = match (input.padding, input.short_deletions) {
        (true, true) => " *d",
        (true, false) => " *",
        (false, true) => " d",
        (false, false) => "",
    };
    // Gaps in the reference exercise insertion columns
    let reference: String = input.reference.iter().map(|&b| symbol(b, b"ACGTACGT-")).collect();
    let mut text = format!("START: {}{}\n>rCRS\n{}\n", input.start, flags, reference);
    for (i, sample) in input.samples.iter().enumerate() {
        let sequence: String = (0..reference.len())
            .map(|j| symbol(sample.get(j).copied().unwrap_or(0), SYMBOLS))
            .collect();
        text.push_str(&format!(">s{}\n{}\n", i, sequence));
    }

    let nomenclature = if input.forensic {
        Nomenclature::Forensic
    } else {
        Nomenclature::Population
    };
    let encode = ConvertOptions::new(nomenclature, Direction::SequenceToHaplotype);
    if let Ok(haplotypes) = convert_str(&text, &encode) {
        // Decoding what was just encoded must not panic either
        let decode = ConvertOptions::new(nomenclature, Direction::HaplotypeToSequence);
        let _ = convert_str(&haplotypes.output, &decode);
    }
});
