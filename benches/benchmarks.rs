//! Performance benchmarks for haplosearch
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use haplosearch::batch::{convert_str, ConvertOptions, Direction};
use haplosearch::{
    parse_haplotype, parse_token, Decoder, FormatFlags, HaplotypeEncoder, Nomenclature, Reference,
};

/// Deterministic pseudo-random reference of `len` bases
fn reference_bases(len: usize) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            BASES[(state % 4) as usize]
        })
        .collect()
}

/// Copy of `reference` with a transition every 97 columns, a deletion every
/// 251 and an ambiguity code every 509.
fn sample_bases(reference: &str, shift: usize) -> String {
    reference
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let i = i + shift;
            if i % 509 == 0 {
                'N'
            } else if i % 251 == 0 {
                '-'
            } else if i % 97 == 0 {
                match b {
                    b'A' => 'G',
                    b'G' => 'A',
                    b'C' => 'T',
                    _ => 'C',
                }
            } else {
                b as char
            }
        })
        .collect()
}

fn batch(reference: &str, records: usize) -> String {
    let mut text = format!("START: 1\n>rCRS\n{}\n", reference);
    for i in 0..records {
        text.push_str(&format!(">s{}\n{}\n", i, sample_bases(reference, i)));
    }
    text
}

// =============================================================================
// Parsing benchmarks
// =============================================================================

fn bench_parsing(c: &mut Criterion) {
    let tokens = vec![
        ("pop.transition", Nomenclature::Population, "16519"),
        ("pop.transversion", Nomenclature::Population, "16182C"),
        ("pop.insertion", Nomenclature::Population, "309iCCT"),
        ("pop.deletion", Nomenclature::Population, "8281dCCCCCTCTA"),
        ("for.substitution", Nomenclature::Forensic, "73G"),
        ("for.insertion", Nomenclature::Forensic, "309.2C"),
        ("for.deletion", Nomenclature::Forensic, "249del"),
    ];

    let mut group = c.benchmark_group("parsing");
    for (name, nomenclature, token) in &tokens {
        group.bench_with_input(BenchmarkId::new("token", name), token, |b, t| {
            b.iter(|| parse_token(*nomenclature, black_box(t)))
        });
    }

    let haplotype = "73G 263G 309.1C 309.2C 315.1C 750G 1438G 4769G 8860G 15326G 16519C";
    group.bench_function("haplotype", |b| {
        b.iter(|| parse_haplotype(Nomenclature::Forensic, black_box(haplotype)))
    });
    group.finish();
}

// =============================================================================
// Encode / decode benchmarks
// =============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for len in [500usize, 16569] {
        let bases = reference_bases(len);
        let reference = Reference::new("rCRS", bases.as_str(), 1);
        let target = sample_bases(&bases, 0);
        group.throughput(Throughput::Bytes(len as u64));
        for nomenclature in [Nomenclature::Population, Nomenclature::Forensic] {
            let encoder = HaplotypeEncoder::new(&reference, nomenclature, FormatFlags::new());
            group.bench_with_input(
                BenchmarkId::new(nomenclature.as_str(), len),
                &target,
                |b, t| b.iter(|| encoder.encode(black_box(t.as_bytes()))),
            );
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for len in [500usize, 16569] {
        let bases = reference_bases(len);
        let reference = Reference::new("rCRS", bases.as_str(), 1);
        for nomenclature in [Nomenclature::Population, Nomenclature::Forensic] {
            let haplotype = HaplotypeEncoder::new(&reference, nomenclature, FormatFlags::new())
                .encode(sample_bases(&bases, 0).as_bytes());
            let decoder = Decoder::prepare(reference.clone(), nomenclature, [(1, haplotype.as_str())])
                .expect("haplotype decodes");
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(
                BenchmarkId::new(nomenclature.as_str(), len),
                &haplotype,
                |b, h| b.iter(|| decoder.decode(black_box(h))),
            );
        }
    }
    group.finish();
}

// =============================================================================
// Batch benchmarks
// =============================================================================

fn bench_batch(c: &mut Criterion) {
    let reference = reference_bases(16569);
    let input = batch(&reference, 50);
    let encode = ConvertOptions::new(Nomenclature::Forensic, Direction::SequenceToHaplotype);
    let haplotypes = convert_str(&input, &encode).expect("batch encodes").output;
    let decode = ConvertOptions::new(Nomenclature::Forensic, Direction::HaplotypeToSequence);

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    group.throughput(Throughput::Elements(50));
    group.bench_function("s2h", |b| b.iter(|| convert_str(black_box(&input), &encode)));
    group.bench_function("h2s", |b| {
        b.iter(|| convert_str(black_box(&haplotypes), &decode))
    });
    group.finish();
}

criterion_group!(benches, bench_parsing, bench_encode, bench_decode, bench_batch);
criterion_main!(benches);
