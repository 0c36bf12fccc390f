//! Argument handling for the single-item CLI commands

use crate::batch::{parse_sequence, Alphabet};
use crate::decode::Decoder;
use crate::encode::HaplotypeEncoder;
use crate::error::HaploError;
use crate::notation::{parse_haplotype, FormatFlags, Mutation, Nomenclature};
use crate::reference::Reference;

/// Default reference identifier when none is given.
pub const DEFAULT_REFERENCE_ID: &str = "rCRS";

/// Reference given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceArgs<'a> {
    pub id: &'a str,
    pub sequence: &'a str,
    pub start: u64,
}

impl<'a> ReferenceArgs<'a> {
    pub fn new(sequence: &'a str) -> Self {
        Self {
            id: DEFAULT_REFERENCE_ID,
            sequence,
            start: 1,
        }
    }

    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = id;
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    fn load(&self, alphabet: Alphabet) -> Result<Reference, HaploError> {
        let symbols = sequence_arg("reference", self.sequence, alphabet)?;
        Reference::checked_new(self.id, symbols, self.start).ok_or_else(|| HaploError::Config {
            msg: format!("--start {} leaves no room to number the reference", self.start),
        })
    }
}

fn sequence_arg(name: &str, value: &str, alphabet: Alphabet) -> Result<Vec<u8>, HaploError> {
    parse_sequence(value, alphabet, 0).map_err(|_| HaploError::Config {
        msg: format!("--{} is not a valid {:?} sequence: '{}'", name, alphabet, value),
    })
}

/// Encode one aligned sequence against a reference.
///
/// # Examples
///
/// ```
/// use haplosearch::cli::{encode_sequence, ReferenceArgs};
/// use haplosearch::notation::{FormatFlags, Nomenclature};
///
/// let reference = ReferenceArgs::new("ACGT").with_start(100);
/// let haplotype =
///     encode_sequence(&reference, "GCGA", Nomenclature::Forensic, FormatFlags::new()).unwrap();
/// assert_eq!(haplotype, "100G 103A");
/// ```
pub fn encode_sequence(
    reference: &ReferenceArgs<'_>,
    sequence: &str,
    nomenclature: Nomenclature,
    flags: FormatFlags,
) -> Result<String, HaploError> {
    let reference = reference.load(Alphabet::Aligned)?;
    let target = sequence_arg("sequence", sequence, Alphabet::Sample)?;
    if target.len() != reference.len() {
        return Err(HaploError::Config {
            msg: format!(
                "--sequence has {} symbols but the reference has {}",
                target.len(),
                reference.len()
            ),
        });
    }
    Ok(HaplotypeEncoder::new(&reference, nomenclature, flags).encode(&target))
}

/// Rebuild the sequence described by one haplotype.
///
/// The alignment pre-pass sees only this haplotype, so the reference gains
/// exactly the gap columns its own insertions need.
pub fn decode_haplotype(
    reference: &ReferenceArgs<'_>,
    haplotype: &str,
    nomenclature: Nomenclature,
) -> Result<String, HaploError> {
    let reference = reference.load(Alphabet::Ungapped)?;
    // No input lines here, so drop the line wrapper the pre-pass adds
    let decoder = Decoder::prepare(reference, nomenclature, [(0, haplotype)])
        .map_err(|e| e.root_cause().clone())?;
    let symbols = decoder.decode(haplotype)?;
    Ok(String::from_utf8_lossy(&symbols).into_owned())
}

/// Tokenize haplotype arguments; each argument may hold several tokens.
pub fn parse_haplotype_args(
    nomenclature: Nomenclature,
    args: &[String],
) -> Result<Vec<Mutation>, HaploError> {
    let mut mutations = Vec::new();
    for arg in args {
        mutations.extend(parse_haplotype(nomenclature, arg)?);
    }
    Ok(mutations)
}
