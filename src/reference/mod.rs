//! Reference sequence with its coordinate frame
//!
//! A [`Reference`] owns the aligned reference symbols together with the
//! [`CoordinateMap`] derived from them. The gap layout can only change through
//! [`Reference::insert_gap`], which rebuilds the map, so the two never drift
//! apart.

use crate::coords::CoordinateMap;
use crate::error::HaploError;
use crate::sequence::{is_gap, Sequence, GAP};

/// The baseline sequence all haplotypes in a run are expressed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    sequence: Sequence,
    map: CoordinateMap,
}

impl Reference {
    /// Create a reference numbered from `start`.
    pub fn new(id: impl Into<String>, symbols: impl Into<Vec<u8>>, start: u64) -> Self {
        let sequence = Sequence::new(id, symbols);
        let map = CoordinateMap::build(sequence.symbols(), start);
        Self { sequence, map }
    }

    /// Like [`Reference::new`], but `None` if numbering from `start` would
    /// run past `u64::MAX`.
    pub fn checked_new(
        id: impl Into<String>,
        symbols: impl Into<Vec<u8>>,
        start: u64,
    ) -> Option<Self> {
        let symbols = symbols.into();
        CoordinateMap::end_position(&symbols, start)?;
        Some(Self::new(id, symbols, start))
    }

    pub fn id(&self) -> &str {
        &self.sequence.id
    }

    pub fn symbols(&self) -> &[u8] {
        self.sequence.symbols()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn map(&self) -> &CoordinateMap {
        &self.map
    }

    pub fn start(&self) -> u64 {
        self.map.start()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Column holding reference position `position`.
    #[inline]
    pub fn locate(&self, position: u64) -> Result<usize, HaploError> {
        self.map.locate(position)
    }

    /// Coordinate of column `index`.
    #[inline]
    pub fn position_at(&self, index: usize) -> Option<u64> {
        self.map.get(index)
    }

    /// True if `index` is past the end or not a gap column.
    pub fn needs_gap_at(&self, index: usize) -> bool {
        self.symbols().get(index).is_none_or(|&b| !is_gap(b))
    }

    /// Splice a gap column in front of `index` (or append one at the end),
    /// then renumber.
    pub fn insert_gap(&mut self, index: usize) {
        let start = self.map.start();
        let symbols = self.sequence.symbols_mut();
        let index = index.min(symbols.len());
        symbols.insert(index, GAP);
        self.map = CoordinateMap::build(self.sequence.symbols(), start);
    }

    /// Number of gap columns.
    pub fn gap_count(&self) -> usize {
        self.symbols().iter().filter(|&&b| is_gap(b)).count()
    }

    /// Reference symbols with gap columns removed.
    pub fn ungapped(&self) -> String {
        self.sequence.ungapped()
    }
}
