//! Reference coordinate map
//!
//! Maps every column of an aligned reference to the reference-numbered
//! position it belongs to. Gap columns carry the position of the base they
//! follow, so inserted material is always addressed relative to its anchor.
//!
//! | Column symbol | Coordinate |
//! |---------------|------------|
//! | index 0 | `start` |
//! | base | previous + 1 |
//! | gap | previous (repeated) |
//!
//! # Examples
//!
//! ```
//! use haplosearch::coords::CoordinateMap;
//!
//! let map = CoordinateMap::build(b"AC--GT", 100);
//! assert_eq!(map.positions(), &[100, 101, 101, 101, 102, 103]);
//! // Lookup resolves to the first column carrying the position
//! assert_eq!(map.locate(101).unwrap(), 1);
//! ```

use crate::error::HaploError;
use crate::sequence::is_gap;

/// Per-column reference positions of an aligned sequence.
///
/// # Invariant
///
/// Values are non-decreasing and the map has exactly one entry per column of
/// the sequence it was built from. It is a derived view: rebuild it whenever
/// the gap layout of the sequence changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinateMap {
    start: u64,
    positions: Vec<u64>,
}

impl CoordinateMap {
    /// Build the map for `symbols`, numbering column 0 as `start`.
    ///
    /// Numbering saturates at `u64::MAX`; check [`CoordinateMap::end_position`]
    /// first where `start` comes from input.
    pub fn build(symbols: &[u8], start: u64) -> Self {
        let mut positions = Vec::with_capacity(symbols.len());
        let mut current = start;
        for (i, &symbol) in symbols.iter().enumerate() {
            if i > 0 && !is_gap(symbol) {
                current = current.saturating_add(1);
            }
            positions.push(current);
        }
        Self { start, positions }
    }

    /// Coordinate the last column of `symbols` would get when numbered from
    /// `start`, or `None` if it does not fit in a `u64`.
    pub fn end_position(symbols: &[u8], start: u64) -> Option<u64> {
        let bases = symbols.iter().skip(1).filter(|&&b| !is_gap(b)).count();
        start.checked_add(bases as u64)
    }

    /// First column whose coordinate equals `position`.
    ///
    /// Positions lying on a gap run resolve to the anchor column, never to the
    /// gaps that follow it.
    #[inline]
    pub fn locate(&self, position: u64) -> Result<usize, HaploError> {
        // Non-decreasing, so a binary search for the leftmost match is exact.
        let index = self.positions.partition_point(|&p| p < position);
        match self.positions.get(index) {
            Some(&p) if p == position => Ok(index),
            _ => Err(HaploError::PositionNotFound { position }),
        }
    }

    /// Coordinate of column `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.positions.get(index).copied()
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
