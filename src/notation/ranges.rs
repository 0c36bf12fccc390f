//! Compact range rendering for missing positions

/// Collapse an ascending list of positions into `[a, b-c, d]` form.
///
/// Runs of consecutive integers become `lo-hi`; isolated values stand alone.
/// Every number is zero-padded to three digits. Repeated values are not
/// consecutive and so render individually.
///
/// `positions` must be non-empty; the encoder only renders a missing list
/// when some column was missing.
///
/// # Examples
///
/// ```
/// use haplosearch::notation::compress_ranges;
///
/// assert_eq!(compress_ranges(&[1, 3, 4, 5, 7, 9, 10]), "[001, 003-005, 007, 009-010]");
/// ```
pub fn compress_ranges(positions: &[u64]) -> String {
    debug_assert!(!positions.is_empty(), "no positions to compress");
    let mut parts = Vec::new();
    let mut start = 0;
    while start < positions.len() {
        let mut end = start;
        while end + 1 < positions.len()
            && positions[end].checked_add(1) == Some(positions[end + 1])
        {
            end += 1;
        }
        if start == end {
            parts.push(format!("{:03}", positions[start]));
        } else {
            parts.push(format!("{:03}-{:03}", positions[start], positions[end]));
        }
        start = end + 1;
    }
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_runs() {
        assert_eq!(
            compress_ranges(&[1, 3, 4, 5, 7, 9, 10]),
            "[001, 003-005, 007, 009-010]"
        );
    }

    #[test]
    fn test_single() {
        assert_eq!(compress_ranges(&[16519]), "[16519]");
    }

    #[test]
    fn test_single_run() {
        assert_eq!(compress_ranges(&[200, 201]), "[200-201]");
    }

    #[test]
    fn test_repeated_value() {
        assert_eq!(compress_ranges(&[5, 5, 6]), "[005, 005-006]");
    }

    #[test]
    fn test_top_of_range() {
        assert_eq!(
            compress_ranges(&[u64::MAX - 1, u64::MAX, u64::MAX]),
            format!("[{}-{}, {}]", u64::MAX - 1, u64::MAX, u64::MAX)
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no positions to compress")]
    fn test_empty_rejected() {
        compress_ranges(&[]);
    }
}
