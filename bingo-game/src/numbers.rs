//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a usize to i64, saturating at `i64::MAX`.
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    cast::<usize, i64>(value).unwrap_or(i64::MAX)
}

/// Convert a die roll to a tile offset, saturating at `usize::MAX`.
#[must_use]
pub fn roll_to_usize(roll: u32) -> usize {
    cast::<u32, usize>(roll).unwrap_or(usize::MAX)
}

/// Convert a count to u32 for standings, saturating at `u32::MAX`.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    cast::<usize, u32>(value).unwrap_or(u32::MAX)
}

/// Signed distance travelled from `from` to `to`.
#[must_use]
pub fn signed_delta(from: usize, to: usize) -> i64 {
    if to >= from {
        usize_to_i64(to - from)
    } else {
        usize_to_i64(from - to).saturating_neg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_saturate() {
        assert_eq!(usize_to_i64(42), 42);
        assert_eq!(usize_to_u32(usize::MAX), u32::MAX);
        assert_eq!(roll_to_usize(6), 6);
    }

    #[test]
    fn signed_delta_covers_both_directions() {
        assert_eq!(signed_delta(3, 8), 5);
        assert_eq!(signed_delta(8, 3), -5);
        assert_eq!(signed_delta(4, 4), 0);
    }
}
