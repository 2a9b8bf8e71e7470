//! Geometry: table dimensions derived once from a requested capacity.

/// Requests below this are raised to it so that each bucket is wide enough
/// for the occupancy bound to hold (2^6 + 1).
pub const MIN_CAPACITY: usize = 65;

/// Fixed dimensions of a [`BoundedHashTable`](crate::BoundedHashTable).
///
/// The table has `bucket_count` rows of `bucket_width` slots each. With
/// `c = max(capacity, MIN_CAPACITY)`:
///
/// - `bucket_count = 2 * c`
/// - `bucket_width = floor(log2(c)) + 1`
///
/// Treating inserts as a birthday-paradox process over `bucket_count`
/// buckets, a single bucket rarely exceeds `log2(bucket_count)` keys once
/// `bucket_count` is large, so a row this wide almost never saturates
/// before the admission cap is hit. Almost never is not never: adversarial
/// keys can still fill one row early.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Geometry {
    bucket_count: usize,
    bucket_width: usize,
}

impl Geometry {
    /// Derive dimensions for `capacity` requested entries.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the slot count does not fit in
    /// `usize`.
    pub fn from_capacity(capacity: usize) -> Self {
        let effective = capacity.max(MIN_CAPACITY);
        let bucket_count = effective.checked_mul(2).expect("capacity overflow");
        let bucket_width = effective.ilog2() as usize + 1;
        bucket_count
            .checked_mul(bucket_width)
            .expect("capacity overflow");
        Self {
            bucket_count,
            bucket_width,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Slots per row.
    #[inline]
    pub fn bucket_width(&self) -> usize {
        self.bucket_width
    }

    /// Total physical slots, `bucket_count * bucket_width`.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.bucket_count * self.bucket_width
    }

    /// Entry count at which new keys are refused: half the physical slots.
    #[inline]
    pub fn admission_cap(&self) -> usize {
        self.slot_count() / 2
    }

    /// Row index for a raw 64-bit hash.
    #[inline]
    pub(crate) fn row_of(&self, hash: u64) -> usize {
        // u64 has no sign bit to clear; reduce directly.
        (hash % self.bucket_count as u64) as usize
    }

    /// Range of flat slot indices covering `row`.
    #[inline]
    pub(crate) fn row_range(&self, row: usize) -> core::ops::Range<usize> {
        let start = row * self.bucket_width;
        start..start + self.bucket_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_requests_floor_to_min_capacity() {
        for c in [0, 1, 10, 64, 65] {
            let g = Geometry::from_capacity(c);
            assert_eq!(g.bucket_count(), 130, "capacity {c}");
            assert_eq!(g.bucket_width(), 7, "capacity {c}");
            assert_eq!(g.slot_count(), 910);
            assert_eq!(g.admission_cap(), 455);
        }
    }

    #[test]
    fn width_is_floor_log2_plus_one() {
        let cases = [
            (127, 254, 7),
            (128, 256, 8),
            (1000, 2000, 10),
            (1024, 2048, 11),
            (1 << 20, 1 << 21, 21),
        ];
        for (c, rows, width) in cases {
            let g = Geometry::from_capacity(c);
            assert_eq!(g.bucket_count(), rows, "capacity {c}");
            assert_eq!(g.bucket_width(), width, "capacity {c}");
        }
    }

    #[test]
    fn rows_tile_the_slot_range() {
        let g = Geometry::from_capacity(10);
        assert_eq!(g.row_range(0), 0..7);
        assert_eq!(g.row_range(1), 7..14);
        assert_eq!(g.row_range(g.bucket_count() - 1).end, g.slot_count());
    }

    #[test]
    fn row_of_stays_in_bounds() {
        let g = Geometry::from_capacity(10);
        for h in [0u64, 129, 130, u64::MAX, 1 << 63] {
            assert!(g.row_of(h) < g.bucket_count());
        }
        assert_eq!(g.row_of(131), 1);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn absurd_capacity_panics() {
        let _ = Geometry::from_capacity(usize::MAX);
    }
}
