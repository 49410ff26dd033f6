/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::{AddNumBits, BitVec};
use crate::dict::elias_fano::{EliasFanoInner, EliasFanoLayout};
use crate::rank_sel::SimpleSelectZero;
use crate::traits::{BitCount, BitLength, NumBits, Rank, Select, SelectZero};
use std::sync::Arc;

/// A sparse array's select half: the `rank`-th (0-based) position holding a
/// value, over a virtual bit sequence of length `universe` with a one bit
/// at each stored position (spec.md §4.7).
///
/// Built from the same [`EliasFanoLayout`] as [`SparseRank`] and
/// [`crate::dict::EliasFano`] via [`SparseSelect::from_select`]; physically
/// shares the `upperBits`/`lowerBits` words rather than copying them.
pub struct SparseSelect {
    inner: Arc<EliasFanoInner>,
    select: crate::rank_sel::SimpleSelect<AddNumBits<BitVec<Arc<[u64]>>>>,
}

impl SparseSelect {
    pub fn from_select(layout: EliasFanoLayout) -> Self {
        let select = crate::rank_sel::SimpleSelect::new(layout.0.high_as_bitvec());
        SparseSelect {
            inner: layout.0,
            select,
        }
    }
}

impl BitLength for SparseSelect {
    #[inline]
    fn len(&self) -> u64 {
        self.inner.universe()
    }
}

impl BitCount for SparseSelect {
    #[inline]
    fn count_ones(&self) -> u64 {
        self.inner.n()
    }
}

impl NumBits for SparseSelect {
    /// Only the select inventory's own bits: `lowerBits`/`upperBits` are
    /// shared with whatever else was built from the same
    /// [`EliasFanoLayout`] and are not counted here (§6).
    #[inline]
    fn num_bits(&self) -> u64 {
        self.select.num_bits()
    }
}

impl Select for SparseSelect {
    #[inline]
    unsafe fn select_unchecked(&self, rank: u64) -> u64 {
        let pos = self.select.select_unchecked(rank);
        let high = pos - rank;
        let low = self.inner.low(rank);
        (high << self.inner.l()) | low
    }
}

/// A sparse array's rank half: the number of stored values strictly less
/// than a given position, over the same virtual bit sequence
/// [`SparseSelect`] indexes (spec.md §4.7).
///
/// Implements the classic Elias-Fano predecessor-counting algorithm:
/// locate the `h`-th zero in `upperBits` (where `h` is the query position's
/// high part), read off the ones-before-it directly from the zero's
/// position, then linearly scan the handful of values sharing that same
/// high bucket comparing low parts.
pub struct SparseRank {
    inner: Arc<EliasFanoInner>,
    select_zero: SimpleSelectZero<AddNumBits<BitVec<Arc<[u64]>>>>,
}

impl SparseRank {
    pub fn from_rank(layout: EliasFanoLayout) -> Self {
        let select_zero = SimpleSelectZero::new(layout.0.high_as_bitvec());
        SparseRank {
            inner: layout.0,
            select_zero,
        }
    }
}

impl BitLength for SparseRank {
    #[inline]
    fn len(&self) -> u64 {
        self.inner.universe()
    }
}

impl BitCount for SparseRank {
    #[inline]
    fn count_ones(&self) -> u64 {
        self.inner.n()
    }
}

impl NumBits for SparseRank {
    #[inline]
    fn num_bits(&self) -> u64 {
        self.select_zero.num_bits()
    }
}

impl Rank for SparseRank {
    #[inline]
    fn rank(&self, pos: u64) -> u64 {
        if pos >= self.len() {
            self.count_ones()
        } else {
            unsafe { self.rank_unchecked(pos) }
        }
    }

    unsafe fn rank_unchecked(&self, x: u64) -> u64 {
        if self.inner.n() == 0 {
            return 0;
        }
        let l = self.inner.l();
        let h = x >> l;
        let num_zeros = self.select_zero.count_zeros();
        if h >= num_zeros {
            return self.inner.n();
        }
        let p0 = self.select_zero.select_zero_unchecked(h);
        let count_lower = p0 - h;
        let low_x = if l == 0 { 0 } else { x & ((1u64 << l) - 1) };

        let mut k = 0u64;
        let mut pos = p0 + 1;
        while pos < self.inner.high_len() && self.inner.get_bit(pos) {
            let idx = count_lower + k;
            let low_val = self.inner.low(idx);
            if low_val < low_x {
                k += 1;
                pos += 1;
            } else {
                break;
            }
        }
        count_lower + k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::EliasFanoBuilder;

    fn build_layout(values: &[u64], universe: u64) -> EliasFanoLayout {
        let mut b = EliasFanoBuilder::new(values.len() as u64, universe);
        for &v in values {
            b.push(v).unwrap();
        }
        b.finish().unwrap()
    }

    #[test]
    fn test_sparse_select_matches_values() {
        let values = [0u64, 48, 128];
        let layout = build_layout(&values, 128);
        let sel = SparseSelect::from_select(layout);
        assert_eq!(sel.select(0), Some(0));
        assert_eq!(sel.select(1), Some(48));
        assert_eq!(sel.select(2), Some(128));
        assert_eq!(sel.select(3), None);
    }

    #[test]
    fn test_sparse_rank_basic() {
        let values = [0u64, 48, 128];
        let layout = build_layout(&values, 128);
        let rnk = SparseRank::from_rank(layout);
        assert_eq!(rnk.rank(0), 0);
        assert_eq!(rnk.rank(1), 1);
        assert_eq!(rnk.rank(48), 1);
        assert_eq!(rnk.rank(49), 2);
        assert_eq!(rnk.rank(128), 2);
        assert_eq!(rnk.rank(129), 3);
    }

    #[test]
    fn test_sparse_rank_with_duplicates() {
        let values = [2u64, 2, 2, 5, 5, 9, 100];
        let layout = build_layout(&values, 100);
        let rnk = SparseRank::from_rank(layout);
        assert_eq!(rnk.rank(2), 0);
        assert_eq!(rnk.rank(3), 3);
        assert_eq!(rnk.rank(5), 3);
        assert_eq!(rnk.rank(6), 5);
        assert_eq!(rnk.rank(9), 5);
        assert_eq!(rnk.rank(10), 6);
        assert_eq!(rnk.rank(100), 6);
        assert_eq!(rnk.rank(101), 7);
    }

    #[test]
    fn test_sparse_rank_select_share_layout_random() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(31);
        let mut values = Vec::with_capacity(3000);
        let mut cur = 0u64;
        for _ in 0..3000 {
            cur += rng.gen_range(0..20);
            values.push(cur);
        }
        let universe = *values.last().unwrap();
        let layout = build_layout(&values, universe);
        let rnk = SparseRank::from_rank(layout.clone());
        let sel = SparseSelect::from_select(layout);

        for (i, &v) in values.iter().enumerate() {
            assert_eq!(sel.select(i as u64), Some(v));
            assert_eq!(rnk.rank(v), rnk.rank(v));
            let _ = i;
        }
        // rank(v) should equal the number of strictly smaller stored values.
        for &v in &values {
            let expected = values.iter().filter(|&&x| x < v).count() as u64;
            assert_eq!(rnk.rank(v), expected);
        }
    }
}
