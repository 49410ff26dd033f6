/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::rank_sel::Rank9;
use crate::traits::{BitCount, BitLength, NumBits, Rank, Select};

/// HintedBsearchSelect (spec.md §4.5): `select` implemented as a binary
/// search over an existing [`Rank9`] index's block counters, with no
/// auxiliary inventory of its own.
///
/// Locates the Rank9 block whose absolute counter is the last one `<=
/// rank` by binary search (`O(log n)` over the number of blocks, not the
/// number of bits), then finishes with the same bounded within-block scan
/// [`Rank9`] uses internally. Appropriate when an index already pays for
/// Rank9 and a second auxiliary structure ([`crate::rank_sel::Select9`],
/// [`crate::rank_sel::SimpleSelect`]) is not worth its extra space.
#[derive(Debug, Clone)]
pub struct HintedBsearchSelect<B = crate::bits::CountBitVec> {
    rank9: Rank9<B>,
}

impl<B: BitLength + BitCount + AsRef<[u64]>> HintedBsearchSelect<B> {
    pub fn new(rank9: Rank9<B>) -> Self {
        HintedBsearchSelect { rank9 }
    }

    pub fn from_bits(bits: B) -> Self {
        Self::new(Rank9::new(bits))
    }

    pub fn into_inner(self) -> Rank9<B> {
        self.rank9
    }
}

impl<B: BitLength> BitLength for HintedBsearchSelect<B> {
    #[inline(always)]
    fn len(&self) -> u64 {
        self.rank9.len()
    }
}

impl<B: BitCount> BitCount for HintedBsearchSelect<B> {
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.rank9.count_ones()
    }
}

impl<B> NumBits for HintedBsearchSelect<B> {
    #[inline]
    fn num_bits(&self) -> u64 {
        self.rank9.num_bits()
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>> Rank for HintedBsearchSelect<B> {
    #[inline]
    fn rank(&self, pos: u64) -> u64 {
        self.rank9.rank(pos)
    }

    #[inline]
    unsafe fn rank_unchecked(&self, pos: u64) -> u64 {
        self.rank9.rank_unchecked(pos)
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>> Select for HintedBsearchSelect<B> {
    #[inline]
    unsafe fn select_unchecked(&self, rank: u64) -> u64 {
        let block = self.rank9.find_block_binary_search(rank);
        self.rank9.select_from_block(rank, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{BitVec, CountBitVec};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn count_bit_vec(bits: &[bool]) -> CountBitVec {
        let bv: BitVec<Box<[u64]>> = bits.iter().copied().collect();
        bv.into()
    }

    #[test]
    fn test_hinted_bsearch_select_small() {
        let bits = [true, false, true, true, false, false, false, true];
        let b = count_bit_vec(&bits);
        let s = HintedBsearchSelect::from_bits(b);
        assert_eq!(s.select(0), Some(0));
        assert_eq!(s.select(1), Some(2));
        assert_eq!(s.select(2), Some(3));
        assert_eq!(s.select(3), Some(7));
        assert_eq!(s.select(4), None);
    }

    #[test]
    fn test_hinted_bsearch_select_matches_rank() {
        let n = 30_000u64;
        let mut rng = SmallRng::seed_from_u64(99);
        let mut bits = Vec::with_capacity(n as usize);
        let mut positions = vec![];
        for i in 0..n {
            let bit = rng.gen_bool(0.25);
            bits.push(bit);
            if bit {
                positions.push(i);
            }
        }
        let b = count_bit_vec(&bits);
        let s = HintedBsearchSelect::from_bits(b);
        for (rank, &pos) in positions.iter().enumerate() {
            let found = s.select(rank as u64).unwrap();
            assert_eq!(found, pos);
            assert_eq!(s.rank(found), rank as u64);
        }
    }
}
