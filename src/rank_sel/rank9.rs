/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{BitCount, BitLength, NumBits, Rank};
use crate::DivCeilUnchecked;
use mem_dbg::{MemDbg, MemSize};

const WORDS_PER_BLOCK: usize = 8;

/// Rank9 (spec.md §4.2): a two-level counter hierarchy giving O(1) `rank` at
/// roughly 25% space overhead.
///
/// Bits are partitioned into 512-bit blocks of 8 words. For block `i`,
/// `block_abs[i]` holds the absolute count of one bits before the block, and
/// `block_rel[i]` packs seven 9-bit counters `r1..r7`, where `r_k` is the
/// count of one bits in the block's first `k` words (`r0 = 0` is implicit
/// and not stored). `rank_unchecked` looks up the block and sub-block
/// counters in O(1) and finishes with a single within-word popcount.
#[derive(Debug, Clone, MemDbg, MemSize)]
pub struct Rank9<B = crate::bits::CountBitVec> {
    bits: B,
    block_abs: Box<[u64]>,
    block_rel: Box<[u64]>,
    words_total: usize,
}

impl<B: BitLength + BitCount + AsRef<[u64]>> Rank9<B> {
    /// Builds the Rank9 index over `bits`. O(n) in the number of bits.
    pub fn new(bits: B) -> Self {
        log::debug!("building Rank9 over {} bits", bits.len());
        let words_total = (bits.len() as usize).div_ceil_unchecked(64);
        let num_blocks = words_total.div_ceil_unchecked(WORDS_PER_BLOCK).max(1);
        let mut block_abs = vec![0u64; num_blocks];
        let mut block_rel = vec![0u64; num_blocks];
        let words = bits.as_ref();
        let mut cumulative = 0u64;

        for block in 0..num_blocks {
            block_abs[block] = cumulative;
            let base_word = block * WORDS_PER_BLOCK;
            let mut packed = 0u64;
            let mut within = 0u64;
            for offset in 0..WORDS_PER_BLOCK {
                if offset > 0 {
                    packed |= within << ((offset - 1) * 9);
                }
                let w = base_word + offset;
                if w < words_total {
                    within += words[w].count_ones() as u64;
                }
            }
            block_rel[block] = packed;
            cumulative += within;
        }

        Rank9 {
            bits,
            block_abs: block_abs.into_boxed_slice(),
            block_rel: block_rel.into_boxed_slice(),
            words_total,
        }
    }

    /// Gives back the indexed bit sequence, discarding the index.
    pub fn into_inner(self) -> B {
        self.bits
    }

    pub fn bits(&self) -> &B {
        &self.bits
    }

    #[inline]
    fn block_count(&self, block: usize, offset: usize) -> u64 {
        if offset == 0 {
            0
        } else {
            (self.block_rel[block] >> ((offset - 1) * 9)) & 0x1FF
        }
    }

    /// Index of the last block whose absolute counter is `<= rank`, found by
    /// binary search over `block_abs`. Used by
    /// [`crate::rank_sel::HintedBsearchSelect`].
    pub(crate) fn find_block_binary_search(&self, rank: u64) -> usize {
        let mut lo = 0usize;
        let mut hi = self.block_abs.len();
        while lo + 1 < hi {
            let mid = lo + (hi - lo) / 2;
            if self.block_abs[mid] <= rank {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    pub(crate) fn block_abs_at(&self, i: usize) -> u64 {
        self.block_abs[i]
    }

    pub(crate) fn num_blocks(&self) -> usize {
        self.block_abs.len()
    }

    /// Locates the position of one-bit number `rank`, given that it lies in
    /// `block` or a later block (forward-only walk from the hint). Finishes
    /// with a bounded scan of at most [`WORDS_PER_BLOCK`] words.
    ///
    /// Used by both [`crate::rank_sel::HintedBsearchSelect`] (whose hint
    /// comes from a binary search) and [`crate::rank_sel::Select9`] (whose
    /// hint comes from its own one-bit inventory).
    ///
    /// # Safety
    /// `rank` must be `< count_ones()`, and `block` must be `<=` the true
    /// block containing one-bit number `rank`.
    pub(crate) unsafe fn select_from_block(&self, rank: u64, mut block: usize) -> u64 {
        let num_blocks = self.block_abs.len();
        while block + 1 < num_blocks && self.block_abs[block + 1] <= rank {
            block += 1;
        }
        let local_rank = rank - self.block_abs[block];
        let base_word = block * WORDS_PER_BLOCK;
        let mut remaining = local_rank;
        let words = self.bits.as_ref();
        for offset in 0..WORDS_PER_BLOCK {
            let w = base_word + offset;
            if w >= self.words_total {
                break;
            }
            let word = *words.get_unchecked(w);
            let c = word.count_ones() as u64;
            if remaining < c {
                let within = crate::utils::broadword::select_in_word(word, remaining as usize);
                return (w as u64) * 64 + within as u64;
            }
            remaining -= c;
        }
        unreachable!("rank {rank} out of range for block {block}")
    }
}

impl<B> BitLength for Rank9<B>
where
    B: BitLength,
{
    #[inline(always)]
    fn len(&self) -> u64 {
        self.bits.len()
    }
}

impl<B> BitCount for Rank9<B>
where
    B: BitCount,
{
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }
}

impl<B> NumBits for Rank9<B> {
    #[inline]
    fn num_bits(&self) -> u64 {
        ((self.block_abs.len() + self.block_rel.len()) * 64) as u64
    }
}

impl<B> Rank for Rank9<B>
where
    B: BitLength + BitCount + AsRef<[u64]>,
{
    #[inline]
    fn rank(&self, pos: u64) -> u64 {
        if pos >= self.len() {
            self.count_ones()
        } else {
            unsafe { self.rank_unchecked(pos) }
        }
    }

    #[inline]
    unsafe fn rank_unchecked(&self, pos: u64) -> u64 {
        let word = (pos >> 6) as usize;
        if word >= self.words_total {
            return self.count_ones();
        }
        let block = word / WORDS_PER_BLOCK;
        let offset = word % WORDS_PER_BLOCK;
        let base = self.block_abs[block];
        let sub = self.block_count(block, offset);

        let bit_in_word = (pos & 63) as u32;
        let word_value = *self.bits.as_ref().get_unchecked(word);
        let mask = if bit_in_word == 0 {
            0
        } else {
            (1u64 << bit_in_word) - 1
        };
        base + sub + (word_value & mask).count_ones() as u64
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
    fn test_rank9_small() {
        // B = 10110000 (bit 0 is the least significant / first bit).
        let bits = [true, false, true, true, false, false, false, false];
        let b = count_bit_vec(&bits);
        let r = Rank9::new(b);
        assert_eq!(r.rank(0), 0);
        assert_eq!(r.rank(1), 1);
        assert_eq!(r.rank(2), 1);
        assert_eq!(r.rank(3), 2);
        assert_eq!(r.rank(4), 3);
        assert_eq!(r.rank(8), 3);
        assert_eq!(r.count_ones(), 3);
    }

    #[test]
    fn test_rank9_multi_block() {
        let n = 10_000u64;
        let mut bits = Vec::with_capacity(n as usize);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..n {
            bits.push(rng.gen_bool(0.3));
        }
        let b = count_bit_vec(&bits);
        let r = Rank9::new(b);

        let mut expected = 0u64;
        for (i, &bit) in bits.iter().enumerate() {
            assert_eq!(r.rank(i as u64), expected, "mismatch at {i}");
            if bit {
                expected += 1;
            }
        }
        assert_eq!(r.rank(n), expected);
        assert_eq!(r.rank(n), r.count_ones());
    }

    #[test]
    fn test_rank9_all_zero_all_one() {
        let zeros = count_bit_vec(&vec![false; 1000]);
        let r = Rank9::new(zeros);
        assert_eq!(r.rank(1000), 0);
        assert_eq!(r.rank(500), 0);

        let ones = count_bit_vec(&vec![true; 1000]);
        let r = Rank9::new(ones);
        assert_eq!(r.rank(1000), 1000);
        assert_eq!(r.rank(500), 500);
    }
}
