/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{BitCount, BitLength, NumBits, Rank};
use crate::utils::get_bits;
use crate::DivCeilUnchecked;

/// Generalizes Rank11 and Rank16 (spec.md §4.3) as one structure parameterized
/// over the relative-counter width.
///
/// Like [`crate::rank_sel::Rank9`], bits are partitioned into blocks holding
/// one absolute counter and packed per-word relative counters; here both the
/// block size and the counter width are generic, so the same code serves the
/// whole Rank9..Rank16 family traded off by `COUNTER_WIDTH` (a wider counter
/// means a bigger block, less auxiliary space, and a slower `rank` — see
/// [`Rank11`] and [`Rank16`]). The block spans exactly `2^COUNTER_WIDTH`
/// bits, so a `COUNTER_WIDTH`-bit counter can always represent every prefix
/// count strictly inside one block.
///
/// `NUM_U32S` documents the intended width of the absolute counter for
/// memory-accounting purposes ([`NumBits::num_bits`]); internally it is
/// always stored as a `u64`, and builders `debug_assert!` that every prefix
/// count stays within `NUM_U32S * 32` bits.
#[derive(Debug, Clone)]
pub struct RankSmall<
    B = crate::bits::CountBitVec,
    const NUM_U32S: usize = 2,
    const COUNTER_WIDTH: usize = 11,
> {
    bits: B,
    block_abs: Box<[u64]>,
    block_rel: Box<[u64]>,
    words_total: usize,
    words_per_block: usize,
    rel_words_per_block: usize,
}

/// Rank11: 2048-bit blocks (11-bit relative counters), a 32-bit absolute
/// counter.
pub type Rank11<B = crate::bits::CountBitVec> = RankSmall<B, 1, 11>;

/// Rank16: 65536-bit blocks (16-bit relative counters), a 64-bit absolute
/// counter. Smaller index, slower `rank` than [`Rank11`] or
/// [`crate::rank_sel::Rank9`].
pub type Rank16<B = crate::bits::CountBitVec> = RankSmall<B, 2, 16>;

impl<B: BitLength + BitCount + AsRef<[u64]>, const NUM_U32S: usize, const COUNTER_WIDTH: usize>
    RankSmall<B, NUM_U32S, COUNTER_WIDTH>
{
    const BLOCK_BITS: u64 = 1u64 << COUNTER_WIDTH;

    /// Builds the index over `bits`. O(n) in the number of bits.
    pub fn new(bits: B) -> Self {
        log::debug!(
            "building RankSmall<{NUM_U32S}, {COUNTER_WIDTH}> over {} bits",
            bits.len()
        );
        let words_per_block = (Self::BLOCK_BITS / 64) as usize;
        let words_total = (bits.len() as usize).div_ceil_unchecked(64);
        let num_blocks = words_total.div_ceil_unchecked(words_per_block).max(1);
        let rel_words_per_block =
            ((words_per_block - 1) * COUNTER_WIDTH).div_ceil_unchecked(64).max(1);

        let mut block_abs = vec![0u64; num_blocks];
        let mut block_rel = vec![0u64; num_blocks * rel_words_per_block];
        let words = bits.as_ref();
        let mut cumulative = 0u64;

        for block in 0..num_blocks {
            debug_assert!(
                NUM_U32S >= 2 || cumulative < (1u64 << 32),
                "absolute counter overflowed its declared {}-bit width",
                NUM_U32S * 32
            );
            block_abs[block] = cumulative;
            let base_word = block * words_per_block;
            let rel_base = block * rel_words_per_block;
            let mut within = 0u64;
            for offset in 0..words_per_block {
                if offset > 0 {
                    crate::utils::set_bits(
                        &mut block_rel[rel_base..rel_base + rel_words_per_block],
                        ((offset - 1) * COUNTER_WIDTH) as u64,
                        COUNTER_WIDTH as u32,
                        within,
                    );
                }
                let w = base_word + offset;
                if w < words_total {
                    within += words[w].count_ones() as u64;
                }
            }
            cumulative += within;
        }
        log::trace!("RankSmall build pass done over {num_blocks} blocks");

        RankSmall {
            bits,
            block_abs: block_abs.into_boxed_slice(),
            block_rel: block_rel.into_boxed_slice(),
            words_total,
            words_per_block,
            rel_words_per_block,
        }
    }

    pub fn into_inner(self) -> B {
        self.bits
    }

    #[inline]
    fn block_count(&self, block: usize, offset: usize) -> u64 {
        if offset == 0 {
            0
        } else {
            let rel_base = block * self.rel_words_per_block;
            get_bits(
                &self.block_rel[rel_base..rel_base + self.rel_words_per_block],
                ((offset - 1) * COUNTER_WIDTH) as u64,
                COUNTER_WIDTH as u32,
            )
        }
    }
}

impl<B: BitLength, const NUM_U32S: usize, const COUNTER_WIDTH: usize> BitLength
    for RankSmall<B, NUM_U32S, COUNTER_WIDTH>
{
    #[inline(always)]
    fn len(&self) -> u64 {
        self.bits.len()
    }
}

impl<B: BitCount, const NUM_U32S: usize, const COUNTER_WIDTH: usize> BitCount
    for RankSmall<B, NUM_U32S, COUNTER_WIDTH>
{
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }
}

impl<const NUM_U32S: usize, const COUNTER_WIDTH: usize, B> NumBits
    for RankSmall<B, NUM_U32S, COUNTER_WIDTH>
{
    #[inline]
    fn num_bits(&self) -> u64 {
        (self.block_abs.len() * NUM_U32S * 32 + self.block_rel.len() * 64) as u64
    }
}

impl<B, const NUM_U32S: usize, const COUNTER_WIDTH: usize> Rank for RankSmall<B, NUM_U32S, COUNTER_WIDTH>
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
        let block = word / self.words_per_block;
        let offset = word % self.words_per_block;
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
