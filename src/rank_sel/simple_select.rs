/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{BitCount, BitLength, NumBits, Select};
use crate::DivCeilUnchecked;

pub(super) fn iter_ones(words: &[u64], len: u64) -> impl Iterator<Item = u64> + '_ {
    words
        .iter()
        .copied()
        .enumerate()
        .flat_map(move |(i, mut word)| {
            let base = (i as u64) * 64;
            std::iter::from_fn(move || {
                if word == 0 {
                    None
                } else {
                    let tz = word.trailing_zeros() as u64;
                    word &= word - 1;
                    Some(base + tz)
                }
            })
        })
        .take_while(move |&pos| pos < len)
}

/// Position of the `remaining`-th (0-based) one bit at or after `pos`.
///
/// # Safety
/// `pos` must be `< words.len() * 64`, and a `remaining`-th one bit must
/// exist at or after `pos`.
pub(super) unsafe fn scan_for_one(words: &[u64], pos: u64, remaining: u64) -> u64 {
    let mut word_idx = (pos / 64) as usize;
    let bit = (pos % 64) as u32;
    let first_mask = if bit == 0 { u64::MAX } else { !((1u64 << bit) - 1) };
    let mut word = *words.get_unchecked(word_idx) & first_mask;
    let mut remaining = remaining;
    loop {
        let count = word.count_ones() as u64;
        if remaining < count {
            let within = crate::utils::broadword::select_in_word(word, remaining as usize);
            return (word_idx as u64) * 64 + within as u64;
        }
        remaining -= count;
        word_idx += 1;
        word = *words.get_unchecked(word_idx);
    }
}

/// SimpleSelect (spec.md §4.4): a two-level inventory giving O(1) `select`
/// on top of any bit sequence, independent of the density of one bits.
///
/// One bits are grouped into blocks of `2^LOG2_ONES_PER_INVENTORY`
/// consecutive ones. Each block records the position of its first one in
/// `inventory`, and is then indexed one of two ways depending on how far
/// its ones are spread out:
///
/// - if the block spans fewer than `2^16` bits, 64 evenly spaced samples
///   within the block are stored as 16-bit offsets from the block's first
///   one (`subinventory`); `select` finishes with a bounded scan of at most
///   `ones_per_inventory / 64` words from the nearest sample.
/// - otherwise (a block so sparse its span overflows 16 bits) every
///   position in the block is stored verbatim in `exact_spill`, and
///   `select` is a single array read.
#[derive(Debug, Clone)]
pub struct SimpleSelect<B = crate::bits::CountBitVec, const LOG2_ONES_PER_INVENTORY: usize = 13> {
    bits: B,
    inventory: Box<[u64]>,
    spans_exact: Box<[bool]>,
    subinventory: Box<[u16]>,
    spill_start: Box<[u64]>,
    exact_spill: Box<[u64]>,
    ones_per_inventory: u64,
    sub_per_inventory: u64,
    sub_stride: u64,
}

const SUB_PER_INVENTORY: u64 = 64;

impl<B: BitLength + BitCount + AsRef<[u64]>, const LOG2_ONES_PER_INVENTORY: usize>
    SimpleSelect<B, LOG2_ONES_PER_INVENTORY>
{
    /// Builds the inventory over `bits`. O(n) in the number of bits.
    pub fn new(bits: B) -> Self {
        log::debug!("building SimpleSelect over {} bits", bits.len());
        let len = bits.len();
        let all_ones: Vec<u64> = iter_ones(bits.as_ref(), len).collect();
        let num_ones = all_ones.len() as u64;
        debug_assert_eq!(num_ones, bits.count_ones());
        log::trace!("SimpleSelect: collected {num_ones} one positions");

        let ones_per_inventory = 1u64 << LOG2_ONES_PER_INVENTORY;
        let sub_stride = (ones_per_inventory / SUB_PER_INVENTORY).max(1);

        let num_blocks = num_ones.div_ceil_unchecked(ones_per_inventory).max(1) as usize;

        let mut inventory = vec![0u64; num_blocks + 1];
        let mut spans_exact = vec![false; num_blocks];
        let mut subinventory = vec![0u16; num_blocks * SUB_PER_INVENTORY as usize];
        let mut spill_start = vec![0u64; num_blocks + 1];
        let mut exact_spill: Vec<u64> = Vec::new();

        for block in 0..num_blocks {
            let start = block * ones_per_inventory as usize;
            let end = (start + ones_per_inventory as usize).min(all_ones.len());
            let chunk = &all_ones[start..end];
            inventory[block] = chunk.first().copied().unwrap_or(len);
            spill_start[block] = exact_spill.len() as u64;

            let span = match chunk {
                [] => 0,
                [.., last] => last - chunk[0],
            };

            if span >= (1u64 << 16) {
                spans_exact[block] = true;
                exact_spill.extend_from_slice(chunk);
            } else if !chunk.is_empty() {
                let base = chunk[0];
                let mut sub_idx = 0usize;
                let mut local = 0usize;
                while local < chunk.len() && sub_idx < SUB_PER_INVENTORY as usize {
                    subinventory[block * SUB_PER_INVENTORY as usize + sub_idx] =
                        (chunk[local] - base) as u16;
                    sub_idx += 1;
                    local += sub_stride as usize;
                }
            }
        }
        inventory[num_blocks] = len;
        spill_start[num_blocks] = exact_spill.len() as u64;

        SimpleSelect {
            bits,
            inventory: inventory.into_boxed_slice(),
            spans_exact: spans_exact.into_boxed_slice(),
            subinventory: subinventory.into_boxed_slice(),
            spill_start: spill_start.into_boxed_slice(),
            exact_spill: exact_spill.into_boxed_slice(),
            ones_per_inventory,
            sub_per_inventory: SUB_PER_INVENTORY,
            sub_stride,
        }
    }

    pub fn into_inner(self) -> B {
        self.bits
    }
}

impl<B: BitLength, const L: usize> BitLength for SimpleSelect<B, L> {
    #[inline(always)]
    fn len(&self) -> u64 {
        self.bits.len()
    }
}

impl<B: BitCount, const L: usize> BitCount for SimpleSelect<B, L> {
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }
}

impl<B, const L: usize> NumBits for SimpleSelect<B, L> {
    #[inline]
    fn num_bits(&self) -> u64 {
        (self.inventory.len() * 8
            + self.spans_exact.len()
            + self.subinventory.len() * 2
            + self.spill_start.len() * 8
            + self.exact_spill.len() * 8) as u64
            * 8
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>, const L: usize> Select for SimpleSelect<B, L> {
    #[inline]
    unsafe fn select_unchecked(&self, rank: u64) -> u64 {
        let block = (rank / self.ones_per_inventory) as usize;
        let within = rank % self.ones_per_inventory;
        if self.spans_exact[block] {
            let start = self.spill_start[block];
            self.exact_spill[(start + within) as usize]
        } else {
            let sub_idx = (within / self.sub_stride) as usize;
            let sub_residual = within % self.sub_stride;
            let base = self.inventory[block]
                + self.subinventory[block * self.sub_per_inventory as usize + sub_idx] as u64;
            scan_for_one(self.bits.as_ref(), base, sub_residual)
        }
    }

    fn bulk_select(&self, rank0: u64, dest: &mut [u64]) {
        assert!(rank0 + dest.len() as u64 <= self.count_ones());
        if dest.is_empty() {
            return;
        }
        let words = self.bits.as_ref();
        let mut pos = unsafe { self.select_unchecked(rank0) };
        dest[0] = pos;
        for slot in &mut dest[1..] {
            pos = unsafe { scan_for_one(words, pos + 1, 0) };
            *slot = pos;
        }
    }
}
