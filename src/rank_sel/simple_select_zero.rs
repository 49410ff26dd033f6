/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{BitCount, BitLength, NumBits, SelectZero};
use crate::DivCeilUnchecked;

/// # Safety
/// `pos` must be `< words.len() * 64`, and a `remaining`-th zero bit must
/// exist at or after `pos`.
unsafe fn scan_for_zero(words: &[u64], pos: u64, remaining: u64) -> u64 {
    let mut word_idx = (pos / 64) as usize;
    let bit = (pos % 64) as u32;
    let first_mask = if bit == 0 { u64::MAX } else { !((1u64 << bit) - 1) };
    let mut word = !*words.get_unchecked(word_idx) & first_mask;
    let mut remaining = remaining;
    loop {
        let count = word.count_ones() as u64;
        if remaining < count {
            let within = crate::utils::broadword::select_in_word(word, remaining as usize);
            return (word_idx as u64) * 64 + within as u64;
        }
        remaining -= count;
        word_idx += 1;
        word = !*words.get_unchecked(word_idx);
    }
}

/// SimpleSelectZero: the mirror of [`crate::rank_sel::SimpleSelect`] over
/// the complement bit sequence (spec.md §4.4), used when a structure needs
/// O(1) `select_zero` without building a whole second bit sequence.
#[derive(Debug, Clone)]
pub struct SimpleSelectZero<B = crate::bits::CountBitVec, const LOG2_ZEROS_PER_INVENTORY: usize = 13>
{
    bits: B,
    inventory: Box<[u64]>,
    spans_exact: Box<[bool]>,
    subinventory: Box<[u16]>,
    spill_start: Box<[u64]>,
    exact_spill: Box<[u64]>,
    zeros_per_inventory: u64,
    sub_per_inventory: u64,
    sub_stride: u64,
}

const SUB_PER_INVENTORY: u64 = 64;

impl<B: BitLength + BitCount + AsRef<[u64]>, const LOG2_ZEROS_PER_INVENTORY: usize>
    SimpleSelectZero<B, LOG2_ZEROS_PER_INVENTORY>
{
    /// Builds the inventory over the zero bits of `bits`. O(n) in the number
    /// of bits.
    pub fn new(bits: B) -> Self {
        log::debug!("building SimpleSelectZero over {} bits", bits.len());
        let len = bits.len();
        let words = bits.as_ref();
        let all_zeros: Vec<u64> = (0..words.len())
            .flat_map(|i| {
                let base = (i as u64) * 64;
                let mut word = !words[i];
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
            .take_while(|&pos| pos < len)
            .collect();
        let num_zeros = all_zeros.len() as u64;
        debug_assert_eq!(num_zeros, bits.count_zeros());
        log::trace!("SimpleSelectZero: collected {num_zeros} zero positions");

        let zeros_per_inventory = 1u64 << LOG2_ZEROS_PER_INVENTORY;
        let sub_stride = (zeros_per_inventory / SUB_PER_INVENTORY).max(1);
        let num_blocks = num_zeros.div_ceil_unchecked(zeros_per_inventory).max(1) as usize;

        let mut inventory = vec![0u64; num_blocks + 1];
        let mut spans_exact = vec![false; num_blocks];
        let mut subinventory = vec![0u16; num_blocks * SUB_PER_INVENTORY as usize];
        let mut spill_start = vec![0u64; num_blocks + 1];
        let mut exact_spill: Vec<u64> = Vec::new();

        for block in 0..num_blocks {
            let start = block * zeros_per_inventory as usize;
            let end = (start + zeros_per_inventory as usize).min(all_zeros.len());
            let chunk = &all_zeros[start..end];
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

        SimpleSelectZero {
            bits,
            inventory: inventory.into_boxed_slice(),
            spans_exact: spans_exact.into_boxed_slice(),
            subinventory: subinventory.into_boxed_slice(),
            spill_start: spill_start.into_boxed_slice(),
            exact_spill: exact_spill.into_boxed_slice(),
            zeros_per_inventory,
            sub_per_inventory: SUB_PER_INVENTORY,
            sub_stride,
        }
    }

    pub fn into_inner(self) -> B {
        self.bits
    }
}

impl<B: BitLength, const L: usize> BitLength for SimpleSelectZero<B, L> {
    #[inline(always)]
    fn len(&self) -> u64 {
        self.bits.len()
    }
}

impl<B: BitCount, const L: usize> BitCount for SimpleSelectZero<B, L> {
    #[inline(always)]
    fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }
}

impl<B, const L: usize> NumBits for SimpleSelectZero<B, L> {
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

impl<B: BitLength + BitCount + AsRef<[u64]>, const L: usize> SelectZero for SimpleSelectZero<B, L> {
    #[inline]
    unsafe fn select_zero_unchecked(&self, rank: u64) -> u64 {
        let block = (rank / self.zeros_per_inventory) as usize;
        let within = rank % self.zeros_per_inventory;
        if self.spans_exact[block] {
            let start = self.spill_start[block];
            self.exact_spill[(start + within) as usize]
        } else {
            let sub_idx = (within / self.sub_stride) as usize;
            let sub_residual = within % self.sub_stride;
            let base = self.inventory[block]
                + self.subinventory[block * self.sub_per_inventory as usize + sub_idx] as u64;
            scan_for_zero(self.bits.as_ref(), base, sub_residual)
        }
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
    fn test_simple_select_zero_small() {
        let bits = [true, false, true, true, false, false, false, true];
        let b = count_bit_vec(&bits);
        let s: SimpleSelectZero = SimpleSelectZero::new(b);
        assert_eq!(s.select_zero(0), Some(1));
        assert_eq!(s.select_zero(1), Some(4));
        assert_eq!(s.select_zero(2), Some(5));
        assert_eq!(s.select_zero(3), Some(6));
        assert_eq!(s.select_zero(4), None);
    }

    #[test]
    fn test_simple_select_zero_random() {
        let n = 50_000u64;
        let mut rng = SmallRng::seed_from_u64(23);
        let mut bits = Vec::with_capacity(n as usize);
        let mut zero_positions = vec![];
        for i in 0..n {
            let bit = rng.gen_bool(0.8);
            bits.push(bit);
            if !bit {
                zero_positions.push(i);
            }
        }
        let b = count_bit_vec(&bits);
        let s: SimpleSelectZero = SimpleSelectZero::new(b);
        for (rank, &pos) in zero_positions.iter().enumerate() {
            assert_eq!(s.select_zero(rank as u64), Some(pos));
        }
        assert_eq!(s.select_zero(zero_positions.len() as u64), None);
    }
}
