/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::{AddNumBits, BitVec};
use crate::error::Error;
use crate::rank_sel::SimpleSelect;
use crate::traits::{BitCount, BitLength, IndexedDict, NumBits, Select};
use crate::utils::{get_bits, set_bits};
use crate::DivCeilUnchecked;
use std::sync::Arc;

/// The physical encoding shared by [`EliasFano`], [`crate::dict::SparseRank`]
/// and [`crate::dict::SparseSelect`] (spec.md §4.6-4.7): the `lowerBits`
/// flat array and the `upperBits` unary-coded high parts, reference-counted
/// so the three views can each build their own auxiliary index over the
/// same words without copying them.
#[derive(Debug)]
pub(crate) struct EliasFanoInner {
    universe: u64,
    n: u64,
    l: u32,
    low_bits: Arc<[u64]>,
    high_bits: Arc<[u64]>,
    high_len: u64,
}

impl EliasFanoInner {
    #[inline]
    pub(crate) fn get_bit(&self, pos: u64) -> bool {
        let word = (pos / 64) as usize;
        let bit = (pos % 64) as u32;
        (self.high_bits[word] >> bit) & 1 != 0
    }

    #[inline]
    pub(crate) fn low(&self, index: u64) -> u64 {
        if self.l == 0 {
            0
        } else {
            get_bits(&self.low_bits, index * self.l as u64, self.l)
        }
    }

    pub(crate) fn high_as_bitvec(&self) -> AddNumBits<BitVec<Arc<[u64]>>> {
        let bv = unsafe { BitVec::from_raw_parts(self.high_bits.clone(), self.high_len) };
        AddNumBits::from(bv)
    }

    pub(crate) fn l(&self) -> u32 {
        self.l
    }

    pub(crate) fn n(&self) -> u64 {
        self.n
    }

    pub(crate) fn universe(&self) -> u64 {
        self.universe
    }

    pub(crate) fn high_len(&self) -> u64 {
        self.high_len
    }
}

/// A reference-counted handle to one Elias-Fano encoding's physical layout.
///
/// Cloning an `EliasFanoLayout` is a cheap `Arc` clone, not a copy of the bit
/// data: build it once from an [`EliasFanoBuilder`], then hand clones to
/// [`EliasFano::from_layout`], [`crate::dict::SparseRank::from_rank`] and/or
/// [`crate::dict::SparseSelect::from_select`] as needed, each of which
/// builds only the auxiliary index its own queries require.
#[derive(Debug, Clone)]
pub struct EliasFanoLayout(pub(crate) Arc<EliasFanoInner>);

/// Builds an [`EliasFanoLayout`] from a non-decreasing sequence of values in
/// `[0, universe]`, pushed one at a time (spec.md §4.6).
pub struct EliasFanoBuilder {
    universe: u64,
    n: u64,
    l: u32,
    low_bits: Vec<u64>,
    high_bits: BitVec<Vec<u64>>,
    last_high: u64,
    last_value: Option<u64>,
    count: u64,
}

impl EliasFanoBuilder {
    /// Declares a builder for exactly `n` values drawn from `[0, universe]`.
    pub fn new(n: u64, universe: u64) -> Self {
        let l = if n == 0 {
            0
        } else {
            let avg_gap = universe / n;
            if avg_gap == 0 {
                0
            } else {
                63 - avg_gap.leading_zeros()
            }
        };
        let low_words = ((n * l as u64) as usize).div_ceil_unchecked(64).max(1);
        EliasFanoBuilder {
            universe,
            n,
            l,
            low_bits: vec![0u64; low_words],
            high_bits: BitVec::new(0),
            last_high: 0,
            last_value: None,
            count: 0,
        }
    }

    /// Appends the next value. Values must be pushed in non-decreasing
    /// order and must not exceed the declared universe.
    pub fn push(&mut self, value: u64) -> Result<(), Error> {
        if self.count >= self.n {
            return Err(Error::TooManyValues { expected: self.n });
        }
        if value > self.universe {
            return Err(Error::InvalidInput(format!(
                "value {value} exceeds declared universe {}",
                self.universe
            )));
        }
        if let Some(last) = self.last_value {
            if value < last {
                return Err(Error::NonMonotone {
                    index: self.count,
                    prev: last,
                    value,
                });
            }
        }

        let high = value >> self.l;
        for _ in 0..(high - self.last_high) {
            self.high_bits.push(false);
        }
        self.high_bits.push(true);
        self.last_high = high;

        let low = if self.l == 0 {
            0
        } else {
            value & ((1u64 << self.l) - 1)
        };
        set_bits(&mut self.low_bits, self.count * self.l as u64, self.l, low);

        self.last_value = Some(value);
        self.count += 1;
        Ok(())
    }

    /// Finalizes the layout. Fails if fewer than the declared `n` values
    /// were pushed.
    pub fn finish(self) -> Result<EliasFanoLayout, Error> {
        if self.count != self.n {
            return Err(Error::LengthMismatch {
                expected: self.n,
                actual: self.count,
            });
        }
        log::trace!(
            "finished Elias-Fano layout: {} values, universe {}, {} low bits/value",
            self.n,
            self.universe,
            self.l
        );
        let high_len = self.high_bits.len();
        let (high_words, _) = self.high_bits.into_raw_parts();
        Ok(EliasFanoLayout(Arc::new(EliasFanoInner {
            universe: self.universe,
            n: self.n,
            l: self.l,
            low_bits: self.low_bits.into(),
            high_bits: high_words.into(),
            high_len,
        })))
    }
}

/// Elias-Fano encoding of a monotone list (spec.md §4.6), queried by
/// position via [`IndexedDict`].
pub struct EliasFano {
    inner: Arc<EliasFanoInner>,
    select: SimpleSelect<AddNumBits<BitVec<Arc<[u64]>>>>,
}

impl EliasFano {
    pub fn from_layout(layout: EliasFanoLayout) -> Self {
        let select = SimpleSelect::new(layout.0.high_as_bitvec());
        EliasFano {
            inner: layout.0,
            select,
        }
    }

    /// The declared universe (values lie in `[0, universe]`).
    pub fn universe(&self) -> u64 {
        self.inner.universe
    }

    /// Fills `dest` with `get(start_i), get(start_i + 1), ...,
    /// get(start_i + dest.len() - 1)` (spec.md §4.7 `get_bulk`).
    ///
    /// Uses [`SimpleSelect::bulk_select`] to produce the consecutive high
    /// positions in one cache-friendly pass over `upperBits`, then streams
    /// `lowerBits` one `l`-bit field at a time, rather than repeating the
    /// full `get` path (including its own `select`) for every index.
    ///
    /// # Panics
    /// If `start_i + dest.len() > len()`.
    pub fn get_bulk(&self, start_i: u64, dest: &mut [u64]) {
        assert!(start_i + dest.len() as u64 <= self.len());
        if dest.is_empty() {
            return;
        }
        let mut highs = vec![0u64; dest.len()];
        self.select.bulk_select(start_i, &mut highs);
        let l = self.inner.l;
        for (i, slot) in dest.iter_mut().enumerate() {
            let index = start_i + i as u64;
            let high = highs[i] - index;
            let low = self.inner.low(index);
            *slot = (high << l) | low;
        }
    }

    /// `get(index) - get(index - 1)` (`get(-1)` taken as `0`), spec.md §4.7
    /// `get_delta`.
    pub fn get_delta(&self, index: u64) -> u64 {
        let cur = self.get(index).expect("index out of range");
        if index == 0 {
            cur
        } else {
            cur - self.get(index - 1).expect("index out of range")
        }
    }
}

impl NumBits for EliasFano {
    /// The full encoding: `lowerBits` plus `upperBits` plus the select
    /// inventory over `upperBits`. Unlike [`crate::dict::SparseRank`] and
    /// [`crate::dict::SparseSelect`], which index a layout someone else may
    /// also be holding, `EliasFano` is usually the layout's sole owner, so
    /// its count includes the words it physically shares an `Arc` over.
    #[inline]
    fn num_bits(&self) -> u64 {
        (self.inner.low_bits.len() * 8 + self.inner.high_bits.len() * 8) as u64 * 8
            + self.select.num_bits()
    }
}

impl IndexedDict for EliasFano {
    type Value = u64;

    #[inline]
    fn len(&self) -> u64 {
        self.inner.n
    }

    #[inline]
    unsafe fn get_unchecked(&self, index: u64) -> u64 {
        let pos = self.select.select_unchecked(index);
        let high = pos - index;
        let low = self.inner.low(index);
        (high << self.inner.l) | low
    }
}
