/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L4: balanced parentheses over a plain bit sequence (spec.md §4.8),
//! constant time `find_close`/`find_open`/`enclose` via the pioneer
//! technique layered on the L3 sparse-array machinery.
//!
//! A bit sequence of opening (`1`) and closing (`0`) parentheses is balanced
//! if every prefix has non-negative excess (more opens than closes seen so
//! far) and the whole sequence has zero excess. [`BalancedParens::new`]
//! fails with [`crate::error::Error::Unbalanced`] if that does not hold.
//!
//! Most matches are "near": the matching parenthesis falls within the same
//! 64-bit word, found by [`crate::utils::broadword::find_near_close`] /
//! [`crate::utils::broadword::find_near_open`] alone. A parenthesis whose
//! match crosses a word boundary is "far", and every far parenthesis is
//! registered as a *pioneer*: its position and the distance to its match are
//! stored in a [`crate::dict::SparseSelect`]/[`crate::dict::SparseRank`]
//! pair (so pioneers can be found by rank from any bit position) plus a
//! bit-packed delta array (so the match distance is a single read once the
//! pioneer is found).
//!
//! This differs from the classical Jacobson/Munro-Raman construction, which
//! compresses pioneers to one or two per 64-bit block by only keeping the
//! first and last far parenthesis of each block and resolving the others
//! via a cross-word excess computation. That compression is not implemented
//! here; see `DESIGN.md` for why. The far-close/far-open broadword
//! primitives ([`crate::utils::broadword::find_far_close`],
//! [`crate::utils::broadword::find_far_open`] and friends) remain available
//! as standalone, independently tested L0 primitives regardless.

use crate::bits::CountBitVec;
use crate::dict::{EliasFanoBuilder, SparseRank, SparseSelect};
use crate::error::Error;
use crate::traits::{BalancedParentheses, BitCount, BitLength, NumBits, Rank, Select};
use crate::utils::broadword::{find_near_close, find_near_open};
use crate::utils::{bit_width, get_bits, set_bits};
use crate::DivCeilUnchecked;

/// A balanced-parentheses sequence indexed for O(1) `find_close`,
/// `find_open` and `enclose` (spec.md §4.8).
///
/// Built once from any `B: BitLength + BitCount + AsRef<[u64]>` via
/// [`BalancedParens::new`]; the bit sequence itself is kept (queries read it
/// directly for the near-match fast path) alongside two pioneer indices, one
/// per direction.
pub struct BalancedParens<B = CountBitVec> {
    bits: B,
    opening_pioneers: SparseSelect,
    opening_pioneers_rank: SparseRank,
    opening_match_width: u32,
    opening_pioneer_matches: Box<[u64]>,
    closing_pioneers: SparseSelect,
    closing_pioneers_rank: SparseRank,
    closing_match_width: u32,
    closing_pioneer_matches: Box<[u64]>,
}

/// The `SparseSelect`/`SparseRank` pair plus the packed match-delta array
/// for one direction (opening or closing) of the pioneer index.
struct PioneerSide {
    select: SparseSelect,
    rank: SparseRank,
    match_width: u32,
    matches: Box<[u64]>,
}

fn build_pioneer_side(positions: &[u64], deltas: &[u64], universe: u64) -> Result<PioneerSide, Error> {
    let count = positions.len() as u64;
    let mut builder = EliasFanoBuilder::new(count, universe);
    for &pos in positions {
        builder.push(pos)?;
    }
    let layout = builder.finish()?;
    let select = SparseSelect::from_select(layout.clone());
    let rank = SparseRank::from_rank(layout);

    let max_delta = deltas.iter().copied().max().unwrap_or(0);
    let match_width = if deltas.is_empty() { 0 } else { bit_width(max_delta) };
    let packed_words = ((count as usize) * (match_width as usize)).div_ceil_unchecked(64).max(1);
    let mut matches = vec![0u64; packed_words];
    for (i, &delta) in deltas.iter().enumerate() {
        set_bits(&mut matches, (i as u64) * match_width as u64, match_width, delta);
    }

    Ok(PioneerSide {
        select,
        rank,
        match_width,
        matches: matches.into_boxed_slice(),
    })
}

impl<B: BitLength + BitCount + AsRef<[u64]>> BalancedParens<B> {
    /// Builds the pioneer index over `bits`.
    ///
    /// # Errors
    /// Returns [`Error::Unbalanced`] at the position of the offending bit if
    /// a closing parenthesis is encountered with no open left on the stack,
    /// or at the position of the oldest unmatched open if the sequence ends
    /// with nonzero excess.
    pub fn new(bits: B) -> Result<Self, Error> {
        let n = bits.len();
        log::debug!("building balanced-parentheses index over {n} bits");
        let words = bits.as_ref();
        let bit_at = |p: u64| -> bool {
            let w = (p / 64) as usize;
            let b = (p % 64) as u32;
            (words[w] >> b) & 1 != 0
        };

        let mut match_open = vec![0u64; n as usize];
        let mut match_close = vec![0u64; n as usize];
        let mut stack: Vec<u64> = Vec::new();
        for p in 0..n {
            if bit_at(p) {
                stack.push(p);
            } else {
                let o = stack.pop().ok_or(Error::Unbalanced { position: p })?;
                match_open[o as usize] = p;
                match_close[p as usize] = o;
            }
        }
        if let Some(&leftover) = stack.first() {
            return Err(Error::Unbalanced { position: leftover });
        }
        log::trace!("matching pass done, {n} bits balanced");

        let mut opening_positions = Vec::new();
        let mut opening_deltas = Vec::new();
        let mut closing_positions = Vec::new();
        let mut closing_deltas = Vec::new();
        for p in 0..n {
            if bit_at(p) {
                let m = match_open[p as usize];
                if p / 64 != m / 64 {
                    opening_positions.push(p);
                    opening_deltas.push(m - p);
                }
            } else {
                let o = match_close[p as usize];
                if p / 64 != o / 64 {
                    closing_positions.push(p);
                    closing_deltas.push(p - o);
                }
            }
        }
        log::trace!(
            "{} opening pioneers, {} closing pioneers out of {n} bits",
            opening_positions.len(),
            closing_positions.len()
        );

        let universe = n.saturating_sub(1);
        let opening = build_pioneer_side(&opening_positions, &opening_deltas, universe)?;
        let closing = build_pioneer_side(&closing_positions, &closing_deltas, universe)?;

        Ok(BalancedParens {
            bits,
            opening_pioneers: opening.select,
            opening_pioneers_rank: opening.rank,
            opening_match_width: opening.match_width,
            opening_pioneer_matches: opening.matches,
            closing_pioneers: closing.select,
            closing_pioneers_rank: closing.rank,
            closing_match_width: closing.match_width,
            closing_pioneer_matches: closing.matches,
        })
    }

    /// The indexed bit sequence.
    pub fn bits(&self) -> &B {
        &self.bits
    }

    pub fn into_inner(self) -> B {
        self.bits
    }
}

impl<B: BitLength> BitLength for BalancedParens<B> {
    #[inline]
    fn len(&self) -> u64 {
        self.bits.len()
    }
}

impl<B> NumBits for BalancedParens<B> {
    /// The combined cost of both pioneer directions' `SparseSelect`,
    /// `SparseRank` and packed match-delta arrays. Does not count the
    /// indexed bit sequence itself.
    fn num_bits(&self) -> u64 {
        self.opening_pioneers.num_bits()
            + self.opening_pioneers_rank.num_bits()
            + self.opening_pioneer_matches.len() as u64 * 64
            + self.closing_pioneers.num_bits()
            + self.closing_pioneers_rank.num_bits()
            + self.closing_pioneer_matches.len() as u64 * 64
    }
}

impl<B: BitLength + BitCount + AsRef<[u64]>> BalancedParentheses for BalancedParens<B> {
    fn find_close(&self, pos: u64) -> u64 {
        debug_assert!(pos < self.bits.len());
        let words = self.bits.as_ref();
        let w = (pos / 64) as usize;
        let b = (pos % 64) as u32;
        debug_assert!(
            (words[w] >> b) & 1 != 0,
            "find_close requires an opening parenthesis at {pos}"
        );

        let shifted = words[w] >> b;
        let r = find_near_close(shifted) as u64;
        if r < 64 - b as u64 {
            return pos + r;
        }

        // Far: pos is its own opening pioneer.
        let i = self.opening_pioneers_rank.rank(pos + 1) - 1;
        let pioneer = self
            .opening_pioneers
            .select(i)
            .expect("a far open is always registered as an opening pioneer");
        debug_assert_eq!(pioneer, pos);
        let delta = get_bits(
            &self.opening_pioneer_matches,
            i * self.opening_match_width as u64,
            self.opening_match_width,
        );
        pioneer + delta
    }

    fn find_open(&self, pos: u64) -> u64 {
        debug_assert!(pos < self.bits.len());
        let words = self.bits.as_ref();
        let w = (pos / 64) as usize;
        let b = (pos % 64) as u32;
        debug_assert!(
            (words[w] >> b) & 1 == 0,
            "find_open requires a closing parenthesis at {pos}"
        );

        let r = find_near_open(words[w], b) as u64;
        if r < 64 {
            return pos - r;
        }

        // Far: pos is its own closing pioneer.
        let i = self.closing_pioneers_rank.rank(pos + 1) - 1;
        let pioneer = self
            .closing_pioneers
            .select(i)
            .expect("a far close is always registered as a closing pioneer");
        debug_assert_eq!(pioneer, pos);
        let delta = get_bits(
            &self.closing_pioneer_matches,
            i * self.closing_match_width as u64,
            self.closing_match_width,
        );
        pioneer - delta
    }

    /// Walks outward one enclosing pair at a time via [`Self::find_open`].
    /// Not the classical O(1) `bwd_search` formula; see `DESIGN.md`.
    fn enclose(&self, pos: u64) -> u64 {
        debug_assert!(pos < self.bits.len());
        let words = self.bits.as_ref();
        let mut j = pos;
        loop {
            if j == 0 {
                return u64::MAX;
            }
            let prev = j - 1;
            let w = (prev / 64) as usize;
            let b = (prev % 64) as u32;
            if (words[w] >> b) & 1 != 0 {
                return prev;
            }
            j = self.find_open(prev);
        }
    }
}
