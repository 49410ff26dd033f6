/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L5: byte/string adapters that build the [`crate::bits::BitVec`] inputs
//! consumed by L3 (Elias-Fano) and L4 (balanced parentheses).
//!
//! None of these allocate an index themselves; they only turn external
//! representations (an ASCII parenthesis string, a marker byte inside a
//! buffer, a raw byte slice) into the monotone integer sequences or bit
//! vectors the rest of the crate already knows how to consume.

use crate::bits::BitVec;
use crate::error::Error;

/// Parses an ASCII string of `(`/`)` characters into a [`BitVec`] with `1`
/// for `(` and `0` for `)`, ready for [`crate::bp::BalancedParens::new`].
///
/// # Errors
/// Returns [`Error::InvalidInput`] naming the offending byte if `s` contains
/// anything other than `(` or `)`. Does not check balance; that is
/// [`crate::bp::BalancedParens::new`]'s job.
pub fn parens_from_str(s: &str) -> Result<BitVec<Box<[u64]>>, Error> {
    let mut bits = BitVec::new(s.len() as u64);
    for (i, c) in s.bytes().enumerate() {
        match c {
            b'(' => bits.set(i as u64, true),
            b')' => bits.set(i as u64, false),
            other => {
                return Err(Error::InvalidInput(format!(
                    "byte {other:?} at position {i} is neither '(' nor ')'"
                )))
            }
        }
    }
    Ok(bits.into_boxed())
}

/// Positions (0-based, in increasing order) of `needle` within `bytes`.
///
/// The result is monotone and can be pushed directly into an
/// [`crate::dict::EliasFanoBuilder`].
pub fn monotone_from_positions(bytes: &[u8], needle: u8) -> impl Iterator<Item = u64> + '_ {
    bytes
        .iter()
        .enumerate()
        .filter_map(move |(i, &b)| (b == needle).then_some(i as u64))
}

/// Packs `bytes` into a [`BitVec`], least-significant bit of `bytes[0]`
/// first (spec.md §3's little-endian-within-word convention).
pub fn bits_from_bytes(bytes: &[u8]) -> BitVec<Box<[u64]>> {
    let len = (bytes.len() as u64) * 8;
    let mut bits = BitVec::new(len);
    for (i, &byte) in bytes.iter().enumerate() {
        for b in 0..8u64 {
            if (byte >> b) & 1 != 0 {
                bits.set((i as u64) * 8 + b, true);
            }
        }
    }
    bits.into_boxed()
}
