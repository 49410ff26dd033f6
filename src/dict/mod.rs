/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L3: Elias-Fano monotone lists and the sparse array views built on top of
//! them (spec.md §4.6-4.7).
//!
//! [`EliasFano`] answers `get(index)` over a non-decreasing sequence.
//! [`SparseSelect`] and [`SparseRank`] reinterpret the same encoding as a
//! sparse bit sequence (a one bit at each stored value), sharing the
//! physical `lowerBits`/`upperBits` words of an [`EliasFanoLayout`] rather
//! than duplicating them.

mod elias_fano;
mod sparse;

pub use elias_fano::{EliasFano, EliasFanoBuilder, EliasFanoLayout};
pub use sparse::{SparseRank, SparseSelect};
