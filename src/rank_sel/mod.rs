/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L1/L2: constant-time rank and select over a plain [`crate::bits::BitVec`].
//!
//! [`Rank9`] and [`RankSmall`] (L1, spec.md §4.2-4.3) answer `rank` alone.
//! [`SimpleSelect`], [`SimpleSelectZero`], [`Select9`] and
//! [`HintedBsearchSelect`] (L2, spec.md §4.4-4.5) add `select`/`select_zero`,
//! either as standalone inventories over the raw bit sequence
//! (`SimpleSelect`/`SimpleSelectZero`) or layered on top of an existing
//! [`Rank9`] index (`Select9`, `HintedBsearchSelect`).

mod hinted_bsearch;
mod rank9;
mod rank_small;
mod select9;
mod simple_select;
mod simple_select_zero;

pub use hinted_bsearch::HintedBsearchSelect;
pub use rank9::Rank9;
pub use rank_small::{Rank11, Rank16, RankSmall};
pub use select9::Select9;
pub use simple_select::SimpleSelect;
pub use simple_select_zero::SimpleSelectZero;
