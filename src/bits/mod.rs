/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L0: the packed bit sequence itself.
//!
//! [`BitVec`] is the only data structure in this module that owns storage;
//! every higher layer borrows or owns a `BitVec` (or a type implementing the
//! same `BitLength`/`BitGet`/`BitCount` capability set) and adds index
//! structure alongside it, never inside it.

mod bit_vec;

pub use bit_vec::*;
