/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Typed construction-time errors.
//!
//! Query-time precondition violations (out-of-range rank, `find_close` on a
//! closing parenthesis, ...) are *not* represented here: per the contract in
//! the crate's top-level docs, those are unchecked in release builds and
//! `debug_assert!`-guarded in debug builds. Only failures that can happen
//! while a structure is in the `Building` state get a typed variant, and are
//! surfaced through `Result<_, Error>` at every builder boundary
//! (`EliasFanoBuilder::push`/`finish`, `BalancedParens::new`).

use std::fmt;

/// A build-time invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A monotone-sequence builder (Elias-Fano, sparse rank/select) was fed
    /// a value smaller than the previously pushed one.
    NonMonotone { index: u64, prev: u64, value: u64 },
    /// A builder declared for `n` items received more than `n` `push`es.
    TooManyValues { expected: u64 },
    /// An iterator handed to a builder produced fewer items than declared.
    LengthMismatch { expected: u64, actual: u64 },
    /// A balanced-parentheses builder was given a string whose prefix
    /// excess goes negative, or that ends with nonzero excess.
    Unbalanced { position: u64 },
    /// A requested length or universe exceeds the 2^63 capacity limit of §1.
    CapacityExceeded { requested: u64, limit: u64 },
    /// A value outside the declared universe, or any other malformed input.
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonMonotone { index, prev, value } => write!(
                f,
                "monotone sequence violated at index {index}: {value} < previous value {prev}"
            ),
            Error::TooManyValues { expected } => {
                write!(f, "more than the declared {expected} values were pushed")
            }
            Error::LengthMismatch { expected, actual } => write!(
                f,
                "iterator declared {expected} items but produced {actual}"
            ),
            Error::Unbalanced { position } => {
                write!(f, "unbalanced parentheses at bit position {position}")
            }
            Error::CapacityExceeded { requested, limit } => write!(
                f,
                "requested size {requested} exceeds the capacity limit of {limit}"
            ),
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
