/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// A dictionary indexed by position, as opposed to by rank of a bit.
///
/// The Elias-Fano monotone list and the Sparse* rank/select pair expose their
/// decoded values through this trait rather than through [`super::Select`]:
/// `get(i)` answers "what is the i-th stored value", which for Elias-Fano is
/// a genuinely different query from "where is the i-th one bit" (the latter
/// is answered by the `upperBits` selector that `get` is built on top of).
pub trait IndexedDict {
    type Value;

    fn len(&self) -> u64;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th value, or `None` if out of range.
    #[inline]
    fn get(&self, index: u64) -> Option<Self::Value> {
        if index < self.len() {
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// # Safety
    /// `index` must be `< len()`.
    unsafe fn get_unchecked(&self, index: u64) -> Self::Value;
}
