/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Navigation over a balanced string of opening (`1`) and closing (`0`)
/// parentheses, indexed for constant-time `find_close`.
///
/// `find_open` and `enclose` are not required by the core (spec.md §4.8) and
/// may be implemented in terms of [`BalancedParentheses::find_close`] plus a
/// mirrored closing-pioneer index; implementations that have not built that
/// mirror may fail with [`crate::error::Error`] wrapped in a panic message,
/// or simply `unimplemented!`, per the caller's choice — this crate's
/// [`crate::bp::BalancedParens`] implements all three.
pub trait BalancedParentheses {
    /// Position of the closing parenthesis matching the opening parenthesis
    /// at `pos`.
    ///
    /// # Panics
    /// In debug builds, if `pos` is out of range or bit `pos` is not an
    /// opening parenthesis (§4.10: a precondition violation, not a typed
    /// error).
    fn find_close(&self, pos: u64) -> u64;

    /// Position of the opening parenthesis matching the closing parenthesis
    /// at `pos`.
    fn find_open(&self, pos: u64) -> u64;

    /// Position of the opening parenthesis of the innermost pair strictly
    /// enclosing `pos`.
    fn enclose(&self, pos: u64) -> u64;
}
