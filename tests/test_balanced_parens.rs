/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::{rngs::SmallRng, Rng, SeedableRng};
use succinct_rank_select::bp::BalancedParens;
use succinct_rank_select::traits::{BalancedParentheses, BitLength};
use succinct_rank_select::transform::parens_from_str;

#[test]
fn test_balanced_parens_from_str_end_to_end() {
    let bits = parens_from_str("(()(()))").unwrap();
    let bv: succinct_rank_select::bits::CountBitVec = bits.into();
    let bp = BalancedParens::new(bv).unwrap();

    assert_eq!(bp.find_close(0), 7);
    assert_eq!(bp.find_open(7), 0);
    assert_eq!(bp.enclose(3), 0);
    assert_eq!(bp.enclose(4), 3);
}

#[test]
fn test_balanced_parens_large_random_tree() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut open_stack: Vec<u64> = Vec::new();
    let mut bits = Vec::new();
    let mut pos = 0u64;
    while pos < 20_000 || !open_stack.is_empty() {
        let must_close = pos >= 20_000 || (!open_stack.is_empty() && rng.gen_bool(0.45));
        if must_close && !open_stack.is_empty() {
            open_stack.pop();
            bits.push(false);
        } else {
            open_stack.push(pos);
            bits.push(true);
        }
        pos += 1;
    }

    let bv: succinct_rank_select::bits::BitVec<Box<[u64]>> = bits.into_iter().collect();
    let bv: succinct_rank_select::bits::CountBitVec = bv.into();
    let bp = BalancedParens::new(bv).unwrap();

    let mut stack = Vec::new();
    for (p, &bit) in bits_ref(&bp).iter().enumerate() {
        let p = p as u64;
        if bit {
            stack.push(p);
        } else {
            let o = stack.pop().unwrap();
            assert_eq!(bp.find_close(o), p);
            assert_eq!(bp.find_open(p), o);
        }
    }
    assert!(stack.is_empty());
}

fn bits_ref(bp: &BalancedParens<succinct_rank_select::bits::CountBitVec>) -> Vec<bool> {
    let bits = bp.bits();
    (0..bits.len()).map(|p| bits.get(p)).collect()
}
