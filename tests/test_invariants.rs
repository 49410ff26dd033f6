/*
 * SPDX-FileCopyrightText: 2026 Succinct Rank/Select Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Property tests for the quantified invariants of spec.md §8, run over
//! randomly generated bit vectors, monotone sequences and balanced-
//! parenthesis strings.

use proptest::prelude::*;
use succinct_rank_select::bits::{BitVec, CountBitVec};
use succinct_rank_select::dict::EliasFanoBuilder;
use succinct_rank_select::rank_sel::{Rank9, Select9, SimpleSelect, SimpleSelectZero};
use succinct_rank_select::traits::{Rank, RankZero, Select, SelectZero};

fn to_count_bit_vec(bits: &[bool]) -> CountBitVec {
    let bv: BitVec<Box<[u64]>> = bits.iter().copied().collect();
    bv.into()
}

fn naive_rank(bits: &[bool], pos: u64) -> u64 {
    bits.iter().take(pos as usize).filter(|&&b| b).count() as u64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Invariants 1, 2, 5, 9: rank(0) = 0, rank(n) = count, 0 <= rank(p) <=
    /// p, rank_zero(p) + rank(p) = p, and Rank9/Select9's rank agrees with
    /// the naive O(p) popcount rank at every position.
    #[test]
    fn prop_rank9_matches_naive(bits in prop::collection::vec(any::<bool>(), 0..2000)) {
        let n = bits.len() as u64;
        let count = bits.iter().filter(|&&b| b).count() as u64;
        let b = to_count_bit_vec(&bits);
        let r = Rank9::new(b);

        prop_assert_eq!(r.rank(0), 0);
        prop_assert_eq!(r.rank(n), count);
        for p in 0..=n {
            let expected = naive_rank(&bits, p);
            prop_assert_eq!(r.rank(p), expected);
            prop_assert!(r.rank(p) <= p);
            prop_assert_eq!(r.rank_zero(p) + r.rank(p), p);
        }
    }

    /// Invariants 3, 4: for r < count, rank(select(r)) = r and
    /// B[select(r)] = 1; for a one at position p, select(rank(p)) = p.
    #[test]
    fn prop_select9_inverts_rank(bits in prop::collection::vec(any::<bool>(), 1..2000)) {
        let count = bits.iter().filter(|&&b| b).count() as u64;
        let b = to_count_bit_vec(&bits);
        let s: Select9 = Select9::from_bits(b);

        for r in 0..count {
            let pos = s.select(r).unwrap();
            prop_assert!(bits[pos as usize]);
            prop_assert_eq!(s.rank(pos), r);
        }
        for (p, &bit) in bits.iter().enumerate() {
            if bit {
                let pos = s.select(s.rank(p as u64)).unwrap();
                prop_assert_eq!(pos, p as u64);
            }
        }
        prop_assert_eq!(s.select(count), None);
    }

    /// Same inversion property for the standalone [`SimpleSelect`]
    /// inventory (not layered on Rank9).
    #[test]
    fn prop_simple_select_inverts_rank(bits in prop::collection::vec(any::<bool>(), 1..2000)) {
        let count = bits.iter().filter(|&&b| b).count() as u64;
        let b = to_count_bit_vec(&bits);
        let naive = Rank9::new(to_count_bit_vec(&bits));
        let s: SimpleSelect = SimpleSelect::new(b);

        for r in 0..count {
            let pos = s.select(r).unwrap();
            prop_assert!(bits[pos as usize]);
            prop_assert_eq!(naive.rank(pos), r);
        }
        prop_assert_eq!(s.select(count), None);
    }

    /// Invariant 6: select_zero(r) < n for r < count_zeros, and
    /// B[select_zero(r)] = 0.
    #[test]
    fn prop_select_zero_is_correct(bits in prop::collection::vec(any::<bool>(), 1..2000)) {
        let n = bits.len() as u64;
        let count_zeros = bits.iter().filter(|&&b| !b).count() as u64;
        let b = to_count_bit_vec(&bits);
        let s: SimpleSelectZero = SimpleSelectZero::new(b);

        for r in 0..count_zeros {
            let pos = s.select_zero(r).unwrap();
            prop_assert!(pos < n);
            prop_assert!(!bits[pos as usize]);
        }
        prop_assert_eq!(s.select_zero(count_zeros), None);
    }

    /// Invariant 8: bulk_select returns exactly the same positions as that
    /// many individual select calls.
    #[test]
    fn prop_bulk_select_matches_individual(
        bits in prop::collection::vec(any::<bool>(), 1..3000),
        rank0_frac in 0.0f64..1.0,
        len_frac in 0.0f64..1.0,
    ) {
        let count = bits.iter().filter(|&&b| b).count() as u64;
        prop_assume!(count > 0);
        let b = to_count_bit_vec(&bits);
        let s: SimpleSelect = SimpleSelect::new(b);

        let rank0 = (rank0_frac * count as f64) as u64 % count;
        let max_len = count - rank0;
        let len = ((len_frac * max_len as f64) as u64).min(max_len);
        let mut dest = vec![0u64; len as usize];
        s.bulk_select(rank0, &mut dest);
        for (i, &d) in dest.iter().enumerate() {
            prop_assert_eq!(d, s.select(rank0 + i as u64).unwrap());
        }
    }

    /// Invariant 7: get(i) = u_i for an Elias-Fano list built from a
    /// non-decreasing sequence.
    #[test]
    fn prop_elias_fano_get_matches_input(
        deltas in prop::collection::vec(0u64..40, 0..500)
    ) {
        let mut values = Vec::with_capacity(deltas.len());
        let mut cur = 0u64;
        for d in deltas {
            cur += d;
            values.push(cur);
        }
        let universe = values.last().copied().unwrap_or(0);
        let mut builder = EliasFanoBuilder::new(values.len() as u64, universe);
        for &v in &values {
            builder.push(v).unwrap();
        }
        let ef = succinct_rank_select::dict::EliasFano::from_layout(builder.finish().unwrap());
        for (i, &v) in values.iter().enumerate() {
            prop_assert_eq!(
                succinct_rank_select::traits::IndexedDict::get(&ef, i as u64),
                Some(v)
            );
        }
    }

    /// Invariant 10: for every open position p in a balanced string,
    /// find_close(p) is the unique q > p with B[q] = 0 and zero excess
    /// between p and q.
    #[test]
    fn prop_find_close_matches_stack_scan(seed in any::<u64>(), target_pairs in 1usize..400) {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut bits: Vec<bool> = Vec::new();
        let mut open_stack: Vec<u64> = Vec::new();
        let mut pos = 0u64;
        let target_bits = (target_pairs * 2) as u64;
        while pos < target_bits || !open_stack.is_empty() {
            let must_close = pos >= target_bits || (!open_stack.is_empty() && rng.gen_bool(0.5));
            if must_close && !open_stack.is_empty() {
                open_stack.pop();
                bits.push(false);
            } else {
                open_stack.push(pos);
                bits.push(true);
            }
            pos += 1;
        }

        let mut expected_close = vec![0u64; bits.len()];
        let mut stack = Vec::new();
        for (p, &bit) in bits.iter().enumerate() {
            if bit {
                stack.push(p as u64);
            } else {
                let o = stack.pop().unwrap();
                expected_close[o as usize] = p as u64;
            }
        }

        let b = to_count_bit_vec(&bits);
        let bp = succinct_rank_select::bp::BalancedParens::new(b).unwrap();
        for (p, &bit) in bits.iter().enumerate() {
            if bit {
                let close = succinct_rank_select::traits::BalancedParentheses::find_close(&bp, p as u64);
                prop_assert_eq!(close, expected_close[p]);
                prop_assert!(!bits[close as usize]);
            }
        }
    }
}
