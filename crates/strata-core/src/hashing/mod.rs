//! Row hashing for dedup and joins.
use std::hash::{BuildHasher, Hasher};

use strata_utils::aliases::StRandomState;
use strata_utils::total_ord::TotalHash;

use crate::column::ColumnVariant;
use crate::frame::DataFrame;

/// Boost-style hash combine, folded across a row's columns in canonical
/// order. Order-sensitive.
#[inline]
pub fn combine_hash(acc: u64, h: u64) -> u64 {
    acc ^ h
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(acc << 6)
        .wrapping_add(acc >> 2)
}

/// Hash the scalar at `index` of one column.
pub fn hash_value(col: &ColumnVariant, index: usize, state: &StRandomState) -> u64 {
    crate::with_match_variant!(col, |c| {
        let mut hasher = state.build_hasher();
        c.values()[index].tot_hash(&mut hasher);
        hasher.finish()
    })
}

/// Combined per-row hash over the target columns, for every row.
///
/// Hashes are only comparable when produced with the same `state`.
pub fn hash_rows(df: &DataFrame, targets: &[&str], state: &StRandomState) -> Vec<u64> {
    let columns: Vec<&ColumnVariant> = targets
        .iter()
        .map(|name| df.column_variant(name).expect("validated column name"))
        .collect();

    (0..df.height())
        .map(|i| {
            columns
                .iter()
                .fold(0u64, |acc, col| combine_hash(acc, hash_value(col, i, state)))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::df;

    #[test]
    fn test_equal_rows_hash_equal() {
        let df = df!("a" => [1i64, 2, 1], "b" => ["x", "y", "x"]).unwrap();
        let state = StRandomState::default();
        let hashes = hash_rows(&df, &["a", "b"], &state);
        assert_eq!(hashes[0], hashes[2]);
        assert_ne!(hashes[0], hashes[1]);
    }

    #[test]
    fn test_combine_is_order_sensitive() {
        let ab = combine_hash(combine_hash(0, 1), 2);
        let ba = combine_hash(combine_hash(0, 2), 1);
        assert_ne!(ab, ba);
    }
}
