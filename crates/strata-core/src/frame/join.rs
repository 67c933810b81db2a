//! Hash-based equi-joins.
use strata_error::{strata_ensure, StrataResult};
use strata_utils::aliases::{InitHashMaps, StHashMap, StRandomState};

use crate::frame::DataFrame;
use crate::hashing::hash_rows;

enum JoinType {
    Inner,
    Left,
}

impl DataFrame {
    /// Equi-join keeping only rows with a key match on both sides.
    pub fn inner_join(&self, other: &DataFrame, on: &[&str]) -> StrataResult<DataFrame> {
        self.join(other, on, JoinType::Inner)
    }

    /// Equi-join keeping every left row; unmatched rows get sentinel nulls
    /// in the right-only columns.
    pub fn left_join(&self, other: &DataFrame, on: &[&str]) -> StrataResult<DataFrame> {
        self.join(other, on, JoinType::Left)
    }

    /// Equi-join keeping every right row, implemented by delegating to
    /// [`DataFrame::left_join`] with the operand roles swapped. The output
    /// column order therefore mirrors a left join of the swapped sides.
    pub fn right_join(&self, other: &DataFrame, on: &[&str]) -> StrataResult<DataFrame> {
        other.left_join(self, on)
    }

    /// Key matching is hash-based with no equality fallback, like
    /// [`DataFrame::drop_duplicates`]: a hash collision across distinct
    /// keys would join rows that are not equal. Accepted approximation.
    fn join(&self, other: &DataFrame, on: &[&str], how: JoinType) -> StrataResult<DataFrame> {
        strata_ensure!(
            !on.is_empty(),
            InvalidOperation: "no key columns given for join"
        );
        self.validate_subset(on)?;
        other.validate_subset(on)?;
        for key in on {
            let left = self.columns[*key].dtype();
            let right = other.columns[*key].dtype();
            strata_ensure!(
                left == right,
                SchemaMismatch:
                "key column '{}' is {} on the left side but {} on the right", key, left, right
            );
        }

        // Build phase: hash every right row by its key columns.
        let state = StRandomState::default();
        let right_hashes = hash_rows(other, on, &state);
        let mut build: StHashMap<u64, Vec<usize>> = StHashMap::with_capacity(other.height());
        for (i, h) in right_hashes.iter().enumerate() {
            build.entry(*h).or_default().push(i);
        }

        // Probe phase: one output row per match; left-join rows without a
        // match emit once with a null right side.
        let left_hashes = hash_rows(self, on, &state);
        let mut left_idx: Vec<usize> = Vec::with_capacity(self.height());
        let mut right_idx: Vec<Option<usize>> = Vec::with_capacity(self.height());
        for (i, h) in left_hashes.iter().enumerate() {
            match build.get(h) {
                Some(matches) => {
                    for &j in matches {
                        left_idx.push(i);
                        right_idx.push(Some(j));
                    }
                },
                None => {
                    if matches!(how, JoinType::Left) {
                        left_idx.push(i);
                        right_idx.push(None);
                    }
                },
            }
        }

        // All left columns in canonical order, then the right columns that
        // are not part of the key.
        let mut names = Vec::with_capacity(self.width() + other.width() - on.len());
        let mut map = StHashMap::with_capacity(self.width() + other.width() - on.len());
        for name in &self.column_order {
            names.push(name.clone());
            map.insert(name.clone(), self.columns[name].gather(&left_idx));
        }
        for name in &other.column_order {
            if on.contains(&name.as_str()) {
                continue;
            }
            let out_name = if self.columns.contains_key(name) {
                format!("{name}_right")
            } else {
                name.clone()
            };
            names.push(out_name.clone());
            map.insert(out_name, other.columns[name].gather_opt(&right_idx));
        }

        Ok(DataFrame::from_parts(names, map, left_idx.len()))
    }
}
