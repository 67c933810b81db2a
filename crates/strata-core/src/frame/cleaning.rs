//! Null handling and deduplication.
use strata_error::StrataResult;
use strata_utils::aliases::{InitHashMaps, StHashSet, StRandomState};

use crate::datatypes::Storable;
use crate::frame::DataFrame;
use crate::hashing::hash_rows;

impl DataFrame {
    /// Drop every row whose null count across the target columns exceeds
    /// `threshold` (0 means any null drops the row). An empty `subset`
    /// targets all columns.
    pub fn dropna(&mut self, subset: &[&str], threshold: usize) -> StrataResult<&mut Self> {
        let targets = self.resolve_subset(subset)?;

        let mut keep = vec![true; self.height()];
        for (i, keep) in keep.iter_mut().enumerate() {
            let mut nulls = 0;
            for name in &targets {
                if self.columns[name].is_null_at(i)? {
                    nulls += 1;
                }
                if nulls > threshold {
                    *keep = false;
                    break;
                }
            }
        }

        self.compact_rows(&keep);
        Ok(self)
    }

    /// Drop every row whose combined hash over the target columns was seen
    /// before; the first occurrence is kept.
    ///
    /// Matching is purely hash-based: two distinct rows that collide would
    /// incorrectly dedup. This is an accepted approximation of the storage
    /// engine.
    pub fn drop_duplicates(&mut self, subset: &[&str]) -> StrataResult<&mut Self> {
        let targets = self.resolve_subset(subset)?;
        let target_refs: Vec<&str> = targets.iter().map(|s| s.as_str()).collect();

        let state = StRandomState::default();
        let hashes = hash_rows(self, &target_refs, &state);

        let mut seen = StHashSet::with_capacity(self.height());
        let keep: Vec<bool> = hashes.iter().map(|h| seen.insert(*h)).collect();

        self.compact_rows(&keep);
        Ok(self)
    }

    /// Replace nulls with `value` in every target column whose storable
    /// type matches `T`; other columns are left alone.
    pub fn fill_null<T: Storable>(&mut self, value: T, subset: &[&str]) -> StrataResult<&mut Self> {
        let targets = self.resolve_subset(subset)?;
        for name in &targets {
            if let Some(col) = T::downcast_mut(self.columns.get_mut(name).unwrap()) {
                col.fill_value(&value);
            }
        }
        Ok(self)
    }

    /// Forward-propagate the last seen non-null value into nulls, per
    /// target column. Leading nulls are left untouched.
    pub fn ffill(&mut self, subset: &[&str]) -> StrataResult<&mut Self> {
        let targets = self.resolve_subset(subset)?;
        for name in &targets {
            let col = self.columns.get_mut(name).unwrap();
            crate::with_match_variant!(col, |c| c.fill_forward());
        }
        Ok(self)
    }

    /// Backward-propagate the next seen non-null value into nulls, per
    /// target column. Trailing nulls are left untouched.
    pub fn bfill(&mut self, subset: &[&str]) -> StrataResult<&mut Self> {
        let targets = self.resolve_subset(subset)?;
        for name in &targets {
            let col = self.columns.get_mut(name).unwrap();
            crate::with_match_variant!(col, |c| c.fill_backward());
        }
        Ok(self)
    }
}
