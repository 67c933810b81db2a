//! Sorting by a single column through a row permutation.
use strata_error::StrataResult;
use strata_utils::total_ord::TotalOrd;

use crate::frame::DataFrame;

impl DataFrame {
    /// Sort all rows by the values of one column. The sort is stable: rows
    /// that compare equal keep their original relative order. Null
    /// sentinels take part in the ordering as their reserved values, so
    /// numeric nulls sort first ascending and last descending.
    pub fn sort_by(&mut self, name: &str, ascending: bool) -> StrataResult<&mut Self> {
        let target = self.require_column(name)?;

        let mut permutation: Vec<usize> = (0..self.height).collect();
        crate::with_match_variant!(target, |c| {
            let values = c.values();
            if ascending {
                permutation.sort_by(|&a, &b| values[a].tot_cmp(&values[b]));
            } else {
                permutation.sort_by(|&a, &b| values[b].tot_cmp(&values[a]));
            }
        });

        for col in self.columns.values_mut() {
            *col = col.gather(&permutation);
        }
        Ok(self)
    }
}
