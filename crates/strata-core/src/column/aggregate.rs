//! Statistical kernels. Every kernel skips nulls; an empty or all-null
//! column is an error.
use std::cmp::Ordering;

use strata_error::{strata_ensure, StrataResult};
use strata_utils::aliases::{InitHashMaps, StHashMap};
use strata_utils::total_ord::{TotalOrd, TotalOrdWrap};

use super::Column;
use crate::datatypes::{NumericNative, Storable};

impl<T: Storable> Column<T> {
    fn ensure_any_value(&self, op: &str) -> StrataResult<()> {
        strata_ensure!(
            !self.is_empty(),
            InvalidOperation: "cannot compute {} of an empty column", op
        );
        strata_ensure!(
            self.null_count() < self.len(),
            InvalidOperation: "cannot compute {}: all values are null", op
        );
        Ok(())
    }

    pub fn maximum(&self) -> StrataResult<T> {
        self.ensure_any_value("maximum")?;
        let mut iter = self.iter().filter(|v| !v.is_null());
        let mut max = iter.next().unwrap().clone();
        for v in iter {
            if v.tot_cmp(&max) == Ordering::Greater {
                max = v.clone();
            }
        }
        Ok(max)
    }

    pub fn minimum(&self) -> StrataResult<T> {
        self.ensure_any_value("minimum")?;
        let mut iter = self.iter().filter(|v| !v.is_null());
        let mut min = iter.next().unwrap().clone();
        for v in iter {
            if v.tot_cmp(&min) == Ordering::Less {
                min = v.clone();
            }
        }
        Ok(min)
    }

    /// The most frequent non-null values, provided the winning frequency is
    /// strictly greater than 2; values seen only once or twice never
    /// qualify. Ties are all returned, in unspecified order. An empty
    /// result means no qualifying mode.
    pub fn mode(&self) -> StrataResult<Vec<T>> {
        self.ensure_any_value("mode")?;

        let mut frequency: StHashMap<TotalOrdWrap<T>, usize> = StHashMap::new();
        for v in self.iter().filter(|v| !v.is_null()) {
            *frequency.entry(TotalOrdWrap(v.clone())).or_insert(0) += 1;
        }

        let best = frequency.values().copied().max().unwrap_or(0);
        if best <= 2 {
            return Ok(Vec::new());
        }
        Ok(frequency
            .into_iter()
            .filter(|(_, count)| *count == best)
            .map(|(wrap, _)| wrap.0)
            .collect())
    }
}

impl<T: NumericNative> Column<T> {
    fn non_null_to_f64(&self) -> Vec<f64> {
        self.iter()
            .filter(|v| !v.is_null())
            .map(|v| v.to_f64().unwrap())
            .collect()
    }

    pub fn sum(&self) -> StrataResult<f64> {
        self.ensure_any_value("sum")?;
        Ok(self
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| v.to_f64().unwrap())
            .sum())
    }

    pub fn mean(&self) -> StrataResult<f64> {
        self.ensure_any_value("mean")?;
        let non_null = (self.len() - self.null_count()) as f64;
        Ok(self.sum()? / non_null)
    }

    /// Median via partial selection; no full sort.
    pub fn median(&self) -> StrataResult<f64> {
        self.ensure_any_value("median")?;
        let mut copy = self.non_null_to_f64();
        let n = copy.len();

        if n % 2 == 1 {
            let (_, mid, _) = copy.select_nth_unstable_by(n / 2, |a, b| a.tot_cmp(b));
            Ok(*mid)
        } else {
            let (_, left, upper) = copy.select_nth_unstable_by(n / 2 - 1, |a, b| a.tot_cmp(b));
            let left = *left;
            let right = upper
                .iter()
                .copied()
                .min_by(|a, b| a.tot_cmp(b))
                .unwrap();
            Ok((left + right) / 2.0)
        }
    }

    /// Sample variance (divides by `non_null - 1`).
    pub fn variance(&self) -> StrataResult<f64> {
        self.ensure_any_value("variance")?;
        let non_null = self.len() - self.null_count();
        strata_ensure!(
            non_null > 1,
            InvalidOperation: "cannot compute variance: requires at least 2 non-null values, got {}",
            non_null
        );

        let mean = self.mean()?;
        let summation: f64 = self
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| {
                let tmp = v.to_f64().unwrap() - mean;
                tmp * tmp
            })
            .sum();
        Ok(summation / (non_null - 1) as f64)
    }

    pub fn standard_deviation(&self) -> StrataResult<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Linear-interpolated percentile; `p` must be in `[0, 1]`.
    pub fn percentile(&self, p: f64) -> StrataResult<f64> {
        self.ensure_any_value("percentile")?;
        strata_ensure!(
            (0.0..=1.0).contains(&p),
            InvalidOperation: "percentile must be in [0, 1], got {}", p
        );

        let mut copy = self.non_null_to_f64();
        if copy.len() == 1 {
            return Ok(copy[0]);
        }
        copy.sort_unstable_by(|a, b| a.tot_cmp(b));

        let index = p * (copy.len() - 1) as f64;
        let lower = index.floor() as usize;
        let upper = index.ceil() as usize;
        if lower == upper {
            return Ok(copy[lower]);
        }
        let fraction = index - lower as f64;
        Ok(copy[lower] * (1.0 - fraction) + copy[upper] * fraction)
    }
}
