//! Single-column aggregates and the summary table.
use strata_error::{strata_bail, strata_ensure, strata_err, StrataResult};

use crate::column::{Column, ColumnVariant, IntoColumn};
use crate::datatypes::Storable;
use crate::frame::DataFrame;

/// The fixed statistic set of [`DataFrame::describe`], in render order.
pub(crate) const DESCRIBE_STATS: [&str; 8] =
    ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

macro_rules! numeric_agg {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub fn $name(&self, column: &str) -> StrataResult<f64> {
            match self.require_column(column)? {
                ColumnVariant::Int64(c) => c.$name(),
                ColumnVariant::Float64(c) => c.$name(),
                ColumnVariant::String(_) => strata_bail!(
                    InvalidOperation:
                    "cannot compute {} of string column '{}'", stringify!($name), column
                ),
            }
        }
    };
}

impl DataFrame {
    fn require_typed<T: Storable>(&self, name: &str) -> StrataResult<&Column<T>> {
        let col = self.require_column(name)?;
        T::downcast(col).ok_or_else(|| {
            strata_err!(
                SchemaMismatch:
                "column '{}' is {}, not {}", name, col.dtype(), T::DTYPE
            )
        })
    }

    /// Largest non-null value of a column of type `T`.
    pub fn maximum<T: Storable>(&self, column: &str) -> StrataResult<T> {
        self.require_typed::<T>(column)?.maximum()
    }

    /// Smallest non-null value of a column of type `T`.
    pub fn minimum<T: Storable>(&self, column: &str) -> StrataResult<T> {
        self.require_typed::<T>(column)?.minimum()
    }

    /// Mode set of a column of type `T`; see [`Column::mode`] for the
    /// frequency policy.
    pub fn mode<T: Storable>(&self, column: &str) -> StrataResult<Vec<T>> {
        self.require_typed::<T>(column)?.mode()
    }

    numeric_agg!(
        /// Sum of the non-null values of a numeric column.
        sum
    );
    numeric_agg!(
        /// Mean of the non-null values of a numeric column.
        mean
    );
    numeric_agg!(
        /// Median of the non-null values of a numeric column.
        median
    );
    numeric_agg!(
        /// Sample variance of the non-null values of a numeric column.
        variance
    );
    numeric_agg!(
        /// Sample standard deviation of the non-null values of a numeric
        /// column.
        standard_deviation
    );

    /// Linear-interpolated percentile of a numeric column; `p` in `[0, 1]`.
    pub fn percentile(&self, column: &str, p: f64) -> StrataResult<f64> {
        match self.require_column(column)? {
            ColumnVariant::Int64(c) => c.percentile(p),
            ColumnVariant::Float64(c) => c.percentile(p),
            ColumnVariant::String(_) => strata_bail!(
                InvalidOperation:
                "cannot compute percentile of string column '{}'", column
            ),
        }
    }

    /// Summary statistics for every numeric column: count, mean, std, min,
    /// the 25/50/75 percentiles and max, one row per statistic. Non-numeric
    /// columns are excluded.
    pub fn describe(&self) -> StrataResult<DataFrame> {
        strata_ensure!(
            !self.is_empty(),
            InvalidOperation: "cannot describe an empty dataframe"
        );

        let numeric: Vec<&str> = self
            .iter_columns()
            .filter(|(_, col)| col.dtype().is_numeric())
            .map(|(name, _)| name)
            .collect();
        strata_ensure!(
            !numeric.is_empty(),
            InvalidOperation: "no numerical columns to describe"
        );

        let mut names = Vec::with_capacity(numeric.len() + 1);
        let mut columns = Vec::with_capacity(numeric.len() + 1);
        names.push("statistic".to_string());
        columns.push(ColumnVariant::new(
            DESCRIBE_STATS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        ));

        for name in numeric {
            let col = &self.columns[name];
            let count = (col.len() - col.null_count()) as f64;
            let stats = vec![
                count,
                self.mean(name)?,
                self.standard_deviation(name)?,
                self.percentile(name, 0.0)?,
                self.percentile(name, 0.25)?,
                self.percentile(name, 0.5)?,
                self.percentile(name, 0.75)?,
                self.percentile(name, 1.0)?,
            ];
            names.push(name.to_string());
            columns.push(ColumnVariant::Float64(Column::from_values(stats)));
        }

        DataFrame::new(names, columns)
    }
}
