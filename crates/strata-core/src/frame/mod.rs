//! [`DataFrame`]: a name-indexed collection of columns with a consistent
//! height.
mod cleaning;
mod describe;
mod join;
pub mod row;
mod sort;

use strata_error::{strata_bail, strata_ensure, strata_err, StrataResult};
use strata_utils::aliases::{InitHashMaps, StHashMap};

use crate::column::{ColumnVariant, IntoColumn};
use crate::datatypes::Storable;
use crate::frame::row::Row;
use crate::{HEAD_DEFAULT_LENGTH, TAIL_DEFAULT_LENGTH};

/// Build a [`DataFrame`] from `name => values` pairs.
///
/// ```
/// # use strata_core::df;
/// let df = df!("id" => [1i64, 2, 3], "name" => ["a", "b", "c"])?;
/// assert_eq!(df.shape(), (3, 2));
/// # Ok::<(), strata_error::StrataError>(())
/// ```
#[macro_export]
macro_rules! df {
    ($($name:expr => $values:expr),+ $(,)?) => {
        $crate::frame::DataFrame::new(
            vec![$($name.to_string()),+],
            vec![$(
                <$crate::column::ColumnVariant as $crate::column::IntoColumn<_, _>>::new($values)
            ),+],
        )
    };
}

/// A name-indexed mapping of type-erased columns plus the authoritative
/// row count.
///
/// # Invariants
/// - Every name in `column_order` is a key of `columns` and vice versa.
/// - Every column holds exactly `height` elements; any structural change
///   that can introduce a length mismatch ends with a normalization pass
///   that right-pads short columns with sentinel nulls.
#[derive(Clone)]
pub struct DataFrame {
    columns: StHashMap<String, ColumnVariant>,
    /// Canonical column order for display and iteration, independent of the
    /// mapping's internal order.
    column_order: Vec<String>,
    height: usize,
}

impl Default for DataFrame {
    fn default() -> Self {
        DataFrame::empty()
    }
}

impl DataFrame {
    pub fn empty() -> Self {
        DataFrame {
            columns: StHashMap::new(),
            column_order: Vec::new(),
            height: 0,
        }
    }

    /// Build from parallel name and column sequences. The height becomes
    /// the longest column's length; shorter columns are right-padded with
    /// sentinel nulls.
    pub fn new(names: Vec<String>, columns: Vec<ColumnVariant>) -> StrataResult<Self> {
        strata_ensure!(
            names.len() == columns.len(),
            ShapeMismatch:
            "got {} column names for {} columns", names.len(), columns.len()
        );

        let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut map = StHashMap::with_capacity(columns.len());
        for (name, col) in names.iter().zip(columns) {
            if map.insert(name.clone(), col).is_some() {
                strata_bail!(duplicate = name);
            }
        }

        let mut df = DataFrame {
            columns: map,
            column_order: names,
            height,
        };
        df.normalize_length();
        Ok(df)
    }

    /// Assemble from parts that already satisfy the invariants.
    pub(crate) fn from_parts(
        column_order: Vec<String>,
        columns: StHashMap<String, ColumnVariant>,
        height: usize,
    ) -> Self {
        if cfg!(debug_assertions) {
            assert_eq!(column_order.len(), columns.len());
            for name in &column_order {
                assert_eq!(columns[name].len(), height);
            }
        }
        DataFrame {
            columns,
            column_order,
            height,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.column_order.len()
    }

    /// Get (height, width) of the [`DataFrame`].
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Column names in canonical order.
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Columns in canonical order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &ColumnVariant)> {
        self.column_order
            .iter()
            .map(|name| (name.as_str(), &self.columns[name]))
    }

    /// Untyped column lookup.
    pub fn column_variant(&self, name: &str) -> Option<&ColumnVariant> {
        self.columns.get(name)
    }

    /// Typed column lookup; `None` when the name is unknown or the column
    /// holds a different storable type.
    pub fn column<T: Storable>(&self, name: &str) -> Option<&crate::column::Column<T>> {
        self.columns.get(name).and_then(T::downcast)
    }

    pub(crate) fn require_column(&self, name: &str) -> StrataResult<&ColumnVariant> {
        self.columns
            .get(name)
            .ok_or_else(|| strata_err!(col_not_found = name))
    }

    /// Append a column built from plain values; see [`IntoColumn`].
    pub fn add_column<S, P: ?Sized>(
        &mut self,
        name: impl Into<String>,
        values: S,
    ) -> StrataResult<&mut Self>
    where
        ColumnVariant: IntoColumn<S, P>,
    {
        self.add_column_variant(name.into(), <ColumnVariant as IntoColumn<S, P>>::new(values))
    }

    pub fn add_column_variant(
        &mut self,
        name: String,
        column: ColumnVariant,
    ) -> StrataResult<&mut Self> {
        if self.columns.contains_key(&name) {
            strata_bail!(duplicate = name);
        }
        self.height = self.height.max(column.len());
        self.column_order.push(name.clone());
        self.columns.insert(name, column);
        self.normalize_length();
        Ok(self)
    }

    pub fn drop_column(&mut self, name: &str) -> StrataResult<&mut Self> {
        if self.columns.remove(name).is_none() {
            return Err(strata_err!(col_not_found = name));
        }
        self.column_order.retain(|n| n != name);
        Ok(self)
    }

    /// Append one record. Fields are matched to columns by name; columns
    /// the row does not mention get a sentinel null. The row is validated
    /// up front, so a failing append leaves the table untouched.
    pub fn add_row(&mut self, row: &Row) -> StrataResult<()> {
        for (name, value) in row.iter() {
            let col = self
                .columns
                .get(name)
                .ok_or_else(|| strata_err!(col_not_found = name))?;
            strata_ensure!(
                col.dtype() == value.dtype(),
                SchemaMismatch:
                "cannot append a {} value to column '{}' of type {}",
                value.dtype(), name, col.dtype()
            );
        }

        for name in &self.column_order {
            let col = self.columns.get_mut(name).unwrap();
            match row.get_any(name) {
                Some(value) => col.append_any(value)?,
                None => col.append_null(),
            }
        }
        self.height += 1;
        Ok(())
    }

    /// Overwrite the fields of row `index` named by `row`. The update is
    /// atomic: index, names and value types are all validated before the
    /// first write. Returns the number of fields written.
    pub fn update_row(&mut self, index: usize, row: &Row) -> StrataResult<usize> {
        strata_ensure!(index < self.height, oob = index, self.height);
        for (name, value) in row.iter() {
            let col = self
                .columns
                .get(name)
                .ok_or_else(|| strata_err!(col_not_found = name))?;
            strata_ensure!(
                col.dtype() == value.dtype(),
                SchemaMismatch:
                "cannot write a {} value to column '{}' of type {}",
                value.dtype(), name, col.dtype()
            );
        }

        let mut count = 0;
        for (name, value) in row.iter() {
            self.columns.get_mut(name).unwrap().set_any(index, value)?;
            count += 1;
        }
        Ok(count)
    }

    /// Snapshot row `index` across all columns, in canonical order.
    /// Sentinel nulls are preserved as-is in the returned [`Row`].
    pub fn get_row(&self, index: usize) -> StrataResult<Row> {
        strata_ensure!(index < self.height, oob = index, self.height);
        let mut row = Row::new();
        for name in &self.column_order {
            row.insert_any(name.clone(), self.columns[name].get_any(index)?);
        }
        Ok(row)
    }

    pub fn drop_row(&mut self, index: usize) -> StrataResult<()> {
        strata_ensure!(index < self.height, oob = index, self.height);
        for col in self.columns.values_mut() {
            col.erase(index)?;
        }
        self.height -= 1;
        Ok(())
    }

    /// New frame holding copies of the named columns, in the given order.
    pub fn select(&self, subset: &[&str]) -> StrataResult<DataFrame> {
        strata_ensure!(
            !subset.is_empty(),
            InvalidOperation: "no columns indicated for selection"
        );
        self.validate_subset(subset)?;

        DataFrame::new(
            subset.iter().map(|s| s.to_string()).collect(),
            subset.iter().map(|s| self.columns[*s].clone()).collect(),
        )
    }

    /// New frame with the contiguous row range `[start, end)` copied.
    pub fn slice(&self, start: usize, end: usize) -> StrataResult<DataFrame> {
        strata_ensure!(start < self.height, oob = start, self.height);
        strata_ensure!(end <= self.height, oob = end, self.height);
        strata_ensure!(
            start < end,
            InvalidOperation: "invalid slice range: start {} is not below end {}", start, end
        );
        Ok(self.take_range(start, end))
    }

    /// New frame with every row from `start` to the end copied.
    pub fn get_last(&self, start: usize) -> StrataResult<DataFrame> {
        strata_ensure!(start < self.height, oob = start, self.height);
        Ok(self.take_range(start, self.height))
    }

    /// First `length` rows (default 10), clamped to the height.
    pub fn head(&self, length: Option<usize>) -> DataFrame {
        let len = length.unwrap_or(HEAD_DEFAULT_LENGTH).min(self.height);
        self.take_range(0, len)
    }

    /// Last `length` rows (default 10), clamped to the height.
    pub fn tail(&self, length: Option<usize>) -> DataFrame {
        let len = length.unwrap_or(TAIL_DEFAULT_LENGTH).min(self.height);
        self.take_range(self.height - len, self.height)
    }

    /// Heap footprint estimate in bytes.
    pub fn estimated_size(&self) -> usize {
        self.columns.values().map(|c| c.estimated_size()).sum()
    }

    pub(crate) fn take_range(&self, start: usize, end: usize) -> DataFrame {
        let mut map = StHashMap::with_capacity(self.width());
        for (name, col) in &self.columns {
            map.insert(name.clone(), col.slice_range(start, end));
        }
        DataFrame::from_parts(self.column_order.clone(), map, end - start)
    }

    /// Right-pad every column shorter than the current height with
    /// sentinel nulls.
    pub(crate) fn normalize_length(&mut self) {
        let height = self.height;
        for col in self.columns.values_mut() {
            if col.len() != height {
                col.resize(height);
            }
        }
    }

    /// Keep only the rows whose `keep` flag is set, with one left-compaction
    /// pass per column.
    pub(crate) fn compact_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.height);
        for col in self.columns.values_mut() {
            col.compact(keep);
        }
        self.height = keep.iter().filter(|k| **k).count();
    }

    pub(crate) fn validate_subset(&self, subset: &[&str]) -> StrataResult<()> {
        for name in subset {
            strata_ensure!(self.columns.contains_key(*name), col_not_found = name);
        }
        Ok(())
    }

    /// The target columns of a cleaning operation: the whole table in
    /// canonical order when `subset` is empty.
    pub(crate) fn resolve_subset(&self, subset: &[&str]) -> StrataResult<Vec<String>> {
        if subset.is_empty() {
            Ok(self.column_order.clone())
        } else {
            self.validate_subset(subset)?;
            Ok(subset.iter().map(|s| s.to_string()).collect())
        }
    }
}
