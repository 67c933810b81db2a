//! The typed heart of every table column.
mod aggregate;
mod serialize;
mod variant;

pub use variant::{ColumnVariant, IntoColumn};

use strata_error::{strata_err, StrataResult};

use crate::datatypes::Storable;

/// Homogeneous, dense, ordered store for one typed attribute across all
/// rows of a table.
///
/// # Invariants
/// - `null_count` equals the number of elements currently equal to the
///   sentinel of `T`, and is maintained by every mutating operation.
///
/// There is deliberately no `IndexMut`-style raw write access: all writes go
/// through [`Column::set`], which reconciles `null_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<T: Storable> {
    values: Vec<T>,
    null_count: usize,
}

impl<T: Storable> Default for Column<T> {
    fn default() -> Self {
        Column::new()
    }
}

impl<T: Storable> Column<T> {
    pub fn new() -> Self {
        Column {
            values: Vec::new(),
            null_count: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Column {
            values: Vec::with_capacity(capacity),
            null_count: 0,
        }
    }

    /// Take ownership of `values`; the null count is established here.
    pub fn from_values(values: Vec<T>) -> Self {
        let null_count = values.iter().filter(|v| v.is_null()).count();
        Column { values, null_count }
    }

    /// `None` becomes the sentinel of `T`.
    pub fn from_options(values: Vec<Option<T>>) -> Self {
        Column::from_values(
            values
                .into_iter()
                .map(|v| v.unwrap_or_else(T::null_value))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn append(&mut self, value: T) {
        if value.is_null() {
            self.null_count += 1;
        }
        self.values.push(value);
    }

    pub fn append_null(&mut self) {
        self.append(T::null_value());
    }

    pub fn get(&self, index: usize) -> StrataResult<&T> {
        self.values
            .get(index)
            .ok_or_else(|| strata_err!(oob = index, self.values.len()))
    }

    /// Overwrite the element at `index`, keeping `null_count` in sync.
    pub fn set(&mut self, index: usize, value: T) -> StrataResult<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| strata_err!(oob = index, len))?;
        match (slot.is_null(), value.is_null()) {
            (true, false) => self.null_count -= 1,
            (false, true) => self.null_count += 1,
            _ => {},
        }
        *slot = value;
        Ok(())
    }

    /// Remove the element at `index`, shifting the tail left.
    pub fn erase(&mut self, index: usize) -> StrataResult<()> {
        if index >= self.values.len() {
            return Err(strata_err!(oob = index, self.values.len()));
        }
        if self.values[index].is_null() {
            self.null_count -= 1;
        }
        self.values.remove(index);
        Ok(())
    }

    /// Grow with sentinel nulls or shrink, keeping `null_count` in sync.
    pub fn resize(&mut self, new_len: usize) {
        let len = self.values.len();
        if new_len < len {
            self.null_count -= self.values[new_len..].iter().filter(|v| v.is_null()).count();
            self.values.truncate(new_len);
        } else {
            self.null_count += new_len - len;
            self.values.resize(new_len, T::null_value());
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.null_count = 0;
    }

    /// Replace every null with `value`. Filling with the sentinel itself is
    /// a no-op.
    pub(crate) fn fill_value(&mut self, value: &T) {
        if value.is_null() {
            return;
        }
        for slot in self.values.iter_mut() {
            if slot.is_null() {
                *slot = value.clone();
            }
        }
        self.null_count = 0;
    }

    /// Propagate the last seen non-null value into following nulls.
    /// Leading nulls stay untouched.
    pub(crate) fn fill_forward(&mut self) {
        let mut last: Option<T> = None;
        for slot in self.values.iter_mut() {
            if slot.is_null() {
                if let Some(v) = &last {
                    *slot = v.clone();
                    self.null_count -= 1;
                }
            } else {
                last = Some(slot.clone());
            }
        }
    }

    /// Propagate the next seen non-null value into preceding nulls.
    /// Trailing nulls stay untouched.
    pub(crate) fn fill_backward(&mut self) {
        let mut next: Option<T> = None;
        for slot in self.values.iter_mut().rev() {
            if slot.is_null() {
                if let Some(v) = &next {
                    *slot = v.clone();
                    self.null_count -= 1;
                }
            } else {
                next = Some(slot.clone());
            }
        }
    }

    /// New column with the elements at `indices`, in that order.
    pub(crate) fn gather(&self, indices: &[usize]) -> Column<T> {
        let mut out = Column::with_capacity(indices.len());
        for &i in indices {
            out.append(self.values[i].clone());
        }
        out
    }

    /// Like [`Column::gather`], with `None` gathering a null.
    pub(crate) fn gather_opt(&self, indices: &[Option<usize>]) -> Column<T> {
        let mut out = Column::with_capacity(indices.len());
        for &i in indices {
            match i {
                Some(i) => out.append(self.values[i].clone()),
                None => out.append_null(),
            }
        }
        out
    }

    /// Single left-compaction pass: keep only elements whose `keep` flag is
    /// set, preserving order.
    pub(crate) fn compact(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.values.len());
        let mut i = 0;
        let mut removed_nulls = 0;
        self.values.retain(|v| {
            let keep = keep[i];
            if !keep && v.is_null() {
                removed_nulls += 1;
            }
            i += 1;
            keep
        });
        self.null_count -= removed_nulls;
    }

    pub(crate) fn slice_range(&self, start: usize, end: usize) -> Column<T> {
        Column::from_values(self.values[start..end].to_vec())
    }
}

impl<T: Storable> FromIterator<T> for Column<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Column::from_values(iter.into_iter().collect())
    }
}

impl<'a, T: Storable> IntoIterator for &'a Column<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
