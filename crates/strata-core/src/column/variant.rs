//! The type-erased column: a closed union over the three storable types.
use strata_error::{strata_bail, StrataResult};

use super::Column;
use crate::datatypes::{AnyValue, DataType, Storable};

/// Dispatch to the concretely-typed [`Column`] held by a
/// [`ColumnVariant`](crate::column::ColumnVariant).
///
/// ```
/// use strata_core::column::{ColumnVariant, IntoColumn};
/// use strata_core::with_match_variant;
///
/// let col = ColumnVariant::new([1i64, 2, 3]);
/// let len = with_match_variant!(&col, |c| c.len());
/// assert_eq!(len, 3);
/// ```
#[macro_export]
macro_rules! with_match_variant {
    ($variant:expr, |$col:ident| $body:expr) => {
        match $variant {
            $crate::column::ColumnVariant::Int64($col) => $body,
            $crate::column::ColumnVariant::Float64($col) => $body,
            $crate::column::ColumnVariant::String($col) => $body,
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnVariant {
    Int64(Column<i64>),
    Float64(Column<f64>),
    String(Column<String>),
}

impl ColumnVariant {
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnVariant::Int64(_) => DataType::Int64,
            ColumnVariant::Float64(_) => DataType::Float64,
            ColumnVariant::String(_) => DataType::String,
        }
    }

    pub fn empty_of(dtype: DataType) -> Self {
        match dtype {
            DataType::Int64 => ColumnVariant::Int64(Column::new()),
            DataType::Float64 => ColumnVariant::Float64(Column::new()),
            DataType::String => ColumnVariant::String(Column::new()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_match_variant!(self, |c| c.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        with_match_variant!(self, |c| c.null_count())
    }

    /// Typed accessor; errors if the column is not an `i64` column.
    pub fn i64(&self) -> StrataResult<&Column<i64>> {
        match self {
            ColumnVariant::Int64(c) => Ok(c),
            _ => strata_bail!(SchemaMismatch: "expected i64 column, got {}", self.dtype()),
        }
    }

    /// Typed accessor; errors if the column is not an `f64` column.
    pub fn f64(&self) -> StrataResult<&Column<f64>> {
        match self {
            ColumnVariant::Float64(c) => Ok(c),
            _ => strata_bail!(SchemaMismatch: "expected f64 column, got {}", self.dtype()),
        }
    }

    /// Typed accessor; errors if the column is not a string column.
    pub fn str(&self) -> StrataResult<&Column<String>> {
        match self {
            ColumnVariant::String(c) => Ok(c),
            _ => strata_bail!(SchemaMismatch: "expected str column, got {}", self.dtype()),
        }
    }

    pub fn append_null(&mut self) {
        with_match_variant!(self, |c| c.append_null())
    }

    /// Append a scalar of the matching runtime type.
    pub fn append_any(&mut self, value: &AnyValue) -> StrataResult<()> {
        match (self, value) {
            (ColumnVariant::Int64(c), AnyValue::Int64(v)) => c.append(*v),
            (ColumnVariant::Float64(c), AnyValue::Float64(v)) => c.append(*v),
            (ColumnVariant::String(c), AnyValue::String(v)) => c.append(v.clone()),
            (this, value) => strata_bail!(
                SchemaMismatch:
                "cannot append a {} value to a {} column", value.dtype(), this.dtype()
            ),
        }
        Ok(())
    }

    /// Read the scalar at `index` as an [`AnyValue`].
    pub fn get_any(&self, index: usize) -> StrataResult<AnyValue> {
        match self {
            ColumnVariant::Int64(c) => Ok(AnyValue::Int64(*c.get(index)?)),
            ColumnVariant::Float64(c) => Ok(AnyValue::Float64(*c.get(index)?)),
            ColumnVariant::String(c) => Ok(AnyValue::String(c.get(index)?.clone())),
        }
    }

    /// Overwrite the scalar at `index` with a value of the matching runtime
    /// type, keeping the null count in sync.
    pub fn set_any(&mut self, index: usize, value: &AnyValue) -> StrataResult<()> {
        match (self, value) {
            (ColumnVariant::Int64(c), AnyValue::Int64(v)) => c.set(index, *v),
            (ColumnVariant::Float64(c), AnyValue::Float64(v)) => c.set(index, *v),
            (ColumnVariant::String(c), AnyValue::String(v)) => c.set(index, v.clone()),
            (this, value) => strata_bail!(
                SchemaMismatch:
                "cannot write a {} value to a {} column", value.dtype(), this.dtype()
            ),
        }
    }

    pub fn is_null_at(&self, index: usize) -> StrataResult<bool> {
        with_match_variant!(self, |c| Ok(c.get(index)?.is_null()))
    }

    pub fn erase(&mut self, index: usize) -> StrataResult<()> {
        with_match_variant!(self, |c| c.erase(index))
    }

    pub fn resize(&mut self, new_len: usize) {
        with_match_variant!(self, |c| c.resize(new_len))
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> ColumnVariant {
        match self {
            ColumnVariant::Int64(c) => ColumnVariant::Int64(c.gather(indices)),
            ColumnVariant::Float64(c) => ColumnVariant::Float64(c.gather(indices)),
            ColumnVariant::String(c) => ColumnVariant::String(c.gather(indices)),
        }
    }

    pub(crate) fn gather_opt(&self, indices: &[Option<usize>]) -> ColumnVariant {
        match self {
            ColumnVariant::Int64(c) => ColumnVariant::Int64(c.gather_opt(indices)),
            ColumnVariant::Float64(c) => ColumnVariant::Float64(c.gather_opt(indices)),
            ColumnVariant::String(c) => ColumnVariant::String(c.gather_opt(indices)),
        }
    }

    pub(crate) fn compact(&mut self, keep: &[bool]) {
        with_match_variant!(self, |c| c.compact(keep))
    }

    pub(crate) fn slice_range(&self, start: usize, end: usize) -> ColumnVariant {
        match self {
            ColumnVariant::Int64(c) => ColumnVariant::Int64(c.slice_range(start, end)),
            ColumnVariant::Float64(c) => ColumnVariant::Float64(c.slice_range(start, end)),
            ColumnVariant::String(c) => ColumnVariant::String(c.slice_range(start, end)),
        }
    }

    /// Heap footprint estimate in bytes.
    pub fn estimated_size(&self) -> usize {
        match self {
            ColumnVariant::Int64(c) => c.len() * size_of::<i64>(),
            ColumnVariant::Float64(c) => c.len() * size_of::<f64>(),
            ColumnVariant::String(c) => {
                c.len() * size_of::<String>() + c.iter().map(|v| v.len()).sum::<usize>()
            },
        }
    }
}

impl<T: Storable> From<Column<T>> for ColumnVariant {
    fn from(col: Column<T>) -> Self {
        T::into_variant(col)
    }
}

/// Construct a [`ColumnVariant`] from plain Rust collections.
///
/// The second type parameter is a phantom that lets slices, arrays and
/// `Vec`s of both owned and borrowed element types coexist as sources.
pub trait IntoColumn<T, Phantom: ?Sized> {
    fn new(values: T) -> Self;
}

macro_rules! impl_into_column {
    ($native:ty, $variant:ident) => {
        impl<S: AsRef<[$native]>> IntoColumn<S, [$native]> for ColumnVariant {
            fn new(values: S) -> Self {
                ColumnVariant::$variant(Column::from_values(values.as_ref().to_vec()))
            }
        }

        impl<S: AsRef<[Option<$native>]>> IntoColumn<S, [Option<$native>]> for ColumnVariant {
            fn new(values: S) -> Self {
                ColumnVariant::$variant(Column::from_options(values.as_ref().to_vec()))
            }
        }
    };
}

impl_into_column!(i64, Int64);
impl_into_column!(f64, Float64);
impl_into_column!(String, String);

impl<'a, S: AsRef<[&'a str]>> IntoColumn<S, [&'a str]> for ColumnVariant {
    fn new(values: S) -> Self {
        ColumnVariant::String(Column::from_values(
            values.as_ref().iter().map(|s| s.to_string()).collect(),
        ))
    }
}

impl<'a, S: AsRef<[Option<&'a str>]>> IntoColumn<S, [Option<&'a str>]> for ColumnVariant {
    fn new(values: S) -> Self {
        ColumnVariant::String(Column::from_options(
            values
                .as_ref()
                .iter()
                .map(|s| s.map(|s| s.to_string()))
                .collect(),
        ))
    }
}
