//! The closed set of storable types and the in-band null policy.
mod any_value;

use std::fmt::{self, Display, Formatter};

use num_traits::ToPrimitive;
use strata_utils::total_ord::{TotalEq, TotalHash, TotalOrd};

pub use self::any_value::AnyValue;
use crate::column::{Column, ColumnVariant};

/// Data type of a single column.
///
/// The set is closed: every dispatch site in this crate matches on exactly
/// these three variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int64,
    Float64,
    String,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Int64 => "i64",
            DataType::Float64 => "f64",
            DataType::String => "str",
        };
        f.write_str(s)
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
}

/// A type that can live in a [`Column`].
///
/// Nulls are represented in-band by a reserved sentinel value
/// ([`Storable::null_value`]): `i64::MIN`, `f64::MIN` and the empty string.
/// Real data equal to the sentinel cannot be distinguished from a null;
/// this is an accepted trade-off of the storage format.
pub trait Storable:
    Clone + std::fmt::Debug + PartialEq + TotalEq + TotalOrd + TotalHash + Sized + private::Sealed + 'static
{
    const DTYPE: DataType;

    /// The reserved sentinel standing for "no data".
    fn null_value() -> Self;

    /// Whether this value is the null sentinel for its type.
    fn is_null(&self) -> bool;

    fn into_any(self) -> AnyValue;

    /// Extract a value of this type from an [`AnyValue`]; `None` on a
    /// different runtime type.
    fn from_any(av: &AnyValue) -> Option<Self>;

    fn into_variant(col: Column<Self>) -> ColumnVariant;

    fn downcast(variant: &ColumnVariant) -> Option<&Column<Self>>;

    fn downcast_mut(variant: &mut ColumnVariant) -> Option<&mut Column<Self>>;
}

impl Storable for i64 {
    const DTYPE: DataType = DataType::Int64;

    #[inline]
    fn null_value() -> Self {
        i64::MIN
    }

    #[inline]
    fn is_null(&self) -> bool {
        *self == i64::MIN
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Int64(self)
    }

    fn from_any(av: &AnyValue) -> Option<Self> {
        match av {
            AnyValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    fn into_variant(col: Column<Self>) -> ColumnVariant {
        ColumnVariant::Int64(col)
    }

    fn downcast(variant: &ColumnVariant) -> Option<&Column<Self>> {
        match variant {
            ColumnVariant::Int64(col) => Some(col),
            _ => None,
        }
    }

    fn downcast_mut(variant: &mut ColumnVariant) -> Option<&mut Column<Self>> {
        match variant {
            ColumnVariant::Int64(col) => Some(col),
            _ => None,
        }
    }
}

impl Storable for f64 {
    const DTYPE: DataType = DataType::Float64;

    // The most negative *finite* float, so natural ordering still puts
    // nulls before data.
    #[inline]
    fn null_value() -> Self {
        f64::MIN
    }

    #[inline]
    fn is_null(&self) -> bool {
        *self == f64::MIN
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Float64(self)
    }

    fn from_any(av: &AnyValue) -> Option<Self> {
        match av {
            AnyValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    fn into_variant(col: Column<Self>) -> ColumnVariant {
        ColumnVariant::Float64(col)
    }

    fn downcast(variant: &ColumnVariant) -> Option<&Column<Self>> {
        match variant {
            ColumnVariant::Float64(col) => Some(col),
            _ => None,
        }
    }

    fn downcast_mut(variant: &mut ColumnVariant) -> Option<&mut Column<Self>> {
        match variant {
            ColumnVariant::Float64(col) => Some(col),
            _ => None,
        }
    }
}

impl Storable for String {
    const DTYPE: DataType = DataType::String;

    #[inline]
    fn null_value() -> Self {
        String::new()
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.is_empty()
    }

    fn into_any(self) -> AnyValue {
        AnyValue::String(self)
    }

    fn from_any(av: &AnyValue) -> Option<Self> {
        match av {
            AnyValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_variant(col: Column<Self>) -> ColumnVariant {
        ColumnVariant::String(col)
    }

    fn downcast(variant: &ColumnVariant) -> Option<&Column<Self>> {
        match variant {
            ColumnVariant::String(col) => Some(col),
            _ => None,
        }
    }

    fn downcast_mut(variant: &mut ColumnVariant) -> Option<&mut Column<Self>> {
        match variant {
            ColumnVariant::String(col) => Some(col),
            _ => None,
        }
    }
}

/// A storable type the numeric kernels run on.
pub trait NumericNative: Storable + Copy + PartialOrd + ToPrimitive {}

impl NumericNative for i64 {}
impl NumericNative for f64 {}
