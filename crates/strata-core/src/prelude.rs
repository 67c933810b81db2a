pub use strata_error::{strata_bail, strata_ensure, strata_err, StrataError, StrataResult};
pub use strata_utils::aliases::{InitHashMaps, StHashMap, StHashSet, StIndexMap};

pub use crate::column::{Column, ColumnVariant, IntoColumn};
pub use crate::config::verbose;
pub use crate::datatypes::{AnyValue, DataType, NumericNative, Storable};
pub use crate::df;
pub use crate::frame::row::Row;
pub use crate::frame::DataFrame;
pub use crate::with_match_variant;
