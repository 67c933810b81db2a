//! Typed builders the tokenizer feeds into.
use strata_core::column::{Column, ColumnVariant};
use strata_core::datatypes::{DataType, Storable};

/// One growing column of parsed fields.
///
/// An empty field, or a field that fails to parse as the buffer's type,
/// lands as the type's sentinel null.
pub(crate) enum CsvBuffer {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    String(Vec<String>),
}

impl CsvBuffer {
    pub(crate) fn new(dtype: DataType, capacity: usize) -> Self {
        match dtype {
            DataType::Int64 => CsvBuffer::Int64(Vec::with_capacity(capacity)),
            DataType::Float64 => CsvBuffer::Float64(Vec::with_capacity(capacity)),
            DataType::String => CsvBuffer::String(Vec::with_capacity(capacity)),
        }
    }

    pub(crate) fn push(&mut self, token: &str) {
        match self {
            CsvBuffer::Int64(values) => {
                values.push(token.parse::<i64>().unwrap_or_else(|_| i64::null_value()))
            },
            CsvBuffer::Float64(values) => {
                values.push(token.parse::<f64>().unwrap_or_else(|_| f64::null_value()))
            },
            CsvBuffer::String(values) => values.push(token.to_string()),
        }
    }

    pub(crate) fn into_variant(self) -> ColumnVariant {
        match self {
            CsvBuffer::Int64(values) => ColumnVariant::Int64(Column::from_values(values)),
            CsvBuffer::Float64(values) => ColumnVariant::Float64(Column::from_values(values)),
            CsvBuffer::String(values) => ColumnVariant::String(Column::from_values(values)),
        }
    }
}
