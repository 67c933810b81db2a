//! A transient, denormalized view of one table record.
use std::fmt::{self, Display, Formatter};

use strata_error::{strata_bail, strata_err, StrataResult};
use strata_utils::aliases::{InitHashMaps, StIndexMap};

use crate::datatypes::{AnyValue, Storable};

/// An ordered mapping from column name to one scalar value.
///
/// A `Row` is an independent copy: it holds no reference back to the table
/// it was read from, and mutating it never mutates the table. A value equal
/// to the null sentinel of its type is preserved as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    data: StIndexMap<String, AnyValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            data: StIndexMap::new(),
        }
    }

    /// Typed read; `Ok(None)` when the field is absent.
    pub fn get<T: Storable>(&self, name: &str) -> StrataResult<Option<T>> {
        match self.data.get(name) {
            None => Ok(None),
            Some(av) => match T::from_any(av) {
                Some(v) => Ok(Some(v)),
                None => strata_bail!(
                    SchemaMismatch:
                    "field '{}' is {}, not {}", name, av.dtype(), T::DTYPE
                ),
            },
        }
    }

    /// Typed read of a field that must exist.
    pub fn at<T: Storable>(&self, name: &str) -> StrataResult<T> {
        self.get(name)?
            .ok_or_else(|| strata_err!(col_not_found = name))
    }

    /// Insert or overwrite a field. Once a field exists its type is locked:
    /// writing a different storable type is a mismatch.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AnyValue>,
    ) -> StrataResult<&mut Self> {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.data.get(&name) {
            if existing.dtype() != value.dtype() {
                strata_bail!(
                    SchemaMismatch:
                    "field '{}' is {}, not {}", name, existing.dtype(), value.dtype()
                );
            }
        }
        self.data.insert(name, value);
        Ok(self)
    }

    /// Overwrite a field that must already exist, keeping its type.
    pub fn update(&mut self, name: &str, value: impl Into<AnyValue>) -> StrataResult<&mut Self> {
        if !self.data.contains_key(name) {
            return Err(strata_err!(col_not_found = name));
        }
        self.set(name, value)
    }

    pub(crate) fn insert_any(&mut self, name: String, value: AnyValue) {
        self.data.insert(name, value);
    }

    pub fn get_any(&self, name: &str) -> Option<&AnyValue> {
        self.data.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Field names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.data.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyValue)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AnyValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, AnyValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.data.insert(name, value);
        }
        row
    }
}

impl<S: Into<String>, const N: usize> From<[(S, AnyValue); N]> for Row {
    fn from(fields: [(S, AnyValue); N]) -> Self {
        fields
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect()
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
            first = false;
        }
        f.write_str(" }")
    }
}
