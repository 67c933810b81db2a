//! Testing utilities.
use crate::frame::DataFrame;

impl DataFrame {
    /// Structural equality: same column order, names, storable types and
    /// per-column data. Two nulls of the same type compare equal because
    /// they are the same sentinel value.
    pub fn equals(&self, other: &DataFrame) -> bool {
        if self.shape() != other.shape() || self.column_names() != other.column_names() {
            return false;
        }
        self.iter_columns()
            .zip(other.iter_columns())
            .all(|((_, left), (_, right))| left == right)
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
