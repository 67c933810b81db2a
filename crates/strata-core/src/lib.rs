//! The core of the Strata table library: typed columns, the type-erased
//! column variant and the `DataFrame` that composes them.
#[macro_use]
pub mod column;
pub mod config;
pub mod datatypes;
pub mod fmt;
pub mod frame;
pub mod hashing;
pub mod prelude;
pub mod testing;
#[cfg(test)]
mod tests;

/// Default length for a `.head()` call.
pub(crate) const HEAD_DEFAULT_LENGTH: usize = 10;
/// Default length for a `.tail()` call.
pub(crate) const TAIL_DEFAULT_LENGTH: usize = 10;
