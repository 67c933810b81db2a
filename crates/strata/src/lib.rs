//! # Strata: an in-process typed columnar table library
//!
//! Strata stores tabular data column-wise over a closed set of storable
//! types (`i64`, `f64`, `String`) with in-band sentinel nulls, and layers a
//! [`DataFrame`](crate::prelude::DataFrame) on top: row and column
//! mutation, null handling, deduplication, sorting, equi-joins, summary
//! statistics, and CSV/binary (de)serialization.
//!
//! ```
//! use strata::prelude::*;
//!
//! fn example() -> StrataResult<()> {
//!     let mut df = df!(
//!         "id" => [1i64, 2, 3],
//!         "name" => [Some("ada"), None, Some("grace")]
//!     )?;
//!     df.dropna(&[], 0)?;
//!     assert_eq!(df.shape(), (2, 2));
//!
//!     let bytes = to_bytes(&df);
//!     assert_eq!(from_bytes(&bytes)?, df);
//!     Ok(())
//! }
//! example().unwrap();
//! ```
//!
//! # Nulls
//!
//! A null is a reserved in-band value per type (`i64::MIN`, `f64::MIN`,
//! `""`), not a wrapper. Real data equal to a sentinel cannot be stored;
//! this is an accepted precision trade-off of the storage format.
//!
//! # Environment variables
//!
//! - `STRATA_FMT_MAX_ROWS`: rows rendered before a table truncates.
//! - `STRATA_FMT_STR_LEN`: characters rendered per string cell.
//! - `STRATA_VERBOSE`: set to `1` for IO-layer diagnostics on stderr.
//! - `STRATA_PANIC_ON_ERR`: set to `1` to panic at error construction
//!   (backtrace debugging).
pub use strata_core::{column, config, datatypes, df, fmt, frame, hashing, with_match_variant};
pub use strata_io::{binary, csv};

pub mod prelude {
    pub use strata_core::prelude::*;
    pub use strata_io::prelude::*;
}
