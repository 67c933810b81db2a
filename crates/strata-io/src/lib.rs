//! IO for Strata tables: CSV text and the binary table format.
pub mod binary;
pub mod csv;
pub mod prelude;

use std::io::{Read, Write};

use strata_core::frame::DataFrame;
use strata_error::StrataResult;

/// Reader that deserializes a [`DataFrame`] from a byte source.
pub trait SerReader<R>
where
    R: Read,
    Self: Sized,
{
    /// Create a new reader with default options.
    fn new(reader: R) -> Self;

    /// Consume the reader and produce the table.
    fn finish(self) -> StrataResult<DataFrame>;
}

/// Writer that serializes a [`DataFrame`] to a byte sink.
pub trait SerWriter<W>
where
    W: Write,
{
    /// Create a new writer with default options.
    fn new(writer: W) -> Self;

    /// Write the whole table.
    fn finish(&mut self, df: &DataFrame) -> StrataResult<()>;
}
