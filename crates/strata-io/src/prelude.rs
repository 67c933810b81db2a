pub use crate::binary::{from_binary, from_bytes, to_binary, to_bytes};
pub use crate::csv::{read_csv_path, read_csv_str, write_csv_path, CsvReader, CsvWriter};
pub use crate::{SerReader, SerWriter};
