//! The binary table format.
//!
//! Layout, all integers little-endian:
//! 1. row count (`u64`), column count (`u64`)
//! 2. per column: name length (`u32`) + UTF-8 name bytes
//! 3. per column, same order: type tag (`u8`; 0 = i64, 1 = f64, 2 = str)
//!    followed by the column payload (see the column codec).
//!
//! Appending columns at the end keeps earlier readers' offsets valid; the
//! format is append-only.
use std::fs;
use std::path::Path;

use strata_core::column::{Column, ColumnVariant};
use strata_core::config::verbose;
use strata_core::frame::DataFrame;
use strata_error::{strata_bail, strata_ensure, StrataResult};

const TAG_INT64: u8 = 0;
const TAG_FLOAT64: u8 = 1;
const TAG_STRING: u8 = 2;

fn type_tag(column: &ColumnVariant) -> u8 {
    match column {
        ColumnVariant::Int64(_) => TAG_INT64,
        ColumnVariant::Float64(_) => TAG_FLOAT64,
        ColumnVariant::String(_) => TAG_STRING,
    }
}

/// Serialize a whole table.
pub fn to_bytes(df: &DataFrame) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(df.height() as u64).to_le_bytes());
    out.extend_from_slice(&(df.width() as u64).to_le_bytes());

    for name in df.column_names() {
        out.extend_from_slice(&(name.len() as u32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
    }

    for (_, column) in df.iter_columns() {
        out.push(type_tag(column));
        let payload = match column {
            ColumnVariant::Int64(c) => c.to_bytes(),
            ColumnVariant::Float64(c) => c.to_bytes(),
            ColumnVariant::String(c) => c.to_bytes(),
        };
        out.extend_from_slice(&payload);
    }

    out
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize, what: &str) -> StrataResult<&'a [u8]> {
        let Some(slice) = self.bytes.get(self.offset..self.offset + n) else {
            strata_bail!(ComputeError: "truncated data: cannot read {}", what);
        };
        self.offset += n;
        Ok(slice)
    }

    fn take_u64(&mut self, what: &str) -> StrataResult<u64> {
        Ok(u64::from_le_bytes(self.take(8, what)?.try_into().unwrap()))
    }

    fn take_u32(&mut self, what: &str) -> StrataResult<u32> {
        Ok(u32::from_le_bytes(self.take(4, what)?.try_into().unwrap()))
    }

    fn take_u8(&mut self, what: &str) -> StrataResult<u8> {
        Ok(self.take(1, what)?[0])
    }
}

fn numeric_payload_len(rows: usize, width: usize) -> StrataResult<usize> {
    match rows.checked_mul(width) {
        Some(len) => Ok(len),
        None => strata_bail!(ComputeError: "row count {} overflows the payload size", rows),
    }
}

/// The byte length of a string column payload holding `rows` records,
/// starting at the cursor. The cursor itself is not advanced.
fn string_payload_len(cursor: &Cursor<'_>, rows: usize) -> StrataResult<usize> {
    let mut probe = Cursor {
        bytes: cursor.bytes,
        offset: cursor.offset,
    };
    for _ in 0..rows {
        let len = probe.take_u32("string length")? as usize;
        probe.take(len, "string data")?;
    }
    Ok(probe.offset - cursor.offset)
}

/// Deserialize a whole table. Truncated or malformed input fails with an
/// error naming the boundary that could not be read.
pub fn from_bytes(bytes: &[u8]) -> StrataResult<DataFrame> {
    let mut cursor = Cursor { bytes, offset: 0 };

    let rows = cursor.take_u64("row count")? as usize;
    let cols = cursor.take_u64("column count")? as usize;

    let mut names = Vec::with_capacity(cols);
    for _ in 0..cols {
        let len = cursor.take_u32("column name length")? as usize;
        let name_bytes = cursor.take(len, "column name")?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| {
                strata_error::strata_err!(ComputeError: "column name is not valid utf-8")
            })?
            .to_string();
        names.push(name);
    }

    let mut columns = Vec::with_capacity(cols);
    for _ in 0..cols {
        let tag = cursor.take_u8("column type tag")?;
        let column = match tag {
            TAG_INT64 if rows == 0 => ColumnVariant::Int64(Column::new()),
            TAG_FLOAT64 if rows == 0 => ColumnVariant::Float64(Column::new()),
            TAG_STRING if rows == 0 => ColumnVariant::String(Column::new()),
            TAG_INT64 => {
                let len = numeric_payload_len(rows, size_of::<i64>())?;
                let payload = cursor.take(len, "column data")?;
                ColumnVariant::Int64(Column::<i64>::from_bytes(payload)?)
            },
            TAG_FLOAT64 => {
                let len = numeric_payload_len(rows, size_of::<f64>())?;
                let payload = cursor.take(len, "column data")?;
                ColumnVariant::Float64(Column::<f64>::from_bytes(payload)?)
            },
            TAG_STRING => {
                let len = string_payload_len(&cursor, rows)?;
                let payload = cursor.take(len, "column data")?;
                ColumnVariant::String(Column::<String>::from_bytes(payload)?)
            },
            unknown => {
                strata_bail!(ComputeError: "unknown column type tag {}", unknown)
            },
        };
        strata_ensure!(
            column.len() == rows,
            ShapeMismatch:
            "column holds {} rows, header says {}", column.len(), rows
        );
        columns.push(column);
    }

    DataFrame::new(names, columns)
}

/// Write a table to a binary file.
pub fn to_binary(df: &DataFrame, path: impl AsRef<Path>) -> StrataResult<()> {
    if verbose() {
        eprintln!("[strata-io] writing binary table to {}", path.as_ref().display());
    }
    fs::write(path, to_bytes(df))?;
    Ok(())
}

/// Read a table from a binary file.
pub fn from_binary(path: impl AsRef<Path>) -> StrataResult<DataFrame> {
    if verbose() {
        eprintln!("[strata-io] reading binary table from {}", path.as_ref().display());
    }
    let bytes = fs::read(path)?;
    from_bytes(&bytes)
}

#[cfg(test)]
mod test {
    use strata_core::df;
    use strata_error::StrataError;

    use super::*;

    fn sample() -> DataFrame {
        df!(
            "id" => [Some(1i64), None, Some(3)],
            "score" => [Some(1.5f64), Some(2.5), None],
            "name" => [Some("ada"), None, Some("grace")]
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let df = sample();
        let back = from_bytes(&to_bytes(&df)).unwrap();
        assert_eq!(back, df);
        assert_eq!(back.column::<i64>("id").unwrap().null_count(), 1);
    }

    #[test]
    fn test_round_trip_empty_frames() {
        let df = DataFrame::empty();
        assert_eq!(from_bytes(&to_bytes(&df)).unwrap(), df);

        // Columns but no rows.
        let df = df!("a" => Vec::<i64>::new(), "b" => Vec::<String>::new()).unwrap();
        let back = from_bytes(&to_bytes(&df)).unwrap();
        assert_eq!(back, df);
        assert_eq!(back.shape(), (0, 2));
    }

    #[test]
    fn test_truncation_at_every_boundary() {
        let bytes = to_bytes(&sample());

        // Header.
        assert!(matches!(
            from_bytes(&bytes[..4]),
            Err(StrataError::ComputeError(_))
        ));
        assert!(matches!(
            from_bytes(&bytes[..12]),
            Err(StrataError::ComputeError(_))
        ));
        // Name length prefix.
        assert!(matches!(
            from_bytes(&bytes[..18]),
            Err(StrataError::ComputeError(_))
        ));
        // Somewhere inside the column payloads.
        assert!(matches!(
            from_bytes(&bytes[..bytes.len() - 1]),
            Err(StrataError::ComputeError(_))
        ));
    }

    #[test]
    fn test_unknown_tag_fails() {
        let df = df!("a" => [1i64]).unwrap();
        let mut bytes = to_bytes(&df);
        // The tag byte sits right after the header and the single name.
        let tag_offset = 8 + 8 + 4 + 1;
        bytes[tag_offset] = 9;
        let err = from_bytes(&bytes).unwrap_err();
        let StrataError::ComputeError(msg) = err else {
            panic!("expected ComputeError, got {err:?}");
        };
        assert!(msg.contains("unknown column type tag"));
    }

    #[test]
    fn test_file_round_trip() {
        let df = sample();
        let path = std::env::temp_dir().join("strata_binary_roundtrip.bin");
        to_binary(&df, &path).unwrap();
        let back = from_binary(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, df);
    }

    #[test]
    fn test_stress_round_trip() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let ints: Vec<Option<i64>> = (0..100_000)
            .map(|_| rng.gen_bool(0.95).then(|| rng.gen()))
            .collect();
        let floats: Vec<Option<f64>> = (0..100_000)
            .map(|_| rng.gen_bool(0.95).then(|| rng.gen::<f64>()))
            .collect();
        let strings: Vec<String> = (0..100_000)
            .map(|_| {
                if rng.gen_bool(0.1) {
                    String::new()
                } else {
                    format!("value-{}", rng.gen::<u32>())
                }
            })
            .collect();

        let df = df!("i" => ints, "f" => floats, "s" => strings).unwrap();
        let back = from_bytes(&to_bytes(&df)).unwrap();
        assert_eq!(back, df);
    }
}
