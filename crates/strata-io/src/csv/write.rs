//! CSV writing. Sentinel nulls serialize as empty fields; floats are
//! written in their shortest exact round-trip form.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memchr::memchr3;
use strata_core::column::ColumnVariant;
use strata_core::config::verbose;
use strata_core::datatypes::Storable;
use strata_core::frame::DataFrame;
use strata_error::StrataResult;

use crate::SerWriter;

pub struct CsvWriter<W: Write> {
    writer: W,
    separator: u8,
}

impl<W: Write> CsvWriter<W> {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    fn write_str_field(&mut self, value: &str) -> std::io::Result<()> {
        let needs_quoting =
            memchr3(self.separator, b'"', b'\n', value.as_bytes()).is_some();
        if needs_quoting {
            let escaped = value.replace('"', "\"\"");
            write!(self.writer, "\"{escaped}\"")
        } else {
            self.writer.write_all(value.as_bytes())
        }
    }

    fn write_field(&mut self, column: &ColumnVariant, index: usize) -> StrataResult<()> {
        match column {
            ColumnVariant::Int64(c) => {
                let v = c.get(index)?;
                if !v.is_null() {
                    let mut buffer = itoa::Buffer::new();
                    self.writer.write_all(buffer.format(*v).as_bytes())?;
                }
            },
            ColumnVariant::Float64(c) => {
                let v = c.get(index)?;
                if !v.is_null() {
                    let mut buffer = ryu::Buffer::new();
                    self.writer.write_all(buffer.format(*v).as_bytes())?;
                }
            },
            ColumnVariant::String(c) => {
                let v = c.get(index)?;
                if !v.is_null() {
                    self.write_str_field(v)?;
                }
            },
        }
        Ok(())
    }
}

impl<W: Write> SerWriter<W> for CsvWriter<W> {
    fn new(writer: W) -> Self {
        CsvWriter {
            writer,
            separator: b',',
        }
    }

    fn finish(&mut self, df: &DataFrame) -> StrataResult<()> {
        let names = df.column_names();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(&[self.separator])?;
            }
            self.write_str_field(name)?;
        }
        self.writer.write_all(b"\n")?;

        let columns: Vec<&ColumnVariant> = names
            .iter()
            .map(|name| df.column_variant(name).expect("canonical column name"))
            .collect();
        for row in 0..df.height() {
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    self.writer.write_all(&[self.separator])?;
                }
                self.write_field(column, row)?;
            }
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Write `df` as CSV to a file.
pub fn write_csv_path(
    df: &DataFrame,
    path: impl AsRef<Path>,
    separator: u8,
) -> StrataResult<()> {
    if verbose() {
        eprintln!("[strata-io] writing csv to {}", path.as_ref().display());
    }
    let file = File::create(path.as_ref())?;
    CsvWriter::new(BufWriter::new(file))
        .with_separator(separator)
        .finish(df)
}

#[cfg(test)]
mod test {
    use strata_core::df;
    use strata_utils::aliases::{InitHashMaps, StHashMap};

    use super::super::read::read_csv_str;
    use super::*;
    use crate::SerWriter;

    fn to_csv_string(df: &DataFrame) -> String {
        let mut out = Vec::new();
        CsvWriter::new(&mut out).finish(df).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_nulls_serialize_as_empty_fields() {
        let df = df!(
            "a" => [Some(1i64), None],
            "b" => [Some("x"), None]
        )
        .unwrap();
        assert_eq!(to_csv_string(&df), "a,b\n1,x\n,\n");
    }

    #[test]
    fn test_quoting_when_needed() {
        let df = df!("s" => ["plain", "with,comma", "with\"quote"]).unwrap();
        assert_eq!(
            to_csv_string(&df),
            "s\nplain\n\"with,comma\"\n\"with\"\"quote\"\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let df = df!(
            "id" => [1i64, 2, 3],
            "score" => [Some(0.1f64), None, Some(1.0 / 3.0)],
            "name" => [Some("ada"), Some("semi;colon"), None]
        )
        .unwrap();

        let text = to_csv_string(&df);
        let back = read_csv_str(&text, &StHashMap::new(), b',').unwrap();
        assert_eq!(back, df);
    }

    #[test]
    fn test_custom_separator_round_trip() {
        let df = df!("a" => [1i64, 2], "b" => ["x;y", "z"]).unwrap();
        let mut out = Vec::new();
        CsvWriter::new(&mut out)
            .with_separator(b';')
            .finish(&df)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let back = read_csv_str(&text, &StHashMap::new(), b';').unwrap();
        assert_eq!(back, df);
    }
}
