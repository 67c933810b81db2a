//! CSV reading with bounded schema inference.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use memchr::memchr_iter;
use strata_core::config::verbose;
use strata_core::datatypes::DataType;
use strata_core::frame::DataFrame;
use strata_error::{strata_bail, strata_ensure, StrataResult};
use strata_utils::aliases::{InitHashMaps, StHashMap};

use super::buffer::CsvBuffer;
use super::tokenize_line;
use crate::SerReader;

/// Number of data lines scanned for type inference by default.
const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Read a [`DataFrame`] from CSV text.
///
/// The first line is the header. Column types are taken from the caller's
/// overrides where given, and inferred from a bounded prefix of the data
/// otherwise: a column stays an integer candidate until a non-empty sampled
/// field fails to parse as `i64`, then a float candidate, then a string.
pub struct CsvReader<R: Read> {
    reader: R,
    separator: u8,
    dtype_overrides: StHashMap<String, DataType>,
    infer_schema_length: usize,
}

impl<R: Read> CsvReader<R> {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Pin the type of specific columns, bypassing inference for them.
    /// Overrides naming a column absent from the header are rejected
    /// before any scanning.
    pub fn with_dtype_overrides(mut self, overrides: StHashMap<String, DataType>) -> Self {
        self.dtype_overrides = overrides;
        self
    }

    pub fn with_infer_schema_length(mut self, infer_schema_length: usize) -> Self {
        self.infer_schema_length = infer_schema_length;
        self
    }
}

impl<R: Read> SerReader<R> for CsvReader<R> {
    fn new(reader: R) -> Self {
        CsvReader {
            reader,
            separator: b',',
            dtype_overrides: StHashMap::new(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }

    fn finish(mut self) -> StrataResult<DataFrame> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        parse_csv(
            &text,
            &self.dtype_overrides,
            self.separator,
            self.infer_schema_length,
        )
    }
}

/// Parse CSV text with the given type overrides and separator.
pub fn read_csv_str(
    text: &str,
    dtype_overrides: &StHashMap<String, DataType>,
    separator: u8,
) -> StrataResult<DataFrame> {
    parse_csv(text, dtype_overrides, separator, DEFAULT_INFER_SCHEMA_LENGTH)
}

/// Read a CSV file from disk.
pub fn read_csv_path(
    path: impl AsRef<Path>,
    dtype_overrides: &StHashMap<String, DataType>,
    separator: u8,
) -> StrataResult<DataFrame> {
    let file = File::open(path.as_ref())?;
    if verbose() {
        eprintln!("[strata-io] reading csv from {}", path.as_ref().display());
    }
    CsvReader::new(file)
        .with_separator(separator)
        .with_dtype_overrides(dtype_overrides.clone())
        .finish()
}

/// Iterate the lines of `text`, yielding `(1-based line number, line)` with
/// blank lines skipped.
fn non_blank_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        if end >= start {
            lines.push(&text[start..end]);
            start = end + 1;
        }
    }
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_csv(
    text: &str,
    dtype_overrides: &StHashMap<String, DataType>,
    separator: u8,
    infer_schema_length: usize,
) -> StrataResult<DataFrame> {
    let mut lines = non_blank_lines(text);
    let Some((_, header)) = lines.next() else {
        strata_bail!(ComputeError: "missing header line in csv input");
    };
    let headers: Vec<String> = tokenize_line(header, separator)
        .into_iter()
        .map(|t| t.to_string())
        .collect();

    for name in dtype_overrides.keys() {
        strata_ensure!(
            headers.contains(name),
            ColumnNotFound:
            "dtype override names unknown column '{}'", name
        );
    }

    let dtypes = infer_dtypes(
        text,
        &headers,
        dtype_overrides,
        separator,
        infer_schema_length,
    );

    let mut buffers: Vec<CsvBuffer> = headers
        .iter()
        .map(|name| CsvBuffer::new(dtypes[name], 0))
        .collect();

    let mut height = 0;
    for (line_number, line) in lines {
        let tokens = tokenize_line(line, separator);
        strata_ensure!(
            tokens.len() == headers.len(),
            ComputeError:
            "malformed line {}: expected {} fields, got {}",
            line_number, headers.len(), tokens.len()
        );
        for (buffer, token) in buffers.iter_mut().zip(tokens) {
            buffer.push(token);
        }
        height += 1;
    }

    if verbose() {
        eprintln!(
            "[strata-io] parsed {} rows across {} csv columns",
            height,
            headers.len()
        );
    }

    DataFrame::new(
        headers,
        buffers.into_iter().map(|b| b.into_variant()).collect(),
    )
}

struct InferenceState {
    index: usize,
    as_int: bool,
    as_float: bool,
}

/// Scan up to `infer_schema_length` data lines and settle a type for every
/// column without an override. Empty fields carry no type information and
/// are skipped.
fn infer_dtypes(
    text: &str,
    headers: &[String],
    dtype_overrides: &StHashMap<String, DataType>,
    separator: u8,
    infer_schema_length: usize,
) -> StHashMap<String, DataType> {
    let mut dtypes = dtype_overrides.clone();

    let mut states: Vec<(&String, InferenceState)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !dtypes.contains_key(*name))
        .map(|(index, name)| {
            (
                name,
                InferenceState {
                    index,
                    as_int: true,
                    as_float: true,
                },
            )
        })
        .collect();

    for (_, line) in non_blank_lines(text).skip(1).take(infer_schema_length) {
        let tokens = tokenize_line(line, separator);
        for (_, state) in states.iter_mut() {
            if !state.as_int && !state.as_float {
                continue;
            }
            let Some(token) = tokens.get(state.index) else {
                continue;
            };
            if token.is_empty() {
                continue;
            }
            if state.as_int && token.parse::<i64>().is_err() {
                state.as_int = false;
            }
            if state.as_float && token.parse::<f64>().is_err() {
                state.as_float = false;
            }
        }
    }

    for (name, state) in states {
        let dtype = if state.as_int {
            DataType::Int64
        } else if state.as_float {
            DataType::Float64
        } else {
            DataType::String
        };
        dtypes.insert(name.clone(), dtype);
    }

    dtypes
}
