//! Console rendering. Pure functions over a snapshot of the table plus the
//! environment-driven format configuration; the engine itself never prints.
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use crate::config;
use crate::frame::DataFrame;

fn render_cell(df: &DataFrame, name: &str, index: usize, max_str_len: usize) -> String {
    let value = df
        .column_variant(name)
        .expect("column in canonical order")
        .get_any(index)
        .expect("row index within height");
    let mut out = value.to_string();
    if value.dtype() == crate::datatypes::DataType::String && out.chars().count() > max_str_len {
        out = out.chars().take(max_str_len).collect();
        out.push('…');
    }
    out
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn fmt_frame(df: &DataFrame, f: &mut Formatter<'_>) -> FmtResult {
    let max_rows = config::fmt_max_rows();
    let max_str_len = config::fmt_str_len();

    let mut table = new_table();
    table.set_header(
        df.iter_columns()
            .map(|(name, col)| format!("{name}\n---\n{}", col.dtype()))
            .collect::<Vec<_>>(),
    );

    let shown = df.height().min(max_rows);
    for i in 0..shown {
        table.add_row(
            df.column_names()
                .iter()
                .map(|name| render_cell(df, name, i, max_str_len))
                .collect::<Vec<_>>(),
        );
    }
    if shown < df.height() {
        table.add_row(df.column_names().iter().map(|_| "…").collect::<Vec<_>>());
    }

    writeln!(f, "shape: {:?}", df.shape())?;
    write!(f, "{table}")
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        fmt_frame(self, f)
    }
}

impl Debug for DataFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        fmt_frame(self, f)
    }
}

impl DataFrame {
    /// One line per column: position, name, null count and type, plus the
    /// shape and an estimated memory footprint.
    pub fn info(&self) -> String {
        let mut table = new_table();
        table.set_header(vec!["#", "column", "nulls", "dtype"]);
        for (i, (name, col)) in self.iter_columns().enumerate() {
            table.add_row(vec![
                i.to_string(),
                name.to_string(),
                col.null_count().to_string(),
                col.dtype().to_string(),
            ]);
        }

        format!(
            "shape: {:?}\n{table}\nestimated size: {} bytes\n",
            self.shape(),
            self.estimated_size(),
        )
    }
}
