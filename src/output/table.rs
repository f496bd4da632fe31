//! Tabular rendering. Classifies the value by shape and never fails.

use super::cell::{format_cell, is_suppressed};
use super::value::{DisplayValue, Record};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// Printed instead of an empty table.
pub const NO_DATA: &str = "No data to display.";

/// Render any value as text.
pub fn render(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Null => NO_DATA.to_string(),
        DisplayValue::List(items) if items.is_empty() => NO_DATA.to_string(),
        DisplayValue::Map(entries) if entries.is_empty() => NO_DATA.to_string(),
        DisplayValue::List(items) => match items.first() {
            Some(DisplayValue::Record(first)) => render_collection(first, items),
            _ => items.iter().map(format_cell).collect::<Vec<_>>().join("\n"),
        },
        DisplayValue::Record(record) => render_record(record),
        DisplayValue::Map(entries) => render_map(entries),
        scalar => format_cell(scalar),
    }
}

/// One column per non-composite field of the first record, one row per element.
fn render_collection(first: &Record, items: &[DisplayValue]) -> String {
    let columns: Vec<_> = first
        .fields()
        .iter()
        .filter(|f| !f.value().is_composite())
        .collect();

    let mut table = new_table();
    table.set_header(columns.iter().map(|f| f.display_name()).collect::<Vec<_>>());
    for item in items {
        let row: Vec<String> = match item {
            DisplayValue::Record(record) => columns
                .iter()
                .map(|col| record.get(col.ident()).map(format_cell).unwrap_or_default())
                .collect(),
            other => {
                let mut cells = vec![String::new(); columns.len()];
                if let Some(first_cell) = cells.first_mut() {
                    *first_cell = format_cell(other);
                }
                cells
            }
        };
        table.add_row(row);
    }
    table.to_string()
}

/// Field/Value table, skipping fields that format to an empty or zero marker.
fn render_record(record: &Record) -> String {
    let mut table = new_table();
    table.set_header(vec!["FIELD", "VALUE"]);
    for field in record.fields() {
        let formatted = format_cell(field.value());
        if is_suppressed(&formatted) {
            continue;
        }
        table.add_row(vec![field.display_name(), formatted]);
    }
    table.to_string()
}

fn render_map(entries: &[(String, DisplayValue)]) -> String {
    let mut table = new_table();
    table.set_header(vec!["KEY", "VALUE"]);
    for (key, value) in entries {
        table.add_row(vec![key.clone(), format_cell(value)]);
    }
    table.to_string()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table
}
