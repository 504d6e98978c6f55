//! Cell rendering
//!
//! Turns one resource record into the cells of one row.

use super::schema::SheetKind;
use crate::resource::Record;
use serde_json::Value;
use std::borrow::Cow;

/// Separator used when a list value is flattened into one cell
pub const LIST_SEPARATOR: &str = ", ";

/// Value written into a single cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Convert a JSON value to a cell, `None` for null
pub fn cell_value(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(CellValue::Text(s.clone())),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        }),
        Value::Bool(b) => Some(CellValue::Bool(*b)),
        Value::Array(items) => Some(CellValue::Text(join_list(items))),
        Value::Object(_) => Some(CellValue::Text(value.to_string())),
    }
}

/// Join list elements with `", "`; strings are not quoted
pub fn join_list(items: &[Value]) -> String {
    items
        .iter()
        .map(scalar_text)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cells of one row as `(column, value)`, in column order.
///
/// Fields unknown to the schema are dropped; schema fields missing from the
/// record (or null) produce no cell.
pub fn render_row(kind: SheetKind, record: &Record) -> Vec<(u16, CellValue)> {
    let record = prepare_record(kind, record);

    let mut cells: Vec<(u16, CellValue)> = kind
        .columns()
        .iter()
        .filter_map(|column| {
            let value = record.get(column.field)?;
            cell_value(value).map(|cell| (column.index, cell))
        })
        .collect();
    cells.sort_by_key(|(index, _)| *index);
    cells
}

/// Flatten nested structures the generic row writer can't display
pub fn prepare_record(kind: SheetKind, record: &Record) -> Cow<'_, Record> {
    match kind {
        SheetKind::CascadedInitiatorGroups => rewrite_field(record, "host", host_id),
        SheetKind::PortGroups => rewrite_field(record, "symmetrixPortKey", port_key),
        _ => Cow::Borrowed(record),
    }
}

fn rewrite_field<'a>(
    record: &'a Record,
    field: &str,
    rewrite: fn(&Value) -> Value,
) -> Cow<'a, Record> {
    let Some(Value::Array(items)) = record.get(field) else {
        return Cow::Borrowed(record);
    };

    let mut owned = record.clone();
    owned.insert(
        field.to_string(),
        Value::Array(items.iter().map(rewrite).collect()),
    );
    Cow::Owned(owned)
}

/// `{"hostId": "H1", ...}` -> `"H1"`
fn host_id(item: &Value) -> Value {
    match item.get("hostId") {
        Some(id) => id.clone(),
        None => item.clone(),
    }
}

/// `{"directorId": "FA-1D", "portId": "4"}` -> `"FA-1D:4"`
fn port_key(item: &Value) -> Value {
    match item {
        Value::Object(map) => Value::String(
            map.values().map(scalar_text).collect::<Vec<_>>().join(":"),
        ),
        other => other.clone(),
    }
}
