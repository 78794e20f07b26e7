use serde_json::Value;

use super::{Field, SCHEMA};

/// One form submission's cell values, in column order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Build a row from the raw JSON cells the workbook API returns.
    pub fn from_cells(cells: &[Value]) -> Self {
        Self {
            cells: cells.iter().map(cell_text).collect(),
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Strings pass through untouched, `null` becomes empty, anything else uses its JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A row zipped with the header schema.
///
/// Cells past the end of the schema are dropped and counted in
/// [`FieldMapping::ignored`]; columns the row does not reach read as empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMapping {
    values: Vec<String>,
    ignored: usize,
}

impl FieldMapping {
    pub fn from_row(row: &Row) -> Self {
        let mut values: Vec<String> = row.cells().iter().take(SCHEMA.len()).cloned().collect();
        values.resize(SCHEMA.len(), String::new());
        Self {
            values,
            ignored: row.len().saturating_sub(SCHEMA.len()),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Number of trailing cells beyond the schema that were dropped.
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        SCHEMA.iter().map(move |f| (*f, self.get(*f)))
    }
}
