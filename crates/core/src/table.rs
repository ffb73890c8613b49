//! Generic table renderer.
//!
//! Given ordered [`Column`] descriptors and ordered rows, produces a
//! [`RenderedTable`] with one row per record and cells pulled by accessor
//! key. An optional action renderer receives each row record and returns the
//! controls for that row; the renderer knows nothing about any entity.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::record::{field_text, Record};

/// Display format applied to a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    Text,
    Date,
}

/// A table column: display header plus accessor key into the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: &'static str,
    pub accessor: &'static str,
    pub format: CellFormat,
}

impl Column {
    pub const fn text(header: &'static str, accessor: &'static str) -> Self {
        Self {
            header,
            accessor,
            format: CellFormat::Text,
        }
    }

    pub const fn date(header: &'static str, accessor: &'static str) -> Self {
        Self {
            header,
            accessor,
            format: CellFormat::Date,
        }
    }

    /// Render this column's cell for `record`.
    pub fn cell(&self, record: &Record) -> String {
        let raw = field_text(record, self.accessor);
        match self.format {
            CellFormat::Text => raw,
            CellFormat::Date => format_date(&raw).unwrap_or(raw),
        }
    }
}

/// A control rendered in a row's action cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RowAction {
    Edit { id: String },
    Delete { id: String },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit { .. } => "Edit",
            RowAction::Delete { .. } => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<String>,
    /// Whether an action renderer was supplied (adds an `Actions` column).
    pub has_actions: bool,
    pub rows: Vec<RenderedRow>,
}

/// Render `rows` under `columns`.
///
/// Rows are emitted in input order. When `actions` is `None` every row has
/// an empty action list and `has_actions` is `false`.
pub fn render<'a, I, F>(columns: &[Column], rows: I, actions: Option<F>) -> RenderedTable
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> Vec<RowAction>,
{
    let rows = rows
        .into_iter()
        .map(|record| RenderedRow {
            cells: columns.iter().map(|c| c.cell(record)).collect(),
            actions: actions.as_ref().map(|f| f(record)).unwrap_or_default(),
        })
        .collect();

    RenderedTable {
        headers: columns.iter().map(|c| c.header.to_string()).collect(),
        has_actions: actions.is_some(),
        rows,
    }
}

/// Format an ISO date (optionally with a time part) as `M/D/YYYY`.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC 3339. Returns
/// `None` for anything else, including the empty string.
pub fn format_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })?;
    Some(date.format("%-m/%-d/%Y").to_string())
}
