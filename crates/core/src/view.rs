//! Serializable snapshots of a list page.

use serde::Serialize;

use crate::entity::{Capabilities, EntitySchema, InputKind};
use crate::modal::{FormModal, Modal};
use crate::record::{record_id, Record};
use crate::search;
use crate::table::{self, RenderedTable, RowAction};

/// Catalog entry for one entity page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub endpoint: &'static str,
    pub search_field: &'static str,
    pub capabilities: Capabilities,
}

impl From<&EntitySchema> for PageSummary {
    fn from(schema: &EntitySchema) -> Self {
        Self {
            slug: schema.slug,
            title: schema.title,
            endpoint: schema.endpoint,
            search_field: schema.search_field,
            capabilities: schema.capabilities,
        }
    }
}

/// One bound input of the form, with its current draft value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub open: bool,
    pub mode: Option<FormMode>,
    pub title: Option<String>,
    pub submit_label: Option<&'static str>,
    /// Identifier of the record being edited, when known.
    pub target_id: Option<String>,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub fn build(schema: &EntitySchema, form: &FormModal) -> Self {
        let (mode, target_id) = match form.modal() {
            Modal::Closed => (None, None),
            Modal::Create => (Some(FormMode::Create), None),
            Modal::Edit { target } => (Some(FormMode::Edit), record_id(target, schema.id_field)),
        };

        let fields = schema
            .fields
            .iter()
            .map(|f| FieldView {
                name: f.name,
                label: f.label,
                input: f.input,
                value: form.draft().get(f.name).unwrap_or_default().to_string(),
            })
            .collect();

        Self {
            open: form.is_open(),
            mode,
            title: form.title(),
            submit_label: form.submit_label(),
            target_id,
            fields,
        }
    }
}

/// Everything needed to draw one list page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub entity: &'static str,
    pub title: &'static str,
    pub query: String,
    /// Records held before filtering.
    pub total: usize,
    /// Records shown after filtering.
    pub visible: usize,
    pub table: RenderedTable,
    pub form: FormView,
}

impl PageView {
    pub fn build(
        schema: &EntitySchema,
        records: &[Record],
        query: &str,
        form: &FormModal,
    ) -> Self {
        let shown = search::filter(records, schema.search_field, query);
        let table = table::render(
            schema.columns,
            shown.iter().copied(),
            Some(|r: &Record| row_actions(schema, r)),
        );

        Self {
            entity: schema.slug,
            title: schema.title,
            query: query.to_string(),
            total: records.len(),
            visible: shown.len(),
            table,
            form: FormView::build(schema, form),
        }
    }
}

/// Row controls: Edit for every identifiable record, plus Delete where the
/// entity supports it.
pub fn row_actions(schema: &EntitySchema, record: &Record) -> Vec<RowAction> {
    let Some(id) = record_id(record, schema.id_field) else {
        return Vec::new();
    };
    let mut actions = vec![RowAction::Edit { id: id.clone() }];
    if schema.capabilities.delete {
        actions.push(RowAction::Delete { id });
    }
    actions
}
