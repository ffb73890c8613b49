//! Entity schema descriptors.
//!
//! An [`EntitySchema`] is everything the generic list-view workflow needs to
//! know about one managed record type: where it lives on the backend, which
//! field identifies a record, which field the search box filters on, the
//! form inputs, the table columns, and which write operations are wired.

use serde::Serialize;

use crate::table::Column;

/// HTML input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Date,
    TextArea,
}

impl InputKind {
    /// The `type` attribute for `<input>` elements. `TextArea` has none.
    pub fn html_type(self) -> Option<&'static str> {
        match self {
            InputKind::Text => Some("text"),
            InputKind::Email => Some("email"),
            InputKind::Date => Some("date"),
            InputKind::TextArea => None,
        }
    }
}

/// One labeled input of a create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Record attribute the input is bound to.
    pub name: &'static str,
    /// Placeholder / label text.
    pub label: &'static str,
    pub input: InputKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Text,
        }
    }

    pub const fn email(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Email,
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Date,
        }
    }

    pub const fn text_area(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::TextArea,
        }
    }
}

/// Write operations the backend exposes for an entity beyond list + create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Edit-save issues `PUT /api/{Entity}/{id}`. When `false`, Save only
    /// closes the form.
    pub update: bool,
    /// Rows carry a Delete action backed by `DELETE /api/{Entity}/{id}`.
    pub delete: bool,
}

/// Static description of one managed entity type.
#[derive(Debug, Serialize)]
pub struct EntitySchema {
    /// URL-safe page identifier, e.g. `institutions`.
    pub slug: &'static str,
    /// Page heading, e.g. `Institutions`.
    pub title: &'static str,
    /// Singular display name used in modal titles, e.g. `Institution`.
    pub singular: &'static str,
    /// Backend collection segment: `/api/{endpoint}`.
    pub endpoint: &'static str,
    /// Record attribute holding the backend identifier.
    pub id_field: &'static str,
    /// Record attribute the search box filters on.
    pub search_field: &'static str,
    /// Form inputs in display order.
    pub fields: &'static [FieldSpec],
    /// Table columns in display order.
    pub columns: &'static [Column],
    pub capabilities: Capabilities,
}

impl EntitySchema {
    /// Look up a form field by attribute name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is one of the form's bound attributes.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}
