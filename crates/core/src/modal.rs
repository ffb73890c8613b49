//! Create/edit form modal state machine.
//!
//! The modal is either closed or open in one of two modes. Opening always
//! installs a fresh draft (blank for create, copied from the record for
//! edit); closing always resets the draft. There is no intermediate
//! "submitting" or "error" state.

use serde::Serialize;

use crate::draft::Draft;
use crate::entity::EntitySchema;
use crate::error::CoreError;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Modal {
    Closed,
    Create,
    /// Editing a copy of `target`, the record as it was when the form opened.
    Edit { target: Record },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

/// A modal together with the draft it edits.
#[derive(Debug, Clone)]
pub struct FormModal {
    schema: &'static EntitySchema,
    modal: Modal,
    draft: Draft,
}

impl FormModal {
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            modal: Modal::Closed,
            draft: Draft::empty(schema),
        }
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Open the create form with a blank draft, whatever the previous draft held.
    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
        self.draft = Draft::empty(self.schema);
    }

    /// Open the edit form with a draft copied from `record`.
    pub fn open_edit(&mut self, record: &Record) {
        self.draft = Draft::from_record(self.schema, record);
        self.modal = Modal::Edit {
            target: record.clone(),
        };
    }

    /// Apply one input event to the draft.
    pub fn input(&mut self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        if !self.is_open() {
            return Err(CoreError::Conflict(format!(
                "No {} form is open",
                self.schema.singular
            )));
        }
        self.draft.set(field, value)
    }

    /// Close the modal and reset the draft. Used by Cancel, dismiss, and a
    /// successful Add/Save.
    pub fn close(&mut self) {
        self.modal = Modal::Closed;
        self.draft = Draft::empty(self.schema);
    }

    /// Modal heading, e.g. `Add Institution` / `Edit Institution`.
    pub fn title(&self) -> Option<String> {
        match self.modal {
            Modal::Closed => None,
            Modal::Create => Some(format!("Add {}", self.schema.singular)),
            Modal::Edit { .. } => Some(format!("Edit {}", self.schema.singular)),
        }
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self.modal {
            Modal::Closed => None,
            Modal::Create => Some("Add"),
            Modal::Edit { .. } => Some("Save"),
        }
    }
}
