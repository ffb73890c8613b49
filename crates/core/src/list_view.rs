//! Generic entity list-view workflow.
//!
//! A [`ListView`] exclusively owns one page's state: the collection as last
//! fetched, the search query, and the form modal with its draft. Every
//! backend call goes through the shared [`EntityGateway`]; the state lock is
//! never held across a gateway call.
//!
//! Collection reads are fenced: each read takes the next value of a
//! per-page sequence counter, and a response is applied only when its
//! sequence number is newer than the last one applied. A slow, older read
//! can therefore never overwrite the result of a newer one.
//!
//! Backend failures are logged and swallowed. The page never enters an
//! error state: a failed read leaves the previous collection in place, and
//! a failed submit leaves the form open with the draft as entered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::entity::EntitySchema;
use crate::error::CoreError;
use crate::gateway::EntityGateway;
use crate::modal::{FormModal, Modal};
use crate::record::{record_id, Record};
use crate::view::PageView;

/// What happened to a collection read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The response replaced the held collection.
    Applied,
    /// A newer read had already been applied; the response was discarded.
    Stale,
    /// The read failed; the held collection is unchanged.
    Failed,
}

/// What happened when the form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Created,
    Updated,
    /// Save on an entity without an update endpoint: the form closed and
    /// nothing was sent.
    Discarded,
    /// The backend call failed; the form is still open with its draft.
    Failed,
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Failed,
}

#[derive(Debug)]
struct PageState {
    records: Vec<Record>,
    query: String,
    form: FormModal,
    /// Sequence number of the read whose result `records` holds (0 = none).
    applied_seq: u64,
}

/// Pending write captured from the form before the lock is released.
enum Submission {
    Create(Record),
    Update { id: String, body: Record },
    Discard,
}

pub struct ListView {
    schema: &'static EntitySchema,
    gateway: Arc<dyn EntityGateway>,
    state: RwLock<PageState>,
    next_seq: AtomicU64,
}

impl ListView {
    pub fn new(schema: &'static EntitySchema, gateway: Arc<dyn EntityGateway>) -> Self {
        Self {
            schema,
            gateway,
            state: RwLock::new(PageState {
                records: Vec::new(),
                query: String::new(),
                form: FormModal::new(schema),
                applied_seq: 0,
            }),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Enter the page: clear the query, close any open form, and read the
    /// collection.
    pub async fn mount(&self) -> FetchOutcome {
        {
            let mut state = self.state.write().await;
            state.query.clear();
            state.form.close();
        }
        self.refresh().await
    }

    /// Re-read the full collection from the backend.
    pub async fn refresh(&self) -> FetchOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let entity = self.schema.slug;
        tracing::debug!(entity, seq, "Fetching collection");

        let result = self.gateway.list(self.schema.endpoint).await;

        let mut state = self.state.write().await;
        match result {
            Ok(records) if seq > state.applied_seq => {
                tracing::debug!(entity, seq, count = records.len(), "Applied collection");
                state.records = records;
                state.applied_seq = seq;
                FetchOutcome::Applied
            }
            Ok(_) => {
                tracing::debug!(
                    entity,
                    seq,
                    applied_seq = state.applied_seq,
                    "Discarded stale collection response"
                );
                FetchOutcome::Stale
            }
            Err(e) => {
                tracing::error!(entity, seq, error = %e, "Error fetching collection");
                FetchOutcome::Failed
            }
        }
    }

    /// Replace the search query. Takes effect on the next [`view`](Self::view).
    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    /// Open the create form with a blank draft.
    pub async fn open_create(&self) {
        self.state.write().await.form.open_create();
    }

    /// Open the edit form for the held record with identifier `id`.
    pub async fn open_edit(&self, id: &str) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        let record = self.held_record(&state, id)?.clone();
        state.form.open_edit(&record);
        Ok(())
    }

    /// Apply one input event to the open form's draft.
    pub async fn input(&self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        self.state.write().await.form.input(field, value)
    }

    /// Cancel or dismiss the form, discarding the draft.
    pub async fn cancel(&self) {
        self.state.write().await.form.close();
    }

    /// Submit the open form (Add or Save).
    ///
    /// On success the form closes, the draft resets, and the collection is
    /// re-read. On failure the form and draft are left as they were.
    pub async fn submit(&self) -> Result<SubmitOutcome, CoreError> {
        let submission = {
            let mut state = self.state.write().await;
            let submission = match state.form.modal() {
                Modal::Closed => {
                    return Err(CoreError::Conflict(format!(
                        "No {} form is open",
                        self.schema.singular
                    )))
                }
                Modal::Create => Submission::Create(state.form.draft().to_record()),
                Modal::Edit { target } => {
                    match (
                        self.schema.capabilities.update,
                        record_id(target, self.schema.id_field),
                    ) {
                        (true, Some(id)) => Submission::Update {
                            id,
                            body: state.form.draft().merge_into(target),
                        },
                        _ => Submission::Discard,
                    }
                }
            };
            if matches!(submission, Submission::Discard) {
                state.form.close();
            }
            submission
        };

        let entity = self.schema.slug;
        let (result, outcome) = match submission {
            Submission::Discard => {
                tracing::debug!(entity, "Closed edit form without saving");
                return Ok(SubmitOutcome::Discarded);
            }
            Submission::Create(body) => (
                self.gateway.create(self.schema.endpoint, &body).await,
                SubmitOutcome::Created,
            ),
            Submission::Update { id, body } => (
                self.gateway.update(self.schema.endpoint, &id, &body).await,
                SubmitOutcome::Updated,
            ),
        };

        match result {
            Ok(()) => {
                tracing::info!(entity, ?outcome, "Saved record");
                self.state.write().await.form.close();
                self.refresh().await;
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(entity, error = %e, "Error saving record");
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Delete the held record with identifier `id`, then re-read the
    /// collection. Ids not in the held collection are never sent.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, CoreError> {
        if !self.schema.capabilities.delete {
            return Err(CoreError::Unsupported(format!(
                "{} records cannot be deleted",
                self.schema.singular
            )));
        }
        self.held_record(&*self.state.read().await, id)?;

        let entity = self.schema.slug;
        match self.gateway.delete(self.schema.endpoint, id).await {
            Ok(()) => {
                tracing::info!(entity, id, "Deleted record");
                self.refresh().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                tracing::error!(entity, id, error = %e, "Error deleting record");
                Ok(DeleteOutcome::Failed)
            }
        }
    }

    /// Snapshot of the page as it should be drawn now.
    pub async fn view(&self) -> PageView {
        let state = self.state.read().await;
        PageView::build(self.schema, &state.records, &state.query, &state.form)
    }

    fn held_record<'s>(&self, state: &'s PageState, id: &str) -> Result<&'s Record, CoreError> {
        state
            .records
            .iter()
            .find(|r| record_id(r, self.schema.id_field).as_deref() == Some(id))
            .ok_or_else(|| CoreError::NotFound {
                entity: self.schema.singular,
                id: id.to_string(),
            })
    }

    /// The held collection, unfiltered.
    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::oneshot;

    use super::*;
    use crate::catalog::{INSTITUTIONS, PARTICIPANTS, PROJECTS};
    use crate::gateway::GatewayError;
    use crate::record::field_text;

    /// A list call that reports when it has started and waits for release.
    struct Hold {
        entered: oneshot::Sender<()>,
        release: oneshot::Receiver<()>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(Record),
        Update(String, Record),
        Delete(String),
    }

    #[derive(Default)]
    struct FakeGateway {
        records: Mutex<Vec<Record>>,
        calls: Mutex<Vec<Call>>,
        fail: AtomicBool,
        holds: Mutex<VecDeque<Hold>>,
    }

    impl FakeGateway {
        fn with_records(values: Vec<Value>) -> Arc<Self> {
            let gw = Self::default();
            *gw.records.lock().unwrap() = records(values);
            Arc::new(gw)
        }

        fn set_records(&self, values: Vec<Value>) {
            *self.records.lock().unwrap() = records(values);
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn hold_next_list(&self, entered: oneshot::Sender<()>, release: oneshot::Receiver<()>) {
            self.holds
                .lock()
                .unwrap()
                .push_back(Hold { entered, release });
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn writes(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| *c != Call::List)
                .collect()
        }

        fn check(&self) -> Result<(), GatewayError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(GatewayError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl EntityGateway for FakeGateway {
        async fn list(&self, _endpoint: &str) -> Result<Vec<Record>, GatewayError> {
            self.calls.lock().unwrap().push(Call::List);
            let snapshot = self.records.lock().unwrap().clone();
            let hold = self.holds.lock().unwrap().pop_front();
            if let Some(hold) = hold {
                let _ = hold.entered.send(());
                let _ = hold.release.await;
            }
            self.check()?;
            Ok(snapshot)
        }

        async fn create(&self, _endpoint: &str, record: &Record) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push(Call::Create(record.clone()));
            self.check()?;
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn update(
            &self,
            _endpoint: &str,
            id: &str,
            record: &Record,
        ) -> Result<(), GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(id.to_string(), record.clone()));
            self.check()
        }

        async fn delete(&self, _endpoint: &str, id: &str) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            self.check()?;
            self.records
                .lock()
                .unwrap()
                .retain(|r| field_text(r, "institutionID") != id);
            Ok(())
        }
    }

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(m) => m,
                _ => panic!("test record must be an object"),
            })
            .collect()
    }

    fn institutions() -> Vec<Value> {
        vec![
            json!({"institutionID": 1, "institutionName": "Alpha Academy"}),
            json!({"institutionID": 2, "institutionName": "beta college"}),
        ]
    }

    fn names(view: &PageView) -> Vec<String> {
        view.table.rows.iter().map(|r| r.cells[1].clone()).collect()
    }

    // -- fetching ------------------------------------------------------------

    #[tokio::test]
    async fn mount_fetches_in_backend_order() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());

        assert_eq!(page.mount().await, FetchOutcome::Applied);

        let view = page.view().await;
        assert_eq!(names(&view), vec!["Alpha Academy", "beta college"]);
        assert_eq!(gw.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn mount_resets_query_and_form() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);
        page.set_query("zzz").await;
        page.open_create().await;

        page.mount().await;

        let view = page.view().await;
        assert_eq!(view.query, "");
        assert!(!view.form.open);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_collection() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.refresh().await;

        gw.set_records(vec![]);
        gw.set_failing(true);

        assert_eq!(page.refresh().await, FetchOutcome::Failed);
        assert_eq!(page.records().await.len(), 2);
    }

    #[tokio::test]
    async fn failed_first_fetch_leaves_list_empty() {
        let gw = FakeGateway::with_records(institutions());
        gw.set_failing(true);
        let page = ListView::new(&INSTITUTIONS, gw);

        assert_eq!(page.mount().await, FetchOutcome::Failed);
        assert_eq!(page.view().await.total, 0);
    }

    #[tokio::test]
    async fn older_response_never_overwrites_newer_one() {
        let gw = FakeGateway::with_records(vec![json!({"institutionID": 1, "institutionName": "Old"})]);
        let page = Arc::new(ListView::new(&INSTITUTIONS, gw.clone()));

        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        gw.hold_next_list(entered_tx, release_rx);

        let slow = tokio::spawn({
            let page = Arc::clone(&page);
            async move { page.refresh().await }
        });
        entered_rx.await.unwrap();

        gw.set_records(vec![json!({"institutionID": 1, "institutionName": "New"})]);
        assert_eq!(page.refresh().await, FetchOutcome::Applied);

        release_tx.send(()).unwrap();
        assert_eq!(slow.await.unwrap(), FetchOutcome::Stale);

        assert_eq!(names(&page.view().await), vec!["New"]);
    }

    // -- search --------------------------------------------------------------

    #[tokio::test]
    async fn query_filters_the_view_not_the_collection() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);
        page.mount().await;

        page.set_query("BETA").await;

        let view = page.view().await;
        assert_eq!(names(&view), vec!["beta college"]);
        assert_eq!(view.total, 2);
        assert_eq!(view.visible, 1);
        assert_eq!(page.records().await.len(), 2);
    }

    // -- create --------------------------------------------------------------

    #[tokio::test]
    async fn open_create_resets_previous_draft() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);
        page.open_create().await;
        page.input("institutionName", "half typed").await.unwrap();
        page.cancel().await;
        page.open_create().await;
        page.input("notes", "again").await.unwrap();

        page.open_create().await;

        let view = page.view().await;
        assert!(view.form.open);
        assert!(view.form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[tokio::test]
    async fn successful_create_closes_form_and_refetches() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;

        page.open_create().await;
        page.input("institutionName", "Gamma Institute").await.unwrap();
        page.input("licenseStartDate", "2025-01-15").await.unwrap();

        assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Created);

        let view = page.view().await;
        assert!(!view.form.open);
        assert!(view.form.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(view.total, 3);

        let writes = gw.writes();
        assert_eq!(writes.len(), 1);
        let Call::Create(body) = &writes[0] else {
            panic!("expected a create call, got {writes:?}");
        };
        assert_eq!(body.len(), INSTITUTIONS.fields.len());
        assert_eq!(body["institutionName"], json!("Gamma Institute"));
        assert_eq!(body["subCounty"], json!(""));
        assert_eq!(gw.calls().last(), Some(&Call::List));
    }

    #[tokio::test]
    async fn failed_create_keeps_form_open_with_draft() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;
        page.open_create().await;
        page.input("institutionName", "Delta").await.unwrap();
        page.input("countyID", "47").await.unwrap();
        let before = page.view().await.form;

        gw.set_failing(true);
        assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Failed);

        let after = page.view().await.form;
        assert_eq!(after, before);
        assert!(after.open);
        assert_eq!(page.records().await.len(), 2);
    }

    #[tokio::test]
    async fn submit_without_open_form_is_a_conflict() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());

        assert_matches!(page.submit().await, Err(CoreError::Conflict(_)));
        assert!(gw.writes().is_empty());
    }

    #[tokio::test]
    async fn input_while_closed_is_a_conflict() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);

        assert_matches!(
            page.input("institutionName", "x").await,
            Err(CoreError::Conflict(_))
        );
    }

    // -- edit ----------------------------------------------------------------

    #[tokio::test]
    async fn open_edit_populates_draft_from_record() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);
        page.mount().await;

        page.open_edit("2").await.unwrap();

        let form = page.view().await.form;
        assert_eq!(form.title.as_deref(), Some("Edit Institution"));
        assert_eq!(form.target_id.as_deref(), Some("2"));
        assert_eq!(form.fields[0].value, "beta college");
    }

    #[tokio::test]
    async fn open_edit_unknown_id_is_not_found() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw);
        page.mount().await;

        assert_matches!(
            page.open_edit("99").await,
            Err(CoreError::NotFound { entity: "Institution", .. })
        );
        assert!(!page.view().await.form.open);
    }

    #[tokio::test]
    async fn institution_save_closes_without_network_call() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;
        page.open_edit("1").await.unwrap();
        page.input("institutionName", "Renamed").await.unwrap();

        assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Discarded);

        assert!(gw.writes().is_empty());
        let view = page.view().await;
        assert!(!view.form.open);
        assert_eq!(names(&view), vec!["Alpha Academy", "beta college"]);
    }

    #[tokio::test]
    async fn participant_save_puts_merged_record() {
        let gw = FakeGateway::with_records(vec![json!({
            "participantID": 31,
            "participantName": "Achieng",
            "gender": "F",
            "createdBy": "import",
        })]);
        let page = ListView::new(&PARTICIPANTS, gw.clone());
        page.mount().await;
        page.open_edit("31").await.unwrap();
        page.input("participantName", "Achieng O.").await.unwrap();

        assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Updated);

        let writes = gw.writes();
        let [Call::Update(id, body)] = writes.as_slice() else {
            panic!("expected one update call, got {writes:?}");
        };
        assert_eq!(id, "31");
        assert_eq!(body["participantID"], json!(31));
        assert_eq!(body["participantName"], json!("Achieng O."));
        assert_eq!(body["gender"], json!("F"));
        assert_eq!(body["createdBy"], json!("import"));
        assert!(!page.view().await.form.open);
    }

    #[tokio::test]
    async fn failed_update_keeps_form_open() {
        let gw = FakeGateway::with_records(vec![json!({"participantID": 5, "participantName": "Baraka"})]);
        let page = ListView::new(&PARTICIPANTS, gw.clone());
        page.mount().await;
        page.open_edit("5").await.unwrap();
        page.input("awardLevel", "Silver").await.unwrap();

        gw.set_failing(true);
        assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Failed);

        let form = page.view().await.form;
        assert!(form.open);
        let level = form.fields.iter().find(|f| f.name == "awardLevel").unwrap();
        assert_eq!(level.value, "Silver");
    }

    // -- delete --------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_and_refetches() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;

        assert_eq!(page.delete("1").await.unwrap(), DeleteOutcome::Deleted);

        assert_eq!(names(&page.view().await), vec!["beta college"]);
        assert_eq!(
            gw.calls(),
            vec![Call::List, Call::Delete("1".into()), Call::List]
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_collection() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;
        gw.set_failing(true);

        assert_eq!(page.delete("1").await.unwrap(), DeleteOutcome::Failed);
        assert_eq!(page.records().await.len(), 2);
    }

    #[tokio::test]
    async fn delete_of_unheld_id_is_not_found_and_not_sent() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());
        page.mount().await;

        assert_matches!(
            page.delete("1?force=true").await,
            Err(CoreError::NotFound { entity: "Institution", ref id }) if id == "1?force=true"
        );
        assert_matches!(page.delete("99").await, Err(CoreError::NotFound { .. }));
        assert!(gw.writes().is_empty());
        assert_eq!(page.records().await.len(), 2);
    }

    #[tokio::test]
    async fn delete_before_mount_is_not_found() {
        let gw = FakeGateway::with_records(institutions());
        let page = ListView::new(&INSTITUTIONS, gw.clone());

        assert_matches!(page.delete("1").await, Err(CoreError::NotFound { .. }));
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_on_entity_without_delete_is_unsupported() {
        let gw = FakeGateway::with_records(vec![]);
        let page = ListView::new(&PROJECTS, gw.clone());

        assert_matches!(page.delete("1").await, Err(CoreError::Unsupported(_)));
        assert!(gw.calls().is_empty());
    }
}
