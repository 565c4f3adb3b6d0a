//! Behavioral tests for the roster editor against an in-memory store with
//! injectable failures.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bbuilds_core::error::CoreError;
use bbuilds_core::roster::{
    Confirmation, EditorPhase, FieldPatch, RecordState, Removal, RosterEditor, RosterStore,
    SaveVerb, StoredProject,
};
use bbuilds_core::types::{ClientId, ProjectFields, ProjectStatus};

#[derive(Default)]
struct FakeInner {
    rows: Vec<StoredProject>,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
    fail_fetch: bool,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
}

/// In-memory roster store. Failure flags make the next matching call fail
/// with an upstream error without touching stored state.
#[derive(Clone, Default)]
struct FakeStore {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeStore {
    fn with<T>(&self, f: impl FnOnce(&mut FakeInner) -> T) -> T {
        f(&mut self.inner.lock().unwrap())
    }
}

#[async_trait]
impl RosterStore for FakeStore {
    async fn fetch(&self, _client: &ClientId) -> Result<Vec<StoredProject>, CoreError> {
        self.with(|inner| {
            if inner.fail_fetch {
                return Err(CoreError::Upstream("store unreachable".into()));
            }
            Ok(inner.rows.clone())
        })
    }

    async fn create(
        &self,
        _client: &ClientId,
        fields: &ProjectFields,
    ) -> Result<StoredProject, CoreError> {
        self.with(|inner| {
            inner.create_calls += 1;
            if inner.fail_create {
                return Err(CoreError::Upstream("create rejected".into()));
            }
            let stored = StoredProject {
                id: Uuid::new_v4(),
                fields: fields.clone(),
                updated_at: Utc::now(),
            };
            inner.rows.push(stored.clone());
            Ok(stored)
        })
    }

    async fn update(&self, id: Uuid, fields: &ProjectFields) -> Result<(), CoreError> {
        self.with(|inner| {
            inner.update_calls += 1;
            if inner.fail_update {
                return Err(CoreError::Upstream("update rejected".into()));
            }
            let row = inner
                .rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(CoreError::NotFound {
                    entity: "Project",
                    id: id.to_string(),
                })?;
            row.fields = fields.clone();
            row.updated_at = Utc::now();
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        self.with(|inner| {
            inner.delete_calls += 1;
            if inner.fail_delete {
                return Err(CoreError::Upstream("delete rejected".into()));
            }
            let before = inner.rows.len();
            inner.rows.retain(|row| row.id != id);
            if inner.rows.len() == before {
                return Err(CoreError::NotFound {
                    entity: "Project",
                    id: id.to_string(),
                });
            }
            Ok(())
        })
    }
}

fn editor(store: &FakeStore) -> RosterEditor<FakeStore> {
    RosterEditor::new(ClientId::from("user_abc123"), store.clone())
}

fn seed_project(store: &FakeStore, name: &str, progress: i32) -> Uuid {
    let id = Uuid::new_v4();
    store.with(|inner| {
        inner.rows.push(StoredProject {
            id,
            fields: ProjectFields {
                name: name.to_string(),
                description: String::new(),
                status: ProjectStatus::InProgress,
                progress,
                github_url: None,
                demo_url: None,
            },
            updated_at: Utc::now(),
        });
    });
    id
}

#[tokio::test]
async fn add_edit_save_load_round_trip() {
    let store = FakeStore::default();
    let mut editor = editor(&store);
    editor.load().await.unwrap();

    let index = editor.add_blank();
    assert_eq!(index, 0);
    assert_eq!(editor.phase(), EditorPhase::Dirty);
    editor
        .edit(
            0,
            FieldPatch {
                name: Some("X".into()),
                progress: Some(40),
                ..FieldPatch::default()
            },
        )
        .unwrap();

    let report = editor.save().await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.created, 1);
    assert!(report.reloaded);
    assert_eq!(editor.phase(), EditorPhase::Clean);

    editor.load().await.unwrap();
    let records = editor.records();
    assert_eq!(records.len(), 1);
    assert_matches!(records[0].state, RecordState::Persisted(_));
    assert_eq!(records[0].fields.name, "X");
    assert_eq!(records[0].fields.progress, 40);
    assert_eq!(records[0].fields.status, ProjectStatus::Planning);
}

#[tokio::test]
async fn second_save_is_updates_only_never_a_duplicate_create() {
    let store = FakeStore::default();
    let mut editor = editor(&store);
    editor.add_blank();
    editor
        .edit(0, FieldPatch { name: Some("once".into()), ..FieldPatch::default() })
        .unwrap();

    let first = editor.save().await.unwrap();
    assert_eq!((first.created, first.updated), (1, 0));

    let second = editor.save().await.unwrap();
    assert_eq!((second.created, second.updated), (0, 1));

    store.with(|inner| {
        assert_eq!(inner.create_calls, 1);
        assert_eq!(inner.rows.len(), 1);
    });
}

#[tokio::test]
async fn out_of_range_progress_is_clamped_before_save() {
    let store = FakeStore::default();
    let mut editor = editor(&store);
    editor.add_blank();
    editor
        .edit(0, FieldPatch { progress: Some(150), ..FieldPatch::default() })
        .unwrap();
    assert_eq!(editor.records()[0].fields.progress, 100);

    editor
        .edit(0, FieldPatch { progress: Some(-5), ..FieldPatch::default() })
        .unwrap();
    assert_eq!(editor.records()[0].fields.progress, 0);

    editor.save().await.unwrap();
    store.with(|inner| assert_eq!(inner.rows[0].fields.progress, 0));
}

#[tokio::test]
async fn removing_an_unsaved_row_makes_no_store_call() {
    let store = FakeStore::default();
    let mut editor = editor(&store);
    editor.add_blank();

    let removal = editor.remove(0, Confirmation::NotConfirmed).await.unwrap();
    assert_eq!(removal, Removal::Dropped);
    assert!(editor.records().is_empty());
    store.with(|inner| assert_eq!(inner.delete_calls, 0));
}

#[tokio::test]
async fn removing_a_persisted_row_requires_confirmation() {
    let store = FakeStore::default();
    seed_project(&store, "keep", 20);
    let mut editor = editor(&store);
    editor.load().await.unwrap();

    let err = editor.remove(0, Confirmation::NotConfirmed).await.unwrap_err();
    assert_matches!(err, CoreError::Validation(_));
    assert_eq!(editor.records().len(), 1);
    store.with(|inner| assert_eq!(inner.delete_calls, 0));
}

#[tokio::test]
async fn failed_delete_leaves_the_row_in_place() {
    let store = FakeStore::default();
    let id = seed_project(&store, "p1", 20);
    let mut editor = editor(&store);
    editor.load().await.unwrap();

    store.with(|inner| inner.fail_delete = true);
    let err = editor.remove(0, Confirmation::Confirmed).await.unwrap_err();
    assert_matches!(err, CoreError::Upstream(_));

    assert_eq!(editor.records().len(), 1);
    assert_eq!(editor.records()[0].state, RecordState::Persisted(id));
    store.with(|inner| assert_eq!(inner.rows.len(), 1));
}

#[tokio::test]
async fn confirmed_delete_removes_locally_only_after_store_success() {
    let store = FakeStore::default();
    let id = seed_project(&store, "p1", 20);
    let mut editor = editor(&store);
    editor.load().await.unwrap();

    let removal = editor.remove(0, Confirmation::Confirmed).await.unwrap();
    assert_eq!(removal, Removal::Deleted(id));
    assert!(editor.records().is_empty());
    store.with(|inner| assert!(inner.rows.is_empty()));
}

#[tokio::test]
async fn partial_save_failure_names_the_failing_record_and_keeps_successes() {
    let store = FakeStore::default();
    let existing = seed_project(&store, "p2", 10);
    let mut editor = editor(&store);
    editor.load().await.unwrap();

    // One persisted edit plus one new row whose create will fail.
    editor
        .edit(0, FieldPatch { progress: Some(55), ..FieldPatch::default() })
        .unwrap();
    editor.add_blank();
    editor
        .edit(1, FieldPatch { name: Some("doomed".into()), ..FieldPatch::default() })
        .unwrap();

    store.with(|inner| inner.fail_create = true);
    let report = editor.save().await.unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.created, 0);
    assert!(!report.reloaded);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.index, 1);
    assert_eq!(failure.name, "doomed");
    assert_eq!(failure.verb, SaveVerb::Create);

    // The update was not rolled back and the failed create left no row.
    store.with(|inner| {
        assert_eq!(inner.rows.len(), 1);
        assert_eq!(inner.rows[0].id, existing);
        assert_eq!(inner.rows[0].fields.progress, 55);
    });

    // Local edits survive for retry.
    assert_eq!(editor.phase(), EditorPhase::Dirty);
    assert_eq!(editor.records().len(), 2);
    assert_eq!(editor.records()[1].fields.name, "doomed");
    assert_eq!(editor.records()[1].state, RecordState::Unsaved);

    // Retry once the store recovers: exactly one create, no new duplicate.
    store.with(|inner| inner.fail_create = false);
    let retry = editor.save().await.unwrap();
    assert!(retry.is_complete());
    assert_eq!((retry.created, retry.updated), (1, 1));
    store.with(|inner| assert_eq!(inner.rows.len(), 2));
}

#[tokio::test]
async fn failed_load_leaves_an_empty_working_copy() {
    let store = FakeStore::default();
    seed_project(&store, "p1", 20);
    store.with(|inner| inner.fail_fetch = true);

    let mut editor = editor(&store);
    let err = editor.load().await.unwrap_err();
    assert_matches!(err, CoreError::Upstream(_));
    assert!(editor.records().is_empty());
    assert_eq!(editor.phase(), EditorPhase::Clean);
}

#[tokio::test]
async fn edit_that_changes_nothing_does_not_dirty_the_roster() {
    let store = FakeStore::default();
    seed_project(&store, "steady", 20);
    let mut editor = editor(&store);
    editor.load().await.unwrap();
    assert_eq!(editor.phase(), EditorPhase::Clean);

    // Empty patch and same-value patch are both no-ops.
    editor.edit(0, FieldPatch::default()).unwrap();
    assert_eq!(editor.phase(), EditorPhase::Clean);
    editor
        .edit(0, FieldPatch { name: Some("steady".into()), ..FieldPatch::default() })
        .unwrap();
    assert_eq!(editor.phase(), EditorPhase::Clean);

    editor
        .edit(0, FieldPatch { name: Some("moved".into()), ..FieldPatch::default() })
        .unwrap();
    assert_eq!(editor.phase(), EditorPhase::Dirty);
}

#[tokio::test]
async fn edit_out_of_bounds_is_a_validation_error() {
    let store = FakeStore::default();
    let mut editor = editor(&store);
    let err = editor.edit(3, FieldPatch::default()).unwrap_err();
    assert_matches!(err, CoreError::Validation(_));
}
