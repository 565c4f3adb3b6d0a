//! In-memory editing model for one client's project roster.
//!
//! The editor holds the working copy of a client's project list during an
//! admin editing session. The durable list lives behind [`RosterStore`];
//! the two are reconciled only at explicit save points, never continuously.
//! Concurrent edits of the same roster by two admin sessions are a
//! documented non-goal: the last save wins.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{ClientId, ProjectFields, ProjectStatus, Timestamp, PROGRESS_MAX, PROGRESS_MIN};

/// Whether a roster row exists in durable storage yet.
///
/// A new row carries no identifier until its first successful save. Keeping
/// the two cases as explicit variants (rather than an optional id) makes
/// every reconciliation branch exhaustive: `Unsaved` maps to a create,
/// `Persisted` to an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Created locally, never persisted. Discarding it needs no store call.
    Unsaved,
    /// Present in storage under this identifier.
    Persisted(Uuid),
}

/// One row of the working copy.
#[derive(Debug, Clone)]
pub struct RosterRecord {
    pub state: RecordState,
    pub fields: ProjectFields,
    pub updated_at: Timestamp,
}

/// A persisted project as the store returns it.
#[derive(Debug, Clone)]
pub struct StoredProject {
    pub id: Uuid,
    pub fields: ProjectFields,
    pub updated_at: Timestamp,
}

/// Storage seam for the editor.
///
/// Implemented over the Roster API by `bbuilds-api` and by in-memory fakes
/// in tests. Each method call is an independent network round trip; the
/// editor assumes no ordering between calls for distinct projects.
#[async_trait]
pub trait RosterStore {
    async fn fetch(&self, client: &ClientId) -> Result<Vec<StoredProject>, CoreError>;
    async fn create(
        &self,
        client: &ClientId,
        fields: &ProjectFields,
    ) -> Result<StoredProject, CoreError>;
    async fn update(&self, id: Uuid, fields: &ProjectFields) -> Result<(), CoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Partial update applied to one roster row. `None` fields are untouched.
///
/// An empty string for a link field clears it, matching a cleared text
/// input in the admin console.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i32>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}

/// Relationship between the working copy and durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Working copy matches the last loaded state.
    Clean,
    /// Local mutations exist that have not been saved.
    Dirty,
    /// A save pass is in flight.
    Saving,
}

/// Explicit confirmation for irreversible removals of persisted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    NotConfirmed,
}

/// What a remove call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// An unsaved row was dropped locally; no store call was made.
    Dropped,
    /// A persisted row was deleted from storage and then dropped locally.
    Deleted(Uuid),
}

/// The verb a save pass applied (or tried to apply) to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveVerb {
    Create,
    Update,
}

/// One failed store call during a save pass, identified by roster index and
/// project name so the admin can tell which record to retry.
#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub name: String,
    pub verb: SaveVerb,
    pub error: CoreError,
}

/// Outcome of one save pass.
///
/// Succeeded calls are never rolled back; partial success is a visible
/// outcome. A failed record keeps its local edits so the admin can retry.
#[derive(Debug)]
pub struct SaveReport {
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<RecordFailure>,
    /// Whether the post-save reload replaced the working copy with durable
    /// state. Only done when every call succeeded.
    pub reloaded: bool,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Client-side controller for one client's roster.
///
/// All operations take `&mut self`, so a second save cannot start while one
/// is in flight; the [`EditorPhase::Saving`] check backs the same rule for
/// callers that poll [`RosterEditor::phase`] to disable their save
/// affordance.
#[derive(Debug)]
pub struct RosterEditor<S> {
    client: ClientId,
    store: S,
    records: Vec<RosterRecord>,
    phase: EditorPhase,
}

impl<S: RosterStore> RosterEditor<S> {
    pub fn new(client: ClientId, store: S) -> Self {
        RosterEditor {
            client,
            store,
            records: Vec::new(),
            phase: EditorPhase::Clean,
        }
    }

    pub fn client(&self) -> &ClientId {
        &self.client
    }

    pub fn records(&self) -> &[RosterRecord] {
        &self.records
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Replace the working copy wholesale with the persisted list.
    ///
    /// On a fetch error the working copy is left empty and the error is
    /// returned for display; the caller retries by loading again.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        self.records.clear();
        self.phase = EditorPhase::Clean;
        let stored = self.store.fetch(&self.client).await?;
        self.records = stored
            .into_iter()
            .map(|project| RosterRecord {
                state: RecordState::Persisted(project.id),
                fields: project.fields,
                updated_at: project.updated_at,
            })
            .collect();
        Ok(())
    }

    /// Append a blank planning-stage row. Local only; returns its index.
    pub fn add_blank(&mut self) -> usize {
        self.records.push(RosterRecord {
            state: RecordState::Unsaved,
            fields: ProjectFields::blank(),
            updated_at: Utc::now(),
        });
        self.phase = EditorPhase::Dirty;
        self.records.len() - 1
    }

    /// Merge `patch` into the row at `index`. Local only.
    ///
    /// Progress is clamped to `[0, 100]` here, before any save can see it;
    /// status validity is carried by the [`ProjectStatus`] type itself.
    /// A patch that changes nothing leaves the phase alone, so the save
    /// affordance tracks real edits only.
    pub fn edit(&mut self, index: usize, patch: FieldPatch) -> Result<(), CoreError> {
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| CoreError::Validation(format!("no roster entry at index {index}")))?;

        let before = record.fields.clone();
        let fields = &mut record.fields;
        if let Some(name) = patch.name {
            fields.name = name;
        }
        if let Some(description) = patch.description {
            fields.description = description;
        }
        if let Some(status) = patch.status {
            fields.status = status;
        }
        if let Some(progress) = patch.progress {
            fields.progress = progress.clamp(PROGRESS_MIN, PROGRESS_MAX);
        }
        if let Some(url) = patch.github_url {
            fields.github_url = normalize_link(url);
        }
        if let Some(url) = patch.demo_url {
            fields.demo_url = normalize_link(url);
        }
        if record.fields != before {
            self.phase = EditorPhase::Dirty;
        }
        Ok(())
    }

    /// Remove the row at `index`.
    ///
    /// Unsaved rows are dropped locally with no store call and no
    /// confirmation. Persisted rows require [`Confirmation::Confirmed`] and
    /// a successful store delete; if the delete fails, the working copy is
    /// left untouched and the error is returned for display.
    pub async fn remove(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Result<Removal, CoreError> {
        let state = self
            .records
            .get(index)
            .ok_or_else(|| CoreError::Validation(format!("no roster entry at index {index}")))?
            .state;

        match state {
            RecordState::Unsaved => {
                self.records.remove(index);
                self.phase = EditorPhase::Dirty;
                Ok(Removal::Dropped)
            }
            RecordState::Persisted(id) => {
                if confirmation != Confirmation::Confirmed {
                    return Err(CoreError::Validation(
                        "removing a persisted project requires confirmation".to_string(),
                    ));
                }
                self.store.delete(id).await?;
                self.records.remove(index);
                Ok(Removal::Deleted(id))
            }
        }
    }

    /// Replay the working copy against the store: one create per unsaved
    /// row, one full-field update per persisted row, in list order.
    ///
    /// Ids returned by creates are adopted immediately, so a retry after a
    /// partial failure never duplicates an already-created record. When
    /// every call succeeds the editor reloads from the store, guaranteeing
    /// the displayed list equals durable state; on any failure local edits
    /// are kept for retry and the report names each failing record.
    pub async fn save(&mut self) -> Result<SaveReport, CoreError> {
        if self.phase == EditorPhase::Saving {
            return Err(CoreError::Validation("a save is already in flight".to_string()));
        }
        self.phase = EditorPhase::Saving;

        let mut report = SaveReport {
            created: 0,
            updated: 0,
            failures: Vec::new(),
            reloaded: false,
        };

        for index in 0..self.records.len() {
            let (state, fields) = {
                let record = &self.records[index];
                (record.state, record.fields.clone())
            };
            let stamp = Utc::now();

            match state {
                RecordState::Unsaved => match self.store.create(&self.client, &fields).await {
                    Ok(stored) => {
                        let record = &mut self.records[index];
                        record.state = RecordState::Persisted(stored.id);
                        record.updated_at = stored.updated_at;
                        report.created += 1;
                    }
                    Err(error) => {
                        tracing::warn!(index, name = %fields.name, error = %error, "roster create failed");
                        report.failures.push(RecordFailure {
                            index,
                            name: fields.name,
                            verb: SaveVerb::Create,
                            error,
                        });
                    }
                },
                RecordState::Persisted(id) => match self.store.update(id, &fields).await {
                    Ok(()) => {
                        self.records[index].updated_at = stamp;
                        report.updated += 1;
                    }
                    Err(error) => {
                        tracing::warn!(index, name = %fields.name, error = %error, "roster update failed");
                        report.failures.push(RecordFailure {
                            index,
                            name: fields.name,
                            verb: SaveVerb::Update,
                            error,
                        });
                    }
                },
            }
        }

        if report.failures.is_empty() {
            // Confirm displayed state against durable state. A reload
            // failure here follows plain load semantics: empty list, error
            // surfaced, everything already saved stays saved.
            self.load().await?;
            report.reloaded = true;
        } else {
            self.phase = EditorPhase::Dirty;
        }
        Ok(report)
    }
}

fn normalize_link(url: String) -> Option<String> {
    if url.trim().is_empty() {
        None
    } else {
        Some(url)
    }
}
