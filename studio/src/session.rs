//! The builder session: one editing surface over one simulation record.
//!
//! The session owns the snapshot the wizard renders. Every flow is
//! message-shaped: a mutation goes to the store, the authoritative record
//! is refetched, progress is derived from it, and a new immutable
//! snapshot replaces the old one on a watch channel. Nothing edits
//! snapshot state in place, so views can never observe a half-applied
//! save.
//!
//! Rapid successive saves can land fetch responses out of order. Every
//! fetch takes a ticket from a monotone sequence, and a response is only
//! installed while its ticket is newer than the installed snapshot's;
//! late responses are discarded whether they succeeded or failed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use blueprint::{BuilderProgress, Simulation, Step};

use crate::store::{SimulationPatch, SimulationStore, StoreError};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The store refused or failed the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Publish requested before the record was complete through analytics
    #[error("Publish blocked: record is not complete through analytics")]
    PublishBlocked,
}

/// Lifecycle phase of the current snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// First fetch has not resolved yet
    #[default]
    Loading,
    /// Last fetch succeeded, possibly with no record
    Ready,
    /// Last fetch failed; `last_error` says why
    Failed,
}

/// Immutable view of a builder session handed to consumers.
///
/// Progress is derived from the contained record at install time and
/// never stored independently, so the two cannot disagree.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SessionSnapshot {
    pub simulation: Option<Simulation>,
    pub progress: BuilderProgress,
    pub phase: SessionPhase,
    pub last_error: Option<String>,
    /// Fetch ticket that produced this snapshot
    pub fetch_seq: u64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn can_publish(&self) -> bool {
        self.progress.can_publish()
    }

    pub fn can_navigate_to(&self, step: Step) -> bool {
        self.progress.can_navigate_to(step)
    }
}

/// One editing session over one simulation record.
///
/// Cheap to share: `Arc<BuilderSession>` hands every view of the record
/// the same snapshot stream.
pub struct BuilderSession {
    simulation_id: String,
    store: Arc<dyn SimulationStore>,
    state_tx: watch::Sender<SessionSnapshot>,
    fetch_seq: AtomicU64,
}

impl BuilderSession {
    /// Create a session. The initial snapshot is `loading`; call
    /// [`refresh`](Self::refresh) to load the record.
    pub fn new(simulation_id: impl Into<String>, store: Arc<dyn SimulationStore>) -> Self {
        let (state_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            simulation_id: simulation_id.into(),
            store,
            state_tx,
            fetch_seq: AtomicU64::new(0),
        }
    }

    pub fn simulation_id(&self) -> &str {
        &self.simulation_id
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Watch the snapshot stream, starting from the current value.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_tx.subscribe()
    }

    /// Whether the wizard may jump to a step right now.
    pub fn can_navigate_to(&self, step: Step) -> bool {
        self.state_tx.borrow().progress.can_navigate_to(step)
    }

    /// Fetch the authoritative record and install a fresh snapshot.
    ///
    /// Returns the snapshot current after the call: the freshly installed
    /// one, or the existing one when this response lost the race to a
    /// newer fetch and was discarded.
    pub async fn refresh(&self) -> SessionSnapshot {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.store.fetch(&self.simulation_id).await;
        self.install(seq, result)
    }

    /// Send a partial update, then refetch.
    ///
    /// The local snapshot is never patched in place; the refetch is what
    /// makes the change visible. An update failure surfaces to the caller
    /// and leaves the snapshot untouched.
    pub async fn save_fields(
        &self,
        patch: &SimulationPatch,
    ) -> Result<SessionSnapshot, SessionError> {
        if patch.is_empty() {
            debug!(simulation_id = %self.simulation_id, "empty patch, skipping save");
            return Ok(self.snapshot());
        }

        info!(simulation_id = %self.simulation_id, "saving fields");
        self.store
            .update_fields(&self.simulation_id, patch)
            .await?;
        Ok(self.refresh().await)
    }

    /// Publish the record.
    ///
    /// Refused locally unless the current snapshot is complete through
    /// analytics; the store is not called on refusal.
    pub async fn publish(&self) -> Result<SessionSnapshot, SessionError> {
        if !self.state_tx.borrow().can_publish() {
            return Err(SessionError::PublishBlocked);
        }

        info!(simulation_id = %self.simulation_id, "publishing simulation");
        self.store.publish(&self.simulation_id).await?;
        Ok(self.refresh().await)
    }

    fn install(
        &self,
        seq: u64,
        result: Result<Option<Simulation>, StoreError>,
    ) -> SessionSnapshot {
        self.state_tx.send_if_modified(|snapshot| {
            if seq <= snapshot.fetch_seq {
                debug!(
                    simulation_id = %self.simulation_id,
                    stale_seq = seq,
                    installed_seq = snapshot.fetch_seq,
                    "discarding out-of-order fetch response"
                );
                return false;
            }

            *snapshot = match result {
                Ok(simulation) => {
                    let progress = simulation
                        .as_ref()
                        .map(BuilderProgress::evaluate)
                        .unwrap_or_default();
                    SessionSnapshot {
                        simulation,
                        progress,
                        phase: SessionPhase::Ready,
                        last_error: None,
                        fetch_seq: seq,
                        fetched_at: Some(Utc::now()),
                    }
                }
                Err(err) => {
                    warn!(
                        simulation_id = %self.simulation_id,
                        error = %err,
                        "fetch failed, flooring progress to zero"
                    );
                    SessionSnapshot {
                        // Keep the last good record for display; progress
                        // floors to zero until a fetch succeeds again.
                        simulation: snapshot.simulation.take(),
                        progress: BuilderProgress::default(),
                        phase: SessionPhase::Failed,
                        last_error: Some(err.to_string()),
                        fetch_seq: seq,
                        fetched_at: Some(Utc::now()),
                    }
                }
            };
            true
        });

        self.snapshot()
    }
}
