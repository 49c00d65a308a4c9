//! Registry of live builder sessions.
//!
//! One session per simulation id, shared between every view of that
//! record, so all of them watch the same snapshot stream.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::session::BuilderSession;
use crate::store::SimulationStore;

/// Process-wide map of open builder sessions.
pub struct StudioRegistry {
    store: Arc<dyn SimulationStore>,
    sessions: DashMap<String, Arc<BuilderSession>>,
}

impl StudioRegistry {
    /// Create a registry whose sessions all use one store.
    pub fn new(store: Arc<dyn SimulationStore>) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
        }
    }

    /// Get the session for a record, creating it on first open.
    ///
    /// The session starts in the `loading` phase; callers refresh it.
    pub fn open(&self, simulation_id: &str) -> Arc<BuilderSession> {
        let session = self
            .sessions
            .entry(simulation_id.to_string())
            .or_insert_with(|| {
                debug!(simulation_id = %simulation_id, "opening builder session");
                Arc::new(BuilderSession::new(simulation_id, self.store.clone()))
            });
        session.clone()
    }

    /// The session for a record, if one is open.
    pub fn get(&self, simulation_id: &str) -> Option<Arc<BuilderSession>> {
        self.sessions.get(simulation_id).map(|s| s.clone())
    }

    /// Drop a session. Existing handles keep working; the next `open`
    /// starts fresh.
    pub fn close(&self, simulation_id: &str) -> bool {
        let removed = self.sessions.remove(simulation_id).is_some();
        if removed {
            debug!(simulation_id = %simulation_id, "closed builder session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
