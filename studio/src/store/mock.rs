//! Mock simulation store for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use blueprint::{Simulation, Visibility};

use super::traits::{SimulationPatch, SimulationStore, StoreError};

/// Mock store for testing.
///
/// Seedable records, failure injection, call counting, and per-fetch
/// response delays for exercising out-of-order responses. A fetch reads
/// the record first and then sleeps, like a response spending time in
/// flight after the server has answered.
pub struct MockStore {
    records: DashMap<String, Simulation>,
    offline: AtomicBool,
    fetch_delays: Mutex<VecDeque<Duration>>,
    fetch_count: AtomicU32,
    update_count: AtomicU32,
    publish_count: AtomicU32,
}

impl MockStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            offline: AtomicBool::new(false),
            fetch_delays: Mutex::new(VecDeque::new()),
            fetch_count: AtomicU32::new(0),
            update_count: AtomicU32::new(0),
            publish_count: AtomicU32::new(0),
        }
    }

    /// Seed a record.
    pub fn with_record(self, sim: Simulation) -> Self {
        self.records.insert(sim.id.clone(), sim);
        self
    }

    /// Insert or replace a record after construction.
    pub fn insert(&self, sim: Simulation) {
        self.records.insert(sim.id.clone(), sim);
    }

    /// Current copy of a record.
    pub fn record(&self, id: &str) -> Option<Simulation> {
        self.records.get(id).map(|r| r.clone())
    }

    /// Make every operation fail with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Queue a transit delay for the next fetches, in call order.
    pub async fn push_fetch_delay(&self, delay: Duration) {
        self.fetch_delays.lock().await.push_back(delay);
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> u32 {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn publish_count(&self) -> u32 {
        self.publish_count.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("mock store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimulationStore for MockStore {
    async fn fetch(&self, id: &str) -> Result<Option<Simulation>, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        // Snapshot the record before the simulated transit delay, so a
        // slow response carries the state at request time.
        let result = self.records.get(id).map(|r| r.clone());

        let delay = self.fetch_delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(result)
    }

    async fn update_fields(
        &self,
        id: &str,
        patch: &SimulationPatch,
    ) -> Result<(), StoreError> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        match self.records.get_mut(id) {
            Some(mut record) => {
                patch.apply_to(&mut record);
                record.updated_at = Some(Utc::now());
                Ok(())
            }
            None => Err(StoreError::Rejected(format!("no simulation {id}"))),
        }
    }

    async fn publish(&self, id: &str) -> Result<(), StoreError> {
        self.publish_count.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        match self.records.get_mut(id) {
            Some(mut record) => {
                record.visibility = Some(Visibility::Public);
                record.updated_at = Some(Utc::now());
                Ok(())
            }
            None => Err(StoreError::Rejected(format!("no simulation {id}"))),
        }
    }
}
