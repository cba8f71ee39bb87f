// src/tracker.rs
//! View state over the job store with explicit change notification.
//!
//! The store stays the source of truth: after every mutation the tracker
//! re-reads it and hands observers a fresh snapshot.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::filter::{filter_jobs, job_counts, JobCounts, JobFilter};
use crate::store::{generate_id, JobStore};
use crate::types::{JobDraft, JobRecord, JobUpdate};

#[derive(Debug, Clone)]
pub struct TrackerSnapshot {
    pub filter: JobFilter,
    pub jobs: Vec<JobRecord>,
    pub visible: Vec<JobRecord>,
    pub counts: JobCounts,
    pub selected: Option<JobRecord>,
}

type Subscriber = Box<dyn FnMut(&TrackerSnapshot)>;

pub struct JobTracker {
    store: JobStore,
    filter: JobFilter,
    selected_id: Option<String>,
    subscribers: Vec<Subscriber>,
}

impl JobTracker {
    pub fn new(store: JobStore) -> Self {
        Self {
            store,
            filter: JobFilter::All,
            selected_id: None,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&TrackerSnapshot) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let jobs = self.store.get_jobs();
        let visible = filter_jobs(&jobs, self.filter.as_str())
            .into_iter()
            .cloned()
            .collect();
        let counts = job_counts(&jobs);
        let selected = self
            .selected_id
            .as_deref()
            .and_then(|id| jobs.iter().find(|job| job.id == id).cloned());

        TrackerSnapshot {
            filter: self.filter,
            jobs,
            visible,
            counts,
            selected,
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&snapshot);
        }
    }

    /// Build a record from user input, store it and select it
    pub fn add_job(
        &mut self,
        draft: JobDraft,
        now: DateTime<Utc>,
    ) -> anyhow::Result<(JobRecord, bool)> {
        let record = draft.into_record(generate_id(), now)?;
        let saved = self.store.add_job(record.clone());
        if saved {
            info!("Added job {} at {}", record.id, record.company);
        } else {
            warn!("Job {} at {} could not be persisted", record.id, record.company);
        }

        self.selected_id = Some(record.id.clone());
        self.notify();
        Ok((record, saved))
    }

    pub fn update_job(&mut self, id: &str, update: &JobUpdate) -> bool {
        let updated = self.store.update_job(id, update);
        self.notify();
        updated
    }

    /// Deleting the selected job clears the selection
    pub fn delete_job(&mut self, id: &str) -> bool {
        let deleted = self.store.delete_job(id);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.notify();
        deleted
    }

    pub fn set_filter(&mut self, filter: JobFilter) {
        self.filter = filter;
        self.notify();
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected_id = id;
        self.notify();
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }
}
