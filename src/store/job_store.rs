// src/store/job_store.rs
use chrono::Utc;
use std::path::Path;
use tracing::{debug, error, warn};

use super::media::{CookieJar, CookieOptions, LocalStorage, SameSite, TieredWriter};
use crate::core::config_manager::StorageSettings;
use crate::types::{JobRecord, JobUpdate};

pub const JOBS_KEY: &str = "jobtrack_jobs";
pub const COOKIE_FILE: &str = "cookies.json";
pub const LOCAL_STORAGE_DIR: &str = "local_storage";

/// The only access path to the persisted job list. Every mutation is a full
/// read-modify-write of the sequence, newest first.
pub struct JobStore {
    media: TieredWriter,
}

impl JobStore {
    pub fn new(media: TieredWriter) -> Self {
        Self { media }
    }

    /// Cookie jar in front of local storage, both under `data_dir`
    pub fn open(data_dir: &Path, settings: &StorageSettings) -> Self {
        let cookies = CookieJar::new(
            data_dir.join(COOKIE_FILE),
            CookieOptions {
                expires_days: Some(settings.cookie_expiry_days),
                same_site: Some(SameSite::Strict),
                max_bytes: settings.cookie_quota_bytes,
            },
        );
        let local = LocalStorage::new(data_dir.join(LOCAL_STORAGE_DIR));
        Self::new(TieredWriter::new(Box::new(cookies), Box::new(local)))
    }

    /// Stored jobs; missing or corrupt data reads as an empty list
    pub fn get_jobs(&self) -> Vec<JobRecord> {
        let Some(raw) = self.media.read(JOBS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("Error reading jobs from storage: {}", e);
                Vec::new()
            }
        }
    }

    pub fn find_job(&self, id: &str) -> Option<JobRecord> {
        self.get_jobs().into_iter().find(|job| job.id == id)
    }

    pub fn save_jobs(&mut self, jobs: &[JobRecord]) -> bool {
        let raw = match serde_json::to_string(jobs) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error serializing jobs: {}", e);
                return false;
            }
        };
        self.media.write(JOBS_KEY, &raw)
    }

    /// Prepend so the list stays most-recent-first
    pub fn add_job(&mut self, job: JobRecord) -> bool {
        let mut jobs = self.get_jobs();
        debug!("Adding job {} ({})", job.id, job.domain);
        jobs.insert(0, job);
        self.save_jobs(&jobs)
    }

    /// False when no job has this id; nothing is written in that case
    pub fn update_job(&mut self, id: &str, update: &JobUpdate) -> bool {
        let mut jobs = self.get_jobs();
        match jobs.iter_mut().find(|job| job.id == id) {
            Some(job) => job.apply(update),
            None => {
                warn!("Update for unknown job id: {}", id);
                return false;
            }
        }
        self.save_jobs(&jobs)
    }

    /// Writes back even when the id was absent
    pub fn delete_job(&mut self, id: &str) -> bool {
        let mut jobs = self.get_jobs();
        jobs.retain(|job| job.id != id);
        self.save_jobs(&jobs)
    }
}

/// `job_<millis>_<9 base36 chars>`. Collisions are not checked.
pub fn generate_id() -> String {
    let mut random = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        let digit = (random % 36) as u32;
        random /= 36;
        suffix.push(std::char::from_digit(digit, 36).unwrap_or('0'));
    }
    format!("job_{}_{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::media::memory::MemoryStorage;
    use crate::types::{JobDraft, JobStatus};
    use chrono::{TimeZone, Utc};

    fn memory_store() -> (JobStore, MemoryStorage, MemoryStorage) {
        let primary = MemoryStorage::default();
        let secondary = MemoryStorage::default();
        let store = JobStore::new(TieredWriter::new(
            Box::new(primary.clone()),
            Box::new(secondary.clone()),
        ));
        (store, primary, secondary)
    }

    fn job(url: &str) -> JobRecord {
        JobDraft::new(url)
            .into_record(generate_id(), Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_empty_and_corrupt_storage() {
        let (store, primary, _) = memory_store();
        assert!(store.get_jobs().is_empty());

        primary.set(JOBS_KEY, "{not json");
        assert!(store.get_jobs().is_empty());

        primary.set(
            JOBS_KEY,
            r#"[{"id":"x","url":"u","status":"ghosted","dateAdded":"2024-01-01T00:00:00.000Z"}]"#,
        );
        assert!(store.get_jobs().is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let (mut store, _, _) = memory_store();
        let first = job("https://jobs.acme.com/1");
        let second = job("https://careers.globex.com/2");

        assert!(store.add_job(first.clone()));
        assert!(store.add_job(second.clone()));

        let jobs = store.get_jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0], second);
        assert_eq!(jobs[1], first);
    }

    #[test]
    fn test_update_status_keeps_other_fields() {
        let (mut store, _, _) = memory_store();
        let j = job("https://jobs.acme.com/1");
        store.add_job(j.clone());

        assert!(store.update_job(&j.id, &JobUpdate::status(JobStatus::Offer)));

        let stored = store.find_job(&j.id).unwrap();
        assert_eq!(stored.status, JobStatus::Offer);
        assert_eq!(
            JobRecord {
                status: j.status,
                ..stored
            },
            j
        );
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut store, primary, _) = memory_store();
        store.add_job(job("https://jobs.acme.com/1"));
        let before = primary.get(JOBS_KEY);

        assert!(!store.update_job("job_missing", &JobUpdate::notes("hi")));
        assert_eq!(primary.get(JOBS_KEY), before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (mut store, primary, _) = memory_store();
        let keep = job("https://jobs.acme.com/1");
        let gone = job("https://jobs.acme.com/2");
        store.add_job(keep.clone());
        store.add_job(gone.clone());

        assert!(store.delete_job(&gone.id));
        let once = primary.get(JOBS_KEY);
        assert!(store.delete_job(&gone.id));

        assert_eq!(primary.get(JOBS_KEY), once);
        assert_eq!(store.get_jobs(), vec![keep]);
        assert!(store.find_job(&gone.id).is_none());
    }

    #[test]
    fn test_save_falls_back_when_primary_full() {
        let primary = MemoryStorage::with_quota(300);
        let secondary = MemoryStorage::default();
        let mut store = JobStore::new(TieredWriter::new(
            Box::new(primary.clone()),
            Box::new(secondary.clone()),
        ));

        for n in 0..5 {
            assert!(store.add_job(job(&format!("https://jobs.acme.com/{}", n))));
        }

        assert_eq!(primary.get(JOBS_KEY), None);
        assert!(secondary.get(JOBS_KEY).is_some());
        assert_eq!(store.get_jobs().len(), 5);
    }

    #[test]
    fn test_shrunk_list_moves_back_to_primary() {
        let primary = MemoryStorage::with_quota(300);
        let secondary = MemoryStorage::default();
        let mut store = JobStore::new(TieredWriter::new(
            Box::new(primary.clone()),
            Box::new(secondary.clone()),
        ));

        let jobs: Vec<JobRecord> = (0..5)
            .map(|n| job(&format!("https://jobs.acme.com/{}", n)))
            .collect();
        for j in &jobs {
            assert!(store.add_job(j.clone()));
        }
        assert!(secondary.get(JOBS_KEY).is_some());

        for j in &jobs[1..] {
            assert!(store.delete_job(&j.id));
        }
        assert_eq!(store.get_jobs(), vec![jobs[0].clone()]);
        assert!(primary.get(JOBS_KEY).is_some());
        assert_eq!(secondary.get(JOBS_KEY), None);

        // Losing the cookie must not bring the deleted jobs back
        primary.entries.borrow_mut().remove(JOBS_KEY);
        let remaining = store.get_jobs();
        assert!(remaining.len() <= 1);
        assert!(remaining.iter().all(|j| j.id == jobs[0].id));
    }

    #[test]
    fn test_save_reports_total_failure() {
        let mut store = JobStore::new(TieredWriter::new(
            Box::new(MemoryStorage::failing()),
            Box::new(MemoryStorage::failing()),
        ));
        assert!(!store.add_job(job("https://jobs.acme.com/1")));
        assert!(store.get_jobs().is_empty());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = std::env::temp_dir().join(format!("jobtrack-store-{}", uuid::Uuid::new_v4()));
        let settings = StorageSettings::default();
        let j = job("https://careers.google.com/jobs/123");

        {
            let mut store = JobStore::open(&dir, &settings);
            assert!(store.add_job(j.clone()));
        }
        let store = JobStore::open(&dir, &settings);
        assert_eq!(store.get_jobs(), vec![j]);
        assert!(dir.join(COOKIE_FILE).exists());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "job");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_id(), generate_id());
    }
}
