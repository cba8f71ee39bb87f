// src/lib.rs
//! Client-side job application tracker: URL identity heuristics, a job store
//! over cookie-style storage with a local fallback, and status filtering.

pub mod cli;
pub mod core;
pub mod filter;
pub mod identity;
pub mod store;
pub mod theme;
pub mod tracker;
pub mod types;
pub mod utils;

pub use filter::{filter_jobs, job_counts, JobCounts, JobFilter, FILTER_OPTIONS};
pub use identity::{
    extract_company_from_url, extract_company_name, extract_domain, get_company_color,
    get_company_initials, get_logo_url,
};
pub use store::{generate_id, JobStore};
pub use tracker::{JobTracker, TrackerSnapshot};
pub use types::{JobDraft, JobRecord, JobStatus, JobUpdate};
