// src/store/mod.rs
//! Job persistence over cookie-style storage with a local-storage fallback

pub mod job_store;
pub mod media;

pub use job_store::{generate_id, JobStore, JOBS_KEY};
pub use media::{CookieJar, CookieOptions, LocalStorage, SameSite, StorageMedium, TieredWriter};
