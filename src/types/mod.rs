// src/types/mod.rs
pub mod job;
pub mod status;

pub use job::{preview, IdentityPreview, JobDraft, JobRecord, JobUpdate, UNTITLED_POSITION};
pub use status::{JobStatus, StatusStyle};
