// src/core/mod.rs
//! Configuration and file system plumbing

pub mod config_manager;
pub mod fs_ops;

pub use config_manager::{ConfigManager, LogoSettings, StorageSettings};
pub use fs_ops::FsOps;
