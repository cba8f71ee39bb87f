// src/filter.rs
//! Status filters and per-filter counts over the job list

use crate::types::{JobRecord, JobStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobFilter {
    All,
    Active,
    Status(JobStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub filter: JobFilter,
    pub value: &'static str,
    pub label: &'static str,
}

/// Filter tabs in display order
pub const FILTER_OPTIONS: [FilterOption; 8] = [
    FilterOption {
        filter: JobFilter::All,
        value: "all",
        label: "All",
    },
    FilterOption {
        filter: JobFilter::Active,
        value: "active",
        label: "Active",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::NotApplied),
        value: "not-applied",
        label: "Not Applied",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::Applied),
        value: "applied",
        label: "Applied",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::Pending),
        value: "pending",
        label: "Pending",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::Interview),
        value: "interview",
        label: "Interview",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::Offer),
        value: "offer",
        label: "Offer",
    },
    FilterOption {
        filter: JobFilter::Status(JobStatus::Rejected),
        value: "rejected",
        label: "Rejected",
    },
];

impl JobFilter {
    /// `None` for keys that name no filter
    pub fn parse(key: &str) -> Option<Self> {
        FILTER_OPTIONS
            .iter()
            .find(|opt| opt.value == key)
            .map(|opt| opt.filter)
    }

    pub fn matches(&self, job: &JobRecord) -> bool {
        match self {
            JobFilter::All => true,
            JobFilter::Active => job.status.is_active(),
            JobFilter::Status(status) => job.status == *status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobFilter::All => "all",
            JobFilter::Active => "active",
            JobFilter::Status(status) => status.as_str(),
        }
    }
}

/// Jobs selected by `key`. Unknown keys select nothing.
pub fn filter_jobs<'a>(jobs: &'a [JobRecord], key: &str) -> Vec<&'a JobRecord> {
    match JobFilter::parse(key) {
        Some(filter) => jobs.iter().filter(|job| filter.matches(job)).collect(),
        None => Vec::new(),
    }
}

/// Count for every filter option, recomputed from scratch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCounts {
    counts: Vec<(FilterOption, usize)>,
}

impl JobCounts {
    pub fn get(&self, key: &str) -> usize {
        self.counts
            .iter()
            .find(|(opt, _)| opt.value == key)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FilterOption, usize)> {
        self.counts.iter()
    }
}

pub fn job_counts(jobs: &[JobRecord]) -> JobCounts {
    let counts = FILTER_OPTIONS
        .iter()
        .map(|opt| {
            let n = match opt.filter {
                JobFilter::All => jobs.len(),
                filter => jobs.iter().filter(|job| filter.matches(job)).count(),
            };
            (*opt, n)
        })
        .collect();
    JobCounts { counts }
}
