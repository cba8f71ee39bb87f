// src/types/status.rs
//! Application pipeline status and its badge styling

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    NotApplied,
    Applied,
    Pending,
    Interview,
    Offer,
    Rejected,
}

/// Badge colors for one status, light and dark variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub bg_hex: &'static str,
    pub text_hex: &'static str,
    pub dark_bg_hex: &'static str,
    pub dark_text_hex: &'static str,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::NotApplied,
        JobStatus::Applied,
        JobStatus::Pending,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::NotApplied => "not-applied",
            JobStatus::Applied => "applied",
            JobStatus::Pending => "pending",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
        }
    }

    /// Applied, pending and interview count as an application still in flight
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            JobStatus::Applied | JobStatus::Pending | JobStatus::Interview
        )
    }

    pub fn label(&self) -> &'static str {
        self.style().label
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            JobStatus::NotApplied => StatusStyle {
                label: "Not Applied",
                bg_hex: "#F3F4F6",
                text_hex: "#6B7280",
                dark_bg_hex: "#374151",
                dark_text_hex: "#9CA3AF",
            },
            JobStatus::Applied => StatusStyle {
                label: "Applied",
                bg_hex: "#DBEAFE",
                text_hex: "#2563EB",
                dark_bg_hex: "#1E3A5F",
                dark_text_hex: "#60A5FA",
            },
            JobStatus::Pending => StatusStyle {
                label: "Pending",
                bg_hex: "#FEF3C7",
                text_hex: "#D97706",
                dark_bg_hex: "#451A03",
                dark_text_hex: "#FBBF24",
            },
            JobStatus::Interview => StatusStyle {
                label: "Interview",
                bg_hex: "#F3E8FF",
                text_hex: "#7C3AED",
                dark_bg_hex: "#2E1065",
                dark_text_hex: "#A78BFA",
            },
            JobStatus::Offer => StatusStyle {
                label: "Offer",
                bg_hex: "#D1FAE5",
                text_hex: "#059669",
                dark_bg_hex: "#064E3B",
                dark_text_hex: "#34D399",
            },
            JobStatus::Rejected => StatusStyle {
                label: "Rejected",
                bg_hex: "#FEE2E2",
                text_hex: "#DC2626",
                dark_bg_hex: "#450A0A",
                dark_text_hex: "#F87171",
            },
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown status: {}. Use one of: {}",
                    s,
                    JobStatus::ALL.map(|st| st.as_str()).join(", ")
                )
            })
    }
}
