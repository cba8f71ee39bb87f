// src/types/job.rs
//! Job record persisted by the store, plus the draft and patch shapes around it

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::JobStatus;
use crate::identity::{
    capitalize, extract_company_from_url, extract_company_name, extract_domain, get_logo_url,
};

pub const UNTITLED_POSITION: &str = "Untitled Position";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(with = "iso_millis")]
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl JobRecord {
    /// Title for display, falling back to the placeholder when blank
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_POSITION
        } else {
            &self.title
        }
    }

    /// Shallow merge of the fields present in `update`
    pub fn apply(&mut self, update: &JobUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(company) = &update.company {
            self.company = company.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
    }
}

/// Partial update. `id`, `url`, `domain` and `date_added` are frozen at creation
/// and have no counterpart here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

/// User input from the add-job form
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub url: String,
    pub title: String,
    pub company: String,
}

/// What the resolver would fill in for a URL, before the record exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPreview {
    pub domain: String,
    pub company: String,
}

impl JobDraft {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Validate the URL and build the record the store will persist
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> Result<JobRecord> {
        let url = self.url.trim();
        if url.is_empty() {
            anyhow::bail!("Please enter a job URL");
        }

        let url = with_scheme(url);
        if url::Url::parse(&url).is_err() {
            anyhow::bail!("Please enter a valid URL");
        }

        let domain = extract_domain(&url);
        let company = match self.company.trim() {
            "" => guess_company(&url, &domain),
            given => given.to_string(),
        };
        let title = match self.title.trim() {
            "" => UNTITLED_POSITION.to_string(),
            given => given.to_string(),
        };

        Ok(JobRecord {
            id,
            logo: get_logo_url(&company),
            url,
            title,
            company,
            domain,
            status: JobStatus::NotApplied,
            date_added: now,
            notes: String::new(),
        })
    }
}

/// Live preview shown while the user is still typing a URL
pub fn preview(raw_url: &str) -> Option<IdentityPreview> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return None;
    }
    let url = with_scheme(raw_url);
    let domain = extract_domain(&url);
    if domain.is_empty() {
        return None;
    }
    Some(IdentityPreview {
        company: capitalize(&extract_company_from_url(&url)),
        domain,
    })
}

/// Resolver guess from the URL (ATS tenant aware), else the domain's name
fn guess_company(url: &str, domain: &str) -> String {
    match capitalize(&extract_company_from_url(url)) {
        guess if guess.is_empty() => extract_company_name(domain),
        guess => guess,
    }
}

fn with_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// ISO 8601 with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_draft_without_title_or_company() {
        let record = JobDraft::new("careers.google.com/jobs/123")
            .into_record("job_1".to_string(), now())
            .unwrap();

        assert_eq!(record.url, "https://careers.google.com/jobs/123");
        assert_eq!(record.domain, "google.com");
        assert_eq!(record.company, "Google");
        assert_eq!(record.title, "Untitled Position");
        assert_eq!(record.status, JobStatus::NotApplied);
        assert_eq!(record.notes, "");
        assert_eq!(record.logo.as_deref(), Some("https://logo.clearbit.com/google.com"));
        assert_eq!(record.date_added, now());
    }

    #[test]
    fn test_draft_company_from_ats_tenant() {
        let record = JobDraft::new("https://jobs.lever.co/figma/abc")
            .into_record("job_ats".to_string(), now())
            .unwrap();
        assert_eq!(record.company, "Figma");
        assert_eq!(record.domain, "lever.co");

        let record = JobDraft::new("boards.greenhouse.io/acme")
            .into_record("job_gh".to_string(), now())
            .unwrap();
        assert_eq!(record.company, "Acme");
        let previewed = preview("boards.greenhouse.io/acme").unwrap();
        assert_eq!(previewed.company, record.company);
    }

    #[test]
    fn test_guess_company_falls_back_to_domain() {
        assert_eq!(guess_company("not a url", "acme.co.uk"), "Acme");
        assert_eq!(guess_company("not a url", ""), "Unknown Company");
    }

    #[test]
    fn test_draft_keeps_user_values() {
        let record = JobDraft::new("  http://jobs.acme.com/42 ")
            .with_title("  Platform Engineer ")
            .with_company("Acme Corp")
            .into_record("job_2".to_string(), now())
            .unwrap();

        assert_eq!(record.url, "http://jobs.acme.com/42");
        assert_eq!(record.title, "Platform Engineer");
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.domain, "acme.com");
    }

    #[test]
    fn test_draft_rejects_blank_and_invalid_urls() {
        let err = JobDraft::new("   ").into_record("x".into(), now()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a job URL");

        let err = JobDraft::new("http://exa mple.com")
            .into_record("x".into(), now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid URL");
    }

    #[test]
    fn test_record_json_layout() {
        let record = JobDraft::new("https://jobs.acme.com/1")
            .into_record("job_3".to_string(), now())
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["dateAdded"], "2024-03-01T09:30:00.000Z");
        assert_eq!(json["status"], "not-applied");
        assert_eq!(json["domain"], "acme.com");

        let back: JobRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_apply_is_shallow() {
        let mut record = JobDraft::new("https://jobs.acme.com/1")
            .with_title("SRE")
            .into_record("job_4".to_string(), now())
            .unwrap();
        let before = record.clone();

        record.apply(&JobUpdate::status(JobStatus::Offer));

        assert_eq!(record.status, JobStatus::Offer);
        assert_eq!(record.title, before.title);
        assert_eq!(record.notes, before.notes);
        assert_eq!(record.date_added, before.date_added);
    }

    #[test]
    fn test_display_title_placeholder() {
        let mut record = JobDraft::new("acme.com")
            .into_record("job_5".to_string(), now())
            .unwrap();
        record.title = String::new();
        assert_eq!(record.display_title(), "Untitled Position");
    }

    #[test]
    fn test_preview() {
        let p = preview("jobs.cisco.com/req/1").unwrap();
        assert_eq!(p.domain, "cisco.com");
        assert_eq!(p.company, "Cisco");
        assert!(preview("").is_none());
    }
}
