// src/identity/logo.rs
//! Logo image URLs and the ordered fallback used when an image fails to load

use super::avatar::{get_company_color, get_company_initials, CompanyColor};

const LOGO_DEV_BASE: &str = "https://img.logo.dev";
const CLEARBIT_BASE: &str = "https://logo.clearbit.com";

fn clean_company(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Legacy Clearbit URL keyed on `<company>.com`
pub fn get_logo_url(company_name: &str) -> Option<String> {
    if company_name.is_empty() {
        return None;
    }
    Some(format!("{}/{}.com", CLEARBIT_BASE, clean_company(company_name)))
}

/// Legacy Clearbit URL keyed on the full domain
pub fn get_logo_url_from_domain(domain: &str) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    Some(format!("{}/{}", CLEARBIT_BASE, domain))
}

/// Last two labels of a host: `jobs.cisco.com` → `cisco.com`
pub fn root_domain(domain: &str) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    let lower = domain.to_lowercase();
    let labels: Vec<&str> = lower.split('.').collect();
    if labels.len() > 2 {
        return Some(labels[labels.len() - 2..].join("."));
    }
    Some(domain.to_string())
}

/// logo.dev URLs to try, most reliable first, without duplicates
pub fn logo_candidates(company: &str, domain: &str, api_key: &str) -> Vec<String> {
    let mut urls = Vec::new();

    if let Some(root) = root_domain(domain) {
        urls.push(format!("{}/{}?token={}", LOGO_DEV_BASE, root, api_key));
    }

    if !company.is_empty() {
        let by_company = format!(
            "{}/{}.com?token={}",
            LOGO_DEV_BASE,
            clean_company(company),
            api_key
        );
        if !urls.contains(&by_company) {
            urls.push(by_company);
        }
    }

    urls
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoState {
    Image(String),
    Placeholder { initials: String, color: CompanyColor },
}

/// Walks the candidate list once. Each URL is tried a single time; after the
/// last failure the initials placeholder is final.
#[derive(Debug, Clone)]
pub struct LogoLoader {
    company: String,
    candidates: Vec<String>,
    index: usize,
    failed: bool,
}

impl LogoLoader {
    pub fn new(company: &str, domain: &str, api_key: &str) -> Self {
        Self {
            company: company.to_string(),
            candidates: logo_candidates(company, domain, api_key),
            index: 0,
            failed: false,
        }
    }

    pub fn current(&self) -> LogoState {
        if self.failed || self.candidates.is_empty() {
            return LogoState::Placeholder {
                initials: get_company_initials(&self.company),
                color: get_company_color(&self.company),
            };
        }
        LogoState::Image(self.candidates[self.index].clone())
    }

    /// Report that the current image failed to load
    pub fn on_load_error(&mut self) -> LogoState {
        if self.index + 1 < self.candidates.len() {
            self.index += 1;
        } else {
            self.failed = true;
        }
        self.current()
    }
}
