// src/identity/resolver.rs
//! Hostname heuristics that turn a job-posting URL into a company identity.
//!
//! Nothing here touches the network. A wrong guess is cheap: the user can
//! override the company before saving.

use tracing::warn;
use url::Url;

/// Leftmost labels that mark a careers portal rather than the company itself
const PORTAL_SUBDOMAINS: &[&str] = &[
    "careers",
    "jobs",
    "work",
    "hire",
    "talent",
    "apply",
    "recruiting",
];

/// Extra portal labels seen in front of company names and ATS hosts
const EXTENDED_PORTAL_SUBDOMAINS: &[&str] = &[
    "employment",
    "join",
    "workday",
    "greenhouse",
    "lever",
    "ashbyhq",
    "boards",
];

/// Applicant-tracking-system base domains where the tenant is the company
const ATS_PLATFORMS: &[&str] = &[
    "lever.co",
    "greenhouse.io",
    "ashbyhq.com",
    "workday.com",
    "myworkdayjobs.com",
];

/// Labels an ATS puts in front of its own domain for every tenant
const ATS_GENERIC_LABELS: &[&str] = &["www", "boards", "job-boards", "jobs", "apply", "careers"];

pub const UNKNOWN_COMPANY: &str = "Unknown Company";

fn parse_host(url: &str) -> anyhow::Result<(Url, String)> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("No host in URL"))?
        .to_lowercase();
    Ok((parsed, host))
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Display domain for a URL: `https://careers.google.com/x` → `google.com`.
/// Returns an empty string when the URL cannot be parsed.
pub fn extract_domain(url: &str) -> String {
    let host = match parse_host(url) {
        Ok((_, host)) => host,
        Err(e) => {
            warn!("Error extracting domain from {:?}: {}", url, e);
            return String::new();
        }
    };

    let host = strip_www(&host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 && PORTAL_SUBDOMAINS.contains(&labels[0]) {
        return labels[1..].join(".");
    }
    host.to_string()
}

/// Lowercase company slug guessed from a URL, e.g. `jobs.cisco.com` → `cisco`.
///
/// On an ATS host the tenant wins over the vendor: `acme.wd5.myworkdayjobs.com`
/// and `boards.greenhouse.io/acme` both give `acme`.
pub fn extract_company_from_url(url: &str) -> String {
    let (parsed, host) = match parse_host(url) {
        Ok(found) => found,
        Err(e) => {
            warn!("Error extracting company from {:?}: {}", url, e);
            return String::new();
        }
    };

    let host = strip_www(&host);
    let labels: Vec<&str> = host.split('.').collect();

    if ATS_PLATFORMS.iter().any(|ats| host.ends_with(ats)) {
        return ats_tenant(&parsed, host, &labels);
    }

    let first = labels[0];
    let is_portal =
        PORTAL_SUBDOMAINS.contains(&first) || EXTENDED_PORTAL_SUBDOMAINS.contains(&first);
    if labels.len() >= 2 && is_portal {
        return labels[1].to_string();
    }
    first.to_string()
}

fn ats_tenant(parsed: &Url, host: &str, labels: &[&str]) -> String {
    let is_vendor_root = ATS_PLATFORMS.contains(&host);
    if !is_vendor_root && !ATS_GENERIC_LABELS.contains(&labels[0]) {
        return labels[0].to_string();
    }

    // Shared board hosts carry the tenant as the first path segment
    parsed
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| labels[0].to_string())
}

/// Human company name from an already stripped domain.
/// `acme.co.uk` gives `Acme`, not `Co`.
pub fn extract_company_name(domain: &str) -> String {
    if domain.is_empty() {
        return UNKNOWN_COMPANY.to_string();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let mut name = labels[0];

    // Short second-level label (co.uk, com.au): step back past it
    if labels.len() > 2 && labels[labels.len() - 2].len() <= 3 {
        name = match labels[labels.len() - 3] {
            "" => labels[0],
            label => label,
        };
    }

    capitalize(name)
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_strips_portal_subdomain() {
        assert_eq!(extract_domain("https://jobs.acme.com/openings/1"), "acme.com");
        assert_eq!(extract_domain("https://careers.google.com/jobs/123"), "google.com");
        assert_eq!(extract_domain("https://careers.acme.co.uk/"), "acme.co.uk");
        assert_eq!(extract_domain("https://www.tesla.com/careers"), "tesla.com");
    }

    #[test]
    fn test_extract_domain_keeps_other_hosts() {
        assert_eq!(extract_domain("https://acme.com/jobs"), "acme.com");
        assert_eq!(extract_domain("https://eng.acme.com/"), "eng.acme.com");
        // two labels only: the marker is the company's own name
        assert_eq!(extract_domain("https://jobs.com/"), "jobs.com");
        assert_eq!(extract_domain("https://JOBS.Acme.COM/"), "acme.com");
    }

    #[test]
    fn test_extract_domain_parse_failure() {
        assert_eq!(extract_domain("not a url"), "");
        assert_eq!(extract_domain("careers.google.com"), "");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn test_extract_company_from_url() {
        assert_eq!(extract_company_from_url("https://jobs.cisco.com/jobs/1"), "cisco");
        assert_eq!(extract_company_from_url("https://careers.google.com/"), "google");
        assert_eq!(extract_company_from_url("https://www.stripe.com/jobs"), "stripe");
        assert_eq!(extract_company_from_url("https://join.acme.io/"), "acme");
        assert_eq!(extract_company_from_url("https://netflix.com/"), "netflix");
        assert_eq!(extract_company_from_url("garbage"), "");
    }

    #[test]
    fn test_extract_company_from_ats_hosts() {
        assert_eq!(
            extract_company_from_url("https://boards.greenhouse.io/acme/jobs/123"),
            "acme"
        );
        assert_eq!(extract_company_from_url("https://jobs.lever.co/figma/abc"), "figma");
        assert_eq!(extract_company_from_url("https://jobs.ashbyhq.com/Linear"), "linear");
        assert_eq!(
            extract_company_from_url("https://nvidia.wd5.myworkdayjobs.com/en-US/External"),
            "nvidia"
        );
        assert_eq!(extract_company_from_url("https://acme.greenhouse.io/"), "acme");
        // no tenant anywhere: fall back to the first label
        assert_eq!(extract_company_from_url("https://boards.greenhouse.io/"), "boards");
    }

    #[test]
    fn test_extract_company_name() {
        assert_eq!(extract_company_name("acme.co.uk"), "Acme");
        assert_eq!(extract_company_name("google.com"), "Google");
        assert_eq!(extract_company_name("shop.example.com"), "Shop");
        assert_eq!(extract_company_name("bbc.co.uk"), "Bbc");
        assert_eq!(extract_company_name(""), "Unknown Company");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("acme"), "Acme");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }
}
