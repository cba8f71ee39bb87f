// src/identity/mod.rs
//! Company identity derived from a job-posting URL

pub mod avatar;
pub mod logo;
pub mod resolver;

pub use avatar::{get_company_color, get_company_initials, CompanyColor};
pub use logo::{
    get_logo_url, get_logo_url_from_domain, logo_candidates, LogoLoader, LogoState,
};
pub use resolver::{
    capitalize, extract_company_from_url, extract_company_name, extract_domain, UNKNOWN_COMPANY,
};
