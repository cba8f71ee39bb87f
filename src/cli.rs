// src/cli.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::core::ConfigManager;
use crate::filter::{JobFilter, FILTER_OPTIONS};
use crate::identity::{LogoLoader, LogoState};
use crate::store::JobStore;
use crate::theme::{system_prefers_dark, ThemeStore};
use crate::tracker::JobTracker;
use crate::types::{preview, JobDraft, JobRecord, JobStatus, JobUpdate};
use crate::utils::{days_since, format_relative_date, format_tracking_days};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track job applications from the command line")]
pub struct JobTrackCli {
    #[command(subcommand)]
    pub command: JobCommand,

    /// Directory holding the cookie jar and local storage
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// Add a job posting by URL
    Add {
        url: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        company: String,
    },
    /// List jobs, optionally filtered (all, active, or a status)
    List {
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Show one job in detail
    Show { id: String },
    /// Change the status of a job
    Status { id: String, status: JobStatus },
    /// Replace the notes of a job
    Note { id: String, text: String },
    /// Delete a job
    Delete { id: String },
    /// Count jobs per filter
    Counts,
    /// Preview the domain and company detected for a URL
    Resolve { url: String },
    /// Show or toggle the display theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Import jobs from a CSV file with url,title,company columns
    Import { csv_file: PathBuf },
}

pub fn handle_command(cli: JobTrackCli, config: ConfigManager) -> Result<()> {
    let config = match cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };
    config.ensure_directories()?;

    let data_dir = config.environment.data_dir.clone();
    let mut tracker = JobTracker::new(JobStore::open(&data_dir, &config.storage));

    match cli.command {
        JobCommand::Add { url, title, company } => {
            let draft = JobDraft::new(url).with_title(title).with_company(company);
            let (job, saved) = tracker.add_job(draft, Utc::now())?;
            if !saved {
                warn!("Job {} could not be persisted", job.id);
                println!("⚠️  Added {} but it could not be saved", job.id);
            } else {
                println!("✅ Added {}", job.id);
            }
            print_job(&job, &config.logo.api_key);
        }

        JobCommand::List { filter } => {
            let Some(filter) = JobFilter::parse(&filter) else {
                println!(
                    "❌ Unknown filter '{}'. Use one of: {}",
                    filter,
                    filter_keys().join(", ")
                );
                return Ok(());
            };
            tracker.set_filter(filter);
            let snapshot = tracker.snapshot();

            if snapshot.visible.is_empty() {
                println!("No jobs found.");
            } else {
                println!(
                    "{:<32} {:<12} {:<20} {:<30} {:<14}",
                    "ID", "Status", "Company", "Title", "Added"
                );
                println!("{}", "-".repeat(110));
                let now = Utc::now();
                for job in &snapshot.visible {
                    println!(
                        "{:<32} {:<12} {:<20} {:<30} {:<14}",
                        job.id,
                        job.status.label(),
                        job.company,
                        job.display_title(),
                        format_relative_date(job.date_added, now)
                    );
                }
            }
            println!("\n{} of {} jobs", snapshot.visible.len(), snapshot.jobs.len());
        }

        JobCommand::Show { id } => match tracker.store().find_job(&id) {
            Some(job) => print_job(&job, &config.logo.api_key),
            None => println!("❌ No job found with id: {}", id),
        },

        JobCommand::Status { id, status } => {
            if tracker.update_job(&id, &JobUpdate::status(status)) {
                println!("✅ {} is now {}", id, status.label());
            } else {
                println!("❌ Could not update job: {}", id);
            }
        }

        JobCommand::Note { id, text } => {
            let unchanged = tracker
                .store()
                .find_job(&id)
                .is_some_and(|job| job.notes == text);
            if unchanged {
                println!("Notes unchanged for {}", id);
            } else if tracker.update_job(&id, &JobUpdate::notes(text)) {
                println!("✅ Notes saved for {}", id);
            } else {
                println!("❌ Could not update job: {}", id);
            }
        }

        JobCommand::Delete { id } => {
            let existed = tracker.store().find_job(&id).is_some();
            if !tracker.delete_job(&id) {
                println!("❌ Could not save after deleting {}", id);
            } else if existed {
                println!("✅ Deleted {}", id);
            } else {
                println!("No job found with id: {}", id);
            }
        }

        JobCommand::Counts => {
            let snapshot = tracker.snapshot();
            for (option, count) in snapshot.counts.iter() {
                println!("{:<12} {}", option.label, count);
            }
        }

        JobCommand::Resolve { url } => match preview(&url) {
            Some(found) => {
                println!("Domain:  {}", found.domain);
                println!("Company: {}", found.company);
                print_logo(&found.company, &found.domain, &config.logo.api_key);
            }
            None => println!("❌ Could not resolve a domain from: {}", url),
        },

        JobCommand::Theme { toggle } => {
            let mut theme = ThemeStore::open(&data_dir, &config.storage, system_prefers_dark());
            if toggle {
                theme.toggle();
            }
            println!("Theme: {}", theme.current());
        }

        JobCommand::Import { csv_file } => import_csv(&mut tracker, &csv_file)?,
    }

    Ok(())
}

fn print_job(job: &JobRecord, logo_api_key: &str) {
    let now = Utc::now();
    println!("   {} at {}", job.display_title(), job.company);
    println!("   URL:      {}", job.url);
    println!("   Domain:   {}", job.domain);
    println!("   Status:   {}", job.status.label());
    println!("   Added:    {}", job.date_added.format("%b %-d, %Y %-I:%M %p"));
    println!(
        "   Tracking: {}",
        format_tracking_days(days_since(job.date_added, now))
    );
    if !job.notes.is_empty() {
        println!("   Notes:    {}", job.notes);
    }
    print_logo(&job.company, &job.domain, logo_api_key);
}

fn print_logo(company: &str, domain: &str, api_key: &str) {
    match LogoLoader::new(company, domain, api_key).current() {
        LogoState::Image(url) => println!("   Logo:     {}", url),
        LogoState::Placeholder { initials, color } => {
            println!("   Logo:     [{}] on {} / {}", initials, color.bg, color.text)
        }
    }
}

fn import_csv(tracker: &mut JobTracker, csv_file: &Path) -> Result<()> {
    if !csv_file.exists() {
        println!("❌ CSV file not found: {}", csv_file.display());
        return Ok(());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_file)
        .with_context(|| format!("Failed to open {}", csv_file.display()))?;

    let mut success_count = 0;
    let mut error_count = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                error_count += 1;
                println!("❌ CSV parsing error: {}", e);
                continue;
            }
        };

        let field = |n: usize| record.get(n).unwrap_or("").trim().to_string();
        let draft = JobDraft::new(field(0))
            .with_title(field(1))
            .with_company(field(2));

        match tracker.add_job(draft, Utc::now()) {
            Ok((job, true)) => {
                success_count += 1;
                println!("✅ Added: {} -> {}", job.url, job.company);
            }
            Ok((job, false)) => {
                error_count += 1;
                println!("❌ Could not save: {}", job.url);
            }
            Err(e) => {
                error_count += 1;
                error!("Skipping CSV row: {}", e);
                println!("⚠️  Skipping row: {}", e);
            }
        }
    }

    info!("CSV import finished: {} added, {} failed", success_count, error_count);
    println!("\nImport completed:");
    println!("  ✅ Success: {}", success_count);
    println!("  ❌ Errors:  {}", error_count);
    Ok(())
}

/// Filter keys accepted by `list --filter`
pub fn filter_keys() -> Vec<&'static str> {
    FILTER_OPTIONS.iter().map(|opt| opt.value).collect()
}
