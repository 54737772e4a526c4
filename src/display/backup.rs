//! Backup display formatting
//!
//! Formats backup listings and details for terminal output.

use chrono::{DateTime, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::ValidationResult;
use crate::models::BackupDescriptor;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Age")]
    age: String,
}

/// Format a list of backups as a table, in the order given
pub fn format_backup_list(backups: &[BackupDescriptor]) -> String {
    format_backup_list_at(backups, Utc::now())
}

fn format_backup_list_at(backups: &[BackupDescriptor], now: DateTime<Utc>) -> String {
    let rows = backups.iter().enumerate().map(|(i, backup)| BackupRow {
        index: i + 1,
        name: backup.name.clone(),
        created: backup.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        age: format_duration(now.signed_duration_since(backup.created_at)),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format the details of a decrypted backup
pub fn format_validation(validation: &ValidationResult) -> String {
    format!(
        "Backup Details\n\
         ==============\n\
         File:        {}\n\
         Size:        {}\n\
         Created:     {}\n\
         Credentials: {}\n\
         \n\
         Status: readable with the current passphrase",
        validation.backup_name,
        format_size(validation.size_bytes),
        validation.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        validation.records,
    )
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
