// src/output.rs
// =============================================================================
// Terminal rendering: repository summary card, notifications, JSON state.
//
// Status lines go to stderr so stdout can carry the README itself
// (readme-generator generate owner/repo > README.md).
// =============================================================================

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::github::RepositoryDescriptor;
use crate::workflow::{Notification, NotificationLevel, Phase, WorkflowState};

/// Prints the repository summary card.
pub fn print_summary(repo: &RepositoryDescriptor) {
    for line in summary_lines(repo) {
        eprintln!("{}", line);
    }
}

// Builds the summary card line by line
//
// Parameters:
//   repo: the fetched metadata
//
// Returns: name/owner, optional description, counts with creation date, then tags
fn summary_lines(repo: &RepositoryDescriptor) -> Vec<String> {
    let mut lines = vec![format!("📦 {} by {}", repo.name, repo.owner.login)];
    if let Some(description) = repo.description() {
        lines.push(format!("   {}", description));
    }
    lines.push(format!(
        "   ⭐ {} stars   🍴 {} forks   👁️  {} watchers   📅 {}",
        format_count(repo.star_count),
        format_count(repo.fork_count),
        format_count(repo.watcher_count),
        format_date(&repo.created_at)
    ));

    // Bracketed tags, like the labels on a repository card
    let mut tags = Vec::new();
    if let Some(language) = repo.primary_language() {
        tags.push(language.to_string());
    }
    if let Some(license) = &repo.license {
        tags.push(license.name.clone());
    }
    tags.push("Public Repository".to_string());
    lines.push(format!("   [{}]", tags.join("] [")));
    lines.push(format!("   🔗 {}", repo.canonical_url));
    lines
}

// 1234 -> "1.2k", smaller numbers as-is.
pub fn format_count(count: u64) -> String {
    if count >= 1000 {
        format!("{:.1}k", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}

// "2021-03-04T10:00:00Z" -> "March 4, 2021". Unparseable input is shown raw.
pub fn format_date(timestamp: &str) -> String {
    match timestamp.parse::<DateTime<Utc>>() {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

// One line per notification: icon, title, message
pub fn print_notification(notification: &Notification) {
    let icon = match notification.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Error => "❌",
    };
    eprintln!("{} {}: {}", icon, notification.title, notification.message);
}

// Human wording for the session's "state:" line
pub fn describe_phase(phase: Phase) -> &'static str {
    match phase {
        Phase::Input => "waiting for a repository",
        Phase::FetchingMetadata => "fetching repository data",
        Phase::MetadataReady => "repository found, analyzing structure",
        Phase::GeneratingDocument => "generating README",
        Phase::DocumentReady => "README ready",
        Phase::Failed => "failed",
    }
}

// Prints the whole read-only projection for --json (stdout, pretty-printed)
pub fn print_state_json(state: &WorkflowState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{License, Owner};

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.0k");
        assert_eq!(format_count(15_430), "15.4k");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2021-03-04T10:00:00Z"), "March 4, 2021");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_summary_lines() {
        let repo = RepositoryDescriptor {
            name: "demo".to_string(),
            qualified_name: "alice/demo".to_string(),
            description: Some("Tiny demo".to_string()),
            canonical_url: "https://github.com/alice/demo".to_string(),
            primary_language: Some("Go".to_string()),
            star_count: 2500,
            fork_count: 12,
            watcher_count: 2500,
            created_at: "2020-12-25T00:00:00Z".to_string(),
            updated_at: None,
            owner: Owner {
                login: "alice".to_string(),
                avatar_url: String::new(),
            },
            license: Some(License {
                name: "Apache License 2.0".to_string(),
                spdx_id: Some("Apache-2.0".to_string()),
            }),
        };
        let lines = summary_lines(&repo);
        assert_eq!(lines[0], "📦 demo by alice");
        assert!(lines[2].contains("⭐ 2.5k stars"));
        assert!(lines[2].contains("December 25, 2020"));
        assert_eq!(lines[3], "   [Go] [Apache License 2.0] [Public Repository]");
    }
}
