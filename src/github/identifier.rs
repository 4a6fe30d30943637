// src/github/identifier.rs
// =============================================================================
// Turns whatever the user typed into an (owner, name) pair.
//
// Supported formats, tried in this order (first match wins):
//   - https://github.com/owner/repo   (http:// and www. work too)
//   - github.com/owner/repo
//   - owner/repo
//
// A single trailing slash is ignored and a ".git" suffix on the repo name is
// dropped. Each segment may only contain letters, digits, '.', '_' and '-'.
// =============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// A parsed repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error(
        "Invalid repository '{0}'. Use owner/repo, github.com/owner/repo or https://github.com/owner/repo"
    )]
    Invalid(String),
}

// Parses a repository identifier.
//
// Parameters:
//   raw: user input, surrounding whitespace allowed
//
// Returns: Ok(RepoId) or IdentifierError::Invalid carrying the trimmed input
//
// Example:
//   "https://github.com/rust-lang/rust.git" -> RepoId { owner: "rust-lang", name: "rust" }
pub fn parse_identifier(raw: &str) -> Result<RepoId, IdentifierError> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let invalid = || IdentifierError::Invalid(trimmed.to_string());

    let (owner, name) = parse_full_url(cleaned)
        .or_else(|| parse_host_qualified(cleaned))
        .or_else(|| parse_bare(cleaned))
        .ok_or_else(invalid)?;

    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(RepoId::new(owner, name))
}

fn parse_full_url(input: &str) -> Option<(&str, &str)> {
    if !(input.starts_with("https://") || input.starts_with("http://")) {
        return None;
    }

    let url = Url::parse(input).ok()?;
    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    if !GITHUB_HOSTS.contains(&url.host_str()?) {
        return None;
    }

    // The Url owns its path, so slice the segments back out of the input
    // instead of returning borrowed data from a temporary.
    let path = url.path().trim_start_matches('/');
    let start = input.len().checked_sub(path.len())?;
    if input.get(start..)? != path {
        return None;
    }
    split_pair(&input[start..])
}

// "github.com/owner/repo" without a scheme
fn parse_host_qualified(input: &str) -> Option<(&str, &str)> {
    let (host, rest) = input.split_once('/')?;
    if !GITHUB_HOSTS.contains(&host) {
        return None;
    }
    split_pair(rest)
}

fn parse_bare(input: &str) -> Option<(&str, &str)> {
    split_pair(input)
}

// Splits "owner/name" into exactly two valid segments.
fn split_pair(input: &str) -> Option<(&str, &str)> {
    let (owner, name) = input.split_once('/')?;
    if is_segment(owner) && is_segment(name) {
        Some((owner, name))
    } else {
        None
    }
}

// GitHub's allowed characters for owner and repository names
fn is_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let id = parse_identifier("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(id.owner, "rust-lang");
        assert_eq!(id.name, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let id = parse_identifier("https://github.com/user/repo.git").unwrap();
        assert_eq!(id, RepoId::new("user", "repo"));
    }

    #[test]
    fn test_all_forms_agree() {
        let expected = RepoId::new("a", "b");
        for input in [
            "a/b",
            "github.com/a/b",
            "https://github.com/a/b/",
            "https://github.com/a/b.git",
            "http://www.github.com/a/b",
            "  github.com/a/b/  ",
        ] {
            assert_eq!(parse_identifier(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_identifier("https://gitlab.com/user/repo").is_err());
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in [
            "",
            "justaname",
            "a/b/c",
            "https://github.com/a",
            "https://github.com/a/b/tree/main",
            "https://github.com/a/b?tab=readme",
            "own er/repo",
            "a/.git",
            "a//b",
        ] {
            assert!(parse_identifier(input).is_err(), "input: {input}");
        }
    }

    #[test]
    fn test_display_is_qualified_name() {
        assert_eq!(RepoId::new("alice", "demo").to_string(), "alice/demo");
    }
}
