// src/github/types.rs
// =============================================================================
// Data types for what the GitHub API gives us back.
//
// - RepositoryDescriptor: metadata from GET /repos/{owner}/{name}
// - FileEntry: one item from GET /repos/{owner}/{name}/contents
//
// Field names follow our own vocabulary; #[serde(rename)] maps them onto the
// GitHub JSON keys so the structs deserialize straight from the response.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Repository metadata. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    /// `owner/name`
    #[serde(rename = "full_name")]
    pub qualified_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "html_url")]
    pub canonical_url: String,
    #[serde(rename = "language", default)]
    pub primary_language: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,
    #[serde(rename = "forks_count", default)]
    pub fork_count: u64,
    #[serde(rename = "watchers_count", default)]
    pub watcher_count: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub owner: Owner,
    #[serde(default)]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

impl RepositoryDescriptor {
    /// The description, treating an empty string as missing.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// The primary language, treating an empty string as missing.
    pub fn primary_language(&self) -> Option<&str> {
        self.primary_language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
    }
}

/// One top-level entry of the repository. Only `name` is looked at; the rest
/// of the GitHub payload is kept around untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl FileEntry {
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_github_json() {
        let json = r#"{
            "name": "demo",
            "full_name": "alice/demo",
            "description": null,
            "html_url": "https://github.com/alice/demo",
            "language": "Python",
            "stargazers_count": 42,
            "forks_count": 3,
            "watchers_count": 5,
            "created_at": "2021-03-04T10:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "owner": { "login": "alice", "avatar_url": "https://avatars.example/alice" },
            "license": null,
            "open_issues_count": 7
        }"#;
        let repo: RepositoryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(repo.qualified_name, "alice/demo");
        assert_eq!(repo.primary_language(), Some("Python"));
        assert_eq!(repo.star_count, 42);
        assert_eq!(repo.owner.login, "alice");
        assert!(repo.license.is_none());
        assert!(repo.description().is_none());
    }

    #[test]
    fn test_file_entry_keeps_opaque_fields() {
        let json = r#"{ "name": "Cargo.toml", "type": "file", "size": 120 }"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Cargo.toml");
        assert_eq!(entry.rest.get("type"), Some(&Value::from("file")));
    }

    #[test]
    fn test_empty_language_is_absent() {
        let json = r#"{
            "name": "x", "full_name": "a/x", "html_url": "https://github.com/a/x",
            "language": "", "description": "  ", "owner": { "login": "a" }
        }"#;
        let repo: RepositoryDescriptor = serde_json::from_str(json).unwrap();
        assert!(repo.primary_language().is_none());
        assert!(repo.description().is_none());
    }
}
