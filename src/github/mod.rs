// src/github/mod.rs
// =============================================================================
// Everything that talks about GitHub repositories.
//
// - identifier: parse "owner/repo" style input into a RepoId
// - types: the repository metadata and file listing we read from the API
// - fetch: the RepositoryFetcher trait and the reqwest-based GitHubClient
// =============================================================================

mod fetch;
mod identifier;
mod types;

pub use fetch::{FetchError, GitHubClient, RepositoryFetcher};
pub use identifier::{parse_identifier, RepoId};
pub use types::{FileEntry, RepositoryDescriptor};

#[cfg(test)]
pub use types::{License, Owner};

#[cfg(test)]
pub use fetch::MockRepositoryFetcher;
