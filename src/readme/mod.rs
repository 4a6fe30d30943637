// src/readme/mod.rs
// =============================================================================
// README generation.
//
// generate_readme is a pure function: same descriptor and listing in, same
// bytes out. No clock, no randomness, no I/O. Missing description, language
// or license each have fallback text, so it never fails.
//
// Submodules:
// - language: closed Language enum with feature/usage tables
// - ecosystem: what the file listing says (manifests, extensions, tests, docker)
// - sections: one function per README section, in document order
// =============================================================================

mod ecosystem;
mod language;
mod sections;

use tracing::debug;

use crate::github::{FileEntry, RepositoryDescriptor};
use ecosystem::EcosystemSignal;
use language::Language;
use sections::{Context, SECTIONS};

/// Builds the README for a repository from its metadata and top-level files.
pub fn generate_readme(repo: &RepositoryDescriptor, listing: &[FileEntry]) -> String {
    let signal = EcosystemSignal::detect(listing);
    let ctx = Context {
        repo,
        signal: &signal,
        language: Language::from_name(repo.primary_language()),
    };

    debug!(
        repo = %repo.qualified_name,
        files = listing.len(),
        ecosystem = ?signal.primary(),
        language = ?ctx.language,
        "Generating README"
    );

    SECTIONS
        .iter()
        .map(|section| section(&ctx))
        .collect::<Vec<_>>()
        .join("\n\n")
}
