// src/readme/ecosystem.rs
// =============================================================================
// What the top-level file listing tells us about the project.
//
// All checks are on the entry name only: exact matches for manifests,
// substring for "test", and the text after the last '.' for extensions (the
// whole name when it has no dot).
// No recursion into directories.
// =============================================================================

use std::collections::BTreeSet;

use crate::github::FileEntry;

/// Package ecosystems, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ecosystem {
    Node,
    Python,
    Ruby,
    Rust,
    Go,
}

impl Ecosystem {
    pub const PRIORITY: [Ecosystem; 5] = [
        Ecosystem::Node,
        Ecosystem::Python,
        Ecosystem::Ruby,
        Ecosystem::Rust,
        Ecosystem::Go,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcosystemSignal {
    pub has_package_manifest: bool,
    pub has_requirements_file: bool,
    pub has_gemfile: bool,
    pub has_cargo_manifest: bool,
    pub has_module_file: bool,
    pub has_tests: bool,
    pub has_docker: bool,
    pub has_dockerfile: bool,
    pub extensions: BTreeSet<String>,
}

impl EcosystemSignal {
    // Scans the listing once
    //
    // Parameters:
    //   listing: top-level entries (files and directories alike)
    //
    // Returns: the signal; an empty listing gives the all-false default
    pub fn detect(listing: &[FileEntry]) -> Self {
        let mut signal = EcosystemSignal::default();

        for entry in listing {
            let name = entry.name.as_str();
            // Manifests: exact, case-sensitive names
            match name {
                "package.json" => signal.has_package_manifest = true,
                "requirements.txt" => signal.has_requirements_file = true,
                "Gemfile" => signal.has_gemfile = true,
                "Cargo.toml" => signal.has_cargo_manifest = true,
                "go.mod" => signal.has_module_file = true,
                _ => {}
            }
            if name.contains("test") {
                signal.has_tests = true;
            }
            // Literal, case-sensitive names only: "dockerfile" does not count.
            if name == "docker" || name == "Dockerfile" {
                signal.has_docker = true;
            }
            if name == "Dockerfile" {
                signal.has_dockerfile = true;
            }
            // Text after the last '.', or the whole name when there is no dot,
            // so a top-level "go" directory reads as Go.
            let ext = name.rsplit_once('.').map_or(name, |(_, ext)| ext);
            if !ext.is_empty() {
                signal.extensions.insert(ext.to_lowercase());
            }
        }

        signal
    }

    pub fn has(&self, ecosystem: Ecosystem) -> bool {
        match ecosystem {
            Ecosystem::Node => self.has_package_manifest,
            Ecosystem::Python => self.has_requirements_file,
            Ecosystem::Ruby => self.has_gemfile,
            Ecosystem::Rust => self.has_cargo_manifest,
            Ecosystem::Go => self.has_module_file,
        }
    }

    /// The highest-priority ecosystem present, if any.
    pub fn primary(&self) -> Option<Ecosystem> {
        Ecosystem::PRIORITY.into_iter().find(|e| self.has(*e))
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }
}
