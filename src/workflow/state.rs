// src/workflow/state.rs
// =============================================================================
// The workflow as a plain state machine.
//
// WorkflowState::transition takes the current state and an Event and returns
// the next state plus a Command telling the driver which I/O to perform next.
// Nothing here awaits or touches the network, so every path is unit-testable.
//
// Stale results:
//   Each submit/retry/regenerate/start-over bumps `generation`. Commands carry
//   the generation they were issued under and the matching completion event
//   hands it back. A completion whose generation is no longer current, or that
//   arrives in a phase not waiting for it, is dropped.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::github::{parse_identifier, FetchError, FileEntry, RepoId, RepositoryDescriptor};
use crate::readme::generate_readme;

// Where the session is. The happy path runs top to bottom; Failed is only
// reachable from FetchingMetadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Input,
    FetchingMetadata,
    MetadataReady,
    GeneratingDocument,
    DocumentReady,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A short user-facing message about the last operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn success(title: &str, message: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

// Everything that can happen to a session: user actions first, then the
// completions of commands issued earlier.
#[derive(Debug)]
pub enum Event {
    Submit(String),
    Retry,
    Regenerate,
    StartOver,
    DescriptorFetched {
        generation: u64,
        result: Result<RepositoryDescriptor, FetchError>,
    },
    ListingFetched {
        generation: u64,
        result: Result<Vec<FileEntry>, FetchError>,
    },
    DocumentPresented {
        generation: u64,
        document: String,
    },
}

/// I/O the driver has to perform, then report back as an Event.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    None,
    FetchDescriptor { generation: u64, repo: RepoId },
    FetchListing { generation: u64, repo: RepoId },
    /// Wait the pacing delay, then send DocumentPresented with this document.
    Present { generation: u64, document: String },
}

/// Session state. Read-only from outside; change it through `transition`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowState {
    phase: Phase,
    identifier: Option<String>,
    repo: Option<RepoId>,
    descriptor: Option<RepositoryDescriptor>,
    document: Option<String>,
    error: Option<String>,
    notification: Option<Notification>,
    generation: u64,
}

impl WorkflowState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last submitted identifier, as typed.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn repo(&self) -> Option<&RepoId> {
        self.repo.as_ref()
    }

    pub fn descriptor(&self) -> Option<&RepositoryDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn transition(mut self, event: Event) -> (WorkflowState, Command) {
        debug!(phase = ?self.phase, generation = self.generation, ?event, "transition");
        let command = match event {
            Event::Submit(raw) => self.on_submit(raw),
            Event::Retry => self.on_retry(),
            Event::Regenerate => self.on_regenerate(),
            Event::StartOver => {
                self = WorkflowState {
                    generation: self.generation + 1,
                    ..WorkflowState::default()
                };
                Command::None
            }
            Event::DescriptorFetched { generation, result } => {
                if self.is_stale(generation, &[Phase::FetchingMetadata]) {
                    return (self, Command::None);
                }
                self.on_descriptor(result)
            }
            Event::ListingFetched { generation, result } => {
                if self.is_stale(generation, &[Phase::MetadataReady, Phase::GeneratingDocument]) {
                    return (self, Command::None);
                }
                self.on_listing(result)
            }
            Event::DocumentPresented {
                generation,
                document,
            } => {
                if self.is_stale(generation, &[Phase::GeneratingDocument]) {
                    return (self, Command::None);
                }
                let notification = if self.document.is_some() {
                    Notification::success(
                        "README Regenerated!",
                        "Your README has been updated with fresh content.",
                    )
                } else {
                    Notification::success(
                        "README Generated!",
                        "Your professional README has been generated successfully.",
                    )
                };
                self.phase = Phase::DocumentReady;
                self.document = Some(document);
                self.notification = Some(notification);
                Command::None
            }
        };
        (self, command)
    }

    // Checks whether a completion still belongs to the current request
    //
    // Parameters:
    //   generation: the generation the completion was issued under
    //   expected: phases in which this kind of completion is awaited
    //
    // Returns: true when the completion must be ignored
    fn is_stale(&self, generation: u64, expected: &[Phase]) -> bool {
        let stale = generation != self.generation || !expected.contains(&self.phase);
        if stale {
            debug!(
                generation,
                current = self.generation,
                phase = ?self.phase,
                "Discarding stale completion"
            );
        }
        stale
    }

    // Only Input accepts a new repository; anything else gets a "Busy" notice
    fn on_submit(&mut self, raw: String) -> Command {
        if self.phase != Phase::Input {
            self.notification = Some(Notification::error(
                "Busy",
                "Start over before submitting another repository.",
            ));
            return Command::None;
        }
        self.begin_fetch(raw)
    }

    // Resubmits the stored identifier. Without one there is nothing to retry,
    // so fall back to Input.
    fn on_retry(&mut self) -> Command {
        if self.phase != Phase::Failed {
            return Command::None;
        }
        match self.identifier.take() {
            Some(raw) => self.begin_fetch(raw),
            None => {
                self.phase = Phase::Input;
                Command::None
            }
        }
    }

    // Starts a new request for a raw identifier
    //
    // Parameters:
    //   raw: the identifier as typed (kept for retry)
    //
    // Returns: FetchDescriptor under a fresh generation, or Command::None with
    // an "Invalid URL" notification and the state otherwise untouched
    fn begin_fetch(&mut self, raw: String) -> Command {
        let repo = match parse_identifier(&raw) {
            Ok(repo) => repo,
            Err(e) => {
                self.notification = Some(Notification::error("Invalid URL", e.to_string()));
                return Command::None;
            }
        };

        // New generation first: anything still in flight is now stale
        self.generation += 1;
        self.phase = Phase::FetchingMetadata;
        self.identifier = Some(raw);
        self.repo = Some(repo.clone());
        self.document = None;
        self.error = None;
        self.notification = None;
        Command::FetchDescriptor {
            generation: self.generation,
            repo,
        }
    }

    // Keeps descriptor and document; only the listing is fetched again
    fn on_regenerate(&mut self) -> Command {
        if self.phase != Phase::DocumentReady || self.descriptor.is_none() {
            return Command::None;
        }
        let Some(repo) = self.repo.clone() else {
            return Command::None;
        };
        self.generation += 1;
        self.phase = Phase::GeneratingDocument;
        self.notification = None;
        Command::FetchListing {
            generation: self.generation,
            repo,
        }
    }

    fn on_descriptor(&mut self, result: Result<RepositoryDescriptor, FetchError>) -> Command {
        match result {
            Ok(descriptor) => {
                self.descriptor = Some(descriptor);
                self.phase = Phase::MetadataReady;
                match self.repo.clone() {
                    Some(repo) => Command::FetchListing {
                        generation: self.generation,
                        repo,
                    },
                    None => Command::None,
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.phase = Phase::Failed;
                self.error = Some(message.clone());
                self.notification = Some(Notification::error("Generation Failed", message));
                Command::None
            }
        }
    }

    // Generates the document once the listing (or its failure) is in
    //
    // Returns: Present with the new document, or Command::None when a
    // regeneration failed and the old document is kept
    fn on_listing(&mut self, result: Result<Vec<FileEntry>, FetchError>) -> Command {
        let regenerating = self.phase == Phase::GeneratingDocument;
        let listing = match (result, regenerating) {
            (Ok(listing), _) => listing,
            // A missing listing only costs us detail on the first pass.
            (Err(e), false) => {
                debug!(error = %e, "Listing unavailable, generating without it");
                Vec::new()
            }
            // Regenerating: keep the document we already have
            (Err(e), true) => {
                self.phase = Phase::DocumentReady;
                self.notification = Some(Notification::error(
                    "Regeneration Failed",
                    format!("Failed to regenerate README. Please try again. ({})", e),
                ));
                return Command::None;
            }
        };

        let Some(descriptor) = &self.descriptor else {
            return Command::None;
        };
        let document = generate_readme(descriptor, &listing);
        self.phase = Phase::GeneratingDocument;
        Command::Present {
            generation: self.generation,
            document,
        }
    }
}
