// src/workflow/controller.rs
// =============================================================================
// Async driver for the workflow state machine.
//
// Each public operation feeds one Event into WorkflowState, then keeps
// executing the returned Command (fetch metadata, fetch listing, pacing delay)
// and feeding the result back until the machine says Command::None.
//
// Operations take &mut self, so one controller never has two sequences in
// flight. Fetch errors never escape: they end up in the state's error and
// notification fields.
// =============================================================================

use std::time::Duration;

use tracing::info;

use super::state::{Command, Event, WorkflowState};
use crate::github::RepositoryFetcher;

// Owns the fetcher and the single WorkflowState of a session.
//
// Generic over the fetcher so tests can drive it with MockRepositoryFetcher
// instead of the real GitHubClient.
pub struct WorkflowController<F: RepositoryFetcher> {
    fetcher: F,
    state: WorkflowState,
    // Delay before a generated document is presented; zero skips the sleep
    pacing: Duration,
}

impl<F: RepositoryFetcher> WorkflowController<F> {
    // Creates a controller in the Input phase
    //
    // Parameters:
    //   fetcher: where descriptors and listings come from (owned)
    //   pacing: how long to wait before presenting a document
    pub fn new(fetcher: F, pacing: Duration) -> Self {
        Self {
            fetcher,
            state: WorkflowState::default(),
            pacing,
        }
    }

    /// Read-only view of the session for rendering.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    // Parses the identifier, fetches metadata and listing, generates the README
    //
    // Parameters:
    //   identifier: raw user input ("owner/repo", "github.com/owner/repo" or a full URL)
    //
    // Returns: the settled state (DocumentReady, Failed, or Input for bad input)
    pub async fn submit(&mut self, identifier: &str) -> &WorkflowState {
        info!(%identifier, "Starting README generation");
        self.run(Event::Submit(identifier.to_string())).await
    }

    // Resubmits the last identifier after a failure; a no-op in any other phase
    pub async fn retry(&mut self) -> &WorkflowState {
        self.run(Event::Retry).await
    }

    // Re-reads the listing and rebuilds the document from the stored metadata.
    // On failure the previous document stays in place.
    pub async fn regenerate(&mut self) -> &WorkflowState {
        self.run(Event::Regenerate).await
    }

    // Clears the session. Results from anything started earlier are discarded.
    pub async fn start_over(&mut self) -> &WorkflowState {
        self.run(Event::StartOver).await
    }

    // Feeds one event in, then executes commands until the machine is idle
    //
    // Parameters:
    //   event: the user action that starts the sequence
    //
    // Returns: the state once Command::None comes back
    async fn run(&mut self, event: Event) -> &WorkflowState {
        let mut command = self.apply(event);

        // Each command's outcome becomes the next event, tagged with the
        // generation it was issued under so stale results can be spotted
        loop {
            let event = match command {
                Command::None => break,
                Command::FetchDescriptor { generation, repo } => {
                    let result = self.fetcher.fetch_descriptor(&repo).await;
                    Event::DescriptorFetched { generation, result }
                }
                Command::FetchListing { generation, repo } => {
                    let result = self.fetcher.fetch_listing(&repo).await;
                    Event::ListingFetched { generation, result }
                }
                Command::Present {
                    generation,
                    document,
                } => {
                    // Pause so the "generating" phase is visible before the result lands
                    if !self.pacing.is_zero() {
                        tokio::time::sleep(self.pacing).await;
                    }
                    Event::DocumentPresented {
                        generation,
                        document,
                    }
                }
            };
            command = self.apply(event);
        }

        info!(
            phase = ?self.state.phase(),
            generation = self.state.generation(),
            "Workflow settled"
        );
        &self.state
    }

    // transition() consumes the state, so swap in a default while it runs
    fn apply(&mut self, event: Event) -> Command {
        let (next, command) = std::mem::take(&mut self.state).transition(event);
        self.state = next;
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{FetchError, FileEntry, MockRepositoryFetcher, Owner, RepositoryDescriptor};
    use crate::readme::generate_readme;
    use crate::workflow::{NotificationLevel, Phase};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn descriptor() -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: "demo".to_string(),
            qualified_name: "alice/demo".to_string(),
            description: None,
            canonical_url: "https://github.com/alice/demo".to_string(),
            primary_language: Some("Python".to_string()),
            star_count: 42,
            fork_count: 3,
            watcher_count: 5,
            created_at: "2021-03-04T10:00:00Z".to_string(),
            updated_at: None,
            owner: Owner {
                login: "alice".to_string(),
                avatar_url: String::new(),
            },
            license: None,
        }
    }

    fn controller(fetcher: MockRepositoryFetcher) -> WorkflowController<MockRepositoryFetcher> {
        WorkflowController::new(fetcher, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_submit_reaches_document_ready() {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_descriptor()
            .withf(|repo| repo.owner == "alice" && repo.name == "demo")
            .times(1)
            .returning(|_| Ok(descriptor()));
        fetcher
            .expect_fetch_listing()
            .times(1)
            .returning(|_| Ok(vec![FileEntry::named("requirements.txt")]));

        let mut ctl = controller(fetcher);
        let state = ctl.submit("https://github.com/alice/demo").await;

        assert_eq!(state.phase(), Phase::DocumentReady);
        let doc = state.document().unwrap();
        assert!(doc.contains("🐍 **Python Powered**"));
        assert!(doc.contains("python -m venv venv"));
        assert_eq!(state.notification().unwrap().title, "README Generated!");
    }

    #[tokio::test]
    async fn test_listing_failure_still_generates() {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_descriptor()
            .returning(|_| Ok(descriptor()));
        fetcher
            .expect_fetch_listing()
            .returning(|_| Err(FetchError::Transport("connection reset".into())));

        let mut ctl = controller(fetcher);
        let state = ctl.submit("alice/demo").await;

        assert_eq!(state.phase(), Phase::DocumentReady);
        assert_eq!(state.error(), None);
        assert_eq!(state.document(), Some(generate_readme(&descriptor(), &[]).as_str()));
    }

    #[tokio::test]
    async fn test_metadata_failure_then_retry() {
        let calls = AtomicUsize::new(0);
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher.expect_fetch_descriptor().times(2).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(FetchError::RateLimited)
            } else {
                Ok(descriptor())
            }
        });
        fetcher.expect_fetch_listing().times(1).returning(|_| Ok(vec![]));

        let mut ctl = controller(fetcher);
        let state = ctl.submit("alice/demo").await;
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(
            state.error(),
            Some("API rate limit exceeded. Please try again later.")
        );
        assert_eq!(state.notification().unwrap().level, NotificationLevel::Error);

        let state = ctl.retry().await;
        assert_eq!(state.phase(), Phase::DocumentReady);
        assert!(state.document().is_some());
    }

    #[tokio::test]
    async fn test_regenerate_failure_keeps_previous_document() {
        let calls = AtomicUsize::new(0);
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_descriptor()
            .times(1)
            .returning(|_| Ok(descriptor()));
        fetcher.expect_fetch_listing().times(2).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![FileEntry::named("requirements.txt")])
            } else {
                Err(FetchError::Transport("timeout".into()))
            }
        });

        let mut ctl = controller(fetcher);
        let before = ctl.submit("alice/demo").await.document().unwrap().to_string();

        let state = ctl.regenerate().await;
        assert_eq!(state.phase(), Phase::DocumentReady);
        assert_eq!(state.document(), Some(before.as_str()));
        let note = state.notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.title, "Regeneration Failed");
    }

    #[tokio::test]
    async fn test_invalid_identifier_never_fetches() {
        let fetcher = MockRepositoryFetcher::new();
        let mut ctl = controller(fetcher);
        let state = ctl.submit("https://gitlab.com/alice/demo").await;
        assert_eq!(state.phase(), Phase::Input);
        assert_eq!(state.notification().unwrap().title, "Invalid URL");
    }

    #[tokio::test]
    async fn test_start_over_resets_session() {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_descriptor()
            .returning(|_| Ok(descriptor()));
        fetcher.expect_fetch_listing().returning(|_| Ok(vec![]));

        let mut ctl = controller(fetcher);
        ctl.submit("alice/demo").await;
        let state = ctl.start_over().await;
        assert_eq!(state.phase(), Phase::Input);
        assert!(state.descriptor().is_none());
        assert!(state.document().is_none());
        assert!(state.identifier().is_none());

        let state = ctl.submit("alice/demo").await;
        assert_eq!(state.phase(), Phase::DocumentReady);
    }
}
