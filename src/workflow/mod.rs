// src/workflow/mod.rs
// =============================================================================
// Sequences fetch -> generate -> present for one session.
//
// - state: the pure state machine (phases, events, commands, stale guard)
// - controller: runs the machine against a RepositoryFetcher
// =============================================================================

mod controller;
mod state;

pub use controller::WorkflowController;
pub use state::{Notification, NotificationLevel, Phase, WorkflowState};
