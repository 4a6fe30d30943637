// src/main.rs
// =============================================================================
// Entry point of the readme-generator CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Build the GitHub client and the workflow controller
// 4. Dispatch to the subcommand handler
// 5. Exit with proper code (0 = README produced, 1 = bad input or fetch
//    failure, 2 = unexpected error)
// =============================================================================

mod cli;
mod config;
mod github;
mod output;
mod preview;
mod readme;
mod workflow;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

use cli::{Cli, Commands};
use config::Settings;
use github::{GitHubClient, RepositoryFetcher};
use workflow::{Phase, WorkflowController, WorkflowState};

const DEFAULT_README: &str = "README.md";
const DEFAULT_PREVIEW: &str = "README.html";

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let settings = Settings::from(&cli.global);
    let client = GitHubClient::new(&settings).context("failed to build HTTP client")?;
    let mut controller = WorkflowController::new(client, settings.pacing);

    match cli.command {
        Commands::Generate {
            repo,
            output: out_path,
            preview,
            json,
        } => handle_generate(&mut controller, &repo, out_path, preview, json).await,
        Commands::Session => handle_session(&mut controller).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Handles the 'generate' subcommand: one submit, then print or save.
async fn handle_generate<F: RepositoryFetcher>(
    controller: &mut WorkflowController<F>,
    repo: &str,
    out_path: Option<PathBuf>,
    preview: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    eprintln!("🔍 Generating README for: {}", repo);
    let state = controller.submit(repo).await;

    if json {
        output::print_state_json(state)?;
        return Ok(exit_code_for(state));
    }

    if let Some(descriptor) = state.descriptor() {
        output::print_summary(descriptor);
    }
    if let Some(notification) = state.notification() {
        output::print_notification(notification);
    }

    let Some(document) = state.document() else {
        return Ok(exit_code_for(state));
    };

    match &out_path {
        Some(path) => {
            save_document(path, document).await?;
            eprintln!("📄 README written to {}", path.display());
        }
        None => println!("{}", document),
    }

    if let Some(path) = &preview {
        save_preview(path, state).await?;
        eprintln!("🌐 Preview written to {}", path.display());
    }

    Ok(exit_code_for(state))
}

fn exit_code_for(state: &WorkflowState) -> i32 {
    if state.phase() == Phase::DocumentReady {
        0
    } else {
        1
    }
}

const SESSION_HELP: &str = "Commands:
  submit <repo>    fetch a repository and generate its README
  retry            retry the last failed submission
  regenerate       re-read the file listing and rebuild the README
  start-over       clear everything and start again
  show             print the current README
  info             print the repository summary
  save [file]      write the README (default README.md)
  preview [file]   write an HTML preview (default README.html)
  help             show this list
  quit             leave the session";

// Handles the 'session' subcommand: a line-oriented loop over the workflow.
async fn handle_session<F: RepositoryFetcher>(controller: &mut WorkflowController<F>) -> Result<i32> {
    eprintln!("📝 README generator session. Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        match command {
            "" => continue,
            "submit" => match argument {
                Some(repo) => {
                    controller.submit(repo).await;
                }
                None => eprintln!("usage: submit <repo>"),
            },
            "retry" => {
                controller.retry().await;
            }
            "regenerate" => {
                controller.regenerate().await;
            }
            "start-over" | "reset" => {
                controller.start_over().await;
            }
            // Read-only commands: nothing changed, so no status report.
            "show" => {
                match controller.state().document() {
                    Some(document) => println!("{}", document),
                    None => eprintln!("No README yet."),
                }
                continue;
            }
            "info" => {
                match controller.state().descriptor() {
                    Some(descriptor) => output::print_summary(descriptor),
                    None => eprintln!("No repository loaded."),
                }
                continue;
            }
            "save" => {
                let path = PathBuf::from(argument.unwrap_or(DEFAULT_README));
                match controller.state().document() {
                    // A bad path is reported and the session carries on.
                    Some(document) => match save_document(&path, document).await {
                        Ok(()) => eprintln!("📄 README written to {}", path.display()),
                        Err(e) => eprintln!("❌ {:#}", e),
                    },
                    None => eprintln!("No README yet."),
                }
                continue;
            }
            "preview" => {
                let path = PathBuf::from(argument.unwrap_or(DEFAULT_PREVIEW));
                if controller.state().document().is_some() {
                    match save_preview(&path, controller.state()).await {
                        Ok(()) => eprintln!("🌐 Preview written to {}", path.display()),
                        Err(e) => eprintln!("❌ {:#}", e),
                    }
                } else {
                    eprintln!("No README yet.");
                }
                continue;
            }
            "help" => {
                eprintln!("{}", SESSION_HELP);
                continue;
            }
            "quit" | "exit" => break,
            other => {
                eprintln!("Unknown command '{}'. Type 'help' for commands.", other);
                continue;
            }
        }

        // Only the workflow commands above reach this point.
        report(controller.state());
    }

    Ok(0)
}

// Prints the latest notification and where the workflow now stands.
fn report(state: &WorkflowState) {
    if let Some(notification) = state.notification() {
        output::print_notification(notification);
    }
    match state.repo() {
        Some(repo) => eprintln!("   state: {} ({})", output::describe_phase(state.phase()), repo),
        None => eprintln!("   state: {}", output::describe_phase(state.phase())),
    }
    if state.phase() == Phase::Failed {
        if let Some(error) = state.error() {
            eprintln!("   error: {}", error);
        }
        if let Some(identifier) = state.identifier() {
            eprintln!("   'retry' will resubmit '{}'", identifier);
        }
    }
}

// Writes the README bytes exactly as generated.
//
// Returns an error naming the path when the write fails; callers decide
// whether that ends the run ('generate') or just gets printed ('session').
async fn save_document(path: &Path, document: &str) -> Result<()> {
    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

// Renders the current README to an HTML page titled after the repository.
async fn save_preview(path: &Path, state: &WorkflowState) -> Result<()> {
    let title = state.descriptor().map(|d| d.name.as_str()).unwrap_or("README");
    let html = preview::render_html(title, state.document().unwrap_or_default())
        .context("failed to render preview")?;
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_document_writes_exact_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");

        save_document(&path, "# demo\n\nBody").await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "# demo\n\nBody");
    }

    #[tokio::test]
    async fn test_save_document_into_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("README.md");

        let err = save_document(&path, "# demo").await.unwrap_err();

        assert!(format!("{:#}", err).starts_with(&format!("failed to write {}", path.display())));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_save_preview_into_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("README.html");

        let result = save_preview(&path, &WorkflowState::default()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_save_preview_without_repository_uses_default_title() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.html");

        save_preview(&path, &WorkflowState::default()).await.unwrap();

        let html = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(html.contains("<title>README - README preview</title>"));
    }

    #[test]
    fn test_exit_code_for_fresh_state_is_failure() {
        assert_eq!(exit_code_for(&WorkflowState::default()), 1);
    }
}
