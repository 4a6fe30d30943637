// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Subcommands:
// - generate: one shot, repository in -> README out
// - session: interactive loop over the workflow (submit, retry, regenerate...)
//
// Global options configure the GitHub client and logging and are accepted
// before or after the subcommand.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_API_BASE, DEFAULT_PACING_MS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "readme-generator",
    version,
    about = "Generate a professional README.md from a GitHub repository",
    long_about = "readme-generator reads a GitHub repository's metadata and top-level files \
                  and writes a ready-to-publish README with badges, install steps and usage."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Personal access token, raises the API rate limit
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pause before showing a generated README, in milliseconds (0 = none)
    #[arg(long, global = true, default_value_t = DEFAULT_PACING_MS)]
    pub pacing_ms: u64,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a README for one repository
    ///
    /// Example: readme-generator generate rust-lang/rustlings -o README.md
    Generate {
        /// Repository: owner/repo, github.com/owner/repo or a full URL
        repo: String,

        /// Write the README to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write an HTML preview to this file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Print the workflow state as JSON instead of the README
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading commands from stdin
    ///
    /// Commands: submit <repo>, retry, regenerate, start-over, show, info,
    /// save [file], preview [file], help, quit
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "readme-generator",
            "generate",
            "alice/demo",
            "--output",
            "OUT.md",
            "--pacing-ms",
            "0",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.pacing_ms, 0);
        assert_eq!(cli.global.verbose, 2);
        match cli.command {
            Commands::Generate { repo, output, json, .. } => {
                assert_eq!(repo, "alice/demo");
                assert_eq!(output, Some(PathBuf::from("OUT.md")));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
