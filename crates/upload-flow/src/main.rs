//! # uploadctl
//!
//! Drives the upload flow controller from a terminal: submit a file with a
//! verification token, trigger cleanup, or check the API is up.
//!
//! ## Usage
//! ```bash
//! # Checkbox token obtained from the widget
//! uploadctl upload --file notes.txt --field title=foo --mode checkbox --token tok123
//!
//! # Remove everything the API stored
//! uploadctl cleanup
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use upload_common::constants::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, fields};
use upload_common::{CaptchaType, UploadError};
use upload_flow::{
    ClientConfig, FormPayload, OutputSink, StaticForm, UploadClient, UploadController,
};

/// Upload API command-line driver
#[derive(Parser, Debug)]
#[command(name = "uploadctl")]
#[command(author, version, about = "Submit captcha-verified uploads", long_about = None)]
struct Args {
    /// Upload API base URL
    #[arg(long, env = "UPLOAD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output (stderr)
    #[arg(long, default_value = "false")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a file to the upload endpoint
    Upload {
        /// File to upload
        #[arg(short, long)]
        file: PathBuf,

        /// Extra form fields as name=value (repeatable)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Verification mode: checkbox, invisible or v3
        #[arg(short, long, default_value = "checkbox")]
        mode: String,

        /// Verification token issued by the widget
        #[arg(short, long, env = "CAPTCHA_TOKEN")]
        token: Option<String>,
    },

    /// Remove all uploaded files
    Cleanup,

    /// Check that the API is up
    Health,
}

/// Prints rendered responses
struct Stdout;

impl OutputSink for Stdout {
    fn render(&self, content: &str) {
        println!("{content}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs);

    match run(args).await {
        Ok(true) => Ok(()),
        // Failure was already reported on the diagnostic channel
        Ok(false) => std::process::exit(1),
        Err(e) => match e.downcast_ref::<UploadError>() {
            Some(upload_err) => {
                eprintln!("Error: {upload_err}");
                std::process::exit(upload_err.exit_code());
            }
            None => Err(e),
        },
    }
}

/// Returns whether a response was rendered
async fn run(args: Args) -> Result<bool> {
    let config = ClientConfig {
        base_url: args.api_url,
        timeout: Duration::from_secs(args.timeout_secs),
        ..Default::default()
    };
    let client = UploadClient::new(&config).context("Failed to build HTTP client")?;

    match args.command {
        Command::Upload {
            file,
            fields: pairs,
            mode,
            token,
        } => {
            let mode: CaptchaType = mode.parse()?;

            let mut payload = FormPayload::new();
            for pair in &pairs {
                payload.push_pair(pair)?;
            }
            let mut payload = payload.attach_path(&file).await?;

            // Programmatic widgets hand their token over with the form values
            if !mode.uses_stored_token() {
                if let Some(ref token) = token {
                    payload.push_text(fields::TOKEN, token.as_str());
                }
            }

            let controller =
                UploadController::new(client, Arc::new(StaticForm::new(payload)), Arc::new(Stdout));
            if mode.uses_stored_token() {
                if let Some(token) = token {
                    controller.on_verified(token);
                }
            }

            Ok(controller.submit(mode).await.is_some())
        }
        Command::Cleanup => {
            let controller = UploadController::new(
                client,
                Arc::new(StaticForm::default()),
                Arc::new(Stdout),
            );
            Ok(controller.cleanup().await.is_some())
        }
        Command::Health => {
            let body = client.health().await?;
            Stdout.render(&upload_flow::render::pretty_json(&body));
            Ok(true)
        }
    }
}

/// Logs go to stderr so stdout carries only rendered responses
fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_command() {
        let args = Args::parse_from([
            "uploadctl",
            "--api-url",
            "http://api.local",
            "upload",
            "--file",
            "a.txt",
            "--field",
            "title=foo",
            "--mode",
            "v3",
        ]);

        assert_eq!(args.api_url, "http://api.local");
        assert!(!args.json_logs);
        match args.command {
            Command::Upload { fields, mode, .. } => {
                assert_eq!(fields, ["title=foo"]);
                assert_eq!(mode, "v3");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_json_logs_flag() {
        let args = Args::parse_from(["uploadctl", "--json-logs", "cleanup"]);
        assert!(args.json_logs);
        assert!(matches!(args.command, Command::Cleanup));
    }

    #[tokio::test]
    async fn test_unknown_mode_is_invalid_input() {
        let args = Args::parse_from([
            "uploadctl", "upload", "--file", "a.txt", "--mode", "enterprise",
        ]);
        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::InvalidInput(_))
        ));
    }
}
