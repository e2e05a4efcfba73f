//! Command-line interface for passeval

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::sync::Once;

use crate::parallel::WORKER_THREAD_PREFIX;

pub mod commands;
pub mod output;

pub use output::Output;

use commands::{config, evaluate, version};

#[derive(Parser)]
#[command(
    name = "passeval",
    version = env!("CARGO_PKG_VERSION"),
    about = "Label a password wordlist as weak or strong in parallel",
    long_about = "passeval scores every password in a newline-delimited wordlist with a \
                  strength meter, computes its Shannon entropy, labels it weak or strong \
                  against a threshold and writes the results as a table."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate every password in a wordlist
    Evaluate(evaluate::EvaluateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        setup_logging(self.verbose, self.quiet);
        install_panic_hook();
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Evaluate(args)) => {
                evaluate::execute(args, self.config.as_deref(), &output).await
            }
            Some(Commands::Config(args)) => {
                config::execute(args, self.config.as_deref(), &output).await
            }
            Some(Commands::Version(args)) => version::execute(args).await,
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));

    // Ignore a second init when `run` is driven more than once in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Progress and run summaries are `info`, so they show without `-v`
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Meter panics on worker threads are caught and reported as skipped
/// samples; keep the default hook's backtrace dump for every other thread.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if is_worker_thread(std::thread::current().name()) {
                tracing::debug!("Strength meter panic: {}", info);
            } else {
                default_hook(info);
            }
        }));
    });
}

fn is_worker_thread(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.starts_with(WORKER_THREAD_PREFIX))
}
