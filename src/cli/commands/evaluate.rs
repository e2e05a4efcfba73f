use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::error::EvalError;
use crate::eval::PasswordMeter;
use crate::io::{OutputFormat, TextEncoding};
use crate::parallel::{BarObserver, RunObserver, TracingObserver};
use crate::pipeline::{PipelineReport, evaluate_file};

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Newline-delimited password file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>_evaluated.<format>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Scores at or above this are labelled strong
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Worker threads (default: all available cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Report progress every N passwords
    #[arg(long)]
    pub progress_interval: Option<usize>,

    /// Input and output encoding
    #[arg(long, value_enum)]
    pub encoding: Option<TextEncoding>,

    /// Output table format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep surrounding whitespace on every line
    #[arg(long)]
    pub no_trim: bool,

    /// Log progress instead of drawing a progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}

/// CLI flags in config shape; unset values are pruned before merging
#[derive(Serialize)]
struct CliOverrides {
    evaluation: EvaluationOverrides,
    parallel: ParallelOverrides,
    input: InputOverrides,
    output: OutputOverrides,
}

#[derive(Serialize)]
struct EvaluationOverrides {
    strength_threshold: Option<f64>,
}

#[derive(Serialize)]
struct ParallelOverrides {
    max_threads: Option<usize>,
    progress_interval: Option<usize>,
}

#[derive(Serialize)]
struct InputOverrides {
    encoding: Option<TextEncoding>,
    trim: Option<bool>,
}

#[derive(Serialize)]
struct OutputOverrides {
    format: Option<OutputFormat>,
    encoding: Option<TextEncoding>,
}

impl From<&EvaluateArgs> for CliOverrides {
    fn from(args: &EvaluateArgs) -> Self {
        Self {
            evaluation: EvaluationOverrides {
                strength_threshold: args.threshold,
            },
            parallel: ParallelOverrides {
                max_threads: args.workers,
                progress_interval: args.progress_interval,
            },
            input: InputOverrides {
                encoding: args.encoding,
                trim: args.no_trim.then_some(false),
            },
            output: OutputOverrides {
                format: args.format,
                encoding: args.encoding,
            },
        }
    }
}

pub async fn execute(args: EvaluateArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = ConfigLoader::load_with(custom_config, Some(CliOverrides::from(&args)))?
        .extract()?;
    tracing::debug!("Resolved configuration: {:?}", config);

    output.verbose(&format!(
        "Evaluating {} (threshold {}, {} output)",
        args.input.display(),
        config.evaluation.strength_threshold,
        config.output.format.extension()
    ));

    let show_bar = !args.no_progress_bar && !output.is_quiet();
    let input = args.input;
    let target = args.output;

    let result = tokio::task::spawn_blocking(move || {
        let meter = PasswordMeter::new();
        evaluate_file(&input, target.as_deref(), &config, &meter, |total| -> Box<dyn RunObserver> {
            if show_bar {
                Box::new(BarObserver::new(total))
            } else {
                Box::new(TracingObserver::new())
            }
        })
    })
    .await
    .context("Evaluation task failed")?;

    match result {
        Ok(report) => {
            print_summary(&report, output);
            Ok(())
        }
        Err(e) => {
            if let Some(EvalError::NoUsableResults { .. }) = e.downcast_ref::<EvalError>() {
                output.error("No data to save");
            }
            Err(e)
        }
    }
}

fn print_summary(report: &PipelineReport, output: &Output) {
    output.header("Evaluation Summary");
    output.summary_stats("Read:", report.read);
    output.summary_stats("Evaluated:", report.evaluated);
    output.summary_stats("Skipped:", report.skipped);
    output.summary_stats("Strong:", report.strong);
    output.summary_stats("Weak:", report.weak);
    output.key_value(
        "Time:",
        &format!("{:.2}s ({} workers)", report.elapsed.as_secs_f64(), report.workers),
        false,
    );
    output.key_value("Output:", &report.output.display().to_string(), true);

    if report.skipped > 0 {
        output.warning(&format!(
            "{} passwords could not be scored and were left out",
            report.skipped
        ));
    }
    output.success("Evaluation complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::overrides::prune_unset;
    use clap::Parser;
    use serde_json::json;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: EvaluateArgs,
    }

    #[test]
    fn test_unset_flags_produce_no_overrides() {
        let cli = TestCli::parse_from(["test", "words.txt"]);
        assert_eq!(prune_unset(CliOverrides::from(&cli.args)), json!({}));
    }

    #[test]
    fn test_flags_map_to_config_keys() {
        let cli = TestCli::parse_from([
            "test",
            "words.txt",
            "--threshold",
            "0.7",
            "--workers",
            "3",
            "--encoding",
            "iso-8859-1",
            "--format",
            "jsonl",
            "--no-trim",
        ]);
        let value = prune_unset(CliOverrides::from(&cli.args));

        assert_eq!(value["evaluation"]["strength_threshold"], 0.7);
        assert_eq!(value["parallel"]["max_threads"], 3);
        assert_eq!(value["input"]["encoding"], "iso-8859-1");
        assert_eq!(value["input"]["trim"], false);
        assert_eq!(value["output"]["format"], "jsonl");
        assert_eq!(value["output"]["encoding"], "iso-8859-1");
        assert!(value["parallel"].get("progress_interval").is_none());
    }
}
