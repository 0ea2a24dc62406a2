//! Predict command - run one session per photo.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lust_meter_adapters::{FsPayloadSource, SeededRandom, SessionDriver, ThreadRandom};
use lust_meter_core::{
    PayloadSource, PredictionReport, RandomSource, ResultOutput, SessionConfig, UploadSource,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressSpinner};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values.
mod defaults {
    pub const MIN_DELAY_MS: u64 = 2000;
    pub const DELAY_SPAN_MS: u64 = 2000;
}

/// Shared arguments for predictions.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct PredictArgs {
    /// Photos or directories of photos
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Treat inputs as dropped files (non-images are ignored silently)
    #[arg(long)]
    pub drop: bool,

    /// Seed for reproducible predictions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Largest accepted photo in bytes
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_upload_bytes: Option<u64>,

    /// Shortest simulated analysis delay
    #[arg(long, value_name = "MS")]
    pub min_delay_ms: Option<u64>,

    /// Width of the simulated delay window
    #[arg(long, value_name = "MS")]
    pub delay_span_ms: Option<u64>,

    /// Show progress spinner
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl PredictArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }
        if !args.drop {
            args.drop = config.general.drop.unwrap_or(false);
        }

        args.seed = args.seed.or(config.analysis.seed);
        args.max_upload_bytes = args
            .max_upload_bytes
            .or(config.upload.max_bytes.filter(|b| *b > 0));
        args.min_delay_ms = args.min_delay_ms.or(config.analysis.min_delay_ms);
        args.delay_span_ms = args.delay_span_ms.or(config.analysis.delay_span_ms);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Build the session configuration with fallback to hardcoded defaults.
    fn session_config(&self) -> SessionConfig {
        let base = SessionConfig::default();
        SessionConfig {
            max_upload_bytes: self.max_upload_bytes.unwrap_or(base.max_upload_bytes),
            min_delay: Duration::from_millis(self.min_delay_ms.unwrap_or(defaults::MIN_DELAY_MS)),
            delay_span: Duration::from_millis(
                self.delay_span_ms.unwrap_or(defaults::DELAY_SPAN_MS),
            ),
        }
    }

    /// How inputs reach the session.
    const fn upload_source(&self) -> UploadSource {
        if self.drop {
            UploadSource::Drop
        } else {
            UploadSource::Picker
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the predict command.
pub struct PredictSummary {
    /// Number of payloads that produced a prediction.
    pub predicted: usize,
    /// Number of payloads rejected or ignored by the session.
    pub rejected: usize,
    /// Number of payloads that failed to load or were not images.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the predict command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &PredictArgs) -> Result<PredictSummary> {
    info!("Running predict command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let config = args.session_config();
    let source = FsPayloadSource::new(args.paths.clone(), args.recursive)
        .with_size_limit(config.max_upload_bytes);
    let show_spinner = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let spinner = ProgressSpinner::new(args.quiet, show_spinner);
    let output = match args.format() {
        OutputFormat::Jsonl => JsonOutput::stdout(),
        OutputFormat::Json => JsonOutput::stdout_array(args.pretty),
    };

    let random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => {
            debug!("Using seeded random source ({seed})");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    };
    let mut driver = SessionDriver::new(config, random, spinner);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let summary = runtime.block_on(predict_all(&source, &mut driver, &output, args));
    driver.sink().finish();

    let summary = summary?;
    info!(
        "Predicted {}, rejected {}, skipped {}",
        summary.predicted, summary.rejected, summary.skipped
    );
    Ok(summary)
}

/// Feed every payload through a fresh session cycle.
async fn predict_all(
    source: &dyn PayloadSource,
    driver: &mut SessionDriver<Box<dyn RandomSource>, ProgressSpinner>,
    output: &dyn ResultOutput,
    args: &PredictArgs,
) -> Result<PredictSummary> {
    let total = source.count_hint();
    let mut predicted = 0usize;
    let mut rejected = 0usize;
    let mut skipped = 0usize;

    for (index, item) in source.payloads().enumerate() {
        let payload = match item {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping input {index}: {e:#}");
                skipped += 1;
                continue;
            }
        };

        // The picker only offers images; dropped files go to the session unfiltered.
        if !args.drop && !payload.media_type.is_image() {
            warn!(
                "Unsupported file type: {} ({})",
                payload.display_name(),
                payload.media_type
            );
            skipped += 1;
            continue;
        }

        let name = payload.display_name().to_owned();
        let size = payload.size;
        let media_type = payload.media_type.clone();
        driver.sink().begin(&name, index, total);

        let Some(result) = driver.run_cycle(payload, args.upload_source()).await else {
            info!("No prediction for {name}");
            rejected += 1;
            driver.reset();
            continue;
        };

        output.write(&PredictionReport {
            source: name,
            timestamp: iso_timestamp(),
            size,
            media_type,
            result,
        })?;
        predicted += 1;
        driver.reset();
    }

    output.flush()?;

    let exit_code = if rejected + skipped > 0 {
        ExitCode::Rejected
    } else {
        ExitCode::Success
    };

    Ok(PredictSummary {
        predicted,
        rejected,
        skipped,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use lust_meter_test_support::{
        MockPayloadSource, MockResultOutput, PayloadBuilder, SequenceRandom,
    };

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PredictArgs,
    }

    fn parse(argv: &[&str]) -> PredictArgs {
        Harness::parse_from(std::iter::once("lust-meter").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_defaults_match_widget() {
        let args = parse(&["me.png"]);
        let config = args.session_config();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(args.upload_source(), UploadSource::Picker);
        assert!(matches!(args.format(), OutputFormat::Jsonl));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: AppConfig = toml::from_str(
            r"
[upload]
max_bytes = 100

[analysis]
seed = 1
min_delay_ms = 5
",
        )
        .unwrap_or_default();
        let args = PredictArgs::with_config(parse(&["--seed", "9", "me.png"]), &config);

        assert_eq!(args.seed, Some(9));
        assert_eq!(args.max_upload_bytes, Some(100));
        assert_eq!(args.session_config().min_delay, Duration::from_millis(5));
    }

    #[test]
    fn test_config_enables_drop() {
        let mut config = AppConfig::default();
        config.general.drop = Some(true);
        let args = PredictArgs::with_config(parse(&["me.png"]), &config);
        assert_eq!(args.upload_source(), UploadSource::Drop);
    }

    fn quiet_driver(
        args: &PredictArgs,
        draws: Vec<f64>,
    ) -> SessionDriver<Box<dyn RandomSource>, ProgressSpinner> {
        let random: Box<dyn RandomSource> = Box::new(SequenceRandom::new(draws));
        SessionDriver::new(args.session_config(), random, ProgressSpinner::new(true, false))
    }

    fn instant(extra: &[&str]) -> PredictArgs {
        let mut argv = vec!["--min-delay-ms", "0", "--delay-span-ms", "0"];
        argv.extend_from_slice(extra);
        argv.push("me.png");
        parse(&argv)
    }

    #[tokio::test]
    async fn test_predict_all_counts_every_outcome() {
        let args = instant(&[]);
        let source = MockPayloadSource::new(vec![
            PayloadBuilder::png(4, 4),
            PayloadBuilder::oversized(),
            PayloadBuilder::text("not a photo"),
        ])
        .with_failure("unreadable");
        let output = MockResultOutput::new();
        let mut driver = quiet_driver(&args, vec![0.0]);

        let summary = predict_all(&source, &mut driver, &output, &args)
            .await
            .unwrap();

        assert_eq!(summary.predicted, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.exit_code, ExitCode::Rejected);
        assert_eq!(output.reports().len(), 1);
        assert_eq!(output.reports()[0].source, "synthetic.png");
        assert_eq!(output.reports()[0].result.percentage, 50);
        assert_eq!(output.flush_count(), 1);
        assert_eq!(source.iteration_count(), 1);
    }

    #[tokio::test]
    async fn test_predict_all_success_when_every_payload_predicted() {
        let args = instant(&[]);
        let source =
            MockPayloadSource::new(vec![PayloadBuilder::png(4, 4), PayloadBuilder::at_limit()]);
        let output = MockResultOutput::new();
        let mut driver = quiet_driver(&args, vec![0.99]);

        let summary = predict_all(&source, &mut driver, &output, &args)
            .await
            .unwrap();

        assert_eq!(summary.predicted, 2);
        assert_eq!(summary.rejected + summary.skipped, 0);
        assert_eq!(summary.exit_code, ExitCode::Success);
        assert!(output.reports().iter().all(|r| r.result.percentage == 90));
        assert_eq!(output.reports()[1].size, 10_485_760);
    }

    #[tokio::test]
    async fn test_predict_all_drop_mode_lets_session_ignore_non_images() {
        let args = instant(&["--drop"]);
        let source = MockPayloadSource::new(vec![PayloadBuilder::pdf()]);
        let output = MockResultOutput::new();
        let mut driver = quiet_driver(&args, vec![0.0]);

        let summary = predict_all(&source, &mut driver, &output, &args)
            .await
            .unwrap();

        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.exit_code, ExitCode::Rejected);
        assert!(output.reports().is_empty());
        assert_eq!(output.flush_count(), 1);
    }

    #[tokio::test]
    async fn test_predict_all_empty_source() {
        let args = instant(&[]);
        let source = MockPayloadSource::empty();
        let output = MockResultOutput::new();
        let mut driver = quiet_driver(&args, vec![0.0]);

        let summary = predict_all(&source, &mut driver, &output, &args)
            .await
            .unwrap();

        assert_eq!(summary.predicted, 0);
        assert_eq!(summary.exit_code, ExitCode::Success);
        assert_eq!(output.flush_count(), 1);
    }

    #[test]
    fn test_zero_limit_rejected_by_parser() {
        let result = Harness::try_parse_from(["lust-meter", "--max-upload-bytes", "0", "me.png"]);
        assert!(result.is_err());
    }
}
