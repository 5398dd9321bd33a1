mod cli;
mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tinyaudio_core::{
    discover_inputs, load_config, preset, validate_config, BatchError, BatchOrchestrator,
    BatchSummary, Converter, ConverterError, FfmpegConverter, JobResolver, OutputTarget, AUDIO_EXTENSIONS,
};

use cli::Cli;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    if cli.list_presets {
        print!("{}", report::preset_listing(&config.defaults.preset));
        return Ok(());
    }

    let preset_name = cli.preset.as_deref().unwrap_or(&config.defaults.preset);
    let preset = preset::lookup(preset_name)?;
    let options = cli.job_options()?;

    let inputs = match discover_inputs(&cli.paths) {
        Ok(inputs) => inputs,
        Err(e @ BatchError::NoInputsFound { .. }) => {
            let mut extensions = AUDIO_EXTENSIONS.to_vec();
            extensions.sort_unstable();
            bail!("{}\nSupported extensions: {}", e, extensions.join(", "));
        }
    };

    let converter = FfmpegConverter::new(config.converter.clone());
    if !cli.dry_run {
        converter.validate().await.map_err(tooling_failure)?;
    }

    let suffix = cli
        .suffix
        .clone()
        .unwrap_or_else(|| config.defaults.suffix.clone());
    let output = OutputTarget::choose(cli.output.clone(), suffix, inputs.len());
    info!(preset = preset.name, output = ?output, "Resolved run settings");

    let orchestrator = BatchOrchestrator::new(converter, JobResolver::new(preset, options), output)
        .with_dry_run(cli.dry_run);

    print!("{}", report::header(inputs.len(), preset, cli.dry_run));
    println!();

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let result = orchestrator.process_one(input).await;
        for line in report::job_lines(&result) {
            println!("{}", line);
        }
        println!();
        summary.push(result);
    }

    println!("{}", report::footer(&summary));
    Ok(())
}

/// Turns a failed converter check into the fatal message for the user.
fn tooling_failure(e: ConverterError) -> anyhow::Error {
    if e.is_tooling_error() {
        anyhow!("{}\nffmpeg and ffprobe must be installed and on PATH", e)
    } else {
        anyhow::Error::new(e).context("Failed to run ffmpeg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_binary_gets_install_hint() {
        let err = tooling_failure(ConverterError::FfmpegNotFound {
            path: PathBuf::from("ffmpeg"),
        });
        assert!(err.to_string().contains("must be installed"));
    }

    #[test]
    fn test_other_failures_keep_their_cause() {
        let err = tooling_failure(ConverterError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert_eq!(err.to_string(), "Failed to run ffmpeg");
        assert!(format!("{:#}", err).contains("denied"));
        assert!(err.downcast_ref::<ConverterError>().is_some());
    }
}
