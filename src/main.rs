//! ENEM Score Simulator - Main Entry Point
//!
//! Loads the model bundle once, builds the feature encoder from its training
//! schema, and serves predictions either through the interactive form or the
//! one-shot `predict` subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use enem_simulator::{
    cli::{Cli, Command, PredictArgs},
    config::AppConfig,
    encoder::FeatureEncoder,
    metrics::PipelineMetrics,
    models::{bundle::ModelBundle, inference::predict_all, loader::load_bundle},
    tui,
    types::prediction::{PredictionResult, ScoreBand},
};
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so the log level can come from it.
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging. Logs go to stderr so the form's alternate screen
    // stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("enem_simulator={}", config.logging.level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ENEM Score Simulator");

    // Load the model bundle exactly once; it is shared read-only from here.
    // A load failure is blocking: the form is never shown without a bundle.
    let artifact_path = cli
        .artifact
        .clone()
        .unwrap_or_else(|| config.artifact.path.clone());
    let bundle = load_bundle(&artifact_path).map_err(|e| {
        error!(error = %e, "Could not load the model bundle");
        anyhow::anyhow!("{e}\nGenerate one with: gen-artifact {}", artifact_path.display())
    })?;

    let encoder = FeatureEncoder::new(&bundle.schema).context("unusable training schema")?;
    info!(columns = encoder.width(), "Feature encoder initialized");

    let metrics = PipelineMetrics::new();

    match cli.command {
        Some(Command::Predict(args)) => run_predict(&args, &bundle, &encoder, &config, &metrics)?,
        Some(Command::Tui) | None => {
            tui::run(&bundle, &encoder, &config.bands, &metrics)?;
            metrics.print_summary();
        }
    }

    Ok(())
}

/// One synchronous encode→predict cycle from command-line category codes.
fn run_predict(
    args: &PredictArgs,
    bundle: &ModelBundle,
    encoder: &FeatureEncoder,
    config: &AppConfig,
    metrics: &PipelineMetrics,
) -> Result<()> {
    let profile = args.to_profile()?;

    let start = std::time::Instant::now();
    let features = encoder.encode(&profile, &bundle.scaler);
    let result = predict_all(&features, bundle, &config.bands)?;
    metrics.record_prediction(start.elapsed(), &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &PredictionResult) {
    println!("Notas previstas:");
    for subject_score in &result.scores {
        println!(
            "  {:<18} {:>6.1}  [{}]",
            subject_score.subject.name(),
            subject_score.score,
            band_label(subject_score.band),
        );
    }
    println!();
    println!(
        "  {:<18} {:>6.1}  [{}]",
        "Média Geral",
        result.average,
        band_label(result.average_band),
    );
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "excelente",
        ScoreBand::Good => "bom",
        ScoreBand::NeedsImprovement => "precisa melhorar",
    }
}
