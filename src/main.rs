//! FoodCheck CLI
//!
//! Offline entry point for the produce freshness classifier: loads a weight
//! record and classifies a single image file, printing the JSON verdict the
//! HTTP API would return.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use foodcheck::backend::{backend_name, default_device, DefaultBackend};
use foodcheck::inference::FreshnessService;
use foodcheck::model::{load_classifier, ModelVariant};
use foodcheck::utils::logging::{init_logging, LogConfig};

/// FoodCheck produce freshness classification
#[derive(Parser, Debug)]
#[command(name = "foodcheck")]
#[command(version = "0.1.0")]
#[command(about = "Classify produce photos as fresh or rotten", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single image file
    Infer {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the trained weight record
        #[arg(short, long)]
        model: PathBuf,

        /// Model variant: "fine" (6 classes) or "coarse" (2 classes)
        #[arg(long, default_value = "fine")]
        variant: String,
    },

    /// Print the label set of a model variant
    Labels {
        /// Model variant: "fine" or "coarse"
        #[arg(long, default_value = "fine")]
        variant: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Infer {
            input,
            model,
            variant,
        } => infer(&input, &model, &variant),
        Commands::Labels { variant } => labels(&variant),
    }
}

fn infer(input: &PathBuf, model_path: &PathBuf, variant_name: &str) -> Result<()> {
    let variant = ModelVariant::from_name(variant_name)?;
    let device = default_device();

    info!("Backend: {}", backend_name());

    let model = load_classifier::<DefaultBackend>(model_path, &variant, &device)
        .context("failed to load classifier weights")?;
    let service = FreshnessService::new(model, variant)?;

    let bytes = std::fs::read(input)
        .with_context(|| format!("failed to read input image {:?}", input))?;
    let response = service.predict(&bytes)?;

    println!("{}", "Classification result".green().bold());
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn labels(variant_name: &str) -> Result<()> {
    let variant = ModelVariant::from_name(variant_name)?;
    let map = variant.category_map()?;

    println!(
        "{} ({} classes, normalize: {})",
        variant.name.cyan().bold(),
        variant.num_classes(),
        variant.normalize
    );
    for (i, label) in variant.labels.iter().enumerate() {
        let category = map
            .category_of(i)
            .map(|c| c.to_string())
            .unwrap_or_default();
        println!("  {:>2}. {:<16} -> {}", i, label, category);
    }

    Ok(())
}
