//! piece-css CLI
//!
//! Commands: generate, check, list, palette
//! Outputs JSON to stdout, logs to stderr (RUST_LOG)
//! Returns 1 on error, 2 when `check` finds a stale stylesheet

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use piece_css::{ConfigOverrides, GeneratorConfig, GeneratorError, SelectedState, StylesheetGenerator};

#[derive(Parser)]
#[command(name = "piece-css")]
#[command(about = "Embed SVG chess pieces into a CSS stylesheet", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (assetDir, output, selectorPrefix, palette)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of <color>-<piece>.svg files
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Stylesheet to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Animation palette JSON file
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Selector prefix, e.g. ".cg-wrap piece"
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the stylesheet
    Generate,

    /// Verify the stylesheet on disk matches the assets
    Check,

    /// List parsed assets and the selectors they produce
    List,

    /// Print the effective animation palette
    Palette,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_json(&serde_json::json!({
                "success": false,
                "error": e.to_string(),
            }));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, GeneratorError> {
    let config = resolve_config(&cli)?;
    let generator = StylesheetGenerator::from_config(&config)?;

    match cli.command {
        Commands::Generate => {
            let report = generator.generate(&config.asset_dir, &config.output)?;
            print_json(&serde_json::json!({
                "success": true,
                "output": report.output,
                "assets": report.assets,
                "rules": report.rules,
                "sha256": report.sha256,
            }));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check => {
            let outcome = generator.check(&config.asset_dir, &config.output)?;
            print_json(&outcome);
            if outcome.up_to_date {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2)) // Stale or missing
            }
        }

        Commands::List => {
            let assets: Vec<_> = StylesheetGenerator::scan_assets(&config.asset_dir)?
                .iter()
                .map(|asset| {
                    let piece = asset.piece_name();
                    let states: Vec<_> = SelectedState::for_kind(asset.kind())
                        .iter()
                        .map(|s| s.selector_suffix())
                        .collect();
                    serde_json::json!({
                        "file": asset.file_name,
                        "color": asset.color,
                        "piece": piece,
                        "kind": asset.kind(),
                        "selected": states,
                    })
                })
                .collect();
            print_json(&assets);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Palette => {
            print_json(generator.palette());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Flags override the config file, which overrides defaults
fn resolve_config(cli: &Cli) -> Result<GeneratorConfig, GeneratorError> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::load_from_file(path)?,
        None => GeneratorConfig::default(),
    };

    Ok(config.with_overrides(ConfigOverrides {
        asset_dir: cli.assets.clone(),
        output: cli.output.clone(),
        selector_prefix: cli.prefix.clone(),
        palette: cli.palette.clone(),
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}
