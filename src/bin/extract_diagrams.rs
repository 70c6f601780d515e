//! Extract the diagrams of one handwritten note into transparent PNG crops.
//!
//! # Usage
//!
//! ```bash
//! # Positional input and output directory
//! extract_diagrams note.png out/
//!
//! # Named arguments, JSON config, debug images
//! extract_diagrams --input note.png --output out/ --config extractor.json --debug
//! ```
//!
//! Writes `diagram_<n>.png` and `manifest.json` into the output directory.
//! Environment variables (`MIN_CONTOUR_AREA`, `CLUSTERING_PROXIMITY`,
//! `PADDING`, `MAX_DIAGRAMS`, `DIAGRAM_SORTING_METHOD`) override the config
//! file.

use clap::Parser;
use diagram_extractor::config::resolve_config;
use diagram_extractor::debug::{mask_image, render_overlay};
use diagram_extractor::image::io::{load_raster, save_gray_png, save_rgba_png, write_json_file};
use diagram_extractor::image::ImageRgba8;
use diagram_extractor::{DiagramExtractor, ExtractError, ExtractionOutcome};
use log::{debug, info};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Extract diagrams from a handwritten note
#[derive(Parser, Debug)]
#[command(name = "extract_diagrams")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input note (PNG or JPEG)
    #[arg(value_name = "INPUT", required_unless_present = "input")]
    input_pos: Option<PathBuf>,

    /// Output directory for crops and manifest
    #[arg(value_name = "OUTPUT")]
    output_pos: Option<PathBuf>,

    /// Input note, alternative to the positional form
    #[arg(short, long, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output directory, alternative to the positional form
    #[arg(short, long, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every stage
    #[arg(short, long)]
    verbose: bool,

    /// Also write debug_mask.png, debug_overlay.png and trace.json
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ExtractError> {
    let input = args
        .input
        .as_ref()
        .or(args.input_pos.as_ref())
        .ok_or_else(|| ExtractError::InvalidInput {
            reason: "no input file given".to_string(),
        })?;
    let output = args
        .output
        .clone()
        .or_else(|| args.output_pos.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let config = resolve_config(args.config.as_deref())?;
    debug!("configuration: {config:?}");
    let extractor = DiagramExtractor::new(config)?;

    let note = load_raster(input)?;
    let view = ImageRgba8::from_rgba(&note);
    let outcome = extractor.process(view, &file_name(input))?;

    for diagram in &outcome.diagrams {
        save_rgba_png(&diagram.image, &output.join(&diagram.file))?;
    }
    let manifest_path = output.join(MANIFEST_FILE);
    write_json_file(&manifest_path, &outcome.manifest)?;

    if args.debug {
        save_debug_artifacts(&output, view, &outcome)?;
    }

    print_summary(&outcome, &manifest_path);
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn save_debug_artifacts(
    dir: &Path,
    view: ImageRgba8<'_>,
    outcome: &ExtractionOutcome,
) -> Result<(), ExtractError> {
    save_gray_png(&mask_image(outcome), &dir.join("debug_mask.png"))?;
    save_rgba_png(&render_overlay(view, outcome), &dir.join("debug_overlay.png"))?;
    write_json_file(&dir.join("trace.json"), &outcome.trace)?;
    info!("debug artifacts written to {}", dir.display());
    Ok(())
}

fn print_summary(outcome: &ExtractionOutcome, manifest_path: &Path) {
    match &outcome.manifest.message {
        Some(message) => println!("{message}"),
        None => {
            println!("Extracted {} diagram(s)", outcome.diagrams.len());
            for entry in &outcome.manifest.diagrams {
                let [x, y, w, h] = entry.bbox;
                println!(
                    "  {}: {}x{} at ({}, {}) confidence {:.3}",
                    entry.file, w, h, x, y, entry.confidence
                );
            }
        }
    }
    for warning in &outcome.warnings {
        println!("  warning: {warning}");
    }
    println!("Manifest written to {}", manifest_path.display());
}
