//! Keypoint Overlay Example
//!
//! This example demonstrates the full demo pipeline: it loads a keypoint
//! model, feeds it images, reads back the predicted coordinates, and saves
//! each image with the keypoints drawn on it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example keypoint_overlay -- [OPTIONS] --model-path <MODEL> <IMAGES>...
//! ```
//!
//! # Arguments
//!
//! * `-m, --model-path` - Path to the keypoint model file
//! * `-o, --output-dir` - Directory to save overlaid images
//! * `--input-size` - Side length the model expects (default: 256)
//! * `<IMAGES>...` - Paths to input images to process
//!
//! # Example
//!
//! ```bash
//! cargo run --example keypoint_overlay -- -m pose.onnx -o output/ img/1.png img/2.png
//! ```

use clap::Parser;
use keymark::core::{KeypointRunner, RunnerConfig};
use keymark::processors::{keypoints_from_output, NormalizeImage};
use keymark::utils::{draw_keypoints, load_image, save_overlay, KeypointStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Command-line arguments for the keypoint overlay example
#[derive(Parser)]
#[command(name = "keypoint_overlay")]
#[command(about = "Keypoint Overlay Example - draws predicted keypoints on images")]
struct Args {
    /// Path to the keypoint model file
    #[arg(short, long)]
    model_path: PathBuf,

    /// Paths to input images to process
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory to save overlaid images
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Side length of the square input the model expects (default: 256)
    #[arg(long, default_value = "256")]
    input_size: u32,

    /// Input tensor name (default: first graph input)
    #[arg(long)]
    input_name: Option<String>,

    /// Output tensor name (default: first graph output)
    #[arg(long)]
    output_name: Option<String>,

    /// Radius of the keypoint markers in pixels (default: 2)
    #[arg(long, default_value = "2")]
    radius: i32,

    /// Skip the warmup pass after loading the model
    #[arg(long)]
    no_warmup: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    keymark::utils::init_tracing();

    // Parse command-line arguments
    let args = Args::parse();

    info!("Keypoint Overlay Example");

    // Verify that the model file exists
    if !args.model_path.exists() {
        error!("Model file not found: {}", args.model_path.display());
        return Err("Model file not found".into());
    }

    // Filter out non-existent image files and log errors for missing files
    let existing_images: Vec<PathBuf> = args
        .images
        .iter()
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                error!("Image file not found: {}", path.display());
            }
            exists
        })
        .cloned()
        .collect();

    // Exit early if no valid images were provided
    if existing_images.is_empty() {
        error!("No valid image files found");
        return Err("No valid image files found".into());
    }

    let size = args.input_size as usize;
    let mut config =
        RunnerConfig::new(vec![1, size, size, 3]).with_warmup(!args.no_warmup);
    if let Some(name) = &args.input_name {
        config = config.with_input_name(name.clone());
    }
    if let Some(name) = &args.output_name {
        config = config.with_output_name(name.clone());
    }

    let start = Instant::now();
    let mut runner = KeypointRunner::load(&args.model_path, config)?;
    info!(
        "Model loaded in {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    if args.verbose {
        info!("  Model name: {}", runner.model_name());
        info!("  Input binding: {}", runner.input_name());
        info!("  Output binding: {}", runner.output_name());
        info!("  Input shape: {:?}", runner.input_shape());
    }

    let normalizer = NormalizeImage::for_keypoint_input()?;
    let style = KeypointStyle::with_radius(args.radius);

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(&args.output_dir)?;

    info!("Processing {} images...", existing_images.len());

    for image_path in &existing_images {
        let img = match load_image(image_path) {
            Ok(img) => img,
            Err(e) => {
                error!("Failed to load image {}: {}", image_path.display(), e);
                continue;
            }
        };

        // The model takes a fixed-size input; a mismatched image would
        // denormalize against the wrong span, so reject it outright.
        if img.width() != args.input_size || img.height() != args.input_size {
            error!(
                "Image {} is {}x{}, expected {}x{}; skipping",
                image_path.display(),
                img.width(),
                img.height(),
                args.input_size,
                args.input_size
            );
            continue;
        }

        let blob = normalizer.normalize_to(&img)?;
        runner.set_input(blob.into_dyn())?;

        let start = Instant::now();
        runner.run()?;
        let duration = start.elapsed();

        let keypoints = keypoints_from_output(runner.output()?, img.width(), img.height())?;

        info!(
            "{}: {} keypoints in {:.2}ms",
            image_path.display(),
            keypoints.len(),
            duration.as_secs_f64() * 1000.0
        );
        if keypoints.is_empty() {
            warn!("No keypoints predicted for this image");
        }
        if args.verbose {
            info!("  Output shape: {:?}", runner.output_shape()?);
            for (i, point) in keypoints.iter().enumerate() {
                info!("  [{}] ({:.1}, {:.1})", i, point.x, point.y);
            }
        }

        let overlaid = draw_keypoints(&img, &keypoints, &style);

        let input_filename = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        let output_path = args
            .output_dir
            .join(format!("{}_keypoints.png", input_filename));
        save_overlay(&overlaid, &output_path)?;
    }

    Ok(())
}
