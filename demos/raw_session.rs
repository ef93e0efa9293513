//! Raw Session Example
//!
//! This example performs the load/bind/run/read sequence manually against a
//! graph using the ONNX Runtime API directly, without the
//! [`KeypointRunner`](keymark::core::KeypointRunner) wrapper. It first dumps
//! the graph's input and output tensor bindings, then runs one forward pass
//! on a zero-filled input and prints the leading output values.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example raw_session -- --model-path <MODEL> [--input-dims 1,207]
//! ```

use clap::Parser;
use keymark::core::inference::{describe_session, load_session};
use ndarray::{ArrayD, IxDyn};
use ort::value::TensorRef;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for the raw session example
#[derive(Parser)]
#[command(name = "raw_session")]
#[command(about = "Raw Session Example - manual session usage and graph metadata dump")]
struct Args {
    /// Path to the model file
    #[arg(short, long)]
    model_path: PathBuf,

    /// Comma-separated input tensor dimensions (default: 1,207)
    #[arg(long, default_value = "1,207")]
    input_dims: String,

    /// Number of leading output values to print (default: 4)
    #[arg(long, default_value = "4")]
    preview: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    keymark::utils::init_tracing();

    let args = Args::parse();

    info!("Raw Session Example");

    if !args.model_path.exists() {
        error!("Model file not found: {}", args.model_path.display());
        return Err("Model file not found".into());
    }

    let model_name = args
        .model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown_model")
        .to_string();

    let mut session = load_session(&args.model_path)?;

    // Dump every input and output binding before running anything.
    let report = describe_session(&session, &model_name);
    println!("{report}");

    let input_name = report
        .inputs
        .first()
        .map(|binding| binding.name.clone())
        .ok_or("model exposes no inputs")?;
    let output_name = report
        .outputs
        .first()
        .map(|binding| binding.name.clone())
        .ok_or("model exposes no outputs")?;

    let dims = parse_dims(&args.input_dims)?;
    info!(
        "Running one forward pass: '{}' {:?} -> '{}'",
        input_name, dims, output_name
    );

    let input = ArrayD::<f32>::zeros(IxDyn(&dims));
    let dims_i64: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
    let data = input
        .as_slice()
        .ok_or("input tensor is not contiguous in memory")?;
    let input_tensor = TensorRef::from_array_view((dims_i64, data))?;

    let outputs = session.run(ort::inputs![input_name.as_str() => input_tensor])?;
    let (shape, values) = outputs[output_name.as_str()].try_extract_tensor::<f32>()?;

    println!("output '{}' shape: {:?}", output_name, shape);
    let preview: Vec<String> = values
        .iter()
        .take(args.preview)
        .map(|v| format!("{v}"))
        .collect();
    println!("first {} values: {}", preview.len(), preview.join(", "));

    Ok(())
}

/// Parses a comma-separated dimension list such as `1,207`.
fn parse_dims(raw: &str) -> Result<Vec<usize>, Box<dyn std::error::Error>> {
    let dims = raw
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid input dims '{}': {}", raw, e))?;

    if dims.is_empty() || dims.iter().any(|&d| d == 0) {
        return Err(format!("input dims must be non-empty and positive: '{}'", raw).into());
    }

    Ok(dims)
}
