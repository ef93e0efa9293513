//! The core module of the demo kit.
//!
//! This module contains the pieces every other part of the crate builds on:
//! - Error handling
//! - Runner and session configuration
//! - The ONNX Runtime session wrapper and its metadata helpers

pub mod config;
pub mod errors;
pub mod inference;

pub use config::{OrtGraphOptimizationLevel, OrtSessionConfig, RunnerConfig};
pub use errors::{KeymarkError, KeymarkResult, ProcessingStage};
pub use inference::{
    describe_session, element_type_name, load_session, KeypointRunner, ModelReport, TensorBinding,
    TensorOutput,
};
