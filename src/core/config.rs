//! Configuration types for the session wrapper.

use crate::core::errors::KeymarkError;
use serde::{Deserialize, Serialize};

/// Graph optimization levels for ONNX Runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    Level3,
    /// Enable all optimizations (alias for Level3).
    All,
}

impl Default for OrtGraphOptimizationLevel {
    fn default() -> Self {
        Self::Level1
    }
}

/// Configuration for ONNX Runtime sessions.
///
/// All fields are optional; unset fields leave the runtime's defaults in
/// place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes.
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes.
    pub inter_threads: Option<usize>,
    /// Enable parallel execution mode.
    pub parallel_execution: Option<bool>,
    /// Graph optimization level.
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Enables or disables parallel execution mode.
    pub fn with_parallel_execution(mut self, parallel: bool) -> Self {
        self.parallel_execution = Some(parallel);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }
}

/// Configuration for a [`KeypointRunner`](crate::core::KeypointRunner).
///
/// The runner owns one load/run/drop cycle; everything it needs to resolve
/// its tensor bindings and size its input buffer is collected here before
/// the graph is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Explicit input tensor name. When absent the graph's first input is
    /// used.
    pub input_name: Option<String>,
    /// Explicit output tensor name. When absent the graph's first output is
    /// used.
    pub output_name: Option<String>,
    /// Shape of the input tensor, e.g. `[1, 256, 256, 3]`. The input buffer
    /// is sized by the product of these dimensions.
    pub input_shape: Vec<usize>,
    /// Model name used in diagnostics. Defaults to the model file stem.
    pub model_name: Option<String>,
    /// Run one forward pass on the zero-filled input buffer right after
    /// loading.
    pub warmup: bool,
    /// Optional ONNX Runtime session configuration.
    pub ort_session: Option<OrtSessionConfig>,
}

impl RunnerConfig {
    /// Creates a config with the given input shape and defaults everywhere
    /// else (auto-detected bindings, warmup enabled).
    pub fn new(input_shape: Vec<usize>) -> Self {
        Self {
            input_name: None,
            output_name: None,
            input_shape,
            model_name: None,
            warmup: true,
            ort_session: None,
        }
    }

    /// Sets the explicit input tensor name.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    /// Sets the explicit output tensor name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Sets the model name used in diagnostics.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Enables or disables the warmup pass.
    pub fn with_warmup(mut self, warmup: bool) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn with_ort_session(mut self, config: OrtSessionConfig) -> Self {
        self.ort_session = Some(config);
        self
    }

    /// The number of elements an input buffer of this shape holds.
    pub fn input_len(&self) -> usize {
        self.input_shape.iter().product()
    }

    /// Validates the configuration.
    ///
    /// The input shape must be non-empty and every dimension must be greater
    /// than zero, since the input buffer is sized by their product.
    pub fn validate(&self) -> Result<(), KeymarkError> {
        if self.input_shape.is_empty() {
            return Err(KeymarkError::config_error("input shape must not be empty"));
        }
        for (i, &dim) in self.input_shape.iter().enumerate() {
            if dim == 0 {
                return Err(KeymarkError::config_error(format!(
                    "input shape dimension {} must be greater than 0",
                    i
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_rank4_shape() {
        let config = RunnerConfig::new(vec![1, 256, 256, 3]);
        assert!(config.validate().is_ok());
        assert_eq!(config.input_len(), 256 * 256 * 3);
    }

    #[test]
    fn validate_rejects_empty_shape() {
        let config = RunnerConfig::new(vec![]);
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn validate_rejects_zero_dimension() {
        let config = RunnerConfig::new(vec![1, 0, 3]);
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("dimension 1"));
    }

    #[test]
    fn builder_setters_apply() {
        let config = RunnerConfig::new(vec![1, 207])
            .with_input_name("dense_input")
            .with_output_name("dense_out")
            .with_model_name("dense")
            .with_warmup(false);
        assert_eq!(config.input_name.as_deref(), Some("dense_input"));
        assert_eq!(config.output_name.as_deref(), Some("dense_out"));
        assert_eq!(config.model_name.as_deref(), Some("dense"));
        assert!(!config.warmup);
    }

    #[test]
    fn ort_session_builder_setters_apply() {
        let cfg = OrtSessionConfig::new()
            .with_intra_threads(2)
            .with_inter_threads(1)
            .with_parallel_execution(false)
            .with_optimization_level(OrtGraphOptimizationLevel::Level3);
        assert_eq!(cfg.intra_threads, Some(2));
        assert_eq!(cfg.inter_threads, Some(1));
        assert_eq!(cfg.parallel_execution, Some(false));
        assert!(matches!(
            cfg.optimization_level,
            Some(OrtGraphOptimizationLevel::Level3)
        ));
    }
}
