//! The session wrapper that owns one load/run/drop cycle.

use crate::core::config::RunnerConfig;
use crate::core::errors::KeymarkError;
use crate::core::inference::session::{apply_session_config, load_session_with};
use crate::core::inference::tensor_output::TensorOutput;
use ndarray::{ArrayD, IxDyn};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a frozen graph, binds its input and output tensors by name, and
/// executes forward passes against a held input buffer.
///
/// The runner owns its session, the resolved binding names, the current
/// input tensor and the most recent output for the duration of one
/// load/run/drop cycle. Dropping the runner releases the session and all
/// buffers.
///
/// The input buffer is replaced wholesale by [`set_input`](Self::set_input)
/// or [`set_input_slice`](Self::set_input_slice); it is never resized or
/// mutated in place.
pub struct KeypointRunner {
    session: Session,
    input_name: String,
    output_name: String,
    input: ArrayD<f32>,
    output: Option<TensorOutput>,
    input_shape: Vec<usize>,
    model_path: PathBuf,
    model_name: String,
}

impl std::fmt::Debug for KeypointRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypointRunner")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("input_shape", &self.input_shape)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl KeypointRunner {
    /// Loads the graph at `model_path` and resolves its tensor bindings.
    ///
    /// The input binding is the configured name when present (it must exist
    /// in the graph), otherwise the graph's first input. The output binding
    /// resolves the same way against the graph's outputs. The input buffer
    /// starts zero-filled with the configured shape; when `warmup` is set,
    /// one forward pass runs on it before this function returns.
    pub fn load(
        model_path: impl AsRef<Path>,
        config: RunnerConfig,
    ) -> Result<Self, KeymarkError> {
        config.validate()?;
        let path = model_path.as_ref();

        let session = load_session_with(
            path,
            |builder| {
                let builder = builder.with_log_level(LogLevel::Error)?;
                match &config.ort_session {
                    Some(cfg) => apply_session_config(builder, cfg),
                    None => Ok(builder),
                }
            },
            Some("verify model path and compatibility with the configured session options"),
        )?;

        let input_name = resolve_input_name(&session, config.input_name.as_deref())?;
        let output_name = resolve_output_name(&session, config.output_name.as_deref())?;

        let model_name = config
            .model_name
            .clone()
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "unknown_model".to_string());

        let input = ArrayD::zeros(IxDyn(&config.input_shape));

        let mut runner = KeypointRunner {
            session,
            input_name,
            output_name,
            input,
            output: None,
            input_shape: config.input_shape,
            model_path: path.to_path_buf(),
            model_name,
        };

        debug!(
            model = %runner.model_name,
            input = %runner.input_name,
            output = %runner.output_name,
            "resolved tensor bindings"
        );

        if config.warmup {
            debug!(model = %runner.model_name, "running warmup pass");
            runner.run()?;
        }

        Ok(runner)
    }

    /// Replaces the input buffer with `input`.
    ///
    /// The shape must match the configured input shape exactly.
    pub fn set_input(&mut self, input: ArrayD<f32>) -> Result<(), KeymarkError> {
        if input.shape() != self.input_shape.as_slice() {
            return Err(KeymarkError::invalid_input(format!(
                "input shape mismatch: expected {:?}, got {:?}",
                self.input_shape,
                input.shape()
            )));
        }
        self.input = input;
        Ok(())
    }

    /// Replaces the input buffer's contents from a flat slice.
    ///
    /// The length must equal the product of the configured input dimensions.
    pub fn set_input_slice(&mut self, values: &[f32]) -> Result<(), KeymarkError> {
        let expected = self.input.len();
        if values.len() != expected {
            return Err(KeymarkError::BufferSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        self.input = ArrayD::from_shape_vec(IxDyn(&self.input_shape), values.to_vec())?;
        Ok(())
    }

    /// Executes one forward pass on the current input buffer and stores the
    /// extracted output tensor.
    pub fn run(&mut self) -> Result<(), KeymarkError> {
        let dims: Vec<i64> = self.input.shape().iter().map(|&d| d as i64).collect();
        let data = self.input.as_slice().ok_or_else(|| {
            KeymarkError::invalid_input("input tensor is not contiguous in memory")
        })?;
        let input_tensor = TensorRef::from_array_view((dims, data))
            .map_err(|e| KeymarkError::tensor_operation("failed to create input tensor ref", e))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| {
                KeymarkError::inference_error(
                    &self.model_name,
                    &format!(
                        "forward pass with input '{}' -> output '{}'",
                        self.input_name, self.output_name
                    ),
                    e,
                )
            })?;

        let (shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                KeymarkError::inference_error(
                    &self.model_name,
                    &format!("failed to extract output '{}' as f32", self.output_name),
                    e,
                )
            })?;

        self.output = Some(TensorOutput::F32 {
            shape: shape.iter().copied().collect(),
            data: data.to_vec(),
        });

        Ok(())
    }

    /// The raw result of the most recent forward pass.
    pub fn output(&self) -> Result<&TensorOutput, KeymarkError> {
        self.output.as_ref().ok_or_else(|| {
            KeymarkError::invalid_input("no output available: no forward pass has completed")
        })
    }

    /// Dimensions of the most recent output tensor.
    pub fn output_shape(&self) -> Result<Vec<i64>, KeymarkError> {
        Ok(self.output()?.shape().to_vec())
    }

    /// Flat data of the most recent output tensor.
    pub fn output_data(&self) -> Result<&[f32], KeymarkError> {
        Ok(self.output()?.data())
    }

    /// The resolved input binding name.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// The resolved output binding name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// The configured input shape.
    pub fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    /// The path to the model file.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// The name of the model used in diagnostics.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn resolve_input_name(session: &Session, explicit: Option<&str>) -> Result<String, KeymarkError> {
    match explicit {
        Some(name) => {
            if session.inputs.iter().any(|input| input.name == name) {
                Ok(name.to_string())
            } else {
                let available: Vec<&str> =
                    session.inputs.iter().map(|i| i.name.as_str()).collect();
                Err(KeymarkError::config_error(format!(
                    "input '{}' not found in graph (available: {})",
                    name,
                    available.join(", ")
                )))
            }
        }
        None => session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| KeymarkError::config_error("model exposes no inputs")),
    }
}

fn resolve_output_name(session: &Session, explicit: Option<&str>) -> Result<String, KeymarkError> {
    match explicit {
        Some(name) => {
            if session.outputs.iter().any(|output| output.name == name) {
                Ok(name.to_string())
            } else {
                let available: Vec<&str> =
                    session.outputs.iter().map(|o| o.name.as_str()).collect();
                Err(KeymarkError::config_error(format!(
                    "output '{}' not found in graph (available: {})",
                    name,
                    available.join(", ")
                )))
            }
        }
        None => session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| KeymarkError::config_error("model exposes no outputs")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{OrtSessionConfig, RunnerConfig};

    #[test]
    fn load_rejects_missing_model_file() {
        let config = RunnerConfig::new(vec![1, 256, 256, 3]);
        let result = KeypointRunner::load("nonexistent_model.onnx", config);
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_invalid_config_before_touching_the_session() {
        let config = RunnerConfig::new(vec![]);
        let err = KeypointRunner::load("nonexistent_model.onnx", config)
            .unwrap_err()
            .to_string();
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn load_applies_session_config_before_failing_on_missing_file() {
        let config = RunnerConfig::new(vec![1, 207]).with_ort_session(
            OrtSessionConfig::new()
                .with_intra_threads(1)
                .with_optimization_level(crate::core::config::OrtGraphOptimizationLevel::Level1),
        );
        let result = KeypointRunner::load("nonexistent_model.onnx", config);
        assert!(result.is_err());
    }
}
