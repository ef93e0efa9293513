//! Error types for the demo kit.
//!
//! This module defines the errors that can occur while loading a graph,
//! binding tensors, running a forward pass, or preparing and drawing images.
//! Each external call's failure is wrapped once with context and propagated;
//! there is no retry or recovery.

use thiserror::Error;

/// Identifies which stage of processing an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred during tensor operations.
    TensorOperation,
    /// Error occurred during image normalization.
    Normalization,
    /// Error occurred during post-processing of model output.
    PostProcessing,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Errors that can occur in the keypoint demo pipeline.
#[derive(Error, Debug)]
pub enum KeymarkError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during inference.
    #[error("inference failed for model '{model}': {context}")]
    Inference {
        /// The model the forward pass was running against.
        model: String,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error indicating a buffer has the wrong size.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch {
        /// The expected number of elements.
        expected: usize,
        /// The actual number of elements.
        actual: usize,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for keymark operations.
pub type KeymarkResult<T> = Result<T, KeymarkError>;

impl KeymarkError {
    /// Creates an error for tensor operations with context.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::TensorOperation,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for normalization operations with context.
    pub fn normalization(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Normalization,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for post-processing operations with context.
    pub fn post_processing(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::PostProcessing,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an inference error carrying the model name and context.
    pub fn inference_error(
        model: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model: model.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an invalid-input error from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error from a message.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates an error for a model file that could not be loaded.
    ///
    /// Carries the model path and an optional remediation hint alongside the
    /// runtime's own error.
    pub fn model_load_error(
        path: &std::path::Path,
        context: &str,
        suggestion: Option<&str>,
        source: Option<ort::Error>,
    ) -> Self {
        let message = match suggestion {
            Some(hint) => format!("{} ({}): {}", context, path.display(), hint),
            None => format!("{} ({})", context, path.display()),
        };
        match source {
            Some(err) => Self::Processing {
                kind: ProcessingStage::Generic,
                context: message,
                source: Box::new(err),
            },
            None => Self::ConfigError { message },
        }
    }
}

impl From<image::ImageError> for KeymarkError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}
