//! Helpers for working directly with ONNX Runtime sessions.

use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::errors::KeymarkError;
use ort::logging::LogLevel;
use ort::session::{builder::SessionBuilder, Session};
use std::path::Path;

const LOAD_FAILURE: &str = "failed to load model into ONNX session";

/// Loads a session from a model file, logging at error level only.
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, KeymarkError> {
    load_session_with(
        model_path,
        |builder| builder.with_log_level(LogLevel::Error),
        Some("verify model file exists and is readable"),
    )
}

/// Loads a session after handing the builder to `configure_builder`.
///
/// Load failures are wrapped with the model path and, when given, a
/// remediation `suggestion`.
pub fn load_session_with<F>(
    model_path: impl AsRef<Path>,
    configure_builder: F,
    suggestion: Option<&str>,
) -> Result<Session, KeymarkError>
where
    F: FnOnce(SessionBuilder) -> Result<SessionBuilder, ort::Error>,
{
    let path = model_path.as_ref();
    let builder = configure_builder(Session::builder()?)?;
    builder
        .commit_from_file(path)
        .map_err(|e| KeymarkError::model_load_error(path, LOAD_FAILURE, suggestion, Some(e)))
}

/// Maps an [`OrtSessionConfig`] onto the session builder.
pub(crate) fn apply_session_config(
    mut builder: SessionBuilder,
    cfg: &OrtSessionConfig,
) -> Result<SessionBuilder, ort::Error> {
    if let Some(intra) = cfg.intra_threads {
        builder = builder.with_intra_threads(intra)?;
    }
    if let Some(inter) = cfg.inter_threads {
        builder = builder.with_inter_threads(inter)?;
    }
    if let Some(par) = cfg.parallel_execution {
        builder = builder.with_parallel_execution(par)?;
    }
    if let Some(level) = cfg.optimization_level {
        use ort::session::builder::GraphOptimizationLevel as GOL;
        let mapped = match level {
            OrtGraphOptimizationLevel::DisableAll => GOL::Disable,
            OrtGraphOptimizationLevel::Level1 => GOL::Level1,
            OrtGraphOptimizationLevel::Level2 => GOL::Level2,
            OrtGraphOptimizationLevel::Level3 => GOL::Level3,
            OrtGraphOptimizationLevel::All => GOL::Level3,
        };
        builder = builder.with_optimization_level(mapped)?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_session_rejects_missing_file() {
        let result = load_session("nonexistent_model.onnx");
        assert!(result.is_err());
    }
}
