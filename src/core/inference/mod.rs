//! ONNX Runtime integration: session loading, the keypoint runner, raw
//! tensor outputs, and graph metadata reports.

pub mod describe;
pub mod runner;
pub mod session;
pub mod tensor_output;

pub use describe::{describe_session, element_type_name, ModelReport, TensorBinding};
pub use runner::KeypointRunner;
pub use session::{load_session, load_session_with};
pub use tensor_output::TensorOutput;
