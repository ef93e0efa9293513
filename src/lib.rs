//! # keymark
//!
//! A small demonstration kit for keypoint inference: load a frozen ONNX
//! graph, bind its input/output tensors by name, feed it image data, run a
//! forward pass, and read the predicted keypoints back to overlay them on the
//! image.
//!
//! Graph execution, tensor algebra, and image codecs stay in external
//! libraries (`ort`, `ndarray`, `image`); this crate only wires them together.
//!
//! ## Modules
//!
//! * [`core`] - Error handling, configuration, and the session wrapper
//! * [`processors`] - Pixel normalization and keypoint denormalization
//! * [`utils`] - Image loading, overlay drawing, and logging setup

pub mod core;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error handling
    pub use crate::core::{KeymarkError, KeymarkResult};

    // Session wrapper and configuration
    pub use crate::core::{KeypointRunner, ModelReport, RunnerConfig, TensorOutput};

    // Geometry
    pub use crate::processors::Point;

    // Processing
    pub use crate::processors::{keypoints_from_output, ChannelOrder, NormalizeImage};

    // Image utilities
    pub use crate::utils::{draw_keypoints, load_image, KeypointStyle};
}
