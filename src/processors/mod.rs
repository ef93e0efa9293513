//! Image and output processing for the keypoint pipeline.

pub mod geometry;
pub mod keypoints;
pub mod normalization;

pub use geometry::Point;
pub use keypoints::{denormalize_keypoints, keypoints_from_output};
pub use normalization::{ChannelOrder, NormalizeImage};
