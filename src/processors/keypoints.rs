//! Keypoint denormalization.
//!
//! Keypoint heads predict interleaved `[x0, y0, x1, y1, ...]` coordinates
//! normalized to `[0, 1]`. Mapping them onto an image multiplies each
//! coordinate by `dimension - 1`, so 1.0 lands on the last pixel.

use crate::core::errors::KeymarkError;
use crate::core::inference::TensorOutput;
use crate::processors::geometry::Point;

/// Maps interleaved normalized coordinates onto image pixel coordinates.
///
/// # Errors
///
/// Returns an error if `values` has an odd length or either image dimension
/// is zero.
pub fn denormalize_keypoints(
    values: &[f32],
    width: u32,
    height: u32,
) -> Result<Vec<Point>, KeymarkError> {
    if width == 0 || height == 0 {
        return Err(KeymarkError::invalid_input(format!(
            "image dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    if values.len() % 2 != 0 {
        return Err(KeymarkError::invalid_input(format!(
            "keypoint buffer length must be even, got {}",
            values.len()
        )));
    }

    let x_span = (width - 1) as f32;
    let y_span = (height - 1) as f32;

    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0] * x_span, pair[1] * y_span))
        .collect())
}

/// Extracts keypoints from a raw model output.
///
/// The output must be a 2D f32 tensor shaped `[1, 2K]`: one batch entry of
/// K interleaved coordinate pairs.
pub fn keypoints_from_output(
    output: &TensorOutput,
    width: u32,
    height: u32,
) -> Result<Vec<Point>, KeymarkError> {
    let shape = output.shape();
    if shape.len() != 2 {
        return Err(KeymarkError::invalid_input(format!(
            "expected 2D keypoint output, got {}D with shape {:?}",
            shape.len(),
            shape
        )));
    }
    if shape[0] != 1 {
        return Err(KeymarkError::invalid_input(format!(
            "expected batch size 1 in keypoint output, got {}",
            shape[0]
        )));
    }

    denormalize_keypoints(output.data(), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(shape: &[i64], data: Vec<f32>) -> TensorOutput {
        TensorOutput::F32 {
            shape: shape.to_vec(),
            data,
        }
    }

    #[test]
    fn denormalize_maps_unit_range_onto_last_pixel() {
        let points = denormalize_keypoints(&[0.0, 0.0, 1.0, 1.0], 256, 256).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(255.0, 255.0));
    }

    #[test]
    fn denormalize_uses_separate_spans_per_axis() {
        let points = denormalize_keypoints(&[0.5, 0.5], 101, 11).unwrap();
        assert!((points[0].x - 50.0).abs() < 1e-5);
        assert!((points[0].y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn denormalize_empty_is_empty() {
        let points = denormalize_keypoints(&[], 256, 256).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn denormalize_rejects_odd_length() {
        let err = denormalize_keypoints(&[0.1, 0.2, 0.3], 256, 256)
            .unwrap_err()
            .to_string();
        assert!(err.contains("even"));
    }

    #[test]
    fn denormalize_rejects_zero_dimensions() {
        assert!(denormalize_keypoints(&[0.5, 0.5], 0, 256).is_err());
        assert!(denormalize_keypoints(&[0.5, 0.5], 256, 0).is_err());
    }

    #[test]
    fn from_output_interleaves_pairs() {
        let t = output(&[1, 4], vec![0.0, 0.0, 0.5, 1.0]);
        let points = keypoints_from_output(&t, 256, 128).unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[1].x - 127.5).abs() < 1e-5);
        assert!((points[1].y - 127.0).abs() < 1e-5);
    }

    #[test]
    fn from_output_rejects_wrong_rank() {
        let t = output(&[4], vec![0.0; 4]);
        let err = keypoints_from_output(&t, 256, 256).unwrap_err().to_string();
        assert!(err.contains("2D"));
    }

    #[test]
    fn from_output_rejects_batched_results() {
        let t = output(&[2, 4], vec![0.0; 8]);
        let err = keypoints_from_output(&t, 256, 256).unwrap_err().to_string();
        assert!(err.contains("batch size 1"));
    }
}
