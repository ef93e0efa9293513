//! Pixel normalization into model input tensors.
//!
//! Converts an RGB image into a batched f32 tensor, scaling and shifting
//! each channel. The keypoint demo model takes plain `pixel / 255` values in
//! HWC order; the mean/std form is kept so other transforms stay one
//! constructor call away.

use crate::core::errors::KeymarkError;
use image::RgbImage;
use ndarray::Array4;

/// The order of channels in the produced tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelOrder {
    /// Channel, Height, Width order.
    CHW,
    /// Height, Width, Channel order.
    HWC,
}

/// Normalizes images into model input tensors.
///
/// Each output value is `pixel * alpha[c] + beta[c]`, with `alpha = scale /
/// std` and `beta = -mean / std` precomputed per channel at construction.
#[derive(Debug)]
pub struct NormalizeImage {
    /// Scaling factors for each channel (alpha = scale / std).
    pub alpha: Vec<f32>,
    /// Offset values for each channel (beta = -mean / std).
    pub beta: Vec<f32>,
    /// Channel ordering of the produced tensor.
    pub order: ChannelOrder,
}

impl NormalizeImage {
    /// Creates a new NormalizeImage instance with the specified parameters.
    ///
    /// Defaults: scale `1/255`, zero mean, unit std, HWC order.
    ///
    /// # Errors
    ///
    /// Returns an error if scale is not greater than 0, mean or std don't
    /// have exactly 3 elements, or any std value is not greater than 0.
    pub fn new(
        scale: Option<f32>,
        mean: Option<Vec<f32>>,
        std: Option<Vec<f32>>,
        order: Option<ChannelOrder>,
    ) -> Result<Self, KeymarkError> {
        let scale = scale.unwrap_or(1.0 / 255.0);
        let mean = mean.unwrap_or_else(|| vec![0.0, 0.0, 0.0]);
        let std = std.unwrap_or_else(|| vec![1.0, 1.0, 1.0]);
        let order = order.unwrap_or(ChannelOrder::HWC);

        if scale <= 0.0 {
            return Err(KeymarkError::config_error("Scale must be greater than 0"));
        }

        if mean.len() != 3 {
            return Err(KeymarkError::config_error(
                "Mean must have exactly 3 elements for RGB",
            ));
        }

        if std.len() != 3 {
            return Err(KeymarkError::config_error(
                "Std must have exactly 3 elements for RGB",
            ));
        }

        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(KeymarkError::config_error(format!(
                    "Standard deviation at index {i} must be greater than 0, got {s}"
                )));
            }
        }

        let alpha: Vec<f32> = std.iter().map(|s| scale / s).collect();
        let beta: Vec<f32> = mean.iter().zip(&std).map(|(m, s)| -m / s).collect();

        Ok(Self { alpha, beta, order })
    }

    /// The transform the keypoint demo model expects: `pixel / 255` in HWC
    /// order.
    pub fn for_keypoint_input() -> Result<Self, KeymarkError> {
        Self::new(None, None, None, Some(ChannelOrder::HWC))
    }

    /// Normalizes a single image into a batched 4D tensor.
    ///
    /// The result is `[1, H, W, 3]` for HWC order and `[1, 3, H, W]` for
    /// CHW order.
    pub fn normalize_to(&self, img: &RgbImage) -> Result<Array4<f32>, KeymarkError> {
        let (width, height) = img.dimensions();
        let channels = 3usize;
        let (width, height) = (width as usize, height as usize);

        match self.order {
            ChannelOrder::CHW => {
                let mut result = vec![0.0f32; channels * height * width];

                for c in 0..channels {
                    for y in 0..height {
                        for x in 0..width {
                            let pixel = img.get_pixel(x as u32, y as u32);
                            let channel_value = pixel[c] as f32;
                            let dst_idx = c * height * width + y * width + x;

                            result[dst_idx] = channel_value * self.alpha[c] + self.beta[c];
                        }
                    }
                }

                Array4::from_shape_vec((1, channels, height, width), result).map_err(|e| {
                    KeymarkError::normalization("failed to create CHW normalization tensor", e)
                })
            }
            ChannelOrder::HWC => {
                let mut result = vec![0.0f32; height * width * channels];

                for y in 0..height {
                    for x in 0..width {
                        let pixel = img.get_pixel(x as u32, y as u32);
                        for c in 0..channels {
                            let channel_value = pixel[c] as f32;
                            let dst_idx = y * width * channels + x * channels + c;

                            result[dst_idx] = channel_value * self.alpha[c] + self.beta[c];
                        }
                    }
                }

                Array4::from_shape_vec((1, height, width, channels), result).map_err(|e| {
                    KeymarkError::normalization("failed to create HWC normalization tensor", e)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn test_image() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([51, 102, 153]));
        img
    }

    #[test]
    fn hwc_shape_and_scaling() {
        let normalizer = NormalizeImage::for_keypoint_input().unwrap();
        let tensor = normalizer.normalize_to(&test_image()).unwrap();
        assert_eq!(tensor.shape(), &[1, 2, 2, 3]);

        // Top-left pixel is pure red.
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(tensor[[0, 0, 0, 1]], 0.0);
        assert_eq!(tensor[[0, 0, 0, 2]], 0.0);

        // Bottom-right pixel scales channel-wise.
        assert!((tensor[[0, 1, 1, 0]] - 51.0 / 255.0).abs() < 1e-6);
        assert!((tensor[[0, 1, 1, 1]] - 102.0 / 255.0).abs() < 1e-6);
        assert!((tensor[[0, 1, 1, 2]] - 153.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn chw_layout_transposes_channels() {
        let normalizer =
            NormalizeImage::new(None, None, None, Some(ChannelOrder::CHW)).unwrap();
        let tensor = normalizer.normalize_to(&test_image()).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 2, 2]);

        // Green channel of the top-right pixel.
        assert!((tensor[[0, 1, 0, 1]] - 1.0).abs() < 1e-6);
        // Blue channel of the bottom-left pixel.
        assert!((tensor[[0, 2, 1, 0]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mean_std_shift_applies() {
        let normalizer = NormalizeImage::new(
            Some(1.0),
            Some(vec![10.0, 10.0, 10.0]),
            Some(vec![2.0, 2.0, 2.0]),
            Some(ChannelOrder::HWC),
        )
        .unwrap();
        let tensor = normalizer.normalize_to(&test_image()).unwrap();
        // (255 - 10) / 2 for the red channel of the top-left pixel.
        assert!((tensor[[0, 0, 0, 0]] - 122.5).abs() < 1e-4);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let err = NormalizeImage::new(Some(0.0), None, None, None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Scale"));
    }

    #[test]
    fn rejects_wrong_channel_counts() {
        assert!(NormalizeImage::new(None, Some(vec![0.0; 2]), None, None).is_err());
        assert!(NormalizeImage::new(None, None, Some(vec![1.0; 4]), None).is_err());
    }

    #[test]
    fn rejects_non_positive_std() {
        let err = NormalizeImage::new(None, None, Some(vec![1.0, 0.0, 1.0]), None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("index 1"));
    }
}
