//! Keypoint overlay drawing.
//!
//! Draws predicted keypoints onto an image as filled circles and writes the
//! overlaid image to disk. Points outside the image bounds are skipped.

use crate::core::KeymarkError;
use crate::processors::Point;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::path::Path;
use tracing::{debug, info};

const KEYPOINT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const DEFAULT_RADIUS: i32 = 2;

/// Styling for keypoint markers.
#[derive(Debug, Clone, Copy)]
pub struct KeypointStyle {
    /// Fill color of the markers.
    pub color: Rgb<u8>,
    /// Radius of the markers in pixels.
    pub radius: i32,
}

impl Default for KeypointStyle {
    fn default() -> Self {
        Self {
            color: KEYPOINT_COLOR,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl KeypointStyle {
    /// Creates a style with the default color and the given radius.
    pub fn with_radius(radius: i32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}

/// Draws filled circles at the given keypoints, in place.
///
/// Keypoints whose center falls outside the image are skipped.
pub fn draw_keypoints_mut(img: &mut RgbImage, keypoints: &[Point], style: &KeypointStyle) {
    let img_bounds = (img.width() as i32, img.height() as i32);

    for point in keypoints {
        let (x, y) = point.to_pixel();
        if is_point_in_bounds(x, y, img_bounds) {
            draw_filled_circle_mut(img, (x, y), style.radius, style.color);
        } else {
            debug!("skipping out-of-bounds keypoint at ({}, {})", x, y);
        }
    }
}

/// Returns a copy of the image with the keypoints drawn on it.
pub fn draw_keypoints(img: &RgbImage, keypoints: &[Point], style: &KeypointStyle) -> RgbImage {
    let mut output = img.clone();
    draw_keypoints_mut(&mut output, keypoints, style);
    output
}

/// Saves an overlaid image, logging the destination.
pub fn save_overlay(img: &RgbImage, output_path: &Path) -> Result<(), KeymarkError> {
    img.save(output_path)
        .map_err(|e| KeymarkError::post_processing("failed to encode overlay image", e))?;
    info!("Overlay saved to: {}", output_path.display());
    Ok(())
}

fn is_point_in_bounds(x: i32, y: i32, img_bounds: (i32, i32)) -> bool {
    let (img_width, img_height) = img_bounds;
    x >= 0 && y >= 0 && x < img_width && y < img_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_circle_at_keypoint() {
        let img = RgbImage::new(16, 16);
        let style = KeypointStyle::default();
        let out = draw_keypoints(&img, &[Point::new(8.0, 8.0)], &style);

        assert_eq!(out.get_pixel(8, 8), &KEYPOINT_COLOR);
        // A pixel inside the radius is filled too.
        assert_eq!(out.get_pixel(9, 8), &KEYPOINT_COLOR);
        // A pixel well outside the radius is untouched.
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn skips_out_of_bounds_keypoints() {
        let img = RgbImage::new(8, 8);
        let style = KeypointStyle::default();
        let out = draw_keypoints(
            &img,
            &[Point::new(-3.0, 4.0), Point::new(4.0, 100.0)],
            &style,
        );

        // Nothing was drawn.
        assert!(out.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn original_image_is_untouched() {
        let img = RgbImage::new(8, 8);
        let style = KeypointStyle::default();
        let _ = draw_keypoints(&img, &[Point::new(4.0, 4.0)], &style);
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
