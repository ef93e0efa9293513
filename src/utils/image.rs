//! Utility functions for image loading and conversion.

use crate::core::KeymarkError;
use image::{DynamicImage, ImageBuffer, ImageError, ImageReader, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Batches larger than this are loaded in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image into RGB format while tolerating mismatched file
/// extensions.
///
/// The `image` crate guesses the decoder from the file extension by default,
/// which fails when users store JPEG bytes in a `.png` file (or vice versa).
/// This helper retries with format sniffing so the actual content determines
/// the decoder.
pub fn load_image(path: &Path) -> Result<RgbImage, KeymarkError> {
    load_dynamic_image(path)
        .map(dynamic_to_rgb)
        .map_err(KeymarkError::ImageLoad)
}

fn load_dynamic_image(path: &Path) -> Result<DynamicImage, ImageError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(err) if should_retry(&err) => {
            tracing::warn!(
                "Standard decode failed for {} ({err}). Retrying with format sniffing.",
                path.display()
            );
            decode_with_guessed_format(path)
        }
        Err(err) => Err(err),
    }
}

fn should_retry(err: &ImageError) -> bool {
    matches!(err, ImageError::Decoding(_) | ImageError::Unsupported(_))
}

fn decode_with_guessed_format(path: &Path) -> Result<DynamicImage, ImageError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let reader = ImageReader::new(reader).with_guessed_format()?;
    reader.decode()
}

/// Creates an RgbImage from raw pixel data.
///
/// The data must be in RGB format (3 bytes per pixel) and the length must
/// match the specified width and height; otherwise `None` is returned.
pub fn create_rgb_image(width: u32, height: u32, data: Vec<u8>) -> Option<RgbImage> {
    if data.len() != (width * height * 3) as usize {
        return None;
    }

    ImageBuffer::from_raw(width, height, data)
}

/// Loads a batch of images from file paths.
///
/// Uses parallel loading once the batch exceeds
/// [`DEFAULT_PARALLEL_THRESHOLD`].
pub fn load_images_batch<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
) -> Result<Vec<RgbImage>, KeymarkError> {
    if paths.len() > DEFAULT_PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        paths.par_iter().map(|p| load_image(p.as_ref())).collect()
    } else {
        paths.iter().map(|p| load_image(p.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn create_rgb_image_checks_length() {
        assert!(create_rgb_image(2, 2, vec![0u8; 12]).is_some());
        assert!(create_rgb_image(2, 2, vec![0u8; 11]).is_none());
    }

    #[test]
    fn load_image_rejects_missing_file() {
        let result = load_image(Path::new("nonexistent_image.png"));
        assert!(result.is_err());
    }

    #[test]
    fn load_images_batch_empty_is_ok() {
        let paths: [&Path; 0] = [];
        assert!(load_images_batch(&paths).unwrap().is_empty());
    }

    #[test]
    fn load_images_batch_propagates_missing_files() {
        // Above the parallel threshold, so the rayon path is exercised too.
        let paths: Vec<PathBuf> = (0..6)
            .map(|i| PathBuf::from(format!("nonexistent_{i}.png")))
            .collect();
        assert!(load_images_batch(&paths).is_err());
    }
}
