//! Aspect-preserving image placement.

use crate::error::{Error, Result};
use crate::types::{ImagePlacement, Rect};

/// Fit an image of `image_width` x `image_height` pixels into `region`.
///
/// The image is scaled to the largest size that fits without distortion and
/// centered on the unused axis, so it touches the region on its limiting
/// axis. Zero or negative dimensions are a contract violation and fail.
pub fn fit_image(region: &Rect, image_width: u32, image_height: u32) -> Result<ImagePlacement> {
    if region.width <= 0 || region.height <= 0 || image_width == 0 || image_height == 0 {
        return Err(Error::InvalidDimensions {
            region_width: region.width,
            region_height: region.height,
            image_width,
            image_height,
        });
    }

    let region_w = region.width as f64;
    let region_h = region.height as f64;
    let region_aspect = region_w / region_h;
    let image_aspect = image_width as f64 / image_height as f64;

    let (width, height) = if image_aspect > region_aspect {
        // Relatively wider: width-limited.
        let height = (region_w / image_aspect).round() as i64;
        (region.width, height.clamp(1, region.height))
    } else {
        let width = (region_h * image_aspect).round() as i64;
        (width.clamp(1, region.width), region.height)
    };

    Ok(ImagePlacement {
        offset_x: region.left + ((region.width - width) as f64 / 2.0).round() as i64,
        offset_y: region.top + ((region.height - height) as f64 / 2.0).round() as i64,
        width,
        height,
    })
}
