//! Image references in description HTML, and the image fetch capability.

use crate::error::{Error, Result};
use image::{ImageFormat, ImageReader};
use regex::Regex;
use std::io::Cursor;
use std::sync::LazyLock;

/// Regex matching a whole `<img ...>` tag.
static IMG_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap());

/// Regex capturing the `src` attribute value of an image tag, in any quoting.
static IMG_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Image URLs pulled out of a description, and the description without them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedImages {
    /// Image URLs in document order, duplicates included.
    pub urls: Vec<String>,

    /// The HTML with every image tag removed.
    pub cleaned_html: String,
}

/// Collect image URLs from `html` and strip the image tags.
///
/// Tags without a usable `src` are still removed. No URL validation happens here.
pub fn extract_images(html: Option<&str>) -> ExtractedImages {
    let Some(html) = html else {
        return ExtractedImages::default();
    };

    let urls = IMG_TAG_REGEX
        .find_iter(html)
        .filter_map(|tag| {
            let caps = IMG_SRC_REGEX.captures(tag.as_str())?;
            let src = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            let src = src.as_str().trim();
            (!src.is_empty()).then(|| src.to_string())
        })
        .collect();

    ExtractedImages {
        urls,
        cleaned_html: IMG_TAG_REGEX.replace_all(html, "").into_owned(),
    }
}

/// A fetched and verified image.
#[derive(Debug, Clone)]
pub struct ImageResource {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ImageResource {
    /// Verify that `bytes` hold an image and read its pixel dimensions.
    ///
    /// Zero dimensions are passed through; placing such an image is a
    /// contract violation reported by the fitter.
    pub fn decode(url: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let url = url.into();

        let format = image::guess_format(&bytes)
            .map_err(|e| Error::image_unavailable(&url, format!("not an image: {}", e)))?;

        let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
            .into_dimensions()
            .map_err(|e| Error::image_unavailable(&url, format!("failed verification: {}", e)))?;

        Ok(Self {
            url,
            width,
            height,
            format,
            bytes,
        })
    }

    /// MIME type of the image.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Resolves an image URL to its bytes and dimensions.
///
/// Implementations own transport concerns (retries, timeouts, caching).
/// Any failure is reported as [`Error::ImageUnavailable`].
pub trait ImageSource {
    fn fetch(&self, url: &str) -> Result<ImageResource>;
}

/// An image source that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn fetch(&self, url: &str) -> Result<ImageResource> {
        Err(Error::image_unavailable(url, "no image source configured"))
    }
}
