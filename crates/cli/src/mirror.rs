//! Image source backed by a local mirror directory.

use deck_core::{Error, ImageResource, ImageSource, Result};
use std::path::{Path, PathBuf};

/// Resolves image URLs to files in a directory of previously downloaded images.
///
/// A URL maps to the file named by its last path segment.
pub struct MirrorImageSource {
    root: PathBuf,
}

impl MirrorImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Local path for `image_url`, if the URL has a usable file name.
    pub fn path_for(&self, image_url: &str) -> Option<PathBuf> {
        let parsed = url::Url::parse(image_url).ok()?;
        let name = parsed.path_segments()?.next_back()?;
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(name))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for MirrorImageSource {
    fn fetch(&self, url: &str) -> Result<ImageResource> {
        let path = self
            .path_for(url)
            .ok_or_else(|| Error::image_unavailable(url, "URL has no file name"))?;

        let bytes = std::fs::read(&path).map_err(|e| {
            Error::image_unavailable(url, format!("{}: {}", path.display(), e))
        })?;

        log::debug!("Resolved {} to {}", url, path.display());
        ImageResource::decode(url, bytes)
    }
}
