//! Region writing.
//!
//! Every write is a full replace: a region's previous paragraphs and
//! pictures are discarded before the new content goes in, so repeated
//! writes never accumulate. A text write never leaves a region without
//! text; blank content becomes a single-space run.

use crate::region::{Paragraph, Picture, Region, TextRun};
use deck_core::{fit_image, FontSpec, ImagePlacement, ImageResource, LineRecord, Result};

/// Text written in place of empty content.
pub const BLANK_PLACEHOLDER: &str = " ";

/// Content for one region write.
#[derive(Debug, Clone)]
pub enum RegionContent {
    /// Normalized description lines.
    Lines(Vec<LineRecord>),

    /// A single string, optionally linked.
    Text {
        text: String,
        hyperlink: Option<String>,
    },

    /// Images fitted into the region, in order.
    Images(Vec<ImageResource>),
}

impl RegionContent {
    /// Unlinked text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            hyperlink: None,
        }
    }

    /// Text linking to `hyperlink`.
    pub fn link(text: impl Into<String>, hyperlink: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            hyperlink: Some(hyperlink.into()),
        }
    }
}

/// Writes content into regions with a fixed font.
#[derive(Debug, Clone, Default)]
pub struct RegionWriter {
    font: FontSpec,
}

impl RegionWriter {
    /// Create a writer using `font` for every run.
    pub fn new(font: FontSpec) -> Self {
        Self { font }
    }

    /// Replace the content of `region`.
    ///
    /// Returns the placements of any images written. An image the fitter
    /// rejects fails the write and leaves the region cleared.
    pub fn write(&self, region: &mut Region, content: RegionContent) -> Result<Vec<ImagePlacement>> {
        region.clear();

        match content {
            RegionContent::Lines(lines) => {
                region.paragraphs = lines.iter().map(|line| self.paragraph(line)).collect();
                region.paragraphs.retain(|p| !p.runs.is_empty());
                if region.paragraphs.is_empty() {
                    self.write_placeholder(region);
                }
                Ok(Vec::new())
            }
            RegionContent::Text { text, hyperlink } => {
                let text = text.trim();
                if text.is_empty() {
                    self.write_placeholder(region);
                } else {
                    region.paragraphs.push(Paragraph {
                        level: 0,
                        space_after_pt: 0.0,
                        runs: vec![self.run(text, false, false, hyperlink.as_deref())],
                    });
                }
                Ok(Vec::new())
            }
            RegionContent::Images(images) => {
                let mut placements = Vec::with_capacity(images.len());
                for image in images {
                    let placement = match fit_image(&region.rect, image.width, image.height) {
                        Ok(placement) => placement,
                        Err(e) => {
                            region.clear();
                            return Err(e);
                        }
                    };
                    log::debug!(
                        "Placing {} at ({}, {}) size {}x{}",
                        image.url,
                        placement.offset_x,
                        placement.offset_y,
                        placement.width,
                        placement.height
                    );
                    region.pictures.push(Picture {
                        mime_type: image.mime_type().to_string(),
                        url: image.url,
                        placement,
                        bytes: image.bytes,
                    });
                    placements.push(placement);
                }
                Ok(placements)
            }
        }
    }

    /// Write the single-space placeholder if `region` shows nothing.
    ///
    /// Returns true when the placeholder was written.
    pub fn fill_if_blank(&self, region: &mut Region) -> bool {
        if !region.is_blank() {
            return false;
        }
        log::trace!("Filling blank region {:?}", region.key);
        region.clear();
        self.write_placeholder(region);
        true
    }

    fn write_placeholder(&self, region: &mut Region) {
        region.paragraphs.push(Paragraph {
            level: 0,
            space_after_pt: 0.0,
            runs: vec![self.run(BLANK_PLACEHOLDER, false, false, None)],
        });
    }

    fn paragraph(&self, line: &LineRecord) -> Paragraph {
        Paragraph {
            level: line.level,
            space_after_pt: line.space_after_pt,
            runs: line
                .runs
                .iter()
                .filter(|r| !r.text.is_empty())
                .map(|r| self.run(&r.text, r.bold, r.underline, r.hyperlink.as_deref()))
                .collect(),
        }
    }

    fn run(&self, text: &str, bold: bool, underline: bool, hyperlink: Option<&str>) -> TextRun {
        // A link on invisible text is never attached.
        let hyperlink = hyperlink
            .map(str::trim)
            .filter(|h| !h.is_empty() && !text.trim().is_empty())
            .map(str::to_string);

        TextRun {
            text: text.to_string(),
            bold,
            underline,
            hyperlink,
            font: self.font.clone(),
        }
    }
}
