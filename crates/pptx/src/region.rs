//! Content regions on a slide.

use deck_core::{FontSpec, ImagePlacement, Rect, RegionKey};
use serde::Serialize;

/// What a region is meant to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Title,
    Body,
    Picture,
    Other,
}

impl RegionKind {
    /// Map a PPTX placeholder type (`<p:ph type="..">`) to a region kind.
    pub fn from_placeholder_type(ph_type: Option<&str>) -> Self {
        match ph_type {
            Some("title") | Some("ctrTitle") => Self::Title,
            Some("pic") => Self::Picture,
            None | Some("body") | Some("obj") | Some("subTitle") => Self::Body,
            Some(_) => Self::Other,
        }
    }
}

/// A styled text run as written into a region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    pub hyperlink: Option<String>,
    pub font: FontSpec,
}

/// A paragraph inside a region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub level: usize,
    pub space_after_pt: f32,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// An image placed in a region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Picture {
    pub url: String,
    pub mime_type: String,
    pub placement: ImagePlacement,

    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// A rectangular content slot on a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub key: RegionKey,
    pub kind: RegionKind,
    pub rect: Rect,
    pub paragraphs: Vec<Paragraph>,
    pub pictures: Vec<Picture>,
}

impl Region {
    /// Create an empty region.
    pub fn new(key: RegionKey, kind: RegionKind, rect: Rect) -> Self {
        Self {
            key,
            kind,
            rect,
            paragraphs: Vec::new(),
            pictures: Vec::new(),
        }
    }

    /// Region text, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the region shows nothing: no picture and no visible text.
    pub fn is_blank(&self) -> bool {
        self.pictures.is_empty() && self.text().trim().is_empty()
    }

    /// Discard all paragraphs and pictures.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
        self.pictures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_placeholder_type() {
        assert_eq!(RegionKind::from_placeholder_type(Some("title")), RegionKind::Title);
        assert_eq!(RegionKind::from_placeholder_type(Some("ctrTitle")), RegionKind::Title);
        assert_eq!(RegionKind::from_placeholder_type(Some("pic")), RegionKind::Picture);
        assert_eq!(RegionKind::from_placeholder_type(None), RegionKind::Body);
        assert_eq!(RegionKind::from_placeholder_type(Some("sldNum")), RegionKind::Other);
    }

    #[test]
    fn test_blank_region() {
        let mut region = Region::new(RegionKey::TITLE, RegionKind::Title, Rect::default());
        assert!(region.is_blank());

        region.paragraphs.push(Paragraph {
            level: 0,
            space_after_pt: 0.0,
            runs: vec![TextRun {
                text: " ".to_string(),
                bold: false,
                underline: false,
                hyperlink: None,
                font: FontSpec::default(),
            }],
        });
        assert!(region.is_blank());
        assert_eq!(region.text(), " ");

        region.paragraphs[0].runs[0].text = "Title".to_string();
        assert!(!region.is_blank());

        region.clear();
        assert!(region.paragraphs.is_empty());
    }
}
