//! Domain types for normalized slide content.

use serde::{Deserialize, Serialize};

/// Inline styling inherited while splitting runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub underline: bool,
    pub hyperlink: Option<String>,
}

impl RunStyle {
    /// The same style with bold switched on.
    pub fn bolded(&self) -> Self {
        Self {
            bold: true,
            ..self.clone()
        }
    }

    /// The style of an anchor: underlined, linking to `href` when one is given.
    pub fn linked(&self, href: Option<&str>) -> Self {
        Self {
            bold: self.bold,
            underline: true,
            hyperlink: href
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string),
        }
    }

    /// The same style with underline switched on.
    pub fn underlined(&self) -> Self {
        Self {
            underline: true,
            ..self.clone()
        }
    }
}

/// A span of inline text sharing the same styling.
///
/// `text` is never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    pub hyperlink: Option<String>,
}

impl Run {
    /// Create a styled run from trimmed `text`, or `None` if nothing visible remains.
    pub fn styled(text: &str, style: &RunStyle) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            bold: style.bold,
            underline: style.underline,
            hyperlink: style.hyperlink.clone(),
        })
    }

    /// Create an unstyled run without trimming. Used for list prefixes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            underline: false,
            hyperlink: None,
        }
    }
}

/// What kind of source block a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Heading,
    Paragraph,
    ListItem,
}

/// One normalized output line with its nesting level and styled runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub kind: LineKind,

    /// List nesting depth; 0 for non-list lines.
    pub level: usize,

    pub runs: Vec<Run>,

    /// Paragraph spacing after this line, in points.
    pub space_after_pt: f32,
}

impl LineRecord {
    /// Create a line record.
    pub fn new(kind: LineKind, level: usize, runs: Vec<Run>, space_after_pt: f32) -> Self {
        Self {
            kind,
            level,
            runs,
            space_after_pt,
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// True when the runs carry no visible text.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A rectangle in slide units (EMU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Where an image lands inside a region, in the region's unit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub offset_x: i64,
    pub offset_y: i64,
    pub width: i64,
    pub height: i64,
}

/// Stable key of a content region on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionKey(pub u32);

impl RegionKey {
    pub const TITLE: RegionKey = RegionKey(0);
    pub const DESCRIPTION: RegionKey = RegionKey(1);
    pub const IMAGE: RegionKey = RegionKey(10);
    pub const EXTERNAL_LINK: RegionKey = RegionKey(11);
    pub const CROSS_REFERENCE: RegionKey = RegionKey(12);
    pub const REQUIREMENTS: RegionKey = RegionKey(13);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_run_trims_and_rejects_blank() {
        let style = RunStyle::default();
        assert_eq!(Run::styled("  hi ", &style).map(|r| r.text), Some("hi".to_string()));
        assert!(Run::styled(" \n\t ", &style).is_none());
        assert!(Run::styled("", &style).is_none());
    }

    #[test]
    fn test_linked_style_drops_empty_href() {
        let style = RunStyle::default().bolded();
        let linked = style.linked(Some("  "));
        assert!(linked.bold);
        assert!(linked.underline);
        assert_eq!(linked.hyperlink, None);

        let linked = RunStyle::default().linked(Some("https://example.com"));
        assert_eq!(linked.hyperlink.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_line_record_text_and_blank() {
        let line = LineRecord::new(
            LineKind::ListItem,
            1,
            vec![Run::plain("• "), Run::plain("Item")],
            0.0,
        );
        assert_eq!(line.text(), "• Item");
        assert!(!line.is_blank());

        let blank = LineRecord::new(LineKind::Paragraph, 0, vec![Run::plain("  ")], 0.0);
        assert!(blank.is_blank());
    }
}
