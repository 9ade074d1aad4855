//! Description normalization.
//!
//! Walks the top-level nodes of a feature description and classifies each
//! as heading, paragraph, list, or bare text, producing a flat sequence of
//! styled line records. The walk is pure: nothing here touches a slide.
//!
//! Policies:
//! - bare text is kept when it is not whitespace
//! - `h1`..`h4` become one bold heading line; other heading levels are dropped
//! - an empty `<p>` is dropped rather than kept as a blank line
//! - lists are rendered by [`render_list`] at level 0
//! - anything else (line breaks, unknown blocks) yields nothing
//! - an empty result becomes a single placeholder line

use crate::images::extract_images;
use crate::inline::{flatten_text, split_runs};
use crate::list::{is_list, render_list};
use crate::types::{LineKind, LineRecord, Run, RunStyle};
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Paragraph spacing after a heading, in points.
pub const HEADING_SPACE_AFTER_PT: f32 = 8.0;

/// Paragraph spacing after a paragraph, in points.
pub const PARAGRAPH_SPACE_AFTER_PT: f32 = 6.0;

/// Placeholder text for a description with no visible content.
pub const DEFAULT_EMPTY_DESCRIPTION: &str = "The description is empty.";

/// A description split into text lines and image URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDescription {
    pub lines: Vec<LineRecord>,
    pub image_urls: Vec<String>,
}

/// Normalizer for feature description HTML.
#[derive(Debug, Clone)]
pub struct DescriptionNormalizer {
    /// Text of the line emitted when a description has no content.
    empty_placeholder: String,
}

impl Default for DescriptionNormalizer {
    fn default() -> Self {
        Self {
            empty_placeholder: DEFAULT_EMPTY_DESCRIPTION.to_string(),
        }
    }
}

impl DescriptionNormalizer {
    /// Create a normalizer with the default empty-description placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text used when a description is empty.
    pub fn with_empty_placeholder(mut self, text: impl Into<String>) -> Self {
        self.empty_placeholder = text.into();
        self
    }

    /// Separate images from `html` and normalize the rest into lines.
    pub fn normalize_description(&self, html: Option<&str>) -> NormalizedDescription {
        let extracted = extract_images(html);
        NormalizedDescription {
            lines: self.normalize(&extracted.cleaned_html),
            image_urls: extracted.urls,
        }
    }

    /// Normalize an image-free HTML fragment into line records.
    ///
    /// Never returns an empty sequence and never returns a blank line.
    pub fn normalize(&self, html: &str) -> Vec<LineRecord> {
        if html.trim().is_empty() {
            return vec![self.placeholder()];
        }

        let fragment = Html::parse_fragment(html);
        let mut lines = Vec::new();

        for node in fragment.root_element().children() {
            match node.value() {
                Node::Text(text) => {
                    if let Some(run) = Run::styled(text, &RunStyle::default()) {
                        lines.push(LineRecord::new(
                            LineKind::Paragraph,
                            0,
                            vec![run],
                            0.0,
                        ));
                    }
                }
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(node) {
                        lines.extend(normalize_block(element));
                    }
                }
                _ => {}
            }
        }

        lines.retain(|line| !line.is_blank());

        if lines.is_empty() {
            log::debug!("Description has no visible content; using placeholder");
            lines.push(self.placeholder());
        }

        lines
    }

    fn placeholder(&self) -> LineRecord {
        LineRecord::new(
            LineKind::Paragraph,
            0,
            vec![Run::plain(self.empty_placeholder.clone())],
            0.0,
        )
    }
}

/// Normalize one top-level element.
fn normalize_block(element: ElementRef<'_>) -> Vec<LineRecord> {
    match element.value().name() {
        "h1" | "h2" | "h3" | "h4" => {
            let text = flatten_text(element);
            Run::styled(&text, &RunStyle::default().bolded())
                .map(|run| {
                    LineRecord::new(LineKind::Heading, 0, vec![run], HEADING_SPACE_AFTER_PT)
                })
                .into_iter()
                .collect()
        }
        "p" => {
            if flatten_text(element).is_empty() {
                return Vec::new();
            }
            let runs = split_runs(element);
            if runs.is_empty() {
                return Vec::new();
            }
            vec![LineRecord::new(
                LineKind::Paragraph,
                0,
                runs,
                PARAGRAPH_SPACE_AFTER_PT,
            )]
        }
        _ if is_list(element) => render_list(element, 0),
        other => {
            log::debug!("Dropping top-level <{}>", other);
            Vec::new()
        }
    }
}
