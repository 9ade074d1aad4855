//! Slides, slide layouts, and decks.

use crate::region::{Region, RegionKind};
use deck_core::{Rect, RegionKey};
use serde::Serialize;

/// Width of a 16:9 slide in EMU.
pub const SLIDE_WIDTH_EMU: i64 = 12_192_000;

/// Height of a 16:9 slide in EMU.
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// A placeholder declared by a slide layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderSpec {
    pub idx: u32,
    pub kind: RegionKind,
    pub rect: Rect,
}

/// The set of placeholders a slide is created with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideLayout {
    pub name: String,
    pub placeholders: Vec<PlaceholderSpec>,
}

impl SlideLayout {
    /// The feature layout: title, description, image, and three link regions.
    pub fn feature_default() -> Self {
        let ph = |idx, kind, left, top, width, height| PlaceholderSpec {
            idx,
            kind,
            rect: Rect::new(left, top, width, height),
        };

        Self {
            name: "Feature".to_string(),
            placeholders: vec![
                ph(0, RegionKind::Title, 457_200, 274_638, 11_277_600, 758_952),
                ph(1, RegionKind::Body, 457_200, 1_143_000, 6_400_800, 4_572_000),
                ph(10, RegionKind::Picture, 7_086_600, 1_143_000, 4_648_200, 3_429_000),
                ph(11, RegionKind::Body, 457_200, 5_943_600, 3_429_000, 369_332),
                ph(12, RegionKind::Body, 4_114_800, 5_943_600, 3_429_000, 369_332),
                ph(13, RegionKind::Body, 7_772_400, 5_943_600, 3_429_000, 369_332),
            ],
        }
    }

    /// The section cover layout: a single centered title.
    pub fn section_default() -> Self {
        Self {
            name: "Section".to_string(),
            placeholders: vec![PlaceholderSpec {
                idx: 0,
                kind: RegionKind::Title,
                rect: Rect::new(838_200, 2_766_219, 10_515_600, 1_325_563),
            }],
        }
    }
}

/// Resolves region keys to writable regions.
pub trait SlideRegions {
    /// The region with `key`, if the slide has one.
    fn region_mut(&mut self, key: RegionKey) -> Option<&mut Region>;

    /// Every region on the slide.
    fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region>;
}

/// A slide created from a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub layout: String,
    pub regions: Vec<Region>,
}

impl Slide {
    /// Create a slide with one empty region per layout placeholder.
    pub fn from_layout(layout: &SlideLayout) -> Self {
        Self {
            layout: layout.name.clone(),
            regions: layout
                .placeholders
                .iter()
                .map(|ph| Region::new(RegionKey(ph.idx), ph.kind, ph.rect))
                .collect(),
        }
    }

    /// The region with `key`, if present.
    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == key)
    }
}

impl SlideRegions for Slide {
    fn region_mut(&mut self, key: RegionKey) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.key == key)
    }

    fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.iter_mut()
    }
}

/// An assembled deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}
