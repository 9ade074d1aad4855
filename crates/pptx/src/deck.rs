//! Deck assembly.
//!
//! Turns feature records into slides: one section cover per group followed
//! by one slide per feature. Description normalization is pure and runs in
//! parallel; region writes are applied sequentially in input order.

use crate::slide::{Deck, Slide, SlideLayout, SlideRegions};
use crate::writer::{RegionContent, RegionWriter};
use deck_core::{
    group_features, DeckConfig, DescriptionNormalizer, FeatureRecord, ImageResource, ImageSource,
    NormalizedDescription, RegionKey, Result,
};
use rayon::prelude::*;

/// Builds decks from feature records.
pub struct DeckBuilder<'a> {
    config: &'a DeckConfig,
    feature_layout: SlideLayout,
    section_layout: SlideLayout,
    normalizer: DescriptionNormalizer,
    text_writer: RegionWriter,
    link_writer: RegionWriter,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder using the given layouts for feature and section slides.
    pub fn new(
        config: &'a DeckConfig,
        feature_layout: SlideLayout,
        section_layout: SlideLayout,
    ) -> Self {
        Self {
            config,
            feature_layout,
            section_layout,
            normalizer: DescriptionNormalizer::new()
                .with_empty_placeholder(config.labels.empty_description.clone()),
            text_writer: RegionWriter::new(config.font.clone()),
            link_writer: RegionWriter::new(config.link_font.clone()),
        }
    }

    /// Create a builder with the built-in layouts.
    pub fn with_default_layouts(config: &'a DeckConfig) -> Self {
        Self::new(
            config,
            SlideLayout::feature_default(),
            SlideLayout::section_default(),
        )
    }

    /// Filter, group, and render `features` into a deck.
    ///
    /// With grouping on, each group gets a section cover followed by its
    /// feature slides; otherwise the deck is the feature slides alone. A
    /// slide that cannot be assembled is logged and left out; the rest of
    /// the deck is still produced.
    pub fn build(&self, features: Vec<FeatureRecord>, images: &dyn ImageSource) -> Deck {
        let total = features.len();
        let accepted: Vec<_> = features
            .into_iter()
            .filter(|f| self.config.accepts(f))
            .collect();
        log::info!("{} of {} features pass the filters", accepted.len(), total);

        let mut deck = Deck::new();

        if !self.config.group_by_initiative {
            self.push_feature_slides(&mut deck, &accepted, images);
            return deck;
        }

        for group in group_features(accepted, &self.config.labels.ungrouped) {
            if let Err(e) = self.add_section(&mut deck, &group.name) {
                log::error!("Skipping section cover for {}: {}", group.name, e);
            }
            self.push_feature_slides(&mut deck, &group.features, images);
        }

        deck
    }

    /// Normalize `features` in parallel, then append their slides in order.
    fn push_feature_slides(
        &self,
        deck: &mut Deck,
        features: &[FeatureRecord],
        images: &dyn ImageSource,
    ) {
        let descriptions: Vec<NormalizedDescription> = features
            .par_iter()
            .map(|f| {
                self.normalizer
                    .normalize_description(f.description_html.as_deref())
            })
            .collect();

        for (feature, description) in features.iter().zip(descriptions) {
            match self.feature_slide(feature, description, images) {
                Ok(slide) => deck.add_slide(slide),
                Err(e) => log::error!("Skipping feature {} ({}): {}", feature.id, feature.title, e),
            }
        }
    }

    /// Append the slide for one feature to `deck`.
    pub fn add_feature(
        &self,
        deck: &mut Deck,
        feature: &FeatureRecord,
        images: &dyn ImageSource,
    ) -> Result<()> {
        let description = self
            .normalizer
            .normalize_description(feature.description_html.as_deref());
        let slide = self.feature_slide(feature, description, images)?;
        deck.add_slide(slide);
        Ok(())
    }

    /// Append a section cover titled `name` to `deck`.
    pub fn add_section(&self, deck: &mut Deck, name: &str) -> Result<()> {
        let slide = self.section_slide(name)?;
        deck.add_slide(slide);
        Ok(())
    }

    fn section_slide(&self, name: &str) -> Result<Slide> {
        let mut slide = Slide::from_layout(&self.section_layout);
        self.write_text(&mut slide, RegionKey::TITLE, RegionContent::text(name))?;
        self.fill_blank_regions(&mut slide);
        Ok(slide)
    }

    fn feature_slide(
        &self,
        feature: &FeatureRecord,
        description: NormalizedDescription,
        images: &dyn ImageSource,
    ) -> Result<Slide> {
        let labels = &self.config.labels;
        let mut slide = Slide::from_layout(&self.feature_layout);

        self.write_text(&mut slide, RegionKey::TITLE, RegionContent::text(&feature.title))?;
        self.write_text(
            &mut slide,
            RegionKey::DESCRIPTION,
            RegionContent::Lines(description.lines),
        )?;

        if !description.image_urls.is_empty() {
            if let Some(region) = slide.region_mut(RegionKey::IMAGE) {
                let fetched: Vec<ImageResource> = description
                    .image_urls
                    .iter()
                    .take(self.config.images_per_slide())
                    .filter_map(|url| self.fetch_image(url, images))
                    .collect();
                if !fetched.is_empty() {
                    self.text_writer
                        .write(region, RegionContent::Images(fetched))?;
                }
            }
        }

        let external = match non_blank(&feature.external_link) {
            Some(link) => RegionContent::link(&labels.external_link, link),
            None => RegionContent::text(&labels.external_link_missing),
        };
        self.write_link(&mut slide, RegionKey::EXTERNAL_LINK, external)?;

        let cross_reference = match (
            non_blank(&feature.cross_reference_key),
            non_blank(&feature.cross_reference_url),
        ) {
            (Some(key), Some(url)) => RegionContent::link(key, url),
            _ => RegionContent::text(&labels.cross_reference_missing),
        };
        self.write_link(&mut slide, RegionKey::CROSS_REFERENCE, cross_reference)?;

        let requirements = match non_blank(&feature.requirements_link) {
            Some(link) => RegionContent::link(&labels.requirements, link),
            None => RegionContent::text(&labels.requirements_missing),
        };
        self.write_link(&mut slide, RegionKey::REQUIREMENTS, requirements)?;

        self.fill_blank_regions(&mut slide);
        Ok(slide)
    }

    fn fetch_image(&self, url: &str, images: &dyn ImageSource) -> Option<ImageResource> {
        if !self.config.allows_image_url(url) {
            log::warn!("Skipping image on a host that is not allowed: {}", url);
            return None;
        }

        match images.fetch(url) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Skipping image: {}", e);
                None
            }
        }
    }

    fn write_text<S: SlideRegions>(
        &self,
        slide: &mut S,
        key: RegionKey,
        content: RegionContent,
    ) -> Result<()> {
        match slide.region_mut(key) {
            Some(region) => self.text_writer.write(region, content).map(|_| ()),
            None => {
                log::debug!("Layout has no region {:?}", key);
                Ok(())
            }
        }
    }

    fn write_link<S: SlideRegions>(
        &self,
        slide: &mut S,
        key: RegionKey,
        content: RegionContent,
    ) -> Result<()> {
        match slide.region_mut(key) {
            Some(region) => self.link_writer.write(region, content).map(|_| ()),
            None => {
                log::debug!("Layout has no region {:?}", key);
                Ok(())
            }
        }
    }

    /// Write the blank placeholder into every region that shows nothing.
    fn fill_blank_regions<S: SlideRegions>(&self, slide: &mut S) {
        let mut filled = 0;
        for region in slide.regions_mut() {
            if self.text_writer.fill_if_blank(region) {
                filled += 1;
            }
        }
        if filled > 0 {
            log::debug!("Filled {} blank regions", filled);
        }
    }
}

/// The trimmed value, if there is one.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
