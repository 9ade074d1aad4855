//! Core domain types, configuration, and HTML content normalization for
//! assembling feature slide decks.

pub mod config;
pub mod error;
pub mod feature;
pub mod fit;
pub mod images;
pub mod inline;
pub mod list;
pub mod normalize;
pub mod types;

pub use config::{DeckConfig, FontSpec, Labels, Timeframe};
pub use error::{Error, Result};
pub use feature::{group_features, FeatureGroup, FeatureRecord};
pub use fit::fit_image;
pub use images::{extract_images, ExtractedImages, ImageResource, ImageSource, NoImages};
pub use normalize::{DescriptionNormalizer, NormalizedDescription};
pub use types::{ImagePlacement, LineKind, LineRecord, Rect, RegionKey, Run, RunStyle};
