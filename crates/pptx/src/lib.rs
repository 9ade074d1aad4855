//! Slide-side of feature deck assembly.
//!
//! Holds slide regions and the writer that fills them, reads placeholder
//! geometry from PPTX templates, renders DrawingML text bodies, and
//! assembles whole decks from feature records.

pub mod deck;
pub mod drawingml;
pub mod layout;
pub mod region;
pub mod slide;
pub mod writer;

pub use deck::DeckBuilder;
pub use drawingml::{text_body, TextBody};
pub use layout::LayoutReader;
pub use region::{Paragraph, Picture, Region, RegionKind, TextRun};
pub use slide::{Deck, PlaceholderSpec, Slide, SlideLayout, SlideRegions};
pub use writer::{RegionContent, RegionWriter, BLANK_PLACEHOLDER};
