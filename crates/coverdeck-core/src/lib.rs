pub mod carousel;
pub mod color;
pub mod config;
pub mod covers;
pub mod error;
pub mod layout;

pub use carousel::{Backdrop, CarouselController, ExtractionRequest};
pub use color::{Color, ExtractorConfig, ExtractorStrategy};
pub use config::{AppConfig, EasingType, LayoutConfig, ScrollConfig};
pub use covers::Cover;
pub use error::{Error, Result};
pub use layout::{Axis, ItemGeometry, LayoutEngine, Point, Size, Viewport, VisualAttributes};
