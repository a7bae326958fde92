//! Carousel layout engine
//!
//! Translates raw scroll positions into per-item render attributes (the
//! perspective "bouncing" effect) and into scroll-snap targets, without hard
//! paging. Everything here is pure: the engine never touches rendering
//! primitives and owns no mutable state beyond its immutable configuration.

pub mod attributes;
pub mod engine;
pub mod geometry;

pub use attributes::{ScaleTransform, VisualAttributes};
pub use engine::LayoutEngine;
pub use geometry::{Axis, ItemGeometry, Point, Size, Viewport};
