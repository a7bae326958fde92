//! Carousel controller
//!
//! Thin glue between the layout engine, the cover list, and the color
//! extractor. Owns the viewport snapshot and the current backdrop, and hands
//! out generation-tagged extraction requests so that asynchronous extraction
//! results can be discarded when the centered cover has since changed
//! (single writer wins; stale results are ignored, never cancelled).

use std::sync::Arc;

use image::DynamicImage;

use crate::color::{Color, ExtractorConfig};
use crate::config::AppConfig;
use crate::covers::Cover;
use crate::layout::{ItemGeometry, LayoutEngine, Point, Size, Viewport, VisualAttributes};

/// Work order for one asynchronous color extraction
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub generation: u64,
    pub index: usize,
    pub image: Arc<DynamicImage>,
}

/// Current background theming state
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub color: Color,
    pub label: String,
}

pub struct CarouselController {
    covers: Vec<Cover>,
    engine: LayoutEngine,
    items: Vec<ItemGeometry>,
    viewport: Viewport,
    extractor: ExtractorConfig,
    backdrop_alpha: f32,
    default_color: Color,
    generation: u64,
    backdrop: Backdrop,
}

impl CarouselController {
    pub fn new(covers: Vec<Cover>, config: &AppConfig) -> Self {
        let engine = LayoutEngine::new(config.layout.clone());
        let items = engine.content_geometry(covers.len());
        let default_color =
            Color::from_hex(&config.ui.default_backdrop).unwrap_or(Color::new(0.0, 0.0, 0.0, 1.0));
        let backdrop = Backdrop {
            color: default_color,
            label: format!("default ({})", default_color.hex_string()),
        };

        Self {
            covers,
            engine,
            items,
            viewport: Viewport::default(),
            extractor: config.extractor.clone(),
            backdrop_alpha: config.ui.backdrop_alpha,
            default_color,
            generation: 0,
            backdrop,
        }
    }

    pub fn len(&self) -> usize {
        self.covers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }

    pub fn cover(&self, index: usize) -> Option<&Cover> {
        self.covers.get(index)
    }

    pub fn image_at(&self, index: usize) -> Option<Arc<DynamicImage>> {
        self.covers.get(index).and_then(|cover| cover.image.clone())
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn items(&self) -> &[ItemGeometry] {
        &self.items
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn extractor_config(&self) -> &ExtractorConfig {
        &self.extractor
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.size = size;
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.viewport.offset = offset;
    }

    /// Fresh render attributes for the current viewport
    pub fn visual_attributes(&self) -> Vec<VisualAttributes> {
        self.engine.visual_attributes(&self.viewport, &self.items)
    }

    /// Snap target for a proposed settle offset
    pub fn target_offset(&self, proposed: Point) -> Point {
        self.engine.target_offset(proposed, &self.viewport, &self.items)
    }

    /// Maximum along-axis scroll for the current viewport
    pub fn max_scroll(&self) -> f32 {
        self.engine.max_scroll(&self.viewport, self.covers.len())
    }

    /// Resting offset that centers the item at `index`
    pub fn offset_for_index(&self, index: usize) -> Point {
        match self.items.get(index) {
            Some(item) => {
                let axis = self.engine.config().axis;
                let mid = self.viewport.size.along(axis) / 2.0;
                self.viewport.offset.with_along(axis, (item.center - mid).floor())
            }
            None => self.viewport.offset,
        }
    }

    /// Index of the item whose bounds contain the viewport's visual center
    pub fn centered_index(&self) -> Option<usize> {
        self.engine.centered_index(&self.viewport, &self.items)
    }

    /// Record a settle at `offset` and decide what the backdrop should do
    ///
    /// Every settle bumps the generation, superseding any in-flight
    /// extraction. If the centered cover has an image, the caller gets a
    /// request to extract on a worker; a centered empty slot (or no centered
    /// item at all) resets the backdrop to the default immediately.
    pub fn settle(&mut self, offset: Point) -> Option<ExtractionRequest> {
        self.viewport.offset = offset;
        self.generation += 1;

        let index = match self.centered_index() {
            Some(index) => index,
            None => {
                self.reset_backdrop();
                return None;
            }
        };

        match self.image_at(index) {
            Some(image) => Some(ExtractionRequest {
                generation: self.generation,
                index,
                image,
            }),
            None => {
                self.reset_backdrop();
                None
            }
        }
    }

    /// Extraction request for the initially centered cover, before any scroll
    pub fn initial_request(&mut self) -> Option<ExtractionRequest> {
        let offset = self.offset_for_index(0);
        self.settle(offset)
    }

    /// Apply a completed extraction if it is still current
    ///
    /// Returns whether the backdrop changed. Results from a superseded
    /// generation are dropped; an extraction that produced no color falls
    /// back to the default backdrop.
    pub fn apply_extraction(&mut self, generation: u64, color: Option<Color>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale extraction result"
            );
            return false;
        }

        match color {
            Some(color) => {
                self.backdrop = Backdrop {
                    color: color.with_alpha(self.backdrop_alpha),
                    label: color.hex_string(),
                };
            }
            None => self.reset_backdrop(),
        }
        true
    }

    fn reset_backdrop(&mut self) {
        self.backdrop = Backdrop {
            color: self.default_color,
            label: format!("default ({})", self.default_color.hex_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn solid_cover(name: &str, rgba: [u8; 4]) -> Cover {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, image::Rgba(rgba)));
        Cover::new(name, Some(Arc::new(img)))
    }

    fn controller(covers: Vec<Cover>) -> CarouselController {
        let mut ctrl = CarouselController::new(covers, &AppConfig::default());
        ctrl.set_viewport_size(Size::new(333.0, 217.0));
        ctrl
    }

    #[test]
    fn test_settle_on_cover_requests_extraction() {
        let mut ctrl = controller(vec![
            solid_cover("a", [255, 0, 0, 255]),
            solid_cover("b", [0, 255, 0, 255]),
        ]);
        let offset = ctrl.offset_for_index(1);
        let request = ctrl.settle(offset).unwrap();
        assert_eq!(request.index, 1);
        assert_eq!(request.generation, 1);
    }

    #[test]
    fn test_settle_on_empty_slot_resets_backdrop() {
        let mut ctrl = controller(vec![solid_cover("a", [255, 0, 0, 255]), Cover::empty("b")]);
        let offset = ctrl.offset_for_index(1);
        assert!(ctrl.settle(offset).is_none());
        assert!(ctrl.backdrop().label.starts_with("default ("));
    }

    #[test]
    fn test_stale_extraction_is_dropped() {
        let mut ctrl = controller(vec![
            solid_cover("a", [255, 0, 0, 255]),
            solid_cover("b", [0, 255, 0, 255]),
        ]);
        let first = ctrl.settle(ctrl.offset_for_index(0)).unwrap();
        let second = ctrl.settle(ctrl.offset_for_index(1)).unwrap();

        // The older request completes after the newer one superseded it
        assert!(!ctrl.apply_extraction(first.generation, Some(Color::new(1.0, 0.0, 0.0, 1.0))));
        assert!(ctrl.apply_extraction(second.generation, Some(Color::new(0.0, 1.0, 0.0, 1.0))));
        assert_eq!(ctrl.backdrop().label, "#00ff00");
    }

    #[test]
    fn test_extracted_color_gets_backdrop_alpha() {
        let mut ctrl = controller(vec![solid_cover("a", [255, 0, 0, 255])]);
        let request = ctrl.settle(ctrl.offset_for_index(0)).unwrap();
        ctrl.apply_extraction(request.generation, Some(Color::new(1.0, 0.0, 0.0, 1.0)));
        assert!((ctrl.backdrop().color.a - 0.6).abs() < 1e-4);
        assert_eq!(ctrl.backdrop().label, "#ff0000");
    }

    #[test]
    fn test_failed_extraction_falls_back_to_default() {
        let mut ctrl = controller(vec![solid_cover("a", [255, 0, 0, 255])]);
        let request = ctrl.settle(ctrl.offset_for_index(0)).unwrap();
        assert!(ctrl.apply_extraction(request.generation, None));
        assert_eq!(ctrl.backdrop().color, Color::from_hex("#282828").unwrap());
    }

    #[test]
    fn test_empty_carousel_never_panics() {
        let mut ctrl = controller(vec![]);
        assert!(ctrl.settle(Point::new(0.0, 0.0)).is_none());
        assert!(ctrl.visual_attributes().is_empty());
        assert_eq!(ctrl.target_offset(Point::new(50.0, 0.0)), Point::new(50.0, 0.0));
        assert_eq!(ctrl.max_scroll(), 0.0);
    }

    #[test]
    fn test_initial_request_targets_first_cover() {
        let mut ctrl = controller(vec![
            solid_cover("a", [255, 0, 0, 255]),
            solid_cover("b", [0, 255, 0, 255]),
        ]);
        let request = ctrl.initial_request().unwrap();
        assert_eq!(request.index, 0);
    }
}
