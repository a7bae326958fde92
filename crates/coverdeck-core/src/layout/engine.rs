use crate::config::LayoutConfig;

use super::attributes::{ScaleTransform, VisualAttributes};
use super::geometry::{Axis, ItemGeometry, Point, Size, Viewport};

/// Pure carousel layout engine
///
/// Construct once from an immutable [`LayoutConfig`]; the effective line
/// spacing is derived at that point and never changes afterwards. All
/// operations are pure functions of their inputs and allocate only their
/// return values.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    line_spacing: f32,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        let config = config.validated();
        // Shrunk side items render smaller than their bounding box, so the
        // requested gap is reduced by the per-side scale offset. May go
        // negative, which tucks side items in toward the center.
        let side = Size::new(config.item_width, config.item_height).along(config.axis);
        let scaled_offset = (side - side * config.side_scale) / 2.0;
        let line_spacing = config.spacing - scaled_offset;

        Self {
            config,
            line_spacing,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Effective gap between adjacent item bounding boxes
    #[inline]
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Base (un-transformed) item size
    #[inline]
    pub fn item_size(&self) -> Size {
        Size::new(self.config.item_width, self.config.item_height)
    }

    /// Distance between adjacent item centers
    #[inline]
    fn step(&self) -> f32 {
        self.item_size().along(self.config.axis) + self.line_spacing
    }

    /// Lay out `count` items along the scroll axis
    ///
    /// Item centers start one inset plus half a side from the content origin
    /// and advance by one step each. Content never reflows during a scroll.
    pub fn content_geometry(&self, count: usize) -> Vec<ItemGeometry> {
        let size = self.item_size();
        let side = size.along(self.config.axis);
        let first_center = self.config.inset_leading + side / 2.0;
        let step = self.step();

        (0..count)
            .map(|index| ItemGeometry::new(index, size, first_center + index as f32 * step))
            .collect()
    }

    /// Total content length along the scroll axis for `count` items
    pub fn content_extent(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let side = self.item_size().along(self.config.axis);
        self.config.inset_leading
            + side
            + (count - 1) as f32 * self.step()
            + self.config.inset_trailing
    }

    /// Maximum along-axis scroll offset for `count` items in `viewport`
    pub fn max_scroll(&self, viewport: &Viewport, count: usize) -> f32 {
        (self.content_extent(count) - viewport.size.along(self.config.axis)).max(0.0)
    }

    /// Compute fresh render attributes for every item
    ///
    /// Runs on every scroll-position change. Scale and alpha are linear
    /// interpolations between the configured side values (at one slot away or
    /// further) and 1.0 (dead center); the transform scales uniformly about
    /// the item center.
    pub fn visual_attributes(
        &self,
        viewport: &Viewport,
        items: &[ItemGeometry],
    ) -> Vec<VisualAttributes> {
        let axis = self.config.axis;
        let collection_center = viewport.size.along(axis) / 2.0;
        let offset = viewport.offset.along(axis);
        let max_distance = self.step();

        items
            .iter()
            .map(|item| {
                let normalized_center = item.center - offset;
                let ratio = if max_distance <= 0.0 {
                    // Degenerate geometry; treat every item as centered
                    // instead of dividing by zero.
                    1.0
                } else {
                    let distance = (collection_center - normalized_center).abs().min(max_distance);
                    (max_distance - distance) / max_distance
                };

                let alpha = ratio * (1.0 - self.config.side_alpha) + self.config.side_alpha;
                let scale = ratio * (1.0 - self.config.side_scale) + self.config.side_scale;

                let (cx, cy) = match axis {
                    Axis::Horizontal => (item.center, item.size.height / 2.0),
                    Axis::Vertical => (item.size.width / 2.0, item.center),
                };

                VisualAttributes {
                    index: item.index,
                    scale,
                    alpha,
                    transform: ScaleTransform::about_center(scale, cx, cy),
                }
            })
            .collect()
    }

    /// Snap a proposed settle offset to the nearest item center
    ///
    /// Called by the host scroll mechanism at gesture end with its proposed
    /// inertial offset; the returned offset replaces it as the settle target.
    /// A single stable minimum scan picks the closest center; with an empty
    /// item list the proposal passes through untouched.
    pub fn target_offset(
        &self,
        proposed: Point,
        viewport: &Viewport,
        items: &[ItemGeometry],
    ) -> Point {
        let axis = self.config.axis;
        let mid_side = viewport.size.along(axis) / 2.0;
        let proposed_center = proposed.along(axis) + mid_side;

        let mut closest: Option<&ItemGeometry> = None;
        let mut best_distance = f32::INFINITY;
        for item in items {
            let distance = (item.center - proposed_center).abs();
            if distance < best_distance {
                best_distance = distance;
                closest = Some(item);
            }
        }

        match closest {
            Some(item) => proposed.with_along(axis, (item.center - mid_side).floor()),
            None => proposed,
        }
    }

    /// Resolve which item's bounds contain the viewport's visual center
    ///
    /// Used at settle to decide which cover drives the backdrop. Between
    /// items (possible mid-gesture) there may be no such item.
    pub fn centered_index(&self, viewport: &Viewport, items: &[ItemGeometry]) -> Option<usize> {
        let axis = self.config.axis;
        let visual_center = viewport.offset.along(axis) + viewport.size.along(axis) / 2.0;

        items
            .iter()
            .find(|item| (item.center - visual_center).abs() <= item.size.along(axis) / 2.0)
            .map(|item| item.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::geometry::Axis;

    fn spec_config() -> LayoutConfig {
        LayoutConfig {
            side_scale: 0.8,
            side_alpha: 0.9,
            spacing: 20.0,
            item_width: 266.0,
            item_height: 173.0,
            axis: Axis::Horizontal,
            inset_leading: 20.0,
            inset_trailing: 20.0,
        }
    }

    fn viewport(width: f32, offset_x: f32) -> Viewport {
        Viewport::new(Size::new(width, 200.0), Point::new(offset_x, 0.0))
    }

    #[test]
    fn test_line_spacing_formula() {
        let engine = LayoutEngine::new(spec_config());
        // 20 - (266 - 266*0.8)/2 = 20 - 26.6
        assert!((engine.line_spacing() - (-6.6)).abs() < 1e-3);
    }

    #[test]
    fn test_centered_item_is_full_scale() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(3);
        // Offset that puts item 1 exactly at the viewport center
        let vp_width = 333.0;
        let offset = items[1].center - vp_width / 2.0;
        let attrs = engine.visual_attributes(&viewport(vp_width, offset), &items);

        assert!((attrs[1].scale - 1.0).abs() < 1e-4);
        assert!((attrs[1].alpha - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_side_item_hits_configured_floor() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(5);
        let vp_width = 333.0;
        let offset = items[2].center - vp_width / 2.0;
        let attrs = engine.visual_attributes(&viewport(vp_width, offset), &items);

        // Neighbors are exactly one step (= max_distance) away
        assert!((attrs[1].scale - 0.8).abs() < 1e-4);
        assert!((attrs[1].alpha - 0.9).abs() < 1e-4);
        // Items beyond one slot never undershoot the floor
        assert!((attrs[0].scale - 0.8).abs() < 1e-4);
        assert!((attrs[4].alpha - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_attributes_stay_within_bounds() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(8);
        for tick in 0..50 {
            let offset = tick as f32 * 37.3;
            for attrs in engine.visual_attributes(&viewport(333.0, offset), &items) {
                assert!(attrs.scale >= 0.8 - 1e-4 && attrs.scale <= 1.0 + 1e-4);
                assert!(attrs.alpha >= 0.9 - 1e-4 && attrs.alpha <= 1.0 + 1e-4);
            }
        }
    }

    #[test]
    fn test_empty_items_yield_empty_attributes() {
        let engine = LayoutEngine::new(spec_config());
        let attrs = engine.visual_attributes(&viewport(333.0, 0.0), &[]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_degenerate_geometry_treated_as_centered() {
        let config = LayoutConfig {
            item_width: 0.0,
            spacing: 0.0,
            ..spec_config()
        };
        let engine = LayoutEngine::new(config);
        let items = vec![ItemGeometry::new(0, Size::new(0.0, 0.0), 0.0)];
        let attrs = engine.visual_attributes(&viewport(0.0, 0.0), &items);
        assert!((attrs[0].scale - 1.0).abs() < 1e-4);
        assert!((attrs[0].alpha - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_offset_snaps_to_nearest_center() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(5);
        let vp = viewport(333.0, 0.0);

        // A proposal slightly past item 2's resting offset snaps back to it
        let rest = items[2].center - 333.0 / 2.0;
        let snapped = engine.target_offset(Point::new(rest + 40.0, 0.0), &vp, &items);
        assert_eq!(snapped.x, rest.floor());
        assert_eq!(snapped.y, 0.0);
    }

    #[test]
    fn test_target_offset_is_idempotent() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(5);
        let vp = viewport(333.0, 0.0);

        let once = engine.target_offset(Point::new(412.7, 0.0), &vp, &items);
        let twice = engine.target_offset(once, &vp, &items);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_target_offset_passes_through_cross_axis() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(3);
        let vp = viewport(333.0, 0.0);

        let snapped = engine.target_offset(Point::new(100.0, 42.0), &vp, &items);
        assert_eq!(snapped.y, 42.0);
    }

    #[test]
    fn test_target_offset_empty_items_pass_through() {
        let engine = LayoutEngine::new(spec_config());
        let vp = viewport(333.0, 0.0);
        let proposed = Point::new(123.4, 5.0);
        assert_eq!(engine.target_offset(proposed, &vp, &[]), proposed);
    }

    #[test]
    fn test_centered_index_after_snap() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(5);
        let vp_width = 333.0;
        let mut vp = viewport(vp_width, 0.0);

        let snapped = engine.target_offset(Point::new(500.0, 0.0), &vp, &items);
        vp.offset = snapped;
        let index = engine.centered_index(&vp, &items).unwrap();
        // The snapped-to item contains the visual center
        assert!((items[index].center - (snapped.x + vp_width / 2.0)).abs() < 1.0);
    }

    #[test]
    fn test_centered_index_empty_items() {
        let engine = LayoutEngine::new(spec_config());
        assert_eq!(engine.centered_index(&viewport(333.0, 0.0), &[]), None);
    }

    #[test]
    fn test_content_extent_matches_last_item() {
        let engine = LayoutEngine::new(spec_config());
        let items = engine.content_geometry(4);
        let last = items.last().unwrap();
        let expected = last.center + 266.0 / 2.0 + 20.0;
        assert!((engine.content_extent(4) - expected).abs() < 1e-3);
        assert_eq!(engine.content_extent(0), 0.0);
    }

    #[test]
    fn test_vertical_axis_uses_height() {
        let config = LayoutConfig {
            axis: Axis::Vertical,
            ..spec_config()
        };
        let engine = LayoutEngine::new(config);
        // 20 - (173 - 173*0.8)/2 = 20 - 17.3
        assert!((engine.line_spacing() - 2.7).abs() < 1e-3);
    }
}
