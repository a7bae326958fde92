use serde::{Deserialize, Serialize};

/// Scroll axis of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Horizontal
    }
}

/// Width/height pair in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component along the given scroll axis
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// 2D point or offset in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along the given scroll axis
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with the along-axis component replaced; the cross-axis component
    /// passes through unchanged
    #[inline]
    pub fn with_along(&self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(value, self.y),
            Axis::Vertical => Self::new(self.x, value),
        }
    }
}

/// Snapshot of the host scroll mechanism's viewport
///
/// Owned and mutated by the host on every scroll tick; the layout engine only
/// ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub size: Size,
    pub offset: Point,
}

impl Viewport {
    pub fn new(size: Size, offset: Point) -> Self {
        Self { size, offset }
    }
}

/// Un-transformed geometry of one carousel entry
///
/// `center` is the item center along the scroll axis in content coordinates.
/// Immutable once the content is laid out; content never reflows during a
/// scroll, only when the item count changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub index: usize,
    pub size: Size,
    pub center: f32,
}

impl ItemGeometry {
    pub fn new(index: usize, size: Size, center: f32) -> Self {
        Self {
            index,
            size,
            center,
        }
    }
}
