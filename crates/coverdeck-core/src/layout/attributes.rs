/// Uniform 2D scale about an item's center, in row-major `[sx 0 tx; 0 sy ty]`
/// form so a renderer can apply it directly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub sx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl ScaleTransform {
    /// Scale by `scale` about `(cx, cy)`
    pub fn about_center(scale: f32, cx: f32, cy: f32) -> Self {
        Self {
            sx: scale,
            sy: scale,
            tx: cx * (1.0 - scale),
            ty: cy * (1.0 - scale),
        }
    }

    pub fn identity() -> Self {
        Self {
            sx: 1.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Apply the transform to a point
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.sx + self.tx, y * self.sy + self.ty)
    }
}

/// Derived render attributes for one item, recomputed fresh on every layout
/// pass and never persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAttributes {
    pub index: usize,
    pub scale: f32,
    pub alpha: f32,
    pub transform: ScaleTransform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform_fixes_points() {
        let t = ScaleTransform::identity();
        assert_eq!(t.apply(13.0, -4.0), (13.0, -4.0));
    }

    #[test]
    fn test_scale_about_center_fixes_the_center() {
        let t = ScaleTransform::about_center(0.8, 100.0, 50.0);
        let (x, y) = t.apply(100.0, 50.0);
        assert!((x - 100.0).abs() < 1e-4);
        assert!((y - 50.0).abs() < 1e-4);

        // A point one unit right of center moves 0.8 units right of center
        let (x, _) = t.apply(101.0, 50.0);
        assert!((x - 100.8).abs() < 1e-4);
    }
}
