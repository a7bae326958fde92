//! Reduce a decoded image to a single representative color
//!
//! Two strategies are available:
//!
//! - `Mean` (default): alpha-weighted channel average over a downsampled copy
//!   of the image.
//! - `Dominant`: 5-bit-per-channel histogram with saturation-weighted counts,
//!   preferring vivid colors and skipping near-black/near-white pixels that
//!   are usually borders or background.
//!
//! Both are deterministic for identical pixel data and degrade to `None`
//! rather than failing: an empty buffer, a fully transparent image, or a
//! histogram with every pixel rejected all yield no color.

use image::{imageops, DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorStrategy {
    Mean,
    Dominant,
}

impl Default for ExtractorStrategy {
    fn default() -> Self {
        ExtractorStrategy::Mean
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Reduction strategy
    #[serde(default)]
    pub strategy: ExtractorStrategy,
    /// Maximum sampled dimension per side; larger images are downsampled
    #[serde(default = "default_max_sample_dim")]
    pub max_sample_dim: u32,
    /// Weight samples by their alpha channel
    #[serde(default = "default_alpha_weighted")]
    pub alpha_weighted: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strategy: ExtractorStrategy::default(),
            max_sample_dim: default_max_sample_dim(),
            alpha_weighted: default_alpha_weighted(),
        }
    }
}

fn default_max_sample_dim() -> u32 {
    64
}

fn default_alpha_weighted() -> bool {
    true
}

/// Extract a representative color from a decoded image
///
/// Pure function of the pixel data; safe to run on a worker thread against an
/// immutable snapshot. Returns `None` when the image carries no usable pixels.
pub fn extract(image: &DynamicImage, config: &ExtractorConfig) -> Option<Color> {
    let rgba = sample_buffer(image, config.max_sample_dim)?;

    match config.strategy {
        ExtractorStrategy::Mean => mean_color(&rgba, config.alpha_weighted),
        ExtractorStrategy::Dominant => dominant_color(&rgba),
    }
}

/// Decode an image file and extract its representative color
///
/// Decoding failures are real errors here, unlike the carousel path where an
/// undecodable cover degrades to an empty slot.
pub fn extract_from_path(path: &std::path::Path, config: &ExtractorConfig) -> crate::Result<Option<Color>> {
    let image = image::open(path)?;
    Ok(extract(&image, config))
}

/// Downsample to at most `max_dim` per side, preserving aspect ratio
fn sample_buffer(image: &DynamicImage, max_dim: u32) -> Option<RgbaImage> {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return None;
    }

    let max_dim = max_dim.max(1);
    if w <= max_dim && h <= max_dim {
        return Some(rgba);
    }

    let scale = (max_dim as f32 / w as f32).min(max_dim as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as u32).max(1);
    let new_h = ((h as f32 * scale).round() as u32).max(1);
    Some(imageops::resize(
        &rgba,
        new_w,
        new_h,
        imageops::FilterType::Triangle,
    ))
}

fn mean_color(rgba: &RgbaImage, alpha_weighted: bool) -> Option<Color> {
    let mut accum = [0f64; 3];
    let mut total = 0f64;

    for pixel in rgba.pixels() {
        let weight = if alpha_weighted {
            pixel[3] as f64 / 255.0
        } else {
            1.0
        };
        if weight <= 0.0 {
            continue;
        }
        total += weight;
        for c in 0..3 {
            accum[c] += pixel[c] as f64 * weight;
        }
    }

    if total <= f64::EPSILON {
        return None;
    }

    Some(Color::new(
        (accum[0] / (255.0 * total)) as f32,
        (accum[1] / (255.0 * total)) as f32,
        (accum[2] / (255.0 * total)) as f32,
        1.0,
    ))
}

fn dominant_color(rgba: &RgbaImage) -> Option<Color> {
    // Quantize into 5-bit buckets per channel (32^3 buckets), counting each
    // pixel with a saturation-derived weight.
    let mut buckets = vec![0u32; 32 * 32 * 32];

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 16 {
            continue;
        }

        let max = r.max(g).max(b) as i32;
        let min = r.min(g).min(b) as i32;
        let sum = r as i32 + g as i32 + b as i32;

        // Extreme blacks/whites are usually borders or background
        if sum <= 24 || sum >= 750 {
            continue;
        }

        let saturation = (max - min).max(0) as u32;
        let weight = 1 + saturation / 24;

        let idx = ((r >> 3) as usize) << 10 | ((g >> 3) as usize) << 5 | (b >> 3) as usize;
        buckets[idx] = buckets[idx].saturating_add(weight);
    }

    let (best_idx, best_count) = buckets
        .iter()
        .enumerate()
        .max_by_key(|&(_, count)| count)
        .unwrap_or((0, &0));
    if *best_count == 0 {
        return None;
    }

    // Bucket index back to the 8-bit bucket center
    let expand = |v5: u8| (v5 << 3) | (v5 >> 2);
    let r = expand(((best_idx >> 10) & 31) as u8);
    let g = expand(((best_idx >> 5) & 31) as u8);
    let b = expand((best_idx & 31) as u8);
    Some(Color::from_rgba8(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn test_mean_of_solid_red_is_exact() {
        let config = ExtractorConfig::default();
        for (w, h) in [(1, 1), (7, 3), (200, 120)] {
            let color = extract(&solid(w, h, [255, 0, 0, 255]), &config).unwrap();
            assert_eq!(color, Color::new(1.0, 0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_empty_buffer_yields_none() {
        let config = ExtractorConfig::default();
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(extract(&empty, &config).is_none());
    }

    #[test]
    fn test_fully_transparent_yields_none_when_alpha_weighted() {
        let config = ExtractorConfig::default();
        assert!(extract(&solid(4, 4, [200, 100, 50, 0]), &config).is_none());
    }

    #[test]
    fn test_alpha_ignored_when_unweighted() {
        let config = ExtractorConfig {
            alpha_weighted: false,
            ..Default::default()
        };
        let color = extract(&solid(4, 4, [0, 255, 0, 0]), &config).unwrap();
        assert_eq!(color.hex_string(), "#00ff00");
    }

    #[test]
    fn test_mean_of_half_red_half_blue() {
        let config = ExtractorConfig::default();
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let color = extract(&DynamicImage::ImageRgba8(img), &config).unwrap();
        assert!((color.r - 0.5).abs() < 1e-3);
        assert!((color.g - 0.0).abs() < 1e-3);
        assert!((color.b - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_dominant_prefers_majority_bucket() {
        let config = ExtractorConfig {
            strategy: ExtractorStrategy::Dominant,
            ..Default::default()
        };
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([200, 40, 40, 255]));
        img.put_pixel(0, 0, Rgba([40, 40, 200, 255]));
        let color = extract(&DynamicImage::ImageRgba8(img), &config).unwrap();
        // Dominant bucket is the red one
        assert!(color.r > color.b);
    }

    #[test]
    fn test_dominant_rejects_pure_black_and_white() {
        let config = ExtractorConfig {
            strategy: ExtractorStrategy::Dominant,
            ..Default::default()
        };
        assert!(extract(&solid(4, 4, [0, 0, 0, 255]), &config).is_none());
        assert!(extract(&solid(4, 4, [255, 255, 255, 255]), &config).is_none());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let config = ExtractorConfig::default();
        let mut img = RgbaImage::new(120, 90);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 2) as u8, (y * 2) as u8, ((x + y) % 255) as u8, 255]);
        }
        let img = DynamicImage::ImageRgba8(img);
        let first = extract(&img, &config).unwrap();
        let second = extract(&img, &config).unwrap();
        assert_eq!(first, second);
    }
}
