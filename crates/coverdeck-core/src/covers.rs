//! Cover loading
//!
//! Covers come from an external asset directory. A file that is missing or
//! cannot be decoded still produces a `Cover`, just with no image; empty
//! slots are valid everywhere downstream and must never fail rendering or
//! extraction.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;

use crate::Result;

/// One carousel entry
#[derive(Debug, Clone)]
pub struct Cover {
    pub name: String,
    pub image: Option<Arc<DynamicImage>>,
}

impl Cover {
    pub fn new(name: impl Into<String>, image: Option<Arc<DynamicImage>>) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    /// An entry with no decodable image
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Load covers from a directory, sorted by file name
///
/// Only the directory read itself can fail; individual files that do not
/// decode become empty slots with a warning.
pub fn load_covers(dir: &Path) -> Result<Vec<Cover>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let covers = paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("cover")
                .to_string();

            match image::open(&path) {
                Ok(img) => Cover::new(name, Some(Arc::new(img))),
                Err(e) => {
                    tracing::warn!("Failed to decode {}: {}", path.display(), e);
                    Cover::empty(name)
                }
            }
        })
        .collect();

    Ok(covers)
}
