use std::path::Path;

use anyhow::Result;

use coverdeck_core::{color, AppConfig};

/// Print the extracted color of a single image
pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    match color::extract_from_path(path, &config.extractor)? {
        Some(color) => println!("{}", color.hex_string()),
        None => println!("no color (empty or fully transparent image)"),
    }

    Ok(())
}
