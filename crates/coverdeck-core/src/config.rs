use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::ExtractorConfig;
use crate::layout::Axis;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            layout: LayoutConfig::default(),
            ui: UiConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory scanned for cover images
    #[serde(default = "default_covers_dir")]
    pub covers_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            covers_dir: default_covers_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Immutable carousel layout configuration
///
/// `side_scale` and `side_alpha` are the scale/opacity applied to items one
/// full slot away from the viewport center; items in between are linearly
/// interpolated toward 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Scale factor for side items, in (0, 1]
    #[serde(default = "default_side_scale")]
    pub side_scale: f32,
    /// Opacity for side items, in [0, 1]
    #[serde(default = "default_side_alpha")]
    pub side_alpha: f32,
    /// Requested gap between items before the scale correction
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Item width in layout units
    #[serde(default = "default_item_width")]
    pub item_width: f32,
    /// Item height in layout units
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    /// Scroll axis
    #[serde(default)]
    pub axis: Axis,
    /// Content inset before the first item along the scroll axis
    #[serde(default = "default_inset")]
    pub inset_leading: f32,
    /// Content inset after the last item along the scroll axis
    #[serde(default = "default_inset")]
    pub inset_trailing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_scale: default_side_scale(),
            side_alpha: default_side_alpha(),
            spacing: default_spacing(),
            item_width: default_item_width(),
            item_height: default_item_height(),
            axis: Axis::default(),
            inset_leading: default_inset(),
            inset_trailing: default_inset(),
        }
    }
}

impl LayoutConfig {
    /// Clamp the configured factors into their documented ranges
    pub fn validated(mut self) -> Self {
        self.side_scale = self.side_scale.clamp(f32::EPSILON, 1.0);
        self.side_alpha = self.side_alpha.clamp(0.0, 1.0);
        self.item_width = self.item_width.max(0.0);
        self.item_height = self.item_height.max(0.0);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Alpha applied to the extracted color before it becomes the backdrop
    #[serde(default = "default_backdrop_alpha")]
    pub backdrop_alpha: f32,
    /// Backdrop used when no color can be extracted, as "#rrggbb"
    #[serde(default = "default_backdrop_color")]
    pub default_backdrop: String,
    /// Scroll animation configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            backdrop_alpha: default_backdrop_alpha(),
            default_backdrop: default_backdrop_color(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Smooth scrolling configuration, shared between core and the TUI layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth settle animation
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing function
    #[serde(default)]
    pub easing: EasingType,
    /// Animation frame rate
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Easing function selection for the settle animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::Cubic
    }
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults when absent
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/coverdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("coverdeck")
            .join("config.toml")
    }
}

fn default_covers_dir() -> PathBuf {
    PathBuf::from("covers")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_side_scale() -> f32 {
    0.8
}

fn default_side_alpha() -> f32 {
    0.9
}

fn default_spacing() -> f32 {
    3.0
}

fn default_item_width() -> f32 {
    24.0
}

fn default_item_height() -> f32 {
    12.0
}

fn default_inset() -> f32 {
    2.0
}

fn default_tick_rate() -> u64 {
    250
}

fn default_backdrop_alpha() -> f32 {
    0.6
}

fn default_backdrop_color() -> String {
    "#282828".to_string()
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u32 {
    60
}
