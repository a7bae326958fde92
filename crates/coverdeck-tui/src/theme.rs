use coverdeck_core::Color as CoreColor;
use ratatui::style::Color;

/// Base palette for chrome around the carousel (Gruvbox-derived)
#[derive(Debug, Clone)]
pub struct Theme {
    /// Base background the backdrop is blended over
    pub bg_rgb: [u8; 3],
    pub bg1: Color,
    pub fg0: Color,
    pub grey: Color,
    pub yellow: Color,
    pub aqua: Color,
    pub red: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_rgb: [0x28, 0x28, 0x28],
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey: Color::Rgb(0x92, 0x83, 0x74),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            red: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}

impl Theme {
    pub fn bg0(&self) -> Color {
        let [r, g, b] = self.bg_rgb;
        Color::Rgb(r, g, b)
    }

    /// Resolve a backdrop color for the terminal
    ///
    /// Terminal cells have no alpha channel, so the color's alpha is applied
    /// here by blending toward the base background.
    pub fn backdrop(&self, color: &CoreColor) -> Color {
        let [r, g, b] = self.blend_rgb(color);
        Color::Rgb(r, g, b)
    }

    /// Alpha-blend a core color over the base background
    pub fn blend_rgb(&self, color: &CoreColor) -> [u8; 3] {
        let [r, g, b, _] = color.to_rgba8();
        let a = color.a.clamp(0.0, 1.0);
        let blend = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        [
            blend(r, self.bg_rgb[0]),
            blend(g, self.bg_rgb[1]),
            blend(b, self.bg_rgb[2]),
        ]
    }
}
