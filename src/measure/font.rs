//! Font metrics for the default measurement oracle

/// Metrics needed to estimate rendered text extents
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Line height in layout units
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 12pt Courier, the screenplay standard: fixed pitch
        let default_width = 7.2;
        let char_widths = vec![default_width; 128];

        Self {
            line_height: 16.0,
            char_widths,
            default_width,
        }
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }
}
