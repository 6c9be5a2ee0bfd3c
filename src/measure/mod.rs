//! Measurement coordinator wrapping the host's measurement oracle

mod font;

pub use font::FontMetrics;

use crate::document::{BlockContent, BlockKind};
use thiserror::Error;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Errors an oracle may signal while measuring
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("measurement surface unavailable")]
    SurfaceUnavailable,
    #[error("measurement failed: {0}")]
    Oracle(String),
}

/// Reusable off-screen scratch surface shared by all measurement calls.
///
/// Oracles render serialized content into it; the coordinator fully resets
/// it between calls.
#[derive(Debug, Default)]
pub struct MeasureSurface {
    buf: String,
}

impl MeasureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any content left by the previous measurement
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Render text into the surface
    pub fn set_text(&mut self, text: &str) {
        self.buf.clear();
        self.buf.push_str(text);
    }

    /// The currently rendered text
    pub fn text(&self) -> &str {
        &self.buf
    }
}

/// The external measurement capability.
///
/// Must be deterministic for identical `(content, width)` pairs under a
/// stable rendering environment. Allowed to be expensive; the engine caches
/// results per block.
pub trait MeasureOracle {
    /// Render `content` into `surface` at `width` and report its height
    fn measure(
        &mut self,
        surface: &mut MeasureSurface,
        kind: BlockKind,
        content: &BlockContent,
        width: f32,
    ) -> Result<f32, MeasureError>;
}

/// Coordinator that owns the oracle and the shared scratch surface.
///
/// A failed measurement degrades to a height of zero rather than aborting
/// the pass: a visually imperfect break beats a crash.
pub struct HeightMeasurer {
    oracle: Box<dyn MeasureOracle>,
    surface: MeasureSurface,
    width: f32,
}

impl HeightMeasurer {
    pub fn new(oracle: Box<dyn MeasureOracle>, width: f32) -> Self {
        Self {
            oracle,
            surface: MeasureSurface::new(),
            width,
        }
    }

    /// Coordinator with the built-in metrics oracle
    pub fn with_default_oracle(width: f32) -> Self {
        Self::new(Box::new(MetricsOracle::default()), width)
    }

    /// The render width measurements are taken at
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Update the render width (e.g. after the host surface resizes)
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Measure a block's rendered height
    pub fn measure(&mut self, kind: BlockKind, content: &BlockContent) -> f32 {
        self.surface.reset();
        match self
            .oracle
            .measure(&mut self.surface, kind, content, self.width)
        {
            Ok(height) => height,
            Err(err) => {
                log::warn!("measurement degraded to zero height: {err}");
                0.0
            }
        }
    }
}

/// Default oracle: estimates heights from font metrics and Unicode line
/// breaking, without a host renderer.
#[derive(Debug, Default)]
pub struct MetricsOracle {
    metrics: FontMetrics,
}

impl MetricsOracle {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    fn segment_width(&self, segment: &str) -> f32 {
        segment
            .graphemes(true)
            .map(|g| g.chars().map(|c| self.metrics.width(c)).sum::<f32>())
            .sum()
    }

    fn line_count(&self, text: &str, max_width: f32) -> usize {
        if text.is_empty() {
            return 1;
        }

        let mut lines = 1;
        let mut x = 0.0;
        let mut prev = 0;

        for (idx, opportunity) in linebreaks(text) {
            let width = self.segment_width(&text[prev..idx]);
            prev = idx;

            if x > 0.0 && x + width > max_width {
                lines += 1;
                x = 0.0;
            }
            // A segment wider than the line overflows onto further lines
            if width > max_width {
                lines += (width / max_width).ceil() as usize - 1;
                x = width % max_width;
            } else {
                x += width;
            }

            if opportunity == BreakOpportunity::Mandatory && idx < text.len() {
                lines += 1;
                x = 0.0;
            }
        }

        lines
    }
}

impl MeasureOracle for MetricsOracle {
    fn measure(
        &mut self,
        surface: &mut MeasureSurface,
        kind: BlockKind,
        content: &BlockContent,
        width: f32,
    ) -> Result<f32, MeasureError> {
        surface.set_text(content.text());

        let column = width * kind.width_fraction();
        if column <= 0.0 {
            return Err(MeasureError::Oracle(format!(
                "non-positive column width {column}"
            )));
        }

        let lines = self.line_count(surface.text(), column);
        Ok(kind.top_margin() + lines as f32 * self.metrics.line_height)
    }
}
