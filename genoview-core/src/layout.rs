//! Canvas geometry for genome overview charts.
//!
//! `LayoutConfig` holds the horizontal margins and row sizing of the chart and
//! derives every pixel position the renderers need from them. All derived
//! values are recomputed on demand.

use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, GenomeResult};

/// Copy-number color thresholds.
///
/// Magnitudes at or above `high` saturate to pure red/blue, magnitudes at or
/// below `low` render neutral white.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopyNumberThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for CopyNumberThresholds {
    fn default() -> Self {
        Self { low: 0.2, high: 1.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Number of data rows below the chromosome ruler
    #[serde(default = "default_row_count")]
    pub row_count: usize,

    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Space reserved left of the genome track
    #[serde(default = "default_left_margin")]
    pub left_margin: f64,

    /// Space reserved right of the genome track for row labels
    #[serde(default = "default_right_margin")]
    pub right_margin: f64,

    #[serde(default = "default_pixels_per_mutation_bin")]
    pub pixels_per_mutation_bin: f64,

    #[serde(default = "default_row_height")]
    pub row_height: f64,

    #[serde(default = "default_row_margin")]
    pub row_margin: f64,

    /// Negative values lift the ruler baseline above the row margin
    #[serde(default = "default_tick_height")]
    pub tick_height: f64,

    /// Segments shorter than this (bp) are not drawn
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: u64,

    #[serde(default)]
    pub copy_number_thresholds: CopyNumberThresholds,
}

fn default_row_count() -> usize { 1 }
fn default_canvas_width() -> f64 { 1200.0 }
fn default_left_margin() -> f64 { 25.0 }
fn default_right_margin() -> f64 { 35.0 }
fn default_pixels_per_mutation_bin() -> f64 { 3.0 }
fn default_row_height() -> f64 { 20.0 }
fn default_row_margin() -> f64 { 5.0 }
fn default_tick_height() -> f64 { -0.3 }
fn default_min_segment_length() -> u64 { 50_000 }

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(default_row_count(), default_canvas_width())
    }
}

impl LayoutConfig {
    /// Standard layout for `row_count` data rows on a canvas `canvas_width` pixels wide
    pub fn new(row_count: usize, canvas_width: f64) -> Self {
        Self {
            row_count,
            canvas_width,
            left_margin: default_left_margin(),
            right_margin: default_right_margin(),
            pixels_per_mutation_bin: default_pixels_per_mutation_bin(),
            row_height: default_row_height(),
            row_margin: default_row_margin(),
            tick_height: default_tick_height(),
            copy_number_thresholds: CopyNumberThresholds::default(),
            min_segment_length: default_min_segment_length(),
        }
    }

    /// Check the geometry before it reaches a renderer
    pub fn validate(&self) -> GenomeResult<()> {
        if !(self.genome_track_width() > 0.0) {
            return Err(GenomeError::InvalidLayout(format!(
                "genome track width must be positive (canvas {} - margins {} - {})",
                self.canvas_width, self.left_margin, self.right_margin
            )));
        }
        if self.row_height < 0.0 || self.row_margin < 0.0 {
            return Err(GenomeError::InvalidLayout(
                "row height and row margin must not be negative".to_string(),
            ));
        }
        if !(self.pixels_per_mutation_bin > 0.0) {
            return Err(GenomeError::InvalidLayout(
                "pixels per mutation bin must be positive".to_string(),
            ));
        }
        let th = self.copy_number_thresholds;
        if !(th.low >= 0.0 && th.low < th.high) {
            return Err(GenomeError::InvalidLayout(format!(
                "copy-number thresholds must satisfy 0 <= low < high (got {}, {})",
                th.low, th.high
            )));
        }
        Ok(())
    }

    /// Width of the drawable genome track between the margins
    pub fn genome_track_width(&self) -> f64 {
        self.canvas_width - self.left_margin - self.right_margin
    }

    /// Map a signed copy-number estimate to a CSS color.
    pub fn color_for_copy_number(&self, value: f64) -> String {
        let CopyNumberThresholds { low, high } = self.copy_number_thresholds;
        if value >= high {
            return "#f00".to_string();
        }
        if value <= -high {
            return "#00f".to_string();
        }
        // |value| <= low would exceed 255, clamp to neutral
        let c = (255.0 * (high - value.abs()) / (high - low))
            .round()
            .clamp(0.0, 255.0) as u8;
        if value < 0.0 {
            format!("rgb({},{},255)", c, c)
        } else {
            format!("rgb(255,{},{})", c, c)
        }
    }

    pub fn total_height(&self) -> f64 {
        self.row_y_offset(self.row_count)
    }

    /// Top edge of data row `row` (0-based)
    pub fn row_y_offset(&self, row: usize) -> f64 {
        2.0 * self.row_margin + self.tick_height + row as f64 * (self.row_height + self.row_margin)
    }

    /// Left edge of the labels drawn right of the genome track
    pub fn right_text_x(&self) -> f64 {
        self.left_margin + self.genome_track_width() + 5.0
    }

    /// Baseline of the chromosome ruler
    pub fn ruler_y(&self) -> f64 {
        self.row_margin + self.tick_height
    }

    /// Right end of the genome track
    pub fn track_end_x(&self) -> f64 {
        self.left_margin + self.genome_track_width()
    }
}
