//! Draw primitives and plot layout handed to a [`PlotSurface`](crate::PlotSurface).

use genoview_core::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Space above the ruler kept free for chromosome labels in pixel layouts
const LABEL_HEADROOM: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self { color: "#000".to_string(), width: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub color: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans serif".to_string(),
            size: 11.0,
            color: "#ff7f0e".to_string(),
        }
    }
}

/// Where a label sits relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    Top,
    MiddleRight,
}

impl TextPosition {
    /// Plotly `textposition` value
    pub fn as_plotly(&self) -> &'static str {
        match self {
            TextPosition::Top => "top",
            TextPosition::MiddleRight => "middle right",
        }
    }
}

/// One draw primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trace {
    /// Placeholder trace used to create a plot that only carries layout shapes
    Empty,
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stroke: Stroke,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        position: TextPosition,
        font: Font,
    },
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        fill: String,
    },
}

impl Trace {
    pub fn line(x0: f64, y0: f64, x1: f64, y1: f64, stroke: Stroke) -> Self {
        Trace::Line { x0, y0, x1, y1, stroke }
    }

    pub fn text<S: Into<String>>(x: f64, y: f64, text: S, position: TextPosition, font: Font) -> Self {
        Trace::Text { x, y, text: text.into(), position, font }
    }

    pub fn rect<S: Into<String>>(x0: f64, y0: f64, x1: f64, y1: f64, fill: S) -> Self {
        Trace::Rect { x0, y0, x1, y1, fill: fill.into() }
    }
}

/// Layout-level shapes drawn beneath all traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stroke: Stroke,
    },
}

/// Canvas size, axis ranges and chrome switches of a plot.
///
/// Ranges follow Plotly: `range.0` sits at the bottom (or left) edge and
/// `range.1` at the top (or right). `None` means data coordinates are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub width: u32,
    pub height: u32,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub show_tick_labels: bool,
    pub show_grid: bool,
    pub zero_line: bool,
    pub show_legend: bool,
    pub hover: bool,
    pub shapes: Vec<Shape>,
}

impl Default for PlotLayout {
    /// Fixed 1200x500 canvas with a `[0, 5]` y axis and all chrome hidden
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            x_range: None,
            y_range: Some((0.0, 5.0)),
            show_tick_labels: false,
            show_grid: false,
            zero_line: false,
            show_legend: false,
            hover: false,
            shapes: Vec::new(),
        }
    }
}

impl PlotLayout {
    /// Pixel-space layout sized to hold the ruler and every row of `config`.
    ///
    /// The y axis is reversed so row offsets grow downwards.
    pub fn for_rows(config: &LayoutConfig) -> Self {
        let height = config.total_height() + LABEL_HEADROOM;
        Self {
            width: config.canvas_width.ceil().max(1.0) as u32,
            height: height.ceil().max(1.0) as u32,
            y_range: Some((config.total_height(), -LABEL_HEADROOM)),
            ..Self::default()
        }
    }

    /// True when data y grows towards the bottom of the canvas
    pub fn is_downward(&self) -> bool {
        matches!(self.y_range, Some((bottom, top)) if bottom > top)
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Map a data x onto the canvas
    pub fn x_to_px(&self, x: f64) -> f64 {
        match self.x_range {
            Some((left, right)) if right != left => (x - left) / (right - left) * self.width as f64,
            _ => x,
        }
    }

    /// Map a data y onto the canvas, origin top-left
    pub fn y_to_px(&self, y: f64) -> f64 {
        match self.y_range {
            Some((bottom, top)) if top != bottom => (top - y) / (top - bottom) * self.height as f64,
            _ => y,
        }
    }
}
