/*!
# Genoview Rendering

Draws genome overview charts through a [`PlotSurface`], the port every
drawing backend implements. The renderers never own a drawing surface; they
issue one `initialize_plot` per target followed by `append_trace_and_redraw`
calls, one per primitive.

## Layout

1. **Ruler**: baseline across the genome track, one tick per chromosome
   boundary plus a trailing tick, chromosome names centred on each span
2. **Rows**: copy-number segments and binned mutation counts, one row each,
   stacked below the ruler

## Surfaces

- [`RecordingSurface`]: keeps every call, for tests and inspection
- [`SvgSurface`]: deterministic SVG documents
- [`PlotlyFigureSurface`]: Plotly `{data, layout}` JSON figures
*/

use thiserror::Error;

pub mod trace;
pub mod surface;
pub mod ruler;
pub mod tracks;
pub mod vector_export;
pub mod plotly;

pub use trace::{Font, PlotLayout, Shape, Stroke, TextPosition, Trace};
pub use surface::{Figure, FigureStore, PlotSurface, RecordingSurface, SurfaceCall};
pub use ruler::{plot_chromosomes, plot_chromosomes_with, RulerStyle, DEFAULT_TARGET};
pub use tracks::{plot_copy_number_row, plot_mutation_row, render_overview, Track, TrackStyle};
pub use vector_export::{SvgOptions, SvgSurface};
pub use plotly::PlotlyFigureSurface;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Plot target '{0}' has not been initialized")]
    UnknownTarget(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Genome(#[from] genoview_core::GenomeError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
