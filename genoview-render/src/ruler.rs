//! Chromosome ruler: baseline, boundary ticks and chromosome labels.

use genoview_core::{ChromosomeReference, LayoutConfig};

use crate::surface::PlotSurface;
use crate::trace::{Font, PlotLayout, Shape, Stroke, TextPosition, Trace};
use crate::RenderResult;

/// Target id used when the caller does not name one
pub const DEFAULT_TARGET: &str = "genomic-overview";

/// Label y sits this far above the ruler baseline
const LABEL_LIFT: f64 = 0.1;

/// Tick length in pixel layouts, where the row margin is only a few pixels
const PIXEL_TICK_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RulerStyle {
    pub stroke: Stroke,
    pub label_font: Font,
}

/// Draw the chromosome ruler into `target` using the fixed 1200x500 layout.
pub fn plot_chromosomes<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    reference: &ChromosomeReference,
    target: &str,
) -> RenderResult<()> {
    plot_chromosomes_with(surface, config, reference, target, PlotLayout::default(), &RulerStyle::default())
}

/// Draw the chromosome ruler into `target`, creating it with `layout`.
///
/// The baseline becomes a layout shape of the initial (empty) plot; every
/// tick and label is appended as its own trace.
pub fn plot_chromosomes_with<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    reference: &ChromosomeReference,
    target: &str,
    layout: PlotLayout,
    style: &RulerStyle,
) -> RenderResult<()> {
    config.validate()?;

    let y_ruler = config.ruler_y();
    let x_end = config.track_end_x();
    let tick_top = if layout.is_downward() {
        y_ruler - PIXEL_TICK_LENGTH
    } else {
        config.row_margin
    };

    let baseline = Shape::Line {
        x0: config.left_margin,
        y0: y_ruler,
        x1: x_end,
        y1: y_ruler,
        stroke: style.stroke.clone(),
    };
    surface.initialize_plot(target, Trace::Empty, layout.with_shape(baseline))?;

    for chromosome in reference.chromosomes() {
        let xt = reference.pixel_x_of(chromosome, 0, config);
        surface.append_trace_and_redraw(
            target,
            Trace::line(xt, y_ruler, xt, tick_top, style.stroke.clone()),
        )?;

        let xm = reference.midpoint_pixel_x(chromosome, config);
        surface.append_trace_and_redraw(
            target,
            Trace::text(
                xm,
                y_ruler + LABEL_LIFT,
                ChromosomeReference::display_name(chromosome),
                TextPosition::Top,
                style.label_font.clone(),
            ),
        )?;
    }

    surface.append_trace_and_redraw(
        target,
        Trace::line(x_end, y_ruler, x_end, tick_top, style.stroke.clone()),
    )?;

    log::debug!(
        "Plotted ruler for {} chromosomes into '{}'",
        reference.len(),
        target
    );
    Ok(())
}
