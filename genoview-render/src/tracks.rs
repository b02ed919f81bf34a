//! Data rows stacked below the chromosome ruler.

use std::collections::BTreeMap;

use genoview_core::{ChromosomeReference, CopyNumberSegment, LayoutConfig, MutationSite};

use crate::ruler::{plot_chromosomes_with, RulerStyle};
use crate::surface::PlotSurface;
use crate::trace::{Font, PlotLayout, TextPosition, Trace};
use crate::RenderResult;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackStyle {
    pub mutation_color: String,
    pub label_font: Font,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            mutation_color: "#008000".to_string(),
            label_font: Font { color: "#000".to_string(), ..Font::default() },
        }
    }
}

/// One row of an overview chart
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    CopyNumber { label: String, segments: Vec<CopyNumberSegment> },
    Mutations { label: String, sites: Vec<MutationSite> },
}

impl Track {
    pub fn label(&self) -> &str {
        match self {
            Track::CopyNumber { label, .. } | Track::Mutations { label, .. } => label,
        }
    }
}

/// Draw copy-number segments into data row `row` of an initialized target.
///
/// Segments shorter than `config.min_segment_length` and segments on
/// chromosomes the reference does not have are skipped.
#[allow(clippy::too_many_arguments)]
pub fn plot_copy_number_row<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    reference: &ChromosomeReference,
    target: &str,
    row: usize,
    segments: &[CopyNumberSegment],
    label: &str,
    style: &TrackStyle,
) -> RenderResult<()> {
    let y0 = config.row_y_offset(row);
    let y1 = y0 + config.row_height;
    let mut drawn = 0usize;
    let mut skipped = 0usize;

    for seg in segments {
        if !reference.contains(seg.chromosome) {
            log::warn!(
                "Skipping segment on chromosome {} (reference has {})",
                seg.chromosome,
                reference.len()
            );
            skipped += 1;
            continue;
        }
        if seg.len() < config.min_segment_length {
            skipped += 1;
            continue;
        }

        let x0 = reference.pixel_x_of(seg.chromosome, seg.start, config);
        let x1 = reference.pixel_x_of(seg.chromosome, seg.end, config);
        surface.append_trace_and_redraw(
            target,
            Trace::rect(x0, y0, x1, y1, config.color_for_copy_number(seg.mean)),
        )?;
        drawn += 1;
    }

    append_row_label(surface, config, target, row, label, style)?;
    log::debug!("Row {}: drew {} segments, skipped {}", row, drawn, skipped);
    Ok(())
}

/// Draw binned mutation counts into data row `row` of an initialized target.
///
/// Mutations are grouped into bins `config.pixels_per_mutation_bin` pixels
/// wide; each non-empty bin becomes a bar scaled against the fullest bin.
#[allow(clippy::too_many_arguments)]
pub fn plot_mutation_row<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    reference: &ChromosomeReference,
    target: &str,
    row: usize,
    sites: &[MutationSite],
    label: &str,
    style: &TrackStyle,
) -> RenderResult<()> {
    let bin_width = config.pixels_per_mutation_bin;
    let last_bin = ((config.genome_track_width() / bin_width).ceil() as u64).saturating_sub(1);
    let mut bins: BTreeMap<u64, u32> = BTreeMap::new();

    for site in sites {
        let Ok(x) = reference.try_pixel_x_of(site.chromosome, site.position, config) else {
            log::warn!("Skipping mutation on unknown chromosome {}", site.chromosome);
            continue;
        };
        let bin = (((x - config.left_margin) / bin_width).floor().max(0.0) as u64).min(last_bin);
        *bins.entry(bin).or_insert(0) += 1;
    }

    let max_count = bins.values().copied().max().unwrap_or(0);
    let bottom = config.row_y_offset(row) + config.row_height;
    for (&bin, &count) in &bins {
        let x0 = config.left_margin + bin as f64 * bin_width;
        let height = config.row_height * count as f64 / max_count as f64;
        surface.append_trace_and_redraw(
            target,
            Trace::rect(x0, bottom - height, x0 + bin_width, bottom, style.mutation_color.clone()),
        )?;
    }

    append_row_label(surface, config, target, row, label, style)?;
    log::debug!("Row {}: {} mutations in {} bins", row, sites.len(), bins.len());
    Ok(())
}

/// Draw the ruler and every track, one row per track, into a fresh target.
pub fn render_overview<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    reference: &ChromosomeReference,
    target: &str,
    tracks: &[Track],
) -> RenderResult<()> {
    let layout = if tracks.is_empty() {
        PlotLayout::default()
    } else {
        PlotLayout::for_rows(config)
    };
    if tracks.len() > config.row_count {
        log::warn!(
            "{} tracks exceed the configured {} rows, the canvas will be cropped",
            tracks.len(),
            config.row_count
        );
    }

    plot_chromosomes_with(surface, config, reference, target, layout, &RulerStyle::default())?;

    let style = TrackStyle::default();
    for (row, track) in tracks.iter().enumerate() {
        match track {
            Track::CopyNumber { label, segments } => {
                plot_copy_number_row(surface, config, reference, target, row, segments, label, &style)?
            }
            Track::Mutations { label, sites } => {
                plot_mutation_row(surface, config, reference, target, row, sites, label, &style)?
            }
        }
    }

    log::info!("Rendered overview '{}' with {} tracks", target, tracks.len());
    Ok(())
}

fn append_row_label<S: PlotSurface + ?Sized>(
    surface: &mut S,
    config: &LayoutConfig,
    target: &str,
    row: usize,
    label: &str,
    style: &TrackStyle,
) -> RenderResult<()> {
    if label.is_empty() {
        return Ok(());
    }
    let y = config.row_y_offset(row) + config.row_height / 2.0;
    surface.append_trace_and_redraw(
        target,
        Trace::text(config.right_text_x(), y, label, TextPosition::MiddleRight, style.label_font.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn segment(chromosome: usize, start: u64, end: u64, mean: f64) -> CopyNumberSegment {
        CopyNumberSegment {
            sample: "s1".to_string(),
            chromosome,
            start,
            end,
            num_markers: None,
            mean,
        }
    }

    fn initialized() -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        surface.initialize_plot("t", Trace::Empty, PlotLayout::default()).unwrap();
        surface
    }

    fn rects(surface: &RecordingSurface) -> Vec<(f64, f64, f64, f64, String)> {
        surface
            .appended()
            .filter_map(|t| match t {
                Trace::Rect { x0, y0, x1, y1, fill } => Some((*x0, *y0, *x1, *y1, fill.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_copy_number_row_filters_short_and_unknown() {
        let config = LayoutConfig::new(2, 1200.0);
        let reference = ChromosomeReference::default();
        let mut surface = initialized();
        let segments = vec![
            segment(1, 0, 10_000_000, 2.0),
            segment(2, 100, 20_000, -2.0),
            segment(30, 0, 10_000_000, 0.5),
            segment(3, 5_000_000, 6_000_000, -0.5),
        ];

        plot_copy_number_row(&mut surface, &config, &reference, "t", 1, &segments, "s1", &TrackStyle::default())
            .unwrap();

        let drawn = rects(&surface);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].4, "#f00");
        assert_eq!(drawn[1].4, "rgb(196,196,255)");
        assert!((drawn[0].1 - config.row_y_offset(1)).abs() < 1e-9);
        assert!((drawn[0].3 - drawn[0].1 - config.row_height).abs() < 1e-9);
        assert_eq!(drawn[0].0, 25.0);

        let label = surface.appended().last().unwrap();
        assert!(matches!(label, Trace::Text { text, x, .. } if text == "s1" && *x == config.right_text_x()));
    }

    #[test]
    fn test_mutation_row_bins() {
        let config = LayoutConfig::new(1, 1200.0);
        let reference = ChromosomeReference::default();
        let mut surface = initialized();
        let sites = vec![
            MutationSite { chromosome: 1, position: 0 },
            MutationSite { chromosome: 1, position: 10 },
            MutationSite { chromosome: 1, position: 20 },
            MutationSite { chromosome: 17, position: 7_577_120 },
            MutationSite { chromosome: 99, position: 1 },
        ];

        plot_mutation_row(&mut surface, &config, &reference, "t", 0, &sites, "", &TrackStyle::default())
            .unwrap();

        let bars = rects(&surface);
        assert_eq!(bars.len(), 2);
        let bottom = config.row_y_offset(0) + config.row_height;
        // Fullest bin spans the whole row height, the single hit a third of it
        assert!((bars[0].1 - config.row_y_offset(0)).abs() < 1e-9);
        assert!((bars[1].3 - bottom).abs() < 1e-9);
        assert!((bottom - bars[1].1 - config.row_height / 3.0).abs() < 1e-9);
        assert_eq!(bars[0].2 - bars[0].0, config.pixels_per_mutation_bin);
        // Empty label draws nothing extra
        assert!(matches!(surface.appended().last().unwrap(), Trace::Rect { .. }));
    }

    #[test]
    fn test_mutation_at_track_end_stays_on_track() {
        let config = LayoutConfig::new(1, 1200.0);
        let reference = ChromosomeReference::default();
        let mut surface = initialized();
        let end_of_y = reference.length(24).unwrap();
        let sites = vec![MutationSite { chromosome: 24, position: end_of_y }];

        plot_mutation_row(&mut surface, &config, &reference, "t", 0, &sites, "", &TrackStyle::default())
            .unwrap();

        let bars = rects(&surface);
        assert_eq!(bars.len(), 1);
        assert!(bars[0].2 <= config.track_end_x() + 1e-9);
        assert!((bars[0].0 - (config.track_end_x() - config.pixels_per_mutation_bin)).abs() < 1e-9);
    }

    #[test]
    fn test_rows_require_initialized_target() {
        let config = LayoutConfig::default();
        let reference = ChromosomeReference::default();
        let mut surface = RecordingSurface::new();
        let result = plot_copy_number_row(
            &mut surface,
            &config,
            &reference,
            "nope",
            0,
            &[segment(1, 0, 1_000_000, 1.0)],
            "",
            &TrackStyle::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_render_overview() {
        let config = LayoutConfig::new(2, 1200.0);
        let reference = ChromosomeReference::default();
        let mut surface = RecordingSurface::new();
        let tracks = vec![
            Track::CopyNumber { label: "CNA".into(), segments: vec![segment(5, 0, 90_000_000, 0.9)] },
            Track::Mutations { label: "MUT".into(), sites: vec![MutationSite { chromosome: 2, position: 5 }] },
        ];

        render_overview(&mut surface, &config, &reference, "overview", &tracks).unwrap();

        let figure = surface.figure("overview").unwrap();
        assert_eq!(figure.layout, PlotLayout::for_rows(&config).with_shape(figure.layout.shapes[0].clone()));
        // ruler (49 appends) + segment + label + bar + label
        assert_eq!(figure.redraws, 49 + 4);
        assert_eq!(tracks[1].label(), "MUT");
    }
}
