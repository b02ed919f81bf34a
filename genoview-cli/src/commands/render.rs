//! Render command implementation - draw the ruler and data rows to SVG or Plotly JSON

use anyhow::Result;
use genoview_core::io::{MutationParser, SegParser};
use genoview_core::{Assembly, ChromosomeReference, CopyNumberSegment, LayoutConfig};
use genoview_render::{render_overview, PlotlyFigureSurface, SvgOptions, SvgSurface, Track};
use std::path::{Path, PathBuf};

use super::{layout_for, reference_for};
use crate::config::{Config, OutputFormat};
use crate::error::CliError;

/// Options of `genoview render`; unset values fall back to the configuration
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    pub out: PathBuf,
    pub format: Option<OutputFormat>,
    pub assembly: Option<Assembly>,
    pub width: Option<f64>,
    pub rows: Option<usize>,
    pub seg: Option<PathBuf>,
    pub mutations: Option<PathBuf>,
    pub target: Option<String>,
    pub title: Option<String>,
}

pub fn execute(config: &Config, args: RenderArgs) -> Result<()> {
    log::info!("Starting overview rendering");
    log::info!("Output file: {}", args.out.display());

    let format = args
        .format
        .or(config.render.format)
        .unwrap_or_else(|| detect_format(&args.out));
    log::info!("Output format: {:?}", format);

    let assembly = args.assembly.unwrap_or(config.reference.assembly);
    let reference = reference_for(config, Some(assembly));

    let tracks = load_tracks(&reference, args.seg.as_deref(), args.mutations.as_deref())?;
    log::info!("Loaded {} tracks", tracks.len());

    let mut layout = layout_for(config, args.width)?;
    layout.row_count = args.rows.unwrap_or_else(|| tracks.len().max(layout.row_count));
    if layout.row_count < tracks.len() {
        return Err(CliError::invalid_argument(format!(
            "--rows {} is less than the {} loaded tracks",
            layout.row_count,
            tracks.len()
        ))
        .into());
    }

    let target = args.target.clone().unwrap_or_else(|| config.render.target.clone());

    match format {
        OutputFormat::Svg => {
            let options = SvgOptions {
                background_color: config.render.background_color.clone(),
                font_family: config.render.font_family.clone(),
                title: args.title.clone().or_else(|| config.render.title.clone()),
                provenance_comment: Some(build_provenance_comment(&args, assembly, &layout, &tracks)),
                show_footer: config.render.footer,
            };
            let mut surface = SvgSurface::new(options);
            render_overview(&mut surface, &layout, &reference, &target, &tracks).map_err(CliError::from)?;
            surface.write_svg(&target, &args.out).map_err(CliError::from)?;
        }
        OutputFormat::Json => {
            let mut surface = PlotlyFigureSurface::new();
            render_overview(&mut surface, &layout, &reference, &target, &tracks).map_err(CliError::from)?;
            surface.write_json(&target, &args.out).map_err(CliError::from)?;
        }
    }

    log::info!("Rendering complete: {}", args.out.display());
    Ok(())
}

/// Output format implied by the file extension, SVG unless it ends in `.json`
pub fn detect_format(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Svg,
    }
}

/// Read the optional input files into rows: one per `.seg` sample, then one for mutations
pub fn load_tracks(
    reference: &ChromosomeReference,
    seg: Option<&Path>,
    mutations: Option<&Path>,
) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();

    if let Some(path) = seg {
        ensure_exists(path)?;
        let segments = SegParser::parse_file(path, reference)?;
        log::info!("Read {} segments from {}", segments.len(), path.display());
        tracks.extend(group_by_sample(segments));
    }

    if let Some(path) = mutations {
        ensure_exists(path)?;
        let sites = MutationParser::parse_file(path, reference)?;
        log::info!("Read {} mutations from {}", sites.len(), path.display());
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mutations".to_string());
        tracks.push(Track::Mutations { label, sites });
    }

    Ok(tracks)
}

/// One copy-number track per sample, in order of first appearance
pub fn group_by_sample(segments: Vec<CopyNumberSegment>) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    for segment in segments {
        let existing = tracks.iter_mut().find_map(|track| match track {
            Track::CopyNumber { label, segments } if *label == segment.sample => Some(segments),
            _ => None,
        });
        match existing {
            Some(segments) => segments.push(segment),
            None => tracks.push(Track::CopyNumber {
                label: segment.sample.clone(),
                segments: vec![segment],
            }),
        }
    }

    tracks
}

fn ensure_exists(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::file_not_found(path.to_path_buf()))
    }
}

fn build_provenance_comment(
    args: &RenderArgs,
    assembly: Assembly,
    layout: &LayoutConfig,
    tracks: &[Track],
) -> String {
    let mut lines = vec![format!("genoview v{}", env!("CARGO_PKG_VERSION"))];
    lines.push(format!(
        "assembly={} width={} rows={}",
        assembly, layout.canvas_width, layout.row_count
    ));
    if let Some(seg) = &args.seg {
        lines.push(format!("seg={}", seg.display()));
    }
    if let Some(mutations) = &args.mutations {
        lines.push(format!("mutations={}", mutations.display()));
    }
    let labels: Vec<&str> = tracks.iter().map(Track::label).collect();
    if !labels.is_empty() {
        lines.push(format!("tracks={}", labels.join(",")));
    }
    lines.join("\n")
}
