//! Locate command: map between pixel x, genome fraction and chromosome position

use anyhow::Result;
use genoview_core::{Assembly, ChromIndex, ChromosomeReference, GenomicPos, LayoutConfig, Locus};

use super::{layout_for, reference_for};
use crate::config::Config;
use crate::error::{CliError, CliResult};

/// What the user asked to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Pixel(f64),
    Fraction(f64),
    Position { chrom: String, pos: GenomicPos },
}

impl Query {
    pub fn from_args(
        x: Option<f64>,
        fraction: Option<f64>,
        chrom: Option<String>,
        pos: Option<GenomicPos>,
    ) -> CliResult<Self> {
        let query = match (x, fraction, chrom, pos) {
            (Some(x), None, None, None) => Query::Pixel(x),
            (None, Some(f), None, None) => Query::Fraction(f),
            (None, None, Some(chrom), Some(pos)) => Query::Position { chrom, pos },
            _ => {
                return Err(CliError::invalid_argument(
                    "give exactly one of --x, --fraction or --chrom with --pos",
                ))
            }
        };

        match query {
            Query::Pixel(v) | Query::Fraction(v) if !v.is_finite() => {
                Err(CliError::invalid_argument(format!("'{}' is not a finite number", v)))
            }
            query => Ok(query),
        }
    }
}

/// One position expressed in all three coordinate systems
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub locus: Locus,
    pub fraction: f64,
    pub pixel_x: f64,
}

impl Located {
    pub fn describe(&self) -> String {
        format!(
            "chr{}:{}\tfraction={:.9}\tx={:.3}",
            ChromosomeReference::display_name(self.locus.chromosome),
            self.locus.offset,
            self.fraction,
            self.pixel_x
        )
    }
}

pub fn execute(
    config: &Config,
    query: Query,
    hint: Option<String>,
    assembly: Option<Assembly>,
    width: Option<f64>,
) -> Result<()> {
    let reference = reference_for(config, assembly);
    let layout = layout_for(config, width)?;
    let hint = hint.map(|name| parse_chromosome(&reference, &name)).transpose()?;

    let located = resolve(&reference, &layout, &query, hint)?;
    println!("{}", located.describe());
    Ok(())
}

pub fn resolve(
    reference: &ChromosomeReference,
    layout: &LayoutConfig,
    query: &Query,
    hint: Option<ChromIndex>,
) -> CliResult<Located> {
    let width = layout.genome_track_width();

    let located = match query {
        Query::Pixel(x) => Located {
            locus: reference.pixel_to_location(*x, layout, hint),
            fraction: (x - layout.left_margin) / width,
            pixel_x: *x,
        },
        Query::Fraction(fraction) => Located {
            locus: reference.location_from_fraction(*fraction, hint),
            fraction: *fraction,
            pixel_x: fraction * width + layout.left_margin,
        },
        Query::Position { chrom, pos } => {
            let chromosome = parse_chromosome(reference, chrom)?;
            if let Some(length) = reference.length(chromosome) {
                if *pos > length {
                    log::warn!(
                        "Position {} is past the end of chr{} ({} bp)",
                        pos,
                        ChromosomeReference::display_name(chromosome),
                        length
                    );
                }
            }
            Located {
                locus: Locus::new(chromosome, *pos),
                fraction: reference.fraction_of(chromosome, *pos),
                pixel_x: reference.pixel_x_of(chromosome, *pos, layout),
            }
        }
    };

    log::debug!("Resolved {:?} to {:?}", query, located);
    Ok(located)
}

fn parse_chromosome(reference: &ChromosomeReference, name: &str) -> CliResult<ChromIndex> {
    reference
        .chromosome_index(name)
        .map_err(|_| CliError::unknown_chromosome(name))
}
