//! Copy-number segmentation (`.seg`) parser
//!
//! A `.seg` file has six tab-separated columns:
//! `ID  chrom  loc.start  loc.end  num.mark  seg.mean`.
//! The header line is optional; `num.mark` may be `NA`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use super::{column_named, is_blank_or_comment, CHROM_COLUMNS};
use crate::error::{GenomeError, GenomeResult};
use crate::reference::ChromosomeReference;
use crate::types::{CopyNumberSegment, GenomicPos};

const SEG_COLUMNS: usize = 6;

pub struct SegParser;

impl SegParser {
    /// Parse one data line. `line_num` is 1-based and only used for errors.
    pub fn parse_line(
        line: &str,
        line_num: usize,
        reference: &ChromosomeReference,
    ) -> GenomeResult<CopyNumberSegment> {
        let fields: Vec<&str> = line.trim_end_matches(|c: char| c == '\r' || c == '\n').split('\t').collect();
        if fields.len() < SEG_COLUMNS {
            return Err(GenomeError::parse(
                line_num,
                format!("expected {} columns, got {}", SEG_COLUMNS, fields.len()),
            ));
        }

        let chromosome = reference.chromosome_index(fields[1]).map_err(|_| {
            GenomeError::parse(line_num, format!("unknown chromosome '{}'", fields[1]))
        })?;
        let start = parse_pos(fields[2], line_num, "loc.start")?;
        let end = parse_pos(fields[3], line_num, "loc.end")?;
        if end < start {
            return Err(GenomeError::parse(
                line_num,
                format!("segment end {} before start {}", end, start),
            ));
        }

        let num_markers = match fields[4].trim() {
            "" | "NA" | "na" => None,
            s => Some(s.parse::<u32>().map_err(|_| {
                GenomeError::parse(line_num, format!("invalid num.mark '{}'", s))
            })?),
        };
        let mean = fields[5].trim().parse::<f64>().map_err(|_| {
            GenomeError::parse(line_num, format!("invalid seg.mean '{}'", fields[5]))
        })?;

        Ok(CopyNumberSegment {
            sample: fields[0].to_string(),
            chromosome,
            start,
            end,
            num_markers,
            mean,
        })
    }

    /// Parse segments from any BufRead source
    pub fn parse_reader<R: BufRead>(
        reader: R,
        reference: &ChromosomeReference,
    ) -> Result<Vec<CopyNumberSegment>> {
        let mut segments = Vec::new();
        let mut seen_record = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = idx + 1;
            if is_blank_or_comment(&line) {
                continue;
            }
            if !seen_record && is_header(&line) {
                seen_record = true;
                continue;
            }
            seen_record = true;
            segments.push(Self::parse_line(&line, line_num, reference)?);
        }

        log::debug!("Parsed {} copy-number segments", segments.len());
        Ok(segments)
    }

    pub fn parse_file<P: AsRef<Path>>(
        path: P,
        reference: &ChromosomeReference,
    ) -> Result<Vec<CopyNumberSegment>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open segment file: {}", path.display()))?;
        Self::parse_reader(BufReader::new(file), reference)
            .with_context(|| format!("Failed to parse segment file: {}", path.display()))
    }
}

fn parse_pos(field: &str, line_num: usize, column: &str) -> GenomeResult<GenomicPos> {
    let trimmed = field.trim();
    // Some exporters write coordinates as floats ("1.5e+07")
    trimmed
        .parse::<GenomicPos>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as GenomicPos)
        })
        .ok_or_else(|| GenomeError::parse(line_num, format!("invalid {} '{}'", column, field)))
}

const START_COLUMNS: &[&str] = &["loc.start", "start", "start_position"];

/// The first record line is a header when it names the chrom or start column
fn is_header(line: &str) -> bool {
    column_named(line, 1, CHROM_COLUMNS) || column_named(line, 2, START_COLUMNS)
}
