//! Mutation position lists
//!
//! Two tab-separated columns, `chrom  position`; extra columns are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use super::{column_named, is_blank_or_comment, CHROM_COLUMNS};
use crate::error::{GenomeError, GenomeResult};
use crate::reference::ChromosomeReference;
use crate::types::{GenomicPos, MutationSite};

pub struct MutationParser;

impl MutationParser {
    pub fn parse_line(
        line: &str,
        line_num: usize,
        reference: &ChromosomeReference,
    ) -> GenomeResult<MutationSite> {
        let mut fields = line.trim().split('\t');
        let (chrom, pos) = match (fields.next(), fields.next()) {
            (Some(c), Some(p)) => (c, p),
            _ => return Err(GenomeError::parse(line_num, "expected chromosome and position columns")),
        };

        let chromosome = reference
            .chromosome_index(chrom)
            .map_err(|_| GenomeError::parse(line_num, format!("unknown chromosome '{}'", chrom)))?;
        let position = pos
            .trim()
            .parse::<GenomicPos>()
            .map_err(|_| GenomeError::parse(line_num, format!("invalid position '{}'", pos)))?;

        Ok(MutationSite { chromosome, position })
    }

    pub fn parse_reader<R: BufRead>(
        reader: R,
        reference: &ChromosomeReference,
    ) -> Result<Vec<MutationSite>> {
        let mut sites = Vec::new();
        let mut seen_record = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if is_blank_or_comment(&line) {
                continue;
            }
            let first = !seen_record;
            seen_record = true;
            if first && is_header(&line) {
                continue;
            }
            sites.push(Self::parse_line(&line, idx + 1, reference)?);
        }

        log::debug!("Parsed {} mutation sites", sites.len());
        Ok(sites)
    }

    pub fn parse_file<P: AsRef<Path>>(
        path: P,
        reference: &ChromosomeReference,
    ) -> Result<Vec<MutationSite>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open mutation file: {}", path.display()))?;
        Self::parse_reader(BufReader::new(file), reference)
            .with_context(|| format!("Failed to parse mutation file: {}", path.display()))
    }
}

const POSITION_COLUMNS: &[&str] = &["pos", "position", "start", "start_position"];

fn is_header(line: &str) -> bool {
    column_named(line, 0, CHROM_COLUMNS) || column_named(line, 1, POSITION_COLUMNS)
}
