//! Readers for the per-sample data drawn below the chromosome ruler.
//!
//! Both formats are tab-separated text. Chromosome names are resolved against
//! a [`ChromosomeReference`](crate::reference::ChromosomeReference) while
//! parsing, so records always carry a valid chromosome index.

pub mod seg;
pub mod mutations;

pub use seg::SegParser;
pub use mutations::MutationParser;

/// True if a line carries no record
pub(crate) fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Column names accepted for the chromosome field of a header line
pub(crate) const CHROM_COLUMNS: &[&str] = &["chrom", "chromosome", "chr"];

/// True if field `index` of a tab-separated line is one of `names`, ignoring case
pub(crate) fn column_named(line: &str, index: usize, names: &[&str]) -> bool {
    line.split('\t')
        .nth(index)
        .map(|field| {
            let field = field.trim();
            names.iter().any(|name| field.eq_ignore_ascii_case(name))
        })
        .unwrap_or(false)
}
