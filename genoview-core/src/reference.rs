//! Chromosome reference tables and genome-fraction coordinate mapping.
//!
//! A genome is laid out as the concatenation of its chromosomes. Every
//! `(chromosome, offset)` position maps to a *genome fraction* in `[0, 1]`,
//! and fractions map linearly onto the genome track of a [`LayoutConfig`].
//! The inverse lookup resolves a fraction back to a [`Locus`] with either a
//! binary search or a hinted linear scan; both return identical results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, GenomeResult};
use crate::layout::LayoutConfig;
use crate::types::{ChromIndex, GenomicPos, Locus};

/// GRCh37 chromosome lengths, index 0 is the zero sentinel, 23 = X, 24 = Y.
const HG19_LENGTHS: [GenomicPos; 25] = [
    0,
    249_250_621, 243_199_373, 198_022_430, 191_154_276, 180_915_260, 171_115_067,
    159_138_663, 146_364_022, 141_213_431, 135_534_747, 135_006_516, 133_851_895,
    115_169_878, 107_349_540, 102_531_392, 90_354_753, 81_195_210, 78_077_248,
    59_128_983, 63_025_520, 48_129_895, 51_304_566, 155_270_560, 59_373_566,
];
const HG19_TOTAL: GenomicPos = 3_095_677_412;

/// GRCh38 primary chromosome lengths, same layout as [`HG19_LENGTHS`].
const HG38_LENGTHS: [GenomicPos; 25] = [
    0,
    248_956_422, 242_193_529, 198_295_559, 190_214_555, 181_538_259, 170_805_979,
    159_345_973, 145_138_636, 138_394_717, 133_797_422, 135_086_622, 133_275_309,
    114_364_328, 107_043_718, 101_991_189, 90_338_345, 83_257_441, 80_373_285,
    58_617_616, 64_444_167, 46_709_983, 50_818_468, 156_040_895, 57_227_415,
];
const HG38_TOTAL: GenomicPos = 3_088_269_832;

/// Built-in reference assemblies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assembly {
    #[default]
    Hg19,
    Hg38,
}

impl Assembly {
    /// Chromosome lengths with the leading zero sentinel
    pub fn lengths(&self) -> &'static [GenomicPos] {
        match self {
            Assembly::Hg19 => &HG19_LENGTHS,
            Assembly::Hg38 => &HG38_LENGTHS,
        }
    }

    pub fn total(&self) -> GenomicPos {
        match self {
            Assembly::Hg19 => HG19_TOTAL,
            Assembly::Hg38 => HG38_TOTAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Assembly::Hg19 => "hg19",
            Assembly::Hg38 => "hg38",
        }
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Assembly {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hg19" | "grch37" => Ok(Assembly::Hg19),
            "hg38" | "grch38" => Ok(Assembly::Hg38),
            other => Err(GenomeError::InvalidReference(format!(
                "unknown assembly '{}' (expected hg19 or hg38)",
                other
            ))),
        }
    }
}

/// How [`ChromosomeReference::location_from_fraction`] finds the chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Lower-bound binary search over all boundaries
    Binary,
    /// Forward scan from a nearby chromosome, for left-to-right sweeps
    Linear { start: ChromIndex },
}

impl SearchStrategy {
    pub fn from_hint(hint: Option<ChromIndex>) -> Self {
        match hint {
            Some(start) => SearchStrategy::Linear { start },
            None => SearchStrategy::Binary,
        }
    }
}

/// Per-chromosome lengths of one assembly plus cumulative fraction boundaries.
///
/// Boundaries are computed once at construction by accumulating
/// `length[i] / total`; they start at 0 and are non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeReference {
    lengths: Vec<GenomicPos>,
    total: GenomicPos,
    /// `boundaries[i]` is the genome fraction at the end of chromosome `i`
    boundaries: Vec<f64>,
}

impl ChromosomeReference {
    /// Build from `lengths` (index 0 must be the zero sentinel) and a precomputed total.
    pub fn new(lengths: Vec<GenomicPos>, total: GenomicPos) -> GenomeResult<Self> {
        if lengths.len() < 2 {
            return Err(GenomeError::InvalidReference(
                "at least one chromosome length is required".to_string(),
            ));
        }
        if lengths[0] != 0 {
            return Err(GenomeError::InvalidReference(format!(
                "index 0 must be the zero sentinel, got {}",
                lengths[0]
            )));
        }
        if total == 0 {
            return Err(GenomeError::InvalidReference("total genome length is zero".to_string()));
        }

        let boundaries = cumulative_boundaries(&lengths, total);

        log::debug!(
            "Built reference with {} chromosomes, total {} bp",
            lengths.len() - 1,
            total
        );

        Ok(Self { lengths, total, boundaries })
    }

    /// Build from `lengths`, summing the total
    pub fn from_lengths(lengths: Vec<GenomicPos>) -> GenomeResult<Self> {
        let total = lengths.iter().sum();
        Self::new(lengths, total)
    }

    pub fn for_assembly(assembly: Assembly) -> Self {
        Self {
            lengths: assembly.lengths().to_vec(),
            total: assembly.total(),
            boundaries: cumulative_boundaries(assembly.lengths(), assembly.total()),
        }
    }

    /// Number of chromosomes, excluding the sentinel
    pub fn len(&self) -> usize {
        self.lengths.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> GenomicPos {
        self.total
    }

    pub fn length(&self, chromosome: ChromIndex) -> Option<GenomicPos> {
        if self.contains(chromosome) {
            Some(self.lengths[chromosome])
        } else {
            None
        }
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = ChromIndex> {
        1..=self.len()
    }

    pub fn contains(&self, chromosome: ChromIndex) -> bool {
        (1..=self.len()).contains(&chromosome)
    }

    /// Genome fraction of `offset` on `chromosome`.
    ///
    /// `chromosome` must lie in `1..=len()`; use [`Self::try_fraction_of`] for
    /// untrusted input.
    pub fn fraction_of(&self, chromosome: ChromIndex, offset: GenomicPos) -> f64 {
        self.fraction_at(chromosome, offset as f64)
    }

    pub fn try_fraction_of(&self, chromosome: ChromIndex, offset: GenomicPos) -> GenomeResult<f64> {
        self.check(chromosome)?;
        Ok(self.fraction_of(chromosome, offset))
    }

    /// Pixel x of `offset` on `chromosome` along the genome track of `config`
    pub fn pixel_x_of(&self, chromosome: ChromIndex, offset: GenomicPos, config: &LayoutConfig) -> f64 {
        self.pixel_x_at(chromosome, offset as f64, config)
    }

    pub fn try_pixel_x_of(
        &self,
        chromosome: ChromIndex,
        offset: GenomicPos,
        config: &LayoutConfig,
    ) -> GenomeResult<f64> {
        self.check(chromosome)?;
        Ok(self.pixel_x_of(chromosome, offset, config))
    }

    /// Resolve a genome fraction to the chromosome and offset it falls on.
    ///
    /// With `start_hint` the chromosome is found by a linear scan starting at
    /// the hint, otherwise by binary search; both agree for every input.
    pub fn location_from_fraction(&self, fraction: f64, start_hint: Option<ChromIndex>) -> Locus {
        self.locate(fraction, SearchStrategy::from_hint(start_hint))
    }

    /// Same as [`Self::location_from_fraction`] with an explicit strategy
    pub fn locate(&self, fraction: f64, strategy: SearchStrategy) -> Locus {
        debug_assert!(!fraction.is_nan(), "genome fraction must not be NaN");

        let chromosome = match strategy {
            SearchStrategy::Binary => self.search_binary(fraction),
            SearchStrategy::Linear { start } => self.search_linear(fraction, start),
        };
        let offset = (self.total as f64 * (fraction - self.boundaries[chromosome - 1])).round();

        Locus::new(chromosome, offset.max(0.0) as GenomicPos)
    }

    /// Inverse of [`Self::pixel_x_of`]
    pub fn pixel_to_location(&self, x: f64, config: &LayoutConfig, start_hint: Option<ChromIndex>) -> Locus {
        let fraction = (x - config.left_margin) / config.genome_track_width();
        self.location_from_fraction(fraction, start_hint)
    }

    /// Pixel x of the middle of `chromosome`, which must lie in `1..=len()`
    pub fn midpoint_pixel_x(&self, chromosome: ChromIndex, config: &LayoutConfig) -> f64 {
        self.debug_assert_in_range(chromosome);
        self.pixel_x_at(chromosome, self.lengths[chromosome] as f64 / 2.0, config)
    }

    /// Label shown on the ruler: "X" for 23, "Y" for 24, the index otherwise
    pub fn display_name(chromosome: ChromIndex) -> String {
        match chromosome {
            23 => "X".to_string(),
            24 => "Y".to_string(),
            n => n.to_string(),
        }
    }

    /// Parse a chromosome name such as "7", "chr7", "X" or "chrY"
    pub fn chromosome_index(&self, name: &str) -> GenomeResult<ChromIndex> {
        let trimmed = name.trim();
        let bare = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("chr") && trimmed.len() > 3 => &trimmed[3..],
            _ => trimmed,
        };

        let index = match bare {
            "X" | "x" => 23,
            "Y" | "y" => 24,
            digits => digits
                .parse::<ChromIndex>()
                .map_err(|_| GenomeError::UnknownChromosome(name.to_string()))?,
        };

        if self.contains(index) {
            Ok(index)
        } else {
            Err(GenomeError::UnknownChromosome(name.to_string()))
        }
    }

    fn debug_assert_in_range(&self, chromosome: ChromIndex) {
        debug_assert!(
            self.contains(chromosome),
            "chromosome {} out of range 1..={}",
            chromosome,
            self.len()
        );
    }

    fn fraction_at(&self, chromosome: ChromIndex, offset: f64) -> f64 {
        self.debug_assert_in_range(chromosome);
        self.boundaries[chromosome - 1] + offset / self.total as f64
    }

    fn pixel_x_at(&self, chromosome: ChromIndex, offset: f64, config: &LayoutConfig) -> f64 {
        self.fraction_at(chromosome, offset) * config.genome_track_width() + config.left_margin
    }

    fn check(&self, chromosome: ChromIndex) -> GenomeResult<()> {
        if self.contains(chromosome) {
            Ok(())
        } else {
            Err(GenomeError::ChromosomeOutOfRange { chromosome, count: self.len() })
        }
    }

    /// First chromosome whose end boundary is >= `fraction`, clamped to the last
    fn search_binary(&self, fraction: f64) -> ChromIndex {
        let first = 1 + self.boundaries[1..].partition_point(|&b| b < fraction);
        first.min(self.len())
    }

    fn search_linear(&self, fraction: f64, start: ChromIndex) -> ChromIndex {
        let count = self.len();
        let mut start = start.clamp(1, count);
        // Hint already past the target: a forward-only scan would overshoot
        if self.boundaries[start - 1] >= fraction {
            start = 1;
        }
        (start..=count)
            .find(|&i| fraction <= self.boundaries[i])
            .unwrap_or(count)
    }
}

impl Default for ChromosomeReference {
    fn default() -> Self {
        Self::for_assembly(Assembly::default())
    }
}

fn cumulative_boundaries(lengths: &[GenomicPos], total: GenomicPos) -> Vec<f64> {
    let mut boundaries = Vec::with_capacity(lengths.len());
    let mut acc = 0.0;
    boundaries.push(acc);
    for &len in &lengths[1..] {
        acc += len as f64 / total as f64;
        boundaries.push(acc);
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hg19() -> ChromosomeReference {
        ChromosomeReference::for_assembly(Assembly::Hg19)
    }

    #[test]
    fn test_assembly_totals_match_lengths() {
        for assembly in [Assembly::Hg19, Assembly::Hg38] {
            let sum: GenomicPos = assembly.lengths().iter().sum();
            assert_eq!(sum, assembly.total(), "{} total mismatch", assembly);
            assert_eq!(assembly.lengths().len(), 25);
        }
    }

    #[test]
    fn test_assembly_from_str() {
        assert_eq!("hg19".parse::<Assembly>().unwrap(), Assembly::Hg19);
        assert_eq!("GRCh38".parse::<Assembly>().unwrap(), Assembly::Hg38);
        assert!("mm10".parse::<Assembly>().is_err());
    }

    #[test]
    fn test_boundaries() {
        let reference = hg19();
        let b = reference.boundaries();
        assert_eq!(b.len(), 25);
        assert_eq!(b[0], 0.0);
        assert!(b.windows(2).all(|w| w[0] <= w[1]));
        assert!((b[24] - 1.0).abs() < 1e-12);
        // Built by construction or from the constant table, same numbers
        let rebuilt = ChromosomeReference::new(HG19_LENGTHS.to_vec(), HG19_TOTAL).unwrap();
        assert_eq!(rebuilt, reference);
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        assert!(matches!(
            ChromosomeReference::new(vec![0], 10),
            Err(GenomeError::InvalidReference(_))
        ));
        assert!(ChromosomeReference::new(vec![5, 10], 15).is_err());
        assert!(ChromosomeReference::new(vec![0, 0], 0).is_err());
    }

    #[test]
    fn test_from_lengths_sums_total() {
        let reference = ChromosomeReference::from_lengths(vec![0, 100, 300]).unwrap();
        assert_eq!(reference.total(), 400);
        assert_eq!(reference.len(), 2);
        assert_eq!(reference.boundaries(), &[0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_fraction_of() {
        let reference = hg19();
        assert_eq!(reference.fraction_of(1, 0), 0.0);
        let expected = 249_250_621.0 / 3_095_677_412.0;
        assert!((reference.fraction_of(2, 0) - expected).abs() < 1e-15);
        assert!((reference.fraction_of(1, 249_250_621) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_try_fraction_of_out_of_range() {
        let reference = hg19();
        assert!(matches!(
            reference.try_fraction_of(0, 10),
            Err(GenomeError::ChromosomeOutOfRange { chromosome: 0, count: 24 })
        ));
        assert!(reference.try_fraction_of(25, 0).is_err());
        assert!(reference.try_fraction_of(24, 0).is_ok());
    }

    #[test]
    fn test_pixel_x_of() {
        let reference = hg19();
        let config = LayoutConfig::new(1, 1200.0);
        assert_eq!(reference.pixel_x_of(1, 0, &config), 25.0);
        let end = reference.pixel_x_of(24, reference.length(24).unwrap(), &config);
        assert!((end - 1165.0).abs() < 1e-9);
    }

    #[test]
    fn test_location_from_fraction_simple_table() {
        let reference = ChromosomeReference::from_lengths(vec![0, 100, 300]).unwrap();
        assert_eq!(reference.location_from_fraction(0.0, None), Locus::new(1, 0));
        assert_eq!(reference.location_from_fraction(0.1, None), Locus::new(1, 40));
        // Ties resolve to the lower chromosome
        assert_eq!(reference.location_from_fraction(0.25, None), Locus::new(1, 100));
        assert_eq!(reference.location_from_fraction(0.5, None), Locus::new(2, 100));
        assert_eq!(reference.location_from_fraction(1.0, None), Locus::new(2, 300));
    }

    #[test]
    fn test_location_out_of_domain_is_clamped() {
        let reference = ChromosomeReference::from_lengths(vec![0, 100, 300]).unwrap();
        assert_eq!(reference.location_from_fraction(-0.5, None), Locus::new(1, 0));
        assert_eq!(reference.location_from_fraction(-0.5, Some(2)), Locus::new(1, 0));
        assert_eq!(reference.location_from_fraction(1.5, None).chromosome, 2);
        assert_eq!(reference.location_from_fraction(1.5, Some(1)).chromosome, 2);
    }

    #[test]
    fn test_linear_hint_past_target_matches_binary() {
        let reference = hg19();
        let fraction = reference.fraction_of(3, 1_000_000);
        let expected = reference.location_from_fraction(fraction, None);
        assert_eq!(expected.chromosome, 3);
        for hint in [1, 2, 3, 4, 10, 24, 99] {
            assert_eq!(reference.location_from_fraction(fraction, Some(hint)), expected, "hint {}", hint);
        }
    }

    #[test]
    fn test_pixel_to_location_roundtrip() {
        let reference = hg19();
        let config = LayoutConfig::new(1, 1200.0);
        let x = reference.pixel_x_of(7, 50_000_000, &config);
        let locus = reference.pixel_to_location(x, &config, None);
        assert_eq!(locus.chromosome, 7);
        assert!(locus.offset.abs_diff(50_000_000) <= 1, "got {:?}", locus);
    }

    #[test]
    fn test_midpoint_pixel_x() {
        let reference = hg19();
        let config = LayoutConfig::new(1, 1200.0);
        let start = reference.pixel_x_of(5, 0, &config);
        let end = reference.pixel_x_of(6, 0, &config);
        let mid = reference.midpoint_pixel_x(5, &config);
        assert!((mid - (start + end) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ChromosomeReference::display_name(23), "X");
        assert_eq!(ChromosomeReference::display_name(24), "Y");
        assert_eq!(ChromosomeReference::display_name(7), "7");
    }

    #[test]
    fn test_chromosome_index() {
        let reference = hg19();
        assert_eq!(reference.chromosome_index("7").unwrap(), 7);
        assert_eq!(reference.chromosome_index("chr7").unwrap(), 7);
        assert_eq!(reference.chromosome_index("CHRX").unwrap(), 23);
        assert_eq!(reference.chromosome_index("Y").unwrap(), 24);
        assert_eq!(reference.chromosome_index("24").unwrap(), 24);
        assert!(matches!(
            reference.chromosome_index("chrM"),
            Err(GenomeError::UnknownChromosome(_))
        ));
        assert!(reference.chromosome_index("0").is_err());
        assert!(reference.chromosome_index("25").is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "chromosome 25 out of range 1..=24")]
    fn test_midpoint_past_last_chromosome_reports_range() {
        hg19().midpoint_pixel_x(25, &LayoutConfig::default());
    }
}
