use serde::{Deserialize, Serialize};

/// Base-pair offset within a chromosome.
pub type GenomicPos = u64;
/// 1-based chromosome index; 23 is X and 24 is Y for human assemblies.
pub type ChromIndex = usize;

/// A position on the reference: chromosome plus base-pair offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus {
    pub chromosome: ChromIndex,
    pub offset: GenomicPos,
}

impl Locus {
    pub fn new(chromosome: ChromIndex, offset: GenomicPos) -> Self {
        Self { chromosome, offset }
    }
}

impl From<Locus> for (ChromIndex, GenomicPos) {
    fn from(locus: Locus) -> Self {
        (locus.chromosome, locus.offset)
    }
}

/// One record of a copy-number segmentation (`.seg`) file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyNumberSegment {
    pub sample: String,
    pub chromosome: ChromIndex,
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub num_markers: Option<u32>,
    /// Segment mean, usually log2 ratio
    pub mean: f64,
}

impl CopyNumberSegment {
    pub fn len(&self) -> GenomicPos {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A single mutated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSite {
    pub chromosome: ChromIndex,
    pub position: GenomicPos,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length() {
        let seg = CopyNumberSegment {
            sample: "s1".into(),
            chromosome: 1,
            start: 1000,
            end: 61_000,
            num_markers: Some(12),
            mean: 0.4,
        };
        assert_eq!(seg.len(), 60_000);
        assert!(!seg.is_empty());

        let inverted = CopyNumberSegment { start: 500, end: 100, ..seg };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_locus_into_pair() {
        let pair: (ChromIndex, GenomicPos) = Locus::new(7, 1234).into();
        assert_eq!(pair, (7, 1234));
    }
}
