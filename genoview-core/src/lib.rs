//! Genoview Core Library
//!
//! Reference genome tables, canvas layout geometry, coordinate mapping and
//! input readers for genome overview charts.

pub mod error;
pub mod types;
pub mod layout;
pub mod reference;
pub mod io;

// Re-export commonly used types and functions
pub use error::{GenomeError, GenomeResult};
pub use types::{ChromIndex, GenomicPos, Locus, CopyNumberSegment, MutationSite};
pub use layout::{LayoutConfig, CopyNumberThresholds};
pub use reference::{Assembly, ChromosomeReference, SearchStrategy};

/// Version information for the genoview core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
