//! # section-normalizer
//!
//! A library for mapping the free-text section and row of a ticket listing to the
//! canonical section and row ids of a venue.
//!
//! Ticket sources describe the same seat in many ways: "Infield Reserve 7",
//! "IFR7", "ifr07" and "Reserve Infield 7" can all mean the same section.
//! `section-normalizer` resolves such text against a venue manifest and reports an
//! answer only when it is confident; everything else is marked invalid.
//!
//! ## Features
//!
//! - **Loose section matching**: Case, spacing, leading zeros and word order
//! - **Abbreviations**: Acronyms and ordered subsequences of section names
//! - **Suites**: Sections addressed by name alone
//! - **Row ranges**: Rejected rather than guessed
//! - **Grading**: Score answers against expected results
//!
//! ## Example
//!
//! ```rust
//! use section_normalizer::ManifestTable;
//! use section_normalizer::{Normalizer, RowId, SectionId};
//!
//! let manifest = ManifestTable::from_csv(
//!     "section_id,section_name,row_id,row_name\n\
//!      5,Suite 221,,\n\
//!      7,Infield Reserve 7,1,A\n\
//!      7,Infield Reserve 7,2,B\n",
//! )
//! .unwrap();
//!
//! let normalizer = Normalizer::new(&manifest);
//!
//! // Abbreviated section, loose row
//! let result = normalizer.normalize("IFR7", "b");
//! assert_eq!(result.section_id, Some(SectionId(7)));
//! assert_eq!(result.row_id, Some(RowId(2)));
//!
//! // A suite is addressed by name alone
//! assert_eq!(normalizer.normalize("suite 221", "").section_id, Some(SectionId(5)));
//!
//! // Row ranges are never resolved
//! assert!(!normalizer.normalize("IFR7", "1-2").valid);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for sections, rows, and results
//! - [`manifest`]: Venue manifest storage and loading
//! - [`matching`]: Section, abbreviation, and row matching
//! - [`parsing`]: Parsers for manifest, sample, and result files
//! - [`grading`]: Scoring answers against expected results
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP normalization service

pub mod cli;
pub mod core;
pub mod grading;
pub mod manifest;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::result::NormalizationResult;
pub use core::section::CanonicalSection;
pub use core::types::*;
pub use manifest::store::ManifestTable;
pub use matching::engine::{MatchingConfig, Normalizer};
