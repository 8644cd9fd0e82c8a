//! Section and row matching.
//!
//! This module provides the core matching functionality:
//!
//! - [`Normalizer`]: Main entry point resolving raw (section, row) pairs
//! - [`SectionFeatures`]: Decomposition of a section string around its number
//! - [`sections_equal`]: Equivalence of two differently formatted section strings
//! - [`normalize_row`]: Reduction of a row label to its canonical key
//!
//! ## Matching Algorithm
//!
//! A request is resolved in stages:
//!
//! 1. **Suite lookup**: Without a row, the section text must be a manifest key
//! 2. **Range rejection**: Rows such as `"1-10"` are never resolved
//! 3. **Section search**: Manifest sections are compared in order, first match wins
//! 4. **Row search**: The row is normalized and looked up in the matched section
//!
//! ## Section Equivalence
//!
//! Two sections are only comparable when their first digit runs agree. Beyond that
//! they are equal if either is just a number, or if any of these hold:
//!
//! - **Phrases**: one phrase contains the other, or they are similar
//! - **Phrase vs code**: a phrase abbreviates to the other side's prefix/suffix
//! - **Codes**: the prefixes/suffixes are similar
//!
//! ## Example
//!
//! ```rust
//! use section_normalizer::core::section::CanonicalSection;
//! use section_normalizer::core::types::{RowId, SectionId};
//! use section_normalizer::{ManifestTable, Normalizer};
//!
//! let manifest = ManifestTable::from_sections(vec![
//!     CanonicalSection::new("Infield Reserve 7", SectionId(7))
//!         .with_rows([("A", RowId(1)), ("B", RowId(2))]),
//! ])
//! .unwrap();
//!
//! let normalizer = Normalizer::new(&manifest);
//! let result = normalizer.normalize("IFR7", "Row B");
//!
//! assert_eq!(result.section_id, Some(SectionId(7)));
//! assert_eq!(result.row_id, Some(RowId(2)));
//! assert!(result.valid);
//! ```
//!
//! [`Normalizer`]: engine::Normalizer
//! [`SectionFeatures`]: features::SectionFeatures
//! [`sections_equal`]: section::sections_equal
//! [`normalize_row`]: row::normalize_row

pub mod abbreviation;
pub mod engine;
pub mod features;
pub mod row;
pub mod section;
pub mod similarity;
