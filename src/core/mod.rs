//! Core data types for section and row normalization.
//!
//! - [`CanonicalSection`]: A section of the venue manifest with its optional rows
//! - [`NormalizationResult`]: The (section id, row id, valid) answer for one request
//! - [`SampleRecord`]: A request paired with its expected and actual results
//! - [`SectionId`], [`RowId`]: Manifest identifiers
//! - [`Resolution`]: Which path a request took through the normalizer
//!
//! ## Keys
//!
//! Section keys are the trimmed, lower-cased section names from the manifest.
//! Row keys are row names passed through [`normalize_row`](crate::matching::row::normalize_row),
//! so `"Row C"`, `"c"` and `" C "` all share the key `"c"`.
//!
//! [`CanonicalSection`]: section::CanonicalSection
//! [`NormalizationResult`]: result::NormalizationResult
//! [`SampleRecord`]: sample::SampleRecord
//! [`SectionId`]: types::SectionId
//! [`RowId`]: types::RowId
//! [`Resolution`]: types::Resolution

pub mod result;
pub mod sample;
pub mod section;
pub mod types;
