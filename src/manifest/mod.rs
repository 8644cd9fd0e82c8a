//! Canonical venue manifest storage and loading.
//!
//! A manifest lists every section of a venue with its id, and for most sections
//! the rows it contains. Sections addressed by name alone (suites, standing room)
//! carry no rows.
//!
//! ## Manifest CSV
//!
//! ```text
//! section_id,section_name,row_id,row_name
//! 5,Suite 221,,
//! 7,Reserve 40,3,Row C
//! 7,Reserve 40,4,D
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_normalizer::ManifestTable;
//! use std::path::Path;
//!
//! // Load from CSV
//! let manifest = ManifestTable::load(Path::new("fenway_sections.csv")).unwrap();
//!
//! for section in manifest.sections() {
//!     println!("{} ({} rows)", section.key, section.row_count());
//! }
//!
//! // Snapshot to JSON; `ManifestTable::load` reads `.json` files back
//! let json = manifest.to_json().unwrap();
//! ```

pub mod builder;
pub mod store;
