//! HTTP service for normalizing ticket listings.
//!
//! This module provides a JSON API using Axum. The manifest is loaded once at
//! startup and can be swapped without a restart.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! section-normalizer serve --manifest fenway.csv
//!
//! # Bind to all interfaces
//! section-normalizer serve --manifest fenway.csv --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/normalize` - Normalize `{"section": .., "row": ..}`
//! - `POST /api/normalize/batch` - Normalize an array of requests
//! - `GET /api/manifest` - Section and row counts of the loaded manifest
//! - `POST /api/manifest/reload` - Re-read the manifest file

pub mod server;
