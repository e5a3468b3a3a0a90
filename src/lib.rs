#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! idf-size-delta library
//!
//! Normalizes ESP-IDF size reports (json2 segment lists, legacy per-region
//! objects and older total maps) into one canonical record, and renders a
//! base vs PR delta report for pull-request comments.
//!
//! # Basic Example
//!
//! ```
//! use idf_size_delta::extract::extract;
//! use idf_size_delta::report::{render, ReportConfig};
//! use serde_json::json;
//!
//! let base = extract(&json!({
//!     "layout": [
//!         {"name": "Flash Code", "used": 1000, "total": 4000},
//!         {"name": "DRAM", "used": 200, "total": 1000}
//!     ]
//! }));
//! let head = extract(&json!({
//!     "layout": [
//!         {"name": "Flash Code", "used": 1200, "total": 4000},
//!         {"name": "DRAM", "used": 150, "total": 1000}
//!     ]
//! }));
//!
//! let markdown = render("blink", &base, &head, &ReportConfig::default());
//! assert!(markdown.contains("+200 bytes"));
//! assert!(markdown.ends_with("<!-- size-delta:blink -->"));
//! ```
//!
//! # Persisted Records
//!
//! ```
//! use idf_size_delta::record::CanonicalSizeRecord;
//!
//! let record = CanonicalSizeRecord::from_json_str(r#"{"flash": "123", "dram": 10.7}"#);
//! assert_eq!(record.flash_used, 123);
//! assert_eq!(record.dram_used, 10);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Size collection from an ESP-IDF build directory
pub mod collect;
/// Configuration file support
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Size report normalization
pub mod extract;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Canonical size record
pub mod record;
/// Base vs PR delta report
pub mod report;
/// Lenient JSON number coercion
pub mod value;
