//! Export utilities for checkmygrade
//!
//! Machine-readable reports; the CSV files remain the source of truth.

pub use json::{export_to_json, report_to_json};

pub mod json;
