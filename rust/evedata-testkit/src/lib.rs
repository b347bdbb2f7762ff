//! Test utilities and helpers for the evedata crates.
//!
//! - [`data_gen`]: random sparse series for property-style tests
//! - [`fixtures`]: small hand-written series and snapshot documents

pub mod data_gen;
pub mod fixtures;
