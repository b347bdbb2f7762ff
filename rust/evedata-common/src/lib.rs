//! Core definitions (error type, result alias and precondition macros), relied upon
//! by all evedata-* crates.

pub mod error;
pub mod result;

pub use result::Result;
