//! Alignment of independently sampled series into one columnar table.
//!
//! Each input series is sparse: it holds samples only at the position
//! references where its device was read. [`join()`] computes a shared row
//! index ([`PositionIndex`]) from all inputs according to a
//! [`FillRule`](evedata_format::FillRule), resolves every (row, column) cell
//! with a [`FillResolver`], and assembles a [`JoinedTable`] with one typed
//! column per input series.
//!
//! | rule          | row index    | axis without sample | float channel without sample |
//! |---------------|--------------|---------------------|------------------------------|
//! | `NoFill`      | intersection | -                   | -                            |
//! | `LastFill`    | union        | last value          | absent                       |
//! | `NANFill`     | union        | absent              | NaN                          |
//! | `LastNANFill` | union        | last value          | NaN                          |
//!
//! Array-valued series and non-floating channels are never synthesized: their
//! missing cells are absent under every rule.
//!
//! The join is a pure computation over immutable inputs and may run
//! concurrently for independent inputs.

pub mod builder;
pub mod fill;
pub mod join;
pub mod position_index;
pub mod table;
#[cfg(test)]
mod tests;

pub use builder::JoinBuilder;
pub use fill::{FillPolicy, FillResolver, Resolution};
pub use join::{join, join_preferred};
pub use position_index::PositionIndex;
pub use table::{Column, ColumnData, FillSummary, JoinedTable};
