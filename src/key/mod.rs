//! The key square and its CSV source.

mod reader;
mod table;

pub use table::KeyTable;
