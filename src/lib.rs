//! Polybius - streaming Polybius-square cipher.
//!
//! A square key loaded from a CSV file maps every character to a two-digit
//! (row, column) coordinate:
//! - [`KeyTable`] holds the square and answers lookups in both directions
//! - [`Encoder`] turns a character stream into coordinate digits
//! - [`Decoder`] turns coordinate digits back into characters, leniently or
//!   strictly

pub mod app;
pub mod codec;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod key;
pub mod types;
pub mod ui;

pub use codec::{Decoder, Encoder};
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use key::KeyTable;
pub use types::{Leniency, Mode, Summary};
