//! Global Configuration Constants
//!
//! Parameters shared by the key reader, the codec and the command-line layer.
//! The square format is fixed: every coordinate is written as exactly two
//! decimal digits, which caps the key at ten rows and ten columns.

/// Application name used in user-facing output.
pub const APP_NAME: &str = "Polybius";

/// Key file used when `--key` is not given.
pub const DEFAULT_KEY_FILE: &str = "key.csv";

/// Field separator of the key file.
pub const KEY_DELIMITER: u8 = b',';

// === Square Geometry ===
// A coordinate is one row digit followed by one column digit, so neither
// dimension may exceed the number of decimal digits.

/// Largest number of rows or columns a key may have.
pub const MAX_DIMENSION: usize = 10;

/// Number of characters one coordinate occupies in encoded text.
pub const COORDINATE_WIDTH: usize = 2;

/// Radix of the coordinate digits.
pub const COORDINATE_RADIX: u32 = 10;
