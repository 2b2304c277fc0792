//! CSV key source.
//!
//! One line per row, one cell per field. Only the first character of a field
//! is kept, an empty field becomes an empty cell, and blank lines are skipped.
//! Standard double-quote quoting lets a key carry the delimiter itself.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::config::KEY_DELIMITER;
use crate::error::{Error, Result};
use crate::key::KeyTable;

/// Path reported for keys parsed from memory.
const INLINE_SOURCE: &str = "<inline>";

impl KeyTable {
    /// Reads and builds the key stored at `path`.
    ///
    /// # Errors
    ///
    /// I/O and CSV failures are reported as [`Error::KeyLoad`]; structural
    /// problems come back unchanged from [`KeyTable::build`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let data = tokio::fs::read(path).await.map_err(|e| key_load_error(path, &e))?;
        let rows = parse_rows(&data).map_err(|e| key_load_error(path, &e))?;
        let table = Self::build(rows)?;

        debug!(path = %path.display(), rows = table.nrows(), cols = table.ncols(), "key loaded");
        Ok(table)
    }

    /// Builds a key from CSV text held in memory.
    ///
    /// # Errors
    ///
    /// Same as [`KeyTable::load`].
    pub fn from_csv(text: &str) -> Result<Self> {
        let rows = parse_rows(text.as_bytes()).map_err(|e| key_load_error(Path::new(INLINE_SOURCE), &e))?;
        Self::build(rows)
    }
}

fn parse_rows(data: &[u8]) -> std::result::Result<Vec<Vec<Option<char>>>, csv::Error> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(KEY_DELIMITER)
        .from_reader(data)
        .records()
        .map(|record| record.map(|fields| fields.iter().map(|field| field.chars().next()).collect()))
        .collect()
}

fn key_load_error(path: &Path, error: &dyn std::error::Error) -> Error {
    Error::KeyLoad { path: PathBuf::from(path), reason: error.to_string() }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::coordinate::Coordinate;

    #[test]
    fn test_from_csv_square() {
        let table = KeyTable::from_csv("A,B,C\nD,E,F\nG,H,I\n").unwrap();
        assert_eq!(table.nrows(), 3);
        assert_eq!(table.ncols(), 3);
        assert_eq!(table.lookup_coordinate('F'), Some(Coordinate::new(1, 2)));
    }

    #[test]
    fn test_from_csv_first_character_of_cell() {
        let table = KeyTable::from_csv("Alpha,Bravo\nCharlie,Delta").unwrap();
        assert_eq!(table.alphabet().collect::<String>(), "ABCD");
    }

    #[test]
    fn test_from_csv_quoted_delimiter() {
        let table = KeyTable::from_csv("\",\",.\n!,?").unwrap();
        assert_eq!(table.lookup_coordinate(','), Some(Coordinate::new(0, 0)));
        assert_eq!(table.lookup_coordinate('?'), Some(Coordinate::new(1, 1)));
    }

    #[test]
    fn test_from_csv_skips_blank_lines_and_crlf() {
        let table = KeyTable::from_csv("A,B\r\n\r\nC,D\r\n").unwrap();
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.lookup_coordinate('D'), Some(Coordinate::new(1, 1)));
    }

    #[test]
    fn test_from_csv_empty_field_is_empty_cell() {
        let table = KeyTable::from_csv("A,,C").unwrap();
        assert_eq!(table.ncols(), 3);
        assert!(table.lookup_char(Coordinate::new(0, 1)).is_err());
        assert_eq!(table.lookup_char(Coordinate::new(0, 2)).unwrap(), 'C');
    }

    #[test]
    fn test_from_csv_empty_text() {
        assert!(matches!(KeyTable::from_csv(""), Err(Error::EmptyKey)));
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.csv");
        std::fs::write(&path, "A,B,C,D,E\nF,G,H,I,J\nK,L,M,N,O\nP,Q,R,S,T\nU,V,W,X,Y\n").unwrap();

        let table = KeyTable::load(&path).await.unwrap();
        assert_eq!(table.len(), 25);
        assert_eq!(table.lookup_coordinate('H'), Some(Coordinate::new(1, 2)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        let err = KeyTable::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::KeyLoad { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[tokio::test]
    async fn test_load_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.csv");
        std::fs::write(&path, [b'A', b',', 0xFF, 0xFE, b'\n']).unwrap();

        assert!(matches!(KeyTable::load(&path).await, Err(Error::KeyLoad { .. })));
    }

    #[tokio::test]
    async fn test_load_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.csv");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(KeyTable::load(&path).await, Err(Error::EmptyKey)));
    }
}
