use hashbrown::HashMap;

use crate::config::MAX_DIMENSION;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

/// Immutable Polybius square.
///
/// Cells are stored row-major, so the cell at flat index `i` sits at
/// `(i / ncols, i % ncols)`. Rows shorter than the first row leave empty
/// cells at their tail. A character-to-coordinate index is built once at
/// construction and always holds the first occurrence of each character.
#[derive(Debug, Clone)]
pub struct KeyTable {
    cells: Vec<Option<char>>,
    nrows: usize,
    ncols: usize,
    index: HashMap<char, Coordinate>,
}

impl KeyTable {
    /// Builds a table from parsed rows.
    ///
    /// The first row fixes the column count. Cells may be plain `char`s or
    /// `Option<char>` where `None` marks an empty cell.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyKey`] when there are no rows or the first row is empty
    /// - [`Error::KeyTooLarge`] when either dimension exceeds [`MAX_DIMENSION`]
    /// - [`Error::RaggedRow`] when a row is longer than the first one
    pub fn build<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: Into<Option<char>>,
    {
        let grid: Vec<Vec<Option<char>>> = rows.into_iter().map(|row| row.into_iter().map(Into::into).collect()).collect();

        let nrows = grid.len();
        let ncols = grid.first().map_or(0, Vec::len);
        if ncols == 0 {
            return Err(Error::EmptyKey);
        }
        if nrows > MAX_DIMENSION || ncols > MAX_DIMENSION {
            return Err(Error::KeyTooLarge { rows: nrows, cols: ncols });
        }

        let mut cells = vec![None; nrows * ncols];
        let mut index = HashMap::with_capacity(nrows * ncols);

        for (row_idx, row) in grid.into_iter().enumerate() {
            if row.len() > ncols {
                return Err(Error::RaggedRow { row: row_idx, len: row.len(), expected: ncols });
            }

            for (col_idx, cell) in row.into_iter().enumerate() {
                cells[row_idx * ncols + col_idx] = cell;
                if let Some(ch) = cell {
                    // Row-major visit order makes the first occurrence win.
                    index.entry(ch).or_insert_with(|| coordinate(row_idx, col_idx));
                }
            }
        }

        Ok(Self { cells, nrows, ncols, index })
    }

    /// Returns the coordinate of the first cell holding `ch`.
    #[inline]
    pub fn lookup_coordinate(&self, ch: char) -> Option<Coordinate> {
        self.index.get(&ch).copied()
    }

    /// Returns the character stored at `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfRange`] when the coordinate lies
    /// outside the square or addresses an empty cell.
    pub fn lookup_char(&self, coordinate: Coordinate) -> Result<char> {
        let (row, col) = (usize::from(coordinate.row()), usize::from(coordinate.col()));
        let out_of_range = Error::CoordinateOutOfRange { row: coordinate.row(), col: coordinate.col() };

        if row >= self.nrows || col >= self.ncols {
            return Err(out_of_range);
        }

        self.cells[row * self.ncols + col].ok_or(out_of_range)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of cells, empty ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a built table, since [`KeyTable::build`] rejects
    /// empty keys. Kept beside [`KeyTable::len`] for clippy's
    /// `len_without_is_empty`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the characters of the square in row-major order.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().flatten().copied()
    }
}

// Both indices are below MAX_DIMENSION here.
#[allow(clippy::cast_possible_truncation)]
#[inline]
fn coordinate(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row as u8, col as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_by_five() -> KeyTable {
        KeyTable::build(["ABCDE", "FGHIJ", "KLMNO", "PQRST", "UVWXY"].map(|row| row.chars().collect::<Vec<char>>())).unwrap()
    }

    #[test]
    fn test_build_dimensions() {
        let table = five_by_five();
        assert_eq!(table.nrows(), 5);
        assert_eq!(table.ncols(), 5);
        assert_eq!(table.len(), 25);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_single_cell_table_is_not_empty() {
        let table = KeyTable::build([['A']]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_lookup_coordinate() {
        let table = five_by_five();
        assert_eq!(table.lookup_coordinate('A'), Some(Coordinate::new(0, 0)));
        assert_eq!(table.lookup_coordinate('H'), Some(Coordinate::new(1, 2)));
        assert_eq!(table.lookup_coordinate('E'), Some(Coordinate::new(0, 4)));
        assert_eq!(table.lookup_coordinate('O'), Some(Coordinate::new(2, 4)));
        assert_eq!(table.lookup_coordinate('Y'), Some(Coordinate::new(4, 4)));
    }

    #[test]
    fn test_lookup_coordinate_missing() {
        let table = five_by_five();
        assert_eq!(table.lookup_coordinate('Z'), None);
        assert_eq!(table.lookup_coordinate('a'), None);
        assert_eq!(table.lookup_coordinate('\n'), None);
    }

    #[test]
    fn test_lookup_char() {
        let table = five_by_five();
        assert_eq!(table.lookup_char(Coordinate::new(1, 2)).unwrap(), 'H');
        assert_eq!(table.lookup_char(Coordinate::new(4, 4)).unwrap(), 'Y');
    }

    #[test]
    fn test_lookup_char_out_of_range() {
        let table = five_by_five();
        assert!(matches!(table.lookup_char(Coordinate::new(5, 0)), Err(Error::CoordinateOutOfRange { row: 5, col: 0 })));
        assert!(matches!(table.lookup_char(Coordinate::new(0, 9)), Err(Error::CoordinateOutOfRange { row: 0, col: 9 })));
    }

    #[test]
    fn test_every_cell_round_trips() {
        let table = five_by_five();
        for ch in table.alphabet() {
            let coordinate = table.lookup_coordinate(ch).unwrap();
            assert_eq!(table.lookup_char(coordinate).unwrap(), ch);
        }
    }

    #[test]
    fn test_duplicate_first_occurrence_wins() {
        let table = KeyTable::build([vec!['A', 'B'], vec!['B', 'A']]).unwrap();
        assert_eq!(table.lookup_coordinate('B'), Some(Coordinate::new(0, 1)));
        assert_eq!(table.lookup_coordinate('A'), Some(Coordinate::new(0, 0)));
        assert_eq!(table.lookup_char(Coordinate::new(1, 0)).unwrap(), 'B');
    }

    #[test]
    fn test_build_empty_fails() {
        let rows: Vec<Vec<char>> = Vec::new();
        assert!(matches!(KeyTable::build(rows), Err(Error::EmptyKey)));
        assert!(matches!(KeyTable::build([Vec::<char>::new()]), Err(Error::EmptyKey)));
    }

    #[test]
    fn test_build_too_large_fails() {
        let wide = [vec!['x'; 11]];
        assert!(matches!(KeyTable::build(wide), Err(Error::KeyTooLarge { rows: 1, cols: 11 })));

        let tall = vec![vec!['x']; 11];
        assert!(matches!(KeyTable::build(tall), Err(Error::KeyTooLarge { rows: 11, cols: 1 })));
    }

    #[test]
    fn test_build_ten_by_ten_is_allowed() {
        let rows: Vec<Vec<char>> = (0..10u32).map(|r| (0..10u32).map(|c| char::from_u32(0x100 + r * 10 + c).unwrap()).collect()).collect();
        let table = KeyTable::build(rows).unwrap();
        assert_eq!(table.lookup_coordinate(char::from_u32(0x100 + 99).unwrap()), Some(Coordinate::new(9, 9)));
    }

    #[test]
    fn test_build_ragged_row_fails() {
        let rows = [vec!['A', 'B'], vec!['C', 'D', 'E']];
        assert!(matches!(KeyTable::build(rows), Err(Error::RaggedRow { row: 1, len: 3, expected: 2 })));
    }

    #[test]
    fn test_short_row_leaves_empty_cells() {
        let table = KeyTable::build([vec!['A', 'B', 'C'], vec!['D']]).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.lookup_coordinate('D'), Some(Coordinate::new(1, 0)));
        assert!(matches!(table.lookup_char(Coordinate::new(1, 1)), Err(Error::CoordinateOutOfRange { .. })));
        assert_eq!(table.alphabet().collect::<String>(), "ABCD");
    }

    #[test]
    fn test_build_with_empty_cells() {
        let table = KeyTable::build([vec![Some('A'), None], vec![None, Some('B')]]).unwrap();
        assert_eq!(table.lookup_coordinate('B'), Some(Coordinate::new(1, 1)));
        assert!(table.lookup_char(Coordinate::new(0, 1)).is_err());
    }
}
