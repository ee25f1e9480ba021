//! Placement of grid items: a fixed two-column, row-major flow.

use std::ops::Range;

/// Columns in every grid.  Not derived from the available width.
pub const COLUMNS: usize = 2;

/// Row/column of an item inside its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

pub fn cell_position(index: usize) -> CellPos {
    CellPos {
        row: index / COLUMNS,
        col: index % COLUMNS,
    }
}

/// Number of rows needed for `len` items.
pub fn row_count(len: usize) -> usize {
    len.div_ceil(COLUMNS)
}

/// Item indices that sit in `row`, clamped to `len`.
pub fn row_items(row: usize, len: usize) -> Range<usize> {
    let start = (row * COLUMNS).min(len);
    let end = (start + COLUMNS).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_flow_row_major() {
        for len in 0..=25 {
            for i in 0..len {
                let pos = cell_position(i);
                assert_eq!(pos, CellPos { row: i / 2, col: i % 2 });
                assert!(row_items(pos.row, len).contains(&i));
            }
            assert_eq!(row_count(len), (len + 1) / 2);
        }
    }

    #[test]
    fn empty_grid_has_no_rows() {
        assert_eq!(row_count(0), 0);
        assert!(row_items(0, 0).is_empty());
    }

    #[test]
    fn twenty_items_make_ten_full_rows() {
        assert_eq!(row_count(20), 10);
        for row in 0..10 {
            assert_eq!(row_items(row, 20), row * 2..row * 2 + 2);
        }
    }

    #[test]
    fn odd_count_leaves_last_row_half_full() {
        assert_eq!(row_count(3), 2);
        assert_eq!(row_items(1, 3), 2..3);
        assert_eq!(cell_position(2), CellPos { row: 1, col: 0 });
    }
}
