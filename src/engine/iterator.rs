//! Defines an object that iterates over the positions of a grid in sweep order.

use crate::universe::Coord;

/// Visits every position of a `rows` x `columns` grid exactly once: left to right within a row, rows top to bottom.
#[derive(Clone, Debug)]
pub struct SerialGridIterator {
    rows: usize,
    columns: usize,
    row: usize,
    col: usize,
}

impl SerialGridIterator {
    pub fn new(rows: usize, columns: usize) -> Self {
        SerialGridIterator { rows, columns, row: 0, col: 0 }
    }
}

impl Iterator for SerialGridIterator {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.columns == 0 || self.row >= self.rows {
            return None;
        }

        let coord = (self.row, self.col);
        self.col += 1;
        if self.col == self.columns {
            self.col = 0;
            self.row += 1;
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.columns == 0 || self.row >= self.rows {
            0
        } else {
            (self.rows - self.row) * self.columns - self.col
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SerialGridIterator {}

#[test]
fn serial_grid_iterator_is_row_major() {
    let visited: Vec<Coord> = SerialGridIterator::new(2, 3).collect();
    assert_eq!(visited, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    assert_eq!(SerialGridIterator::new(4, 5).len(), 20);
    assert_eq!(SerialGridIterator::new(0, 5).count(), 0);
}
