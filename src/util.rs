//! General-purpose utility functions

use itertools::Itertools;

use crate::universe::Neighborhood;

/// Given an index into the grid's row-major cell buffer and the number of columns, returns the (row, col) pair.
pub fn get_coords(index: usize, columns: usize) -> (usize, usize) {
    debug_assert!(columns > 0);
    (index / columns, index % columns)
}

/// Given a (row, col) pair and the number of columns, returns the index of that coordinate in the cell buffer.
pub fn get_index(row: usize, col: usize, columns: usize) -> usize {
    debug_assert!(col < columns);
    row * columns + col
}

/// Relative offsets of the neighbors in a neighborhood, top-left to bottom-right.
pub fn neighbor_offsets(neighborhood: Neighborhood) -> impl Iterator<Item = (isize, isize)> {
    (-1isize..=1)
        .cartesian_product(-1isize..=1)
        .filter(|&d| d != (0, 0))
        .filter(move |&(dr, dc)| match neighborhood {
            Neighborhood::Moore => true,
            Neighborhood::VonNeumann => dr == 0 || dc == 0,
        })
}

fn shift(coord: usize, offset: isize, len: usize, wrap: bool) -> Option<usize> {
    let shifted = coord as isize + offset;
    if (0..len as isize).contains(&shifted) {
        Some(shifted as usize)
    } else if wrap {
        Some(shifted.rem_euclid(len as isize) as usize)
    } else {
        None
    }
}

/// Returns the coordinates of all neighbors of `(row, col)` in a stable order.  Without wrapping, cells on an edge
/// or corner simply get fewer neighbors.  With wrapping, very small grids can wrap back onto the cell itself or
/// reach the same neighbor from two sides; the cell itself is never included and duplicates are dropped.
pub fn iter_neighbors(
    row: usize,
    col: usize,
    rows: usize,
    columns: usize,
    neighborhood: Neighborhood,
    wrap: bool,
) -> impl Iterator<Item = (usize, usize)> {
    debug_assert!(row < rows && col < columns);

    neighbor_offsets(neighborhood)
        .filter_map(move |(dr, dc)| Some((shift(row, dr, rows, wrap)?, shift(col, dc, columns, wrap)?)))
        .filter(move |&pos| pos != (row, col))
        .unique()
}

#[test]
fn coords_index_roundtrip() {
    let columns = 7;
    assert_eq!(get_index(2, 3, columns), 17);
    assert_eq!(get_coords(17, columns), (2, 3));
    assert_eq!(get_coords(6, columns), (0, 6));
}

#[test]
fn iter_neighbors_functionality() {
    let interior: Vec<(usize, usize)> = iter_neighbors(1, 1, 3, 3, Neighborhood::Moore, false).collect();
    assert_eq!(interior, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]);

    let corner: Vec<(usize, usize)> = iter_neighbors(0, 0, 3, 3, Neighborhood::Moore, false).collect();
    assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

    let edge: Vec<(usize, usize)> = iter_neighbors(0, 1, 3, 3, Neighborhood::VonNeumann, false).collect();
    assert_eq!(edge, vec![(0, 0), (0, 2), (1, 1)]);
}

#[test]
fn iter_neighbors_wrapping() {
    let corner: Vec<(usize, usize)> = iter_neighbors(0, 0, 4, 4, Neighborhood::Moore, true).collect();
    assert_eq!(corner.len(), 8);
    assert_eq!(corner[0], (3, 3));
    assert!(corner.iter().all(|&(r, c)| r < 4 && c < 4));

    // a single row wraps back onto itself vertically and reaches its only neighbor from both sides
    let tiny: Vec<(usize, usize)> = iter_neighbors(0, 0, 1, 2, Neighborhood::Moore, true).collect();
    assert_eq!(tiny, vec![(0, 1)]);
}
