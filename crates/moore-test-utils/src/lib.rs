//! Test utilities for Moore development.
//!
//! Provides rule codes and tables with known behaviour ([`fixtures`]) and
//! helpers for building small grids from text diagrams.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    all_ones_code, all_zeros_code, centre_weight_rule, identity_code, parity_rule,
};

use moore_grid::StateGrid;

/// Build a grid from a text diagram, one string per row.
///
/// `#` is a live cell and `.` a dead one. The first string is the *top*
/// row (`y = N - 1`) so diagrams read the way the grid renders. Panics
/// if the diagram is not square or contains other characters.
pub fn grid_from_rows(rows: &[&str]) -> StateGrid {
    let n = rows.len();
    let mut cells = vec![0.0; n * n];
    for (r, row) in rows.iter().enumerate() {
        let y = n - 1 - r;
        assert_eq!(row.chars().count(), n, "row {r} is not {n} wide");
        for (x, c) in row.chars().enumerate() {
            cells[y * n + x] = match c {
                '#' => 1.0,
                '.' => 0.0,
                other => panic!("unexpected cell character {other:?}"),
            };
        }
    }
    StateGrid::from_cells(n as u32, cells).expect("diagram is a valid grid")
}

/// Render a grid back into the diagram format of [`grid_from_rows`].
pub fn grid_rows(grid: &StateGrid) -> Vec<String> {
    let n = grid.size() as i64;
    (0..n)
        .rev()
        .map(|y| {
            (0..n)
                .map(|x| if grid.read(x, y) >= 0.5 { '#' } else { '.' })
                .collect()
        })
        .collect()
}
