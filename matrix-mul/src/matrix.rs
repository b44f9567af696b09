//! Dense row-major integer matrices.

use std::fmt;

/// A dense matrix stored as a sequence of rows.
pub type Matrix = Vec<Vec<i64>>;

/// Names one side of a product `A × B` in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => f.write_str("A"),
            Operand::B => f.write_str("B"),
        }
    }
}

/// Returns `(rows, cols)`, taking the column count from the first row.
pub fn shape(matrix: &[Vec<i64>]) -> (usize, usize) {
    (matrix.len(), matrix.first().map_or(0, |row| row.len()))
}

/// Creates a zero-filled `rows × cols` matrix.
pub fn allocate(rows: usize, cols: usize) -> Matrix {
    vec![vec![0; cols]; rows]
}

/// Compares two matrices element by element.
///
/// Row counts and every row's length must match as well, so a jagged
/// matrix is never equal to a rectangular one with the same prefix.
pub fn equal(x: &[Vec<i64>], y: &[Vec<i64>]) -> bool {
    x.len() == y.len()
        && x.iter()
            .zip(y)
            .all(|(row_x, row_y)| row_x.as_slice() == row_y.as_slice())
}
