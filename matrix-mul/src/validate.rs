//! Input checks run before any allocation or scheduling.

use crate::Error;
use crate::matrix::{Operand, shape};

/// Validates the operands of `A × B` and the requested worker count.
///
/// Checks run in a fixed order and stop at the first failure:
/// worker count, missing operand, empty operand, inner dimensions,
/// then rectangularity of A and B.
pub fn validate(
    a: Option<&[Vec<i64>]>,
    b: Option<&[Vec<i64>]>,
    workers: isize,
) -> Result<(), Error> {
    checked(a, b, workers).map(|_| ())
}

/// Operands that passed [`validate`].
pub(crate) struct Checked<'a> {
    pub a: &'a [Vec<i64>],
    pub b: &'a [Vec<i64>],
    pub workers: usize,
}

pub(crate) fn checked<'a>(
    a: Option<&'a [Vec<i64>]>,
    b: Option<&'a [Vec<i64>]>,
    workers: isize,
) -> Result<Checked<'a>, Error> {
    if workers <= 0 {
        return Err(Error::InvalidWorkerCount(workers));
    }

    let a = a.ok_or(Error::NilMatrix(Operand::A))?;
    let b = b.ok_or(Error::NilMatrix(Operand::B))?;

    if a.is_empty() {
        return Err(Error::EmptyMatrix(Operand::A));
    }
    if b.is_empty() {
        return Err(Error::EmptyMatrix(Operand::B));
    }

    let (m, n) = shape(a);
    let (b_n, p) = shape(b);
    if n != b_n {
        return Err(Error::DimensionMismatch(m, n, b_n, p));
    }

    check_rectangular(a, Operand::A)?;
    check_rectangular(b, Operand::B)?;

    Ok(Checked {
        a,
        b,
        workers: workers.unsigned_abs(),
    })
}

fn check_rectangular(matrix: &[Vec<i64>], operand: Operand) -> Result<(), Error> {
    let expected = shape(matrix).1;
    match matrix.iter().position(|row| row.len() != expected) {
        Some(row) => Err(Error::JaggedMatrix {
            operand,
            row,
            len: matrix[row].len(),
            expected,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: usize) -> Vec<Vec<i64>> {
        vec![vec![1; n]; n]
    }

    #[test]
    fn worker_count_is_checked_first() {
        let err = validate(None, None, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidWorkerCount(0)));

        let err = validate(None, None, -1).unwrap_err();
        assert!(matches!(err, Error::InvalidWorkerCount(-1)));
    }

    #[test]
    fn missing_operand_is_reported_before_emptiness() {
        let empty: Vec<Vec<i64>> = Vec::new();
        let err = validate(None, Some(&empty[..]), 1).unwrap_err();
        assert!(matches!(err, Error::NilMatrix(Operand::A)));

        let err = validate(Some(&empty[..]), None, 1).unwrap_err();
        assert!(matches!(err, Error::NilMatrix(Operand::B)));
    }

    #[test]
    fn empty_operand_is_rejected() {
        let empty: Vec<Vec<i64>> = Vec::new();
        let a = square(2);
        let err = validate(Some(&empty[..]), Some(&a[..]), 4).unwrap_err();
        assert!(matches!(err, Error::EmptyMatrix(Operand::A)));

        let err = validate(Some(&a[..]), Some(&empty[..]), 4).unwrap_err();
        assert!(matches!(err, Error::EmptyMatrix(Operand::B)));
    }

    #[test]
    fn inner_dimensions_must_agree() {
        let a = vec![vec![1; 3]; 2];
        let b = vec![vec![1; 2]; 4];
        let err = validate(Some(&a[..]), Some(&b[..]), 2).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(2, 3, 4, 2)));
    }

    #[test]
    fn jagged_rows_are_rejected() {
        let a = vec![vec![1, 2], vec![3]];
        let b = square(2);
        let err = validate(Some(&a[..]), Some(&b[..]), 2).unwrap_err();
        assert!(matches!(
            err,
            Error::JaggedMatrix {
                operand: Operand::A,
                row: 1,
                len: 1,
                expected: 2
            }
        ));

        let b = vec![vec![1, 2], vec![3, 4, 5]];
        let a = square(2);
        let err = validate(Some(&a[..]), Some(&b[..]), 2).unwrap_err();
        assert!(matches!(err, Error::JaggedMatrix { operand: Operand::B, row: 1, .. }));
    }

    #[test]
    fn well_formed_operands_pass() {
        let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let b = vec![vec![7, 8], vec![9, 10], vec![11, 12]];
        assert!(validate(Some(&a[..]), Some(&b[..]), 1).is_ok());
    }
}
