//! Exact modular matrix inverse.
//!
//! 1. Find the determinant of the matrix (cofactor expansion, exact integers).
//! 2. Find the determinant's multiplicative inverse in the ring.
//! 3. Find the adjoint matrix.
//! 4. Multiply the adjoint matrix by the inverse of the determinant.
//!
//! Cofactor expansion is factorial in the matrix size, so matrices are capped at
//! [`MAX_DIMENSION`].

use crate::errors::CipherError;
use crate::ring::{Matrix, Ring};

/// Largest dimension accepted by [`determinant`] and the functions built on cofactors.
pub const MAX_DIMENSION: usize = 8;

/// Checks that `matrix` is non-empty and square, returning its dimension.
///
/// There is no upper bound here. [`determinant`], [`cofactor`] and [`adjoint`] enforce [`MAX_DIMENSION`].
pub fn is_square_matrix(matrix: &Matrix) -> Result<usize, CipherError> {
    let n = matrix.len();
    if n == 0 {
        return Err(CipherError::InvalidMatrixShape(
            "The matrix must not be empty".into(),
        ));
    }
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(CipherError::InvalidMatrixShape(format!(
            "The matrix must be square to find its inverse: {} rows but row {} has {} columns",
            n,
            i,
            row.len()
        )));
    }
    Ok(n)
}

/// Weak non-singularity pre-check: square, and the product of the diagonal is nonzero.
///
/// This is neither necessary nor sufficient for invertibility (`[[0, 1], [1, 0]]` is rejected,
/// `[[1, 2], [2, 4]]` passes). True singularity is caught by the gcd check in [`inverse`].
pub fn check_invertible(matrix: &Matrix) -> Result<(), CipherError> {
    is_square_matrix(matrix)?;

    // an integer product is zero iff one of its factors is
    if let Some(i) = (0..matrix.len()).find(|&i| matrix[i][i] == 0) {
        return Err(CipherError::NotInvertible(format!(
            "The matrix is not invertible: diagonal entry ({i}, {i}) is zero"
        )));
    }
    Ok(())
}

/// Exact determinant by cofactor expansion along the first row.
///
/// # Errors
///
/// `InvalidMatrixShape` for empty, non-square or oversized matrices,
/// `CalculationOverflow` if an intermediate value leaves the `i64` range.
///
/// # Example
///
/// ```
/// # use classic_ciphers::ring::determinant;
/// assert_eq!(determinant(&vec![vec![3, 3], vec![2, 5]]).unwrap(), 9);
/// assert_eq!(determinant(&vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]]).unwrap(), 441);
/// ```
pub fn determinant(matrix: &Matrix) -> Result<i64, CipherError> {
    bounded_square(matrix)?;
    expand(matrix)
}

/// [`is_square_matrix`] plus the [`MAX_DIMENSION`] cap.
fn bounded_square(matrix: &Matrix) -> Result<usize, CipherError> {
    let n = is_square_matrix(matrix)?;
    if n > MAX_DIMENSION {
        return Err(CipherError::InvalidMatrixShape(format!(
            "Matrix dimension {} exceeds the supported maximum of {}",
            n, MAX_DIMENSION
        )));
    }
    Ok(n)
}

fn expand(matrix: &Matrix) -> Result<i64, CipherError> {
    match matrix.len() {
        1 => Ok(matrix[0][0]),
        2 => {
            let main = matrix[0][0].checked_mul(matrix[1][1]);
            let anti = matrix[0][1].checked_mul(matrix[1][0]);
            main.zip(anti)
                .and_then(|(main, anti)| main.checked_sub(anti))
                .ok_or(CipherError::CalculationOverflow)
        }
        size => (0..size).try_fold(0i64, |acc, column| {
            matrix[0][column]
                .checked_mul(signed_minor(matrix, 0, column)?)
                .and_then(|term| acc.checked_add(term))
                .ok_or(CipherError::CalculationOverflow)
        }),
    }
}

/// `(-1)^(row + column)` times the determinant of the minor without `row` and `column`.
fn signed_minor(matrix: &Matrix, row: usize, column: usize) -> Result<i64, CipherError> {
    let minor: Matrix = matrix
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != row)
        .map(|(_, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != column)
                .map(|(_, &value)| value)
                .collect()
        })
        .collect();

    let det = expand(&minor)?;
    Ok(if (row + column) % 2 == 0 { det } else { -det })
}

/// Cofactor `C(row, column)` of a square matrix.
pub fn cofactor(matrix: &Matrix, row: usize, column: usize) -> Result<i64, CipherError> {
    let n = bounded_square(matrix)?;
    if row >= n || column >= n {
        return Err(CipherError::DimensionMismatch(format!(
            "Cofactor ({row}, {column}) is outside a {n}x{n} matrix"
        )));
    }
    if n == 1 {
        // the minor of a 1x1 matrix is empty, its determinant is 1
        return Ok(1);
    }
    signed_minor(matrix, row, column)
}

/// Adjoint (adjugate) matrix: the transposed cofactor matrix, `adj[j][i] = C(i, j)`.
pub fn adjoint(matrix: &Matrix) -> Result<Matrix, CipherError> {
    let n = bounded_square(matrix)?;
    let mut adjoint_matrix = vec![vec![0; n]; n];

    for i in 0..n {
        for j in 0..n {
            adjoint_matrix[j][i] = cofactor(matrix, i, j)?;
        }
    }
    Ok(adjoint_matrix)
}

/// Transposes an `r x c` matrix into a `c x r` one.
pub fn transpose(matrix: &Matrix) -> Matrix {
    let columns = matrix.first().map_or(0, Vec::len);
    (0..columns)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect()
}

/// Multiplicative inverse of a determinant in `ring`.
///
/// The gcd is checked first, so a determinant without an inverse fails instead of searching forever.
pub fn determinant_inverse(det: i64, ring: &Ring) -> Result<i64, CipherError> {
    if !ring.is_unit(det) {
        return Err(CipherError::NoModularInverse(format!(
            "The determinant {} does not have an inverse modulo {}",
            det,
            ring.modulus()
        )));
    }
    ring.inv(det)
}

/// Inverse of a square matrix over `ring`, with entries in `[0, modulus)`.
///
/// # Errors
///
/// * `InvalidMatrixShape` if the matrix is not square or exceeds [`MAX_DIMENSION`],
/// * `NotInvertible` if the diagonal pre-check fails,
/// * `NoModularInverse` if `gcd(det, modulus) != 1`.
///
/// # Example
///
/// ```
/// # use classic_ciphers::ring::{inverse, Ring};
/// let ring = Ring::try_with(26).unwrap();
/// let inv = inverse(&vec![vec![3, 3], vec![2, 5]], &ring).unwrap();
/// assert_eq!(inv, vec![vec![15, 17], vec![20, 9]]);
/// ```
pub fn inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, CipherError> {
    check_invertible(matrix)?;

    let det = determinant(matrix)?;
    let det_inv = determinant_inverse(det, ring)?;

    let inverse_matrix = adjoint(matrix)?
        .into_iter()
        .map(|row| row.into_iter().map(|value| ring.mul(value, det_inv)).collect())
        .collect();

    Ok(inverse_matrix)
}
