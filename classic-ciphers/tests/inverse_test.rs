use classic_ciphers::errors::CipherError;
use classic_ciphers::ring::inverse::{MAX_DIMENSION, check_invertible, cofactor, transpose};
use classic_ciphers::ring::matrix_ops::{identity_matrix, matrix_mul};
use classic_ciphers::ring::{Matrix, Ring, adjoint, determinant, gcd, inverse};

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[test]
fn inverse_mod_26_gives_identity() -> Result<(), CipherError> {
    let ring = Ring::default();
    let matrices: [Matrix; 3] = [
        vec![vec![3, 3], vec![2, 5]],
        vec![vec![5, 8], vec![17, 3]],
        vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]],
    ];

    for matrix in matrices {
        let inv = inverse(&matrix, &ring)?;
        assert_eq!(matrix_mul(&matrix, &inv, &ring)?, identity_matrix(matrix.len()));
        assert!(inv.iter().flatten().all(|&v| (0..26).contains(&v)));
    }
    Ok(())
}

#[test]
fn adjoint_times_matrix_is_scaled_identity() -> Result<(), CipherError> {
    let matrix = vec![vec![2, -1, 0], vec![1, 3, 4], vec![0, 5, -2]];
    let det = determinant(&matrix)?;
    let adj = adjoint(&matrix)?;

    // plain integer product, no reduction
    let product: Matrix = (0..3)
        .map(|i| {
            (0..3)
                .map(|j| (0..3).map(|k| matrix[i][k] * adj[k][j]).sum())
                .collect()
        })
        .collect();

    let expected: Matrix = identity_matrix(3)
        .into_iter()
        .map(|row| row.into_iter().map(|v| v * det).collect())
        .collect();
    assert_eq!(product, expected);
    Ok(())
}

#[test]
fn cofactors_and_transpose() -> Result<(), CipherError> {
    let matrix = vec![vec![1, 2, 3], vec![0, 4, 5], vec![1, 0, 6]];
    assert_eq!(cofactor(&matrix, 0, 0)?, 24);
    assert_eq!(cofactor(&matrix, 0, 1)?, 5);
    assert_eq!(cofactor(&matrix, 1, 0)?, -12);
    assert!(matches!(
        cofactor(&matrix, 3, 0),
        Err(CipherError::DimensionMismatch(_))
    ));
    assert_eq!(transpose(&adjoint(&matrix)?)[1][0], -12);
    Ok(())
}

#[test]
fn weak_check_is_only_a_fast_fail() {
    assert!(check_invertible(&vec![vec![1, 2], vec![2, 4]]).is_ok());
    assert!(matches!(
        check_invertible(&vec![vec![0, 1], vec![1, 0]]),
        Err(CipherError::NotInvertible(_))
    ));
    assert!(matches!(
        check_invertible(&vec![vec![1, 2]]),
        Err(CipherError::InvalidMatrixShape(_))
    ));
}

#[test]
fn dimension_limit() -> Result<(), CipherError> {
    assert_eq!(determinant(&identity_matrix(MAX_DIMENSION))?, 1);
    assert!(matches!(
        inverse(&identity_matrix(MAX_DIMENSION + 1), &Ring::default()),
        Err(CipherError::InvalidMatrixShape(_))
    ));
    Ok(())
}

#[quickcheck]
fn prop_2x2_inverse_exists_iff_det_is_unit(a: i8, b: i8, c: i8, d: i8) -> TestResult {
    let (a, b, c, d) = (a as i64, b as i64, c as i64, d as i64);
    if a == 0 || d == 0 {
        return TestResult::discard();
    }

    let ring = Ring::try_with(27).unwrap();
    let matrix = vec![vec![a, b], vec![c, d]];
    let det = a * d - b * c;

    match inverse(&matrix, &ring) {
        Ok(inv) => TestResult::from_bool(
            gcd(det, 27) == 1
                && matrix_mul(&matrix, &inv, &ring).unwrap() == identity_matrix(2)
                && matrix_mul(&inv, &matrix, &ring).unwrap() == identity_matrix(2),
        ),
        Err(CipherError::NoModularInverse(_)) => TestResult::from_bool(gcd(det, 27) != 1),
        Err(e) => TestResult::error(e.to_string()),
    }
}
