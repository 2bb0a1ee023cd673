use crate::errors::CipherError;
use crate::ring::{Matrix, Ring, Vector};

/// `(rows, columns)` of a rectangular matrix; `(0, 0)` when empty.
fn shape(matrix: &Matrix, label: &str) -> Result<(usize, usize), CipherError> {
    let columns = matrix.first().map_or(0, Vec::len);
    match matrix.iter().position(|row| row.len() != columns) {
        Some(i) => Err(CipherError::DimensionMismatch(format!(
            "{} row {} has {} entries, row 0 has {}",
            label,
            i,
            matrix[i].len(),
            columns
        ))),
        None => Ok((matrix.len(), columns)),
    }
}

/// Sum of pairwise products, reduced into the ring.
fn dot(left: impl Iterator<Item = i64>, right: impl Iterator<Item = i64>, ring: &Ring) -> i64 {
    left.zip(right)
        .fold(0, |acc, (l, r)| ring.add(acc, ring.mul(l, r)))
}

/// `A x` for an `m x n` matrix and a length-`n` column vector, reduced into the ring.
///
/// This is how a Hill block is enciphered: `c = K p`.
pub fn matrix_vector_mul(a: &Matrix, x: &Vector, ring: &Ring) -> Result<Vector, CipherError> {
    let (rows, columns) = shape(a, "matrix")?;
    if rows > 0 && columns != x.len() {
        return Err(CipherError::DimensionMismatch(format!(
            "a matrix with {} columns cannot multiply a vector of length {}",
            columns,
            x.len()
        )));
    }

    Ok(a.iter()
        .map(|row| dot(row.iter().copied(), x.iter().copied(), ring))
        .collect())
}

/// Matrix product `A B` reduced into the ring.
///
/// # Errors
///
/// `DimensionMismatch` for ragged matrices or when the columns of `A` do not match the rows of `B`.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, CipherError> {
    let (rows, inner) = shape(a, "left matrix")?;
    let (b_rows, columns) = shape(b, "right matrix")?;
    if rows == 0 {
        return Ok(Matrix::new());
    }
    if inner != b_rows {
        return Err(CipherError::DimensionMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            rows, inner, b_rows, columns
        )));
    }

    Ok(a.iter()
        .map(|row| {
            (0..columns)
                .map(|j| dot(row.iter().copied(), b.iter().map(|b_row| b_row[j]), ring))
                .collect()
        })
        .collect())
}

/// The `n x n` identity.
pub fn identity_matrix(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| i64::from(i == j)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet_ring() -> Ring {
        Ring::try_with(27).unwrap()
    }

    #[test]
    fn test_hill_block_product() {
        let ring = alphabet_ring();
        // key "hill" times block "he"
        let key = vec![vec![7, 8], vec![11, 11]];
        assert_eq!(matrix_vector_mul(&key, &vec![7, 4], &ring).unwrap(), vec![0, 13]);
        // negative entries are reduced first
        assert_eq!(matrix_vector_mul(&key, &vec![-20, -23], &ring).unwrap(), vec![0, 13]);
    }

    #[test]
    fn test_vector_length_must_match_columns() {
        let ring = alphabet_ring();
        let a = vec![vec![1, 2], vec![3, 4]];
        assert!(matches!(
            matrix_vector_mul(&a, &vec![5, 6, 7], &ring),
            Err(CipherError::DimensionMismatch(_))
        ));
        assert!(matrix_vector_mul(&vec![vec![1, 2], vec![3]], &vec![1, 1], &ring).is_err());
        assert!(matrix_vector_mul(&Matrix::new(), &vec![1], &ring).unwrap().is_empty());
    }

    #[test]
    fn test_matrix_product_mod_26() {
        let ring = Ring::default();
        let a = vec![vec![1, 2], vec![3, 4]];
        let b = vec![vec![5, 6], vec![7, 8]];
        // [[19, 22], [43, 50]] mod 26
        assert_eq!(
            matrix_mul(&a, &b, &ring).unwrap(),
            vec![vec![19, 22], vec![17, 24]]
        );
    }

    #[test]
    fn test_matrix_product_shapes() {
        let ring = alphabet_ring();
        let square = vec![vec![1, 2], vec![3, 4]];
        let wide = vec![vec![5, 6, 7], vec![8, 9, 10]];
        let tall = vec![vec![1], vec![2], vec![3]];

        let product = matrix_mul(&square, &wide, &ring).unwrap();
        assert_eq!(product.len(), 2);
        assert!(product.iter().all(|row| row.len() == 3));
        assert!(matches!(
            matrix_mul(&square, &tall, &ring),
            Err(CipherError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_identity_is_neutral() {
        let ring = alphabet_ring();
        let m = vec![vec![7, 8], vec![11, 11]];
        assert_eq!(matrix_mul(&m, &identity_matrix(2), &ring).unwrap(), m);
        assert_eq!(identity_matrix(1), vec![vec![1]]);
        assert!(identity_matrix(0).is_empty());
    }
}
