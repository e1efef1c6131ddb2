use crate::error::LatticeError;
use crate::zq::centered_mod;

/// Dense integer matrix in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Matrix entries, one `Vec` per row
    rows: Vec<Vec<i64>>,
    /// Number of rows
    n_rows: usize,
    /// Number of columns
    n_cols: usize,
}

/// Computes the inner product of two vectors, reduced to its centered form mod q
pub fn inner_product_mod(a: &[i64], b: &[i64], q: i64) -> Result<i64, LatticeError> {
    if a.len() != b.len() {
        return Err(LatticeError::length_mismatch("inner product", a.len(), b.len()));
    }

    let sum: i128 = a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x as i128 * y as i128)
        .sum();

    Ok(centered_mod(sum, q))
}

impl Matrix {
    /// Creates a matrix from rows, checking that every row has the same width
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, LatticeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        for row in &rows {
            if row.len() != n_cols {
                return Err(LatticeError::length_mismatch("matrix row", n_cols, row.len()));
            }
        }

        Ok(Self { rows, n_rows, n_cols })
    }

    /// Creates a matrix whose shape the caller already guarantees
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<i64>>, n_rows: usize, n_cols: usize) -> Self {
        debug_assert_eq!(rows.len(), n_rows);
        debug_assert!(rows.iter().all(|row| row.len() == n_cols));
        Self { rows, n_rows, n_cols }
    }

    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`
    pub fn from_fn<F>(n_rows: usize, n_cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> i64,
    {
        let rows = (0..n_rows)
            .map(|i| (0..n_cols).map(|j| f(i, j)).collect())
            .collect();

        Self { rows, n_rows, n_cols }
    }

    /// Creates a matrix from its columns, checking that every column has the same height
    pub fn from_columns(columns: &[Vec<i64>]) -> Result<Self, LatticeError> {
        let n_cols = columns.len();
        let n_rows = columns.first().map_or(0, Vec::len);

        for column in columns {
            if column.len() != n_rows {
                return Err(LatticeError::length_mismatch("matrix column", n_rows, column.len()));
            }
        }

        Ok(Self::from_fn(n_rows, n_cols, |i, j| columns[j][i]))
    }

    /// Creates a zero matrix of given dimensions
    pub fn zero(n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: vec![vec![0; n_cols]; n_rows],
            n_rows,
            n_cols,
        }
    }

    /// Returns the number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Gets an entry
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Returns row `i`
    ///
    /// Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[i64] {
        &self.rows[i]
    }

    /// Iterates over the rows
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[i64]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copies column `j` into a new vector
    ///
    /// Panics if `j` is out of range.
    pub fn column(&self, j: usize) -> Vec<i64> {
        self.rows.iter().map(|row| row[j]).collect()
    }

    /// Consumes the matrix, returning its rows
    pub fn into_rows(self) -> Vec<Vec<i64>> {
        self.rows
    }

    /// Transpose of the matrix
    pub fn transpose(&self) -> Matrix {
        Self::from_fn(self.n_cols, self.n_rows, |i, j| self.rows[j][i])
    }

    /// Places `other` to the right of `self`
    pub fn hconcat(&self, other: &Matrix) -> Result<Matrix, LatticeError> {
        if self.n_rows != other.n_rows {
            return Err(LatticeError::length_mismatch("horizontal concatenation", self.n_rows, other.n_rows));
        }

        let rows = self.rows.iter()
            .zip(other.rows.iter())
            .map(|(left, right)| {
                let mut row = Vec::with_capacity(self.n_cols + other.n_cols);
                row.extend_from_slice(left);
                row.extend_from_slice(right);
                row
            })
            .collect();

        Ok(Self::from_rows_unchecked(rows, self.n_rows, self.n_cols + other.n_cols))
    }

    /// Matrix-vector multiplication with centered reduction mod q
    pub fn mul_vec_mod(&self, vec: &[i64], q: i64) -> Result<Vec<i64>, LatticeError> {
        if self.n_cols != vec.len() {
            return Err(LatticeError::length_mismatch("matrix-vector product", self.n_cols, vec.len()));
        }

        self.rows.iter()
            .map(|row| inner_product_mod(row, vec, q))
            .collect()
    }

    /// Returns `true` if every entry satisfies `pred`
    pub fn all_entries<P>(&self, mut pred: P) -> bool
    where
        P: FnMut(i64) -> bool,
    {
        self.rows.iter().flatten().all(|&x| pred(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Matrix {
        // [1 2 3]
        // [4 5 6]
        Matrix::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_matrix_creation() {
        let matrix = sample_matrix();

        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.get(1, 2), Some(6));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.row(0), &[1, 2, 3]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::new(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err, LatticeError::length_mismatch("matrix row", 2, 1));
    }

    #[test]
    fn test_matrix_transpose() {
        let transposed = sample_matrix().transpose();

        // Expected:
        // [1 4]
        // [2 5]
        // [3 6]
        assert_eq!(transposed.n_rows(), 3);
        assert_eq!(transposed.n_cols(), 2);
        assert_eq!(transposed.into_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn test_columns() {
        let matrix = sample_matrix();
        assert_eq!(matrix.column(1), vec![2, 5]);

        let rebuilt = Matrix::from_columns(&[vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap();
        assert_eq!(rebuilt, matrix);

        assert!(Matrix::from_columns(&[vec![1, 4], vec![2]]).is_err());
    }

    #[test]
    fn test_hconcat() {
        let left = sample_matrix();
        let right = Matrix::new(vec![vec![7], vec![8]]).unwrap();

        let joined = left.hconcat(&right).unwrap();
        assert_eq!(joined.n_cols(), 4);
        assert_eq!(joined.row(1), &[4, 5, 6, 8]);

        let short = Matrix::zero(1, 1);
        assert!(left.hconcat(&short).is_err());
    }

    #[test]
    fn test_matrix_vector_multiplication() {
        // [1 2]   [5]   [17]         [0]
        // [3 4] * [6] = [39] mod 17 = [5]
        let matrix = Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let result = matrix.mul_vec_mod(&[5, 6], 17).unwrap();
        assert_eq!(result, vec![0, 5]);

        // 39 mod 13 = 0, 17 mod 13 = 4
        let result = matrix.mul_vec_mod(&[5, 6], 13).unwrap();
        assert_eq!(result, vec![4, 0]);
    }

    #[test]
    fn test_matrix_vector_dimension_check() {
        let err = sample_matrix().mul_vec_mod(&[1, 2], 17).unwrap_err();
        assert!(matches!(err, LatticeError::LengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_inner_product_centered() {
        // 1*3 + 2*4 = 11 = -2 mod 13
        assert_eq!(inner_product_mod(&[1, 2], &[3, 4], 13).unwrap(), -2);
        assert!(inner_product_mod(&[1], &[3, 4], 13).is_err());
    }
}
