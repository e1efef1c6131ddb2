use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use crate::vector_matrix::Matrix;
use crate::zq::balanced_bounds;

/// Samples uniformly from the range [min, max]
pub fn sample_uniform<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
    let distribution = Uniform::new_inclusive(min, max);
    distribution.sample(rng)
}

/// Samples a uniform element of Z/qZ in centered form
pub fn sample_uniform_balanced<R: Rng + ?Sized>(q: i64, rng: &mut R) -> i64 {
    let (low, high) = balanced_bounds(q);
    sample_uniform(low, high, rng)
}

/// Samples a single bit as 0 or 1
pub fn sample_bit<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    if rng.gen::<bool>() { 1 } else { 0 }
}

/// Samples a vector of `len` independent uniform bits
pub fn sample_bit_vector<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i64> {
    (0..len).map(|_| sample_bit(rng)).collect()
}

/// Samples an `n_rows × n_cols` matrix with uniform centered entries mod q
pub fn sample_uniform_matrix<R: Rng + ?Sized>(
    n_rows: usize,
    n_cols: usize,
    q: i64,
    rng: &mut R,
) -> Matrix {
    let (low, high) = balanced_bounds(q);
    let distribution = Uniform::new_inclusive(low, high);

    let rows = (0..n_rows)
        .map(|_| (0..n_cols).map(|_| distribution.sample(rng)).collect())
        .collect();

    Matrix::from_rows_unchecked(rows, n_rows, n_cols)
}

/// Samples an `n_rows × n_cols` matrix with entries in {0, 1}
pub fn sample_binary_matrix<R: Rng + ?Sized>(n_rows: usize, n_cols: usize, rng: &mut R) -> Matrix {
    let rows = (0..n_rows)
        .map(|_| sample_bit_vector(n_cols, rng))
        .collect();

    Matrix::from_rows_unchecked(rows, n_rows, n_cols)
}
