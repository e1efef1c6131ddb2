use num_bigint::BigInt;
use num_integer::Integer;
use crate::error::LatticeError;
use crate::vector_matrix::Matrix;
use crate::zq::centered_mod;

/// Evaluates the trapdoor function on an `m × n` matrix and a length-`n` vector.
///
/// The weighted sum `S = Σ_j Σ_k v[j]·M[k][j]·q^k` is accumulated modulo
/// `q^m` with a non-negative remainder, then `m` rounded base-`q` digits are
/// peeled off it with a growing divisor. Each digit is returned in centered
/// form, so the output has length `m` with entries in `(-q/2, q/2]`.
///
/// The result depends only on the inputs.
pub fn special_product(matrix: &Matrix, v: &[i64], q: i64) -> Result<Vec<i64>, LatticeError> {
    if matrix.n_cols() != v.len() {
        return Err(LatticeError::length_mismatch("special product", matrix.n_cols(), v.len()));
    }
    if q < 2 {
        return Err(LatticeError::InvalidParameters(format!("modulus {} is too small", q)));
    }

    let m = matrix.n_rows();
    let exponent = u32::try_from(m)
        .map_err(|_| LatticeError::InvalidParameters(format!("{} rows is too many", m)))?;

    let q_big = BigInt::from(q);
    let q_m = q_big.pow(exponent);

    let sum = aggregate(matrix, v, &q_big, &q_m);
    extract_digits(sum, m, q)
}

/// Computes `Σ_k c_k·q^k mod q^m` where `c_k` is row `k` of the matrix dotted with `v`.
///
/// Horner's rule from the top row keeps every partial value in `[0, q^m)`.
fn aggregate(matrix: &Matrix, v: &[i64], q: &BigInt, q_m: &BigInt) -> BigInt {
    let mut sum = BigInt::default();

    for row in matrix.iter_rows().rev() {
        // Each product fits in i128, a sum of them may not
        let coefficient: BigInt = row.iter()
            .zip(v.iter())
            .map(|(&a, &b)| BigInt::from(a as i128 * b as i128))
            .sum();

        sum = (sum * q + coefficient).mod_floor(q_m);
    }

    sum
}

/// Peels `m` rounded digits off `sum`, starting from the least significant
fn extract_digits(mut sum: BigInt, m: usize, q: i64) -> Result<Vec<i64>, LatticeError> {
    let q_big = BigInt::from(q);
    let mut curr = q_big.clone();
    let mut digits = Vec::with_capacity(m);

    for _ in 0..m {
        // (sum mod curr) < curr, so the digit lies in [0, q)
        let digit = (sum.mod_floor(&curr) * &q_big).div_floor(&curr);
        sum -= &digit;

        let digit = i64::try_from(&digit).map_err(|_| {
            LatticeError::InvalidParameters(format!("digit {} does not fit modulus {}", digit, q))
        })?;
        digits.push(centered_mod(digit as i128, q));

        curr *= &q_big;
    }

    Ok(digits)
}
