use crate::error::LatticeError;

/// Parameter triple shared by a key pair and every block it processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeParams {
    /// Lattice dimension
    pub n: usize,
    /// Odd modulus of the ring Z/qZ
    pub q: i64,
    /// Block size in bits (rows of the private key)
    pub k: usize,
}

impl LatticeParams {
    /// Creates a validated parameter set.
    ///
    /// Requires `n >= 1`, `k >= 1`, `q` odd and `q > 10·n·(ln n)²`.
    pub fn new(n: usize, q: i64, k: usize) -> Result<Self, LatticeError> {
        let params = Self::new_unchecked(n, q, k)?;
        let bound = Self::modulus_bound(n);
        if (q as f64) <= bound {
            return Err(LatticeError::InvalidParameters(format!(
                "modulus {} must exceed 10·n·(ln n)² = {:.2} for n = {}",
                q, bound, n
            )));
        }
        Ok(params)
    }

    /// Creates a parameter set without enforcing the modulus bound.
    ///
    /// Zero dimensions and even or tiny moduli are still rejected, since
    /// the block encoding needs an odd `q >= 3`.
    pub fn new_unchecked(n: usize, q: i64, k: usize) -> Result<Self, LatticeError> {
        if n == 0 || k == 0 {
            return Err(LatticeError::InvalidParameters(format!(
                "dimensions must be positive (n = {}, k = {})",
                n, k
            )));
        }
        if n.checked_add(k).is_none() {
            return Err(LatticeError::InvalidParameters(format!(
                "ciphertext length n + k overflows (n = {}, k = {})",
                n, k
            )));
        }
        if q < 3 {
            return Err(LatticeError::InvalidParameters(format!(
                "modulus {} is too small",
                q
            )));
        }
        if q % 2 == 0 {
            return Err(LatticeError::InvalidParameters(format!(
                "modulus {} must be odd",
                q
            )));
        }
        Ok(Self { n, q, k })
    }

    /// Builds a validated set using the smallest admissible modulus for `n`
    pub fn with_min_modulus(n: usize, k: usize) -> Result<Self, LatticeError> {
        Self::new(n, Self::min_modulus(n), k)
    }

    /// The real-valued lower bound `10·n·(ln n)²` on the modulus
    pub fn modulus_bound(n: usize) -> f64 {
        let ln_n = (n as f64).ln();
        10.0 * n as f64 * ln_n * ln_n
    }

    /// Smallest odd modulus strictly above `modulus_bound(n)` (and at least 3)
    pub fn min_modulus(n: usize) -> i64 {
        let mut q = (Self::modulus_bound(n).floor() as i64 + 1).max(3);
        if q % 2 == 0 {
            q += 1;
        }
        q
    }

    /// Number of integers in a ciphertext block.
    ///
    /// Construction guarantees `n + k` does not overflow.
    pub fn ciphertext_len(&self) -> usize {
        self.n + self.k
    }

    /// Number of whole bytes one message block carries
    pub fn block_bytes(&self) -> usize {
        self.k / 8
    }
}
