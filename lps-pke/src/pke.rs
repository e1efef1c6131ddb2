use lattice_core::{
    hashing,
    params::LatticeParams,
    sampling::{sample_binary_matrix, sample_bit_vector, sample_uniform_matrix},
    special_product::special_product,
    vector_matrix::Matrix,
    zq::{centered_mod, is_centered, message_scale},
};

use rand::Rng;
use tracing::debug;
use crate::error::{LpsError, LpsResult};
use crate::format;

/// Represents an LPS public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Parameters the key was generated for
    params: LatticeParams,
    /// Matrix A = [A' | t_0 .. t_{k-1}] of shape n × (n+k)
    a: Matrix,
    /// Transpose of A, consumed by the encryptor
    a_t: Matrix,
}

/// Represents an LPS private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Parameters the key was generated for
    params: LatticeParams,
    /// Secret bit matrix s of shape k × n
    s: Matrix,
}

/// Represents one encrypted block of n+k integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    values: Vec<i64>,
}

impl PublicKey {
    /// Wraps a public matrix, checking its shape and that entries are centered mod q
    pub fn from_matrix(params: LatticeParams, a: Matrix) -> LpsResult<Self> {
        let params = LatticeParams::new_unchecked(params.n, params.q, params.k)?;
        if a.n_rows() != params.n {
            return Err(LpsError::length_mismatch("public key rows", params.n, a.n_rows()));
        }
        if a.n_cols() != params.ciphertext_len() {
            return Err(LpsError::length_mismatch("public key columns", params.ciphertext_len(), a.n_cols()));
        }
        if !a.all_entries(|x| is_centered(x, params.q)) {
            return Err(LpsError::MalformedInput(format!(
                "public key entries must lie in (-q/2, q/2] for q = {}",
                params.q
            )));
        }

        Ok(Self::assemble(params, a))
    }

    fn assemble(params: LatticeParams, a: Matrix) -> Self {
        let a_t = a.transpose();
        Self { params, a, a_t }
    }

    /// Returns the parameter triple
    pub fn params(&self) -> LatticeParams {
        self.params
    }

    /// Lattice dimension n
    pub fn n(&self) -> usize {
        self.params.n
    }

    /// Bits per block
    pub fn k(&self) -> usize {
        self.params.k
    }

    /// Modulus q
    pub fn q(&self) -> i64 {
        self.params.q
    }

    /// The public matrix A
    pub fn matrix(&self) -> &Matrix {
        &self.a
    }

    /// The transposed view of A used by the encryptor
    pub fn transposed(&self) -> &Matrix {
        &self.a_t
    }

    /// Hex SHA3-256 digest of the key's text encoding
    pub fn fingerprint(&self) -> String {
        hashing::fingerprint(format::public_key_to_string(self).as_bytes())
    }
}

impl PrivateKey {
    /// Wraps a secret matrix, checking its shape and that every entry is a bit
    pub fn from_matrix(params: LatticeParams, s: Matrix) -> LpsResult<Self> {
        let params = LatticeParams::new_unchecked(params.n, params.q, params.k)?;
        if s.n_rows() != params.k {
            return Err(LpsError::length_mismatch("private key rows", params.k, s.n_rows()));
        }
        if s.n_cols() != params.n {
            return Err(LpsError::length_mismatch("private key columns", params.n, s.n_cols()));
        }
        if !s.all_entries(|x| x == 0 || x == 1) {
            return Err(LpsError::MalformedInput("private key entries must be 0 or 1".into()));
        }

        Ok(Self { params, s })
    }

    /// Returns the parameter triple
    pub fn params(&self) -> LatticeParams {
        self.params
    }

    /// Lattice dimension n
    pub fn n(&self) -> usize {
        self.params.n
    }

    /// Bits per block
    pub fn k(&self) -> usize {
        self.params.k
    }

    /// Modulus q
    pub fn q(&self) -> i64 {
        self.params.q
    }

    /// The secret bit matrix s
    pub fn matrix(&self) -> &Matrix {
        &self.s
    }
}

impl Ciphertext {
    /// Wraps raw ciphertext integers without checking their length
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// The ciphertext integers, `v` followed by `w`
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Number of integers, `n + k` for a well-formed block
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the ciphertext, returning its integers
    pub fn into_inner(self) -> Vec<i64> {
        self.values
    }
}

impl From<Vec<i64>> for Ciphertext {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

/// Validates `(n, q, k)` and generates a key pair.
///
/// Fails with `InvalidParameters` if `q` is even or `q <= 10·n·(ln n)²`.
pub fn generate_keys<R: Rng + ?Sized>(
    n: usize,
    q: i64,
    k: usize,
    rng: &mut R,
) -> LpsResult<(PublicKey, PrivateKey)> {
    let params = LatticeParams::new(n, q, k)?;
    keygen(params, rng)
}

/// Generates a key pair for an already chosen parameter set.
///
/// Only the structural checks of `LatticeParams::new_unchecked` are
/// repeated here, so callers may opt out of the modulus bound.
pub fn keygen<R: Rng + ?Sized>(params: LatticeParams, rng: &mut R) -> LpsResult<(PublicKey, PrivateKey)> {
    let LatticeParams { n, q, k } = LatticeParams::new_unchecked(params.n, params.q, params.k)?;
    debug!(n, q, k, "generating key pair");

    // Uniform base matrix A' and secret bit rows s_i
    let a_prime = sample_uniform_matrix(n, n, q, rng);
    let s = sample_binary_matrix(k, n, rng);

    // Trapdoor columns t_i = special_product(A', s_i)
    let trapdoor_columns = s.iter_rows()
        .map(|s_i| special_product(&a_prime, s_i, q))
        .collect::<Result<Vec<_>, _>>()?;
    let trapdoor = Matrix::from_columns(&trapdoor_columns)?;

    // A = [A' | t_0 .. t_{k-1}]
    let a = a_prime.hconcat(&trapdoor)?;

    let pk = PublicKey::assemble(params, a);
    let sk = PrivateKey { params, s };

    Ok((pk, sk))
}

/// Encrypts exactly `k` bits under the public key.
///
/// Every call draws `n` fresh random bits from `rng`.
pub fn encrypt_block<R: Rng + ?Sized>(pk: &PublicKey, bits: &[u8], rng: &mut R) -> LpsResult<Ciphertext> {
    let LatticeParams { n, q, k } = pk.params;

    if bits.len() != k {
        return Err(LpsError::length_mismatch("message block", k, bits.len()));
    }
    check_bits(bits)?;
    debug!(n, q, k, "encrypting block");

    // Ephemeral randomness r in {0,1}^n
    let r = sample_bit_vector(n, rng);

    // t = special_product(A^T, r), length n+k
    let t = special_product(&pk.a_t, &r, q)?;

    // The last k entries carry the message scaled by (q-1)/2
    let scale = message_scale(q) as i128;
    let values = t.iter()
        .enumerate()
        .map(|(i, &t_i)| {
            let offset = if i < n { 0 } else { bits[i - n] as i128 * scale };
            centered_mod(t_i as i128 + offset, q)
        })
        .collect();

    Ok(Ciphertext::new(values))
}

/// Decrypts a block of `n+k` integers back into `k` bits
pub fn decrypt_block(sk: &PrivateKey, ciphertext: &Ciphertext) -> LpsResult<Vec<u8>> {
    let LatticeParams { n, q, k } = sk.params;
    let u = ciphertext.as_slice();

    if u.len() != sk.params.ciphertext_len() {
        return Err(LpsError::length_mismatch("ciphertext block", sk.params.ciphertext_len(), u.len()));
    }
    debug!(n, q, k, "decrypting block");

    let (v, w) = u.split_at(n);

    // <s_i, v> for every secret row
    let products = sk.s.mul_vec_mod(v, q)?;

    let bits = products.iter()
        .zip(w.iter())
        .map(|(&p, &w_i)| decode_bit(centered_mod(p as i128 - w_i as i128, q), q))
        .collect();

    Ok(bits)
}

/// A value near 0 decodes to 0, a value near ±q/2 decodes to 1
fn decode_bit(y: i64, q: i64) -> u8 {
    // |y| < q/4
    if 4 * (y.unsigned_abs() as u128) < q as u128 { 0 } else { 1 }
}

fn check_bits(bits: &[u8]) -> LpsResult<()> {
    match bits.iter().position(|&b| b > 1) {
        Some(pos) => Err(LpsError::MalformedInput(format!(
            "message bit {} has value {}, expected 0 or 1",
            pos, bits[pos]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn toy_params() -> LatticeParams {
        LatticeParams::new(8, 347, 8).unwrap()
    }

    #[test]
    fn test_single_bit_roundtrip_small_modulus() {
        // 257 sits below the bound for n = 8 but the noise is still far below q/4
        let params = LatticeParams::new_unchecked(8, 257, 1).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(257);
        let (pk, sk) = keygen(params, &mut rng).unwrap();

        for bit in [1u8, 0u8] {
            let ciphertext = encrypt_block(&pk, &[bit], &mut rng).unwrap();
            assert_eq!(ciphertext.len(), 9);
            assert_eq!(decrypt_block(&sk, &ciphertext).unwrap(), vec![bit]);
        }
    }

    #[test]
    fn test_roundtrip_toy() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let (pk, sk) = keygen(toy_params(), &mut rng).unwrap();

        for byte in [0u8, 1, 0x5a, 0xa5, 0xff] {
            let bits: Vec<u8> = (0..8).map(|i| (byte >> i) & 1).collect();
            let ciphertext = encrypt_block(&pk, &bits, &mut rng).unwrap();
            assert_eq!(decrypt_block(&sk, &ciphertext).unwrap(), bits);
        }
    }

    #[test]
    fn test_generate_keys_rejects_bad_modulus() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        assert!(matches!(
            generate_keys(8, 348, 8, &mut rng),
            Err(LpsError::InvalidParameters(_))
        ));
        assert!(matches!(
            generate_keys(8, 257, 1, &mut rng),
            Err(LpsError::InvalidParameters(_))
        ));
        assert!(generate_keys(8, 347, 1, &mut rng).is_ok());
    }

    #[test]
    fn test_keygen_rejects_even_modulus_even_when_unchecked() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let params = LatticeParams { n: 8, q: 256, k: 1 };
        assert!(matches!(keygen(params, &mut rng), Err(LpsError::InvalidParameters(_))));
    }

    #[test]
    fn test_key_structure() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let params = toy_params();
        let (pk, sk) = keygen(params, &mut rng).unwrap();
        let (n, q, k) = (params.n, params.q, params.k);

        assert_eq!((pk.matrix().n_rows(), pk.matrix().n_cols()), (n, n + k));
        assert_eq!((pk.transposed().n_rows(), pk.transposed().n_cols()), (n + k, n));
        assert_eq!(pk.transposed(), &pk.matrix().transpose());
        assert!(pk.matrix().all_entries(|x| is_centered(x, q)));

        assert_eq!((sk.matrix().n_rows(), sk.matrix().n_cols()), (k, n));
        assert!(sk.matrix().all_entries(|x| x == 0 || x == 1));

        // Column n+i is the special product of A' with s_i
        let a_prime = Matrix::from_fn(n, n, |i, j| pk.matrix().row(i)[j]);
        for i in 0..k {
            let expected = special_product(&a_prime, sk.matrix().row(i), q).unwrap();
            assert_eq!(pk.matrix().column(n + i), expected);
        }
    }

    #[test]
    fn test_message_length_mismatch() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let (pk, _) = keygen(toy_params(), &mut rng).unwrap();

        let err = encrypt_block(&pk, &[1, 0, 1], &mut rng).unwrap_err();
        assert!(matches!(err, LpsError::LengthMismatch { expected: 8, actual: 3, .. }));
    }

    #[test]
    fn test_non_bit_message_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let (pk, _) = keygen(toy_params(), &mut rng).unwrap();

        let err = encrypt_block(&pk, &[0, 1, 2, 0, 0, 0, 0, 0], &mut rng).unwrap_err();
        assert!(matches!(err, LpsError::MalformedInput(_)));
    }

    #[test]
    fn test_ciphertext_length_mismatch() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let (_, sk) = keygen(toy_params(), &mut rng).unwrap();

        let err = decrypt_block(&sk, &Ciphertext::new(vec![0; 15])).unwrap_err();
        assert!(matches!(err, LpsError::LengthMismatch { expected: 16, actual: 15, .. }));
    }

    #[test]
    fn test_ciphertext_entries_centered() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let (pk, _) = keygen(toy_params(), &mut rng).unwrap();

        let ciphertext = encrypt_block(&pk, &[1; 8], &mut rng).unwrap();
        assert!(ciphertext.as_slice().iter().all(|&x| is_centered(x, 347)));
    }

    #[test]
    fn test_encryption_is_randomized_decryption_is_not() {
        // n = 32 so two encryptions share their randomness with probability 2^-32
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let params = LatticeParams::new(32, 4001, 8).unwrap();
        let (pk, sk) = keygen(params, &mut rng).unwrap();
        let bits = [1, 1, 0, 0, 1, 0, 1, 0];

        let c1 = encrypt_block(&pk, &bits, &mut rng).unwrap();
        let c2 = encrypt_block(&pk, &bits, &mut rng).unwrap();
        assert_ne!(c1, c2);

        assert_eq!(decrypt_block(&sk, &c1).unwrap(), decrypt_block(&sk, &c1).unwrap());
        assert_eq!(decrypt_block(&sk, &c2).unwrap(), bits.to_vec());
    }

    #[test]
    fn test_decode_bit_threshold() {
        // q = 347, q/4 = 86.75
        assert_eq!(decode_bit(0, 347), 0);
        assert_eq!(decode_bit(86, 347), 0);
        assert_eq!(decode_bit(-86, 347), 0);
        assert_eq!(decode_bit(87, 347), 1);
        assert_eq!(decode_bit(-173, 347), 1);
    }

    #[test]
    fn test_public_key_from_matrix_checks_shape() {
        let params = toy_params();
        let wrong = Matrix::zero(8, 15);
        assert!(matches!(
            PublicKey::from_matrix(params, wrong),
            Err(LpsError::LengthMismatch { .. })
        ));

        let out_of_range = Matrix::from_fn(8, 16, |_, _| 200);
        assert!(matches!(
            PublicKey::from_matrix(params, out_of_range),
            Err(LpsError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_from_matrix_revalidates_params() {
        // Fields are public, so n + k may overflow without going through a constructor
        let params = LatticeParams { n: usize::MAX, q: 347, k: 1 };
        assert!(matches!(
            PublicKey::from_matrix(params, Matrix::zero(1, 1)),
            Err(LpsError::InvalidParameters(_))
        ));
        assert!(matches!(
            PrivateKey::from_matrix(params, Matrix::zero(1, 1)),
            Err(LpsError::InvalidParameters(_))
        ));
    }
}
