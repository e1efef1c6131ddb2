use lattice_core::LatticeError;

/// Errors surfaced by key generation, block encryption and the file formats
#[derive(Debug, thiserror::Error)]
pub enum LpsError {
    /// Modulus not odd, modulus too small for `n`, or zero dimensions
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A message, ciphertext or matrix does not have the expected length
    #[error("length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Text that does not follow the key, ciphertext or message format
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The operation needs a key that has not been loaded
    #[error("missing {0} key")]
    MissingKey(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LatticeError> for LpsError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidParameters(msg) => LpsError::InvalidParameters(msg),
            LatticeError::LengthMismatch { context, expected, actual } => {
                LpsError::LengthMismatch { context, expected, actual }
            }
        }
    }
}

impl LpsError {
    /// Shorthand for a `LengthMismatch` error
    pub fn length_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        LpsError::LengthMismatch { context, expected, actual }
    }
}

pub type LpsResult<T> = Result<T, LpsError>;
