/// Errors raised by the lattice primitives
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// Modulus or dimensions outside the supported range
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A vector or matrix does not have the expected shape
    #[error("length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl LatticeError {
    /// Shorthand for a `LengthMismatch` error
    pub fn length_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        LatticeError::LengthMismatch { context, expected, actual }
    }
}
