pub mod error;
pub mod params;
pub mod pke;
pub mod encoding;
pub mod format;
pub mod cipher;

pub use cipher::LpsCipher;
pub use error::{LpsError, LpsResult};
pub use lattice_core::LatticeParams;
pub use params::ParameterSet;
pub use pke::{decrypt_block, encrypt_block, generate_keys, Ciphertext, PrivateKey, PublicKey};
