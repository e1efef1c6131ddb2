use std::fs;
use std::path::Path;

use rand::Rng;
use lattice_core::params::LatticeParams;
use crate::encoding::{bits_to_string, string_to_block};
use crate::error::{LpsError, LpsResult};
use crate::format;
use crate::pke::{self, Ciphertext, PrivateKey, PublicKey};

/// Holds a public and/or private key and offers text and file helpers on top
/// of the block operations.
///
/// A party that only encrypts loads the public key, the key owner loads the
/// private key, and `generate` fills in both.
#[derive(Debug, Clone, Default)]
pub struct LpsCipher {
    public: Option<PublicKey>,
    private: Option<PrivateKey>,
}

impl LpsCipher {
    /// Creates a cipher with no keys loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh key pair
    pub fn generate<R: Rng + ?Sized>(params: LatticeParams, rng: &mut R) -> LpsResult<Self> {
        let (pk, sk) = pke::keygen(params, rng)?;
        Ok(Self::from_keys(pk, sk))
    }

    /// Wraps an existing key pair
    pub fn from_keys(public: PublicKey, private: PrivateKey) -> Self {
        Self {
            public: Some(public),
            private: Some(private),
        }
    }

    /// Creates an encrypt-only cipher
    pub fn with_public(public: PublicKey) -> Self {
        Self {
            public: Some(public),
            private: None,
        }
    }

    /// Creates a decrypt-only cipher
    pub fn with_private(private: PrivateKey) -> Self {
        Self {
            public: None,
            private: Some(private),
        }
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public.as_ref()
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private.as_ref()
    }

    fn require_public(&self) -> LpsResult<&PublicKey> {
        self.public.as_ref().ok_or(LpsError::MissingKey("public"))
    }

    fn require_private(&self) -> LpsResult<&PrivateKey> {
        self.private.as_ref().ok_or(LpsError::MissingKey("private"))
    }

    /// Encrypts text whose UTF-8 encoding is exactly one block
    pub fn encrypt_str<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> LpsResult<Ciphertext> {
        let pk = self.require_public()?;
        let bits = string_to_block(text, pk.k())?;
        pke::encrypt_block(pk, &bits, rng)
    }

    /// Decrypts a block back into text
    pub fn decrypt_to_string(&self, ciphertext: &Ciphertext) -> LpsResult<String> {
        let sk = self.require_private()?;
        let bits = pke::decrypt_block(sk, ciphertext)?;
        bits_to_string(&bits)
    }

    /// Encrypts the contents of a text file
    pub fn encrypt_file<R: Rng + ?Sized>(&self, path: impl AsRef<Path>, rng: &mut R) -> LpsResult<Ciphertext> {
        let text = fs::read_to_string(path)?;
        self.encrypt_str(&text, rng)
    }

    /// Decrypts a ciphertext file into text
    pub fn decrypt_file(&self, path: impl AsRef<Path>) -> LpsResult<String> {
        let ciphertext = format::read_ciphertext(path)?;
        self.decrypt_to_string(&ciphertext)
    }

    /// Encrypts `message_or_path` and writes the ciphertext to `output`.
    ///
    /// If `message_or_path` names an existing file its contents are
    /// encrypted, otherwise the string itself is.
    pub fn encrypt_to_file<R: Rng + ?Sized>(
        &self,
        message_or_path: &str,
        output: impl AsRef<Path>,
        rng: &mut R,
    ) -> LpsResult<()> {
        let ciphertext = if Path::new(message_or_path).is_file() {
            self.encrypt_file(message_or_path, rng)?
        } else {
            self.encrypt_str(message_or_path, rng)?
        };
        format::write_ciphertext(&ciphertext, output)
    }

    /// Decrypts `ciphertext_or_path` and writes the text to `output`.
    ///
    /// If `ciphertext_or_path` names an existing file it is read as a
    /// ciphertext file, otherwise the string is parsed as ciphertext text.
    pub fn decrypt_to_file(&self, ciphertext_or_path: &str, output: impl AsRef<Path>) -> LpsResult<()> {
        let text = if Path::new(ciphertext_or_path).is_file() {
            self.decrypt_file(ciphertext_or_path)?
        } else {
            let ciphertext = format::parse_ciphertext(ciphertext_or_path)?;
            self.decrypt_to_string(&ciphertext)?
        };
        fs::write(output, text)?;
        Ok(())
    }

    /// Loads a public key file, replacing any loaded public key
    pub fn import_public(&mut self, path: impl AsRef<Path>) -> LpsResult<()> {
        self.public = Some(format::import_public_key(path)?);
        Ok(())
    }

    /// Loads a private key file, replacing any loaded private key.
    ///
    /// The modulus of a loaded public key takes precedence over the one
    /// recorded in the file header, and the key's `n` and `k` must match it.
    pub fn import_private(&mut self, path: impl AsRef<Path>) -> LpsResult<()> {
        let modulus = self.public.as_ref().map(PublicKey::q);
        let sk = format::import_private_key(path, modulus)?;

        if let Some(pk) = &self.public {
            if sk.n() != pk.n() {
                return Err(LpsError::length_mismatch("private key dimension n", pk.n(), sk.n()));
            }
            if sk.k() != pk.k() {
                return Err(LpsError::length_mismatch("private key block size k", pk.k(), sk.k()));
            }
        }

        self.private = Some(sk);
        Ok(())
    }

    /// Writes the loaded public key to a file
    pub fn export_public(&self, path: impl AsRef<Path>) -> LpsResult<()> {
        format::export_public_key(self.require_public()?, path)
    }

    /// Writes the loaded private key to a file
    pub fn export_private(&self, path: impl AsRef<Path>) -> LpsResult<()> {
        format::export_private_key(self.require_private()?, path)
    }
}
