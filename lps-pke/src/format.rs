use std::fs;
use std::path::Path;
use std::str::{FromStr, Lines};

use lattice_core::{params::LatticeParams, vector_matrix::Matrix};
use crate::error::{LpsError, LpsResult};
use crate::pke::{Ciphertext, PrivateKey, PublicKey};

/// Serializes a public key: header, `n`, `k`, `q`, then the `n` rows of A
pub fn public_key_to_string(pk: &PublicKey) -> String {
    let LatticeParams { n, q, k } = pk.params();
    let mut out = format!("PUBLIC KEY with n = {n} , k = {k} and q = {q}.\n{n}\n{k}\n{q}\n");
    write_rows(&mut out, pk.matrix());
    out
}

/// Serializes a private key: header, `n`, `k`, then the `k` rows of s.
///
/// The modulus only appears in the header line.
pub fn private_key_to_string(sk: &PrivateKey) -> String {
    let LatticeParams { n, q, k } = sk.params();
    let mut out = format!("PRIVATE KEY with n = {n} , k = {k} and q = {q}.\n{n}\n{k}\n");
    write_rows(&mut out, sk.matrix());
    out
}

/// Serializes a ciphertext as one line of space-separated integers
pub fn ciphertext_to_string(ciphertext: &Ciphertext) -> String {
    join_values(ciphertext.as_slice())
}

/// Parses the public key format
pub fn parse_public_key(text: &str) -> LpsResult<PublicKey> {
    let mut lines = text.lines();
    next_line(&mut lines, "public key header")?;

    let n: usize = parse_token(next_line(&mut lines, "n")?, "n")?;
    let k: usize = parse_token(next_line(&mut lines, "k")?, "k")?;
    let q: i64 = parse_token(next_line(&mut lines, "q")?, "q")?;
    let width = block_width(n, k)?;
    let params = LatticeParams::new_unchecked(n, q, k)?;

    let a = parse_rows(&mut lines, n, width, "public key")?;
    PublicKey::from_matrix(params, a)
}

/// Parses the private key format.
///
/// `modulus` overrides the modulus recorded in the header. One of the two
/// must be present.
pub fn parse_private_key(text: &str, modulus: Option<i64>) -> LpsResult<PrivateKey> {
    let mut lines = text.lines();
    let header = next_line(&mut lines, "private key header")?;

    let n: usize = parse_token(next_line(&mut lines, "n")?, "n")?;
    let k: usize = parse_token(next_line(&mut lines, "k")?, "k")?;
    block_width(n, k)?;
    let q = match modulus.or_else(|| header_modulus(header)) {
        Some(q) => q,
        None => {
            return Err(LpsError::MalformedInput(
                "private key header does not record q and no modulus was supplied".into(),
            ))
        }
    };
    let params = LatticeParams::new_unchecked(n, q, k)?;

    let s = parse_rows(&mut lines, k, n, "private key")?;
    PrivateKey::from_matrix(params, s)
}

/// Parses whitespace-separated ciphertext integers
pub fn parse_ciphertext(text: &str) -> LpsResult<Ciphertext> {
    let values = text.split_whitespace()
        .map(|token| parse_token(token, "ciphertext entry"))
        .collect::<LpsResult<Vec<i64>>>()?;

    Ok(Ciphertext::new(values))
}

/// Writes a public key file
pub fn export_public_key(pk: &PublicKey, path: impl AsRef<Path>) -> LpsResult<()> {
    fs::write(path, public_key_to_string(pk))?;
    Ok(())
}

/// Reads a public key file
pub fn import_public_key(path: impl AsRef<Path>) -> LpsResult<PublicKey> {
    parse_public_key(&fs::read_to_string(path)?)
}

/// Writes a private key file
pub fn export_private_key(sk: &PrivateKey, path: impl AsRef<Path>) -> LpsResult<()> {
    fs::write(path, private_key_to_string(sk))?;
    Ok(())
}

/// Reads a private key file
pub fn import_private_key(path: impl AsRef<Path>, modulus: Option<i64>) -> LpsResult<PrivateKey> {
    parse_private_key(&fs::read_to_string(path)?, modulus)
}

/// Writes a ciphertext file
pub fn write_ciphertext(ciphertext: &Ciphertext, path: impl AsRef<Path>) -> LpsResult<()> {
    fs::write(path, ciphertext_to_string(ciphertext))?;
    Ok(())
}

/// Reads a ciphertext file
pub fn read_ciphertext(path: impl AsRef<Path>) -> LpsResult<Ciphertext> {
    parse_ciphertext(&fs::read_to_string(path)?)
}

fn write_rows(out: &mut String, matrix: &Matrix) {
    for row in matrix.iter_rows() {
        out.push_str(&join_values(row));
        out.push('\n');
    }
}

fn join_values(values: &[i64]) -> String {
    values.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn next_line<'a>(lines: &mut Lines<'a>, what: &str) -> LpsResult<&'a str> {
    lines.next()
        .ok_or_else(|| LpsError::MalformedInput(format!("unexpected end of input, expected {}", what)))
}

fn parse_token<T: FromStr>(token: &str, what: &str) -> LpsResult<T> {
    token.trim()
        .parse()
        .map_err(|_| LpsError::MalformedInput(format!("invalid {}: '{}'", what, token.trim())))
}

fn parse_rows(lines: &mut Lines<'_>, count: usize, width: usize, what: &str) -> LpsResult<Matrix> {
    // `count` comes from the file, so rows are only allocated as they are read
    let mut rows = Vec::new();

    for i in 0..count {
        let line = next_line(lines, what)?;
        let row = line.split_whitespace()
            .map(|token| parse_token(token, what))
            .collect::<LpsResult<Vec<i64>>>()?;

        if row.len() != width {
            return Err(LpsError::MalformedInput(format!(
                "{} row {} has {} entries, expected {}",
                what, i, row.len(), width
            )));
        }
        rows.push(row);
    }

    Ok(Matrix::new(rows)?)
}

/// Ciphertext width `n + k` of a key header, rejecting overflow
fn block_width(n: usize, k: usize) -> LpsResult<usize> {
    n.checked_add(k).ok_or_else(|| {
        LpsError::MalformedInput(format!("key dimensions n = {} and k = {} are too large", n, k))
    })
}

/// Reads the `q = <digits>` field of a key header, if present
fn header_modulus(header: &str) -> Option<i64> {
    let (_, rest) = header.split_once("q = ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
