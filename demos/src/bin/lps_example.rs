use lattice_core::{hashing::sha3_256, special_product, Matrix};
use lps_pke::{
    decrypt_block, encoding::string_to_bits, encrypt_block, format, generate_keys,
    pke::keygen, LatticeParams, LpsCipher, ParameterSet,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn main() -> anyhow::Result<()> {
    println!("LPS Public-Key Encryption Example");
    println!("=================================");

    let mut rng = ChaCha20Rng::from_entropy();

    // The special product behind the trapdoor
    println!("\nSpecial product:");
    println!("----------------");

    let a = Matrix::new(vec![vec![1, 2], vec![3, 4]])?;
    let t = special_product(&a, &[1, 1], 7)?;
    println!("special_product([[1, 2], [3, 4]], [1, 1], q = 7) = {:?}", t);

    // A single bit with tiny parameters
    println!("\nSingle bit, n = 8, q = 257, k = 1:");
    println!("----------------------------------");

    let tiny = LatticeParams::new_unchecked(8, 257, 1)?;
    let (pk, sk) = keygen(tiny, &mut rng)?;
    for bit in [0u8, 1u8] {
        let ciphertext = encrypt_block(&pk, &[bit], &mut rng)?;
        let decrypted = decrypt_block(&sk, &ciphertext)?;
        println!("bit {} -> {:?} -> {:?}", bit, ciphertext.as_slice(), decrypted);
    }

    // Random bit blocks under a preset
    let set = ParameterSet::Small;
    let params = set.lattice_params();
    println!("\nRandom blocks, preset {} (n = {}, q = {}, k = {}):", set, params.n, params.q, params.k);
    println!("----------------------------------------------------");

    let (pk, sk) = generate_keys(params.n, params.q, params.k, &mut rng)?;
    println!("Public key fingerprint: {}", pk.fingerprint());

    let trials = 100;
    let mut bit_errors = 0;
    for _ in 0..trials {
        let bits: Vec<u8> = (0..params.k).map(|_| rng.gen_range(0..=1)).collect();
        let ciphertext = encrypt_block(&pk, &bits, &mut rng)?;
        let decrypted = decrypt_block(&sk, &ciphertext)?;
        bit_errors += bits.iter().zip(&decrypted).filter(|(a, b)| a != b).count();
    }

    if bit_errors == 0 {
        println!("All {} blocks decrypted correctly", trials);
    } else {
        println!("{} bit errors over {} blocks", bit_errors, trials);
    }

    // Text through the convenience wrapper
    println!("\nText message:");
    println!("-------------");

    let cipher = LpsCipher::from_keys(pk, sk);
    let message = "lattice!";
    println!("Message: {:?} ({} bits)", message, string_to_bits(message).len());

    let ciphertext = cipher.encrypt_str(message, &mut rng)?;
    let ciphertext_text = format::ciphertext_to_string(&ciphertext);
    println!("Ciphertext digest: {}", hex::encode(&sha3_256(ciphertext_text.as_bytes())[0..8]));

    let decrypted = cipher.decrypt_to_string(&ciphertext)?;
    println!("Decrypted: {:?}", decrypted);

    // Encryption is randomized
    let again = cipher.encrypt_str(message, &mut rng)?;
    if again == ciphertext {
        println!("Two encryptions of the same message collided");
    } else {
        println!("Two encryptions of the same message differ, both decrypt to {:?}", cipher.decrypt_to_string(&again)?);
    }

    Ok(())
}
