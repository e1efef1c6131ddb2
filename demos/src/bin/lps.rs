//! lps: key generation, encryption and decryption of one-block messages

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lps_pke::{format, pke::keygen, LatticeParams, LpsCipher, ParameterSet};

#[derive(Parser)]
#[command(name = "lps")]
#[command(about = "Lattice public-key encryption of fixed-size text blocks")]
#[command(version)]
struct Cli {
    /// Show debug output from the library
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair
    Keygen(KeygenArgs),
    /// Encrypt one block of text
    Encrypt(EncryptArgs),
    /// Decrypt one ciphertext block
    Decrypt(DecryptArgs),
    /// Print the SHA3-256 fingerprint of a public key
    Fingerprint {
        /// Public key file
        #[arg(long)]
        public: PathBuf,
    },
}

#[derive(Args)]
struct KeygenArgs {
    /// Where to write the public key
    #[arg(long)]
    public: PathBuf,

    /// Where to write the private key
    #[arg(long)]
    private: PathBuf,

    /// Named parameter set (toy, small, medium, large)
    #[arg(long, conflicts_with_all = ["n", "q", "k"])]
    preset: Option<ParameterSet>,

    /// Lattice dimension
    #[arg(long, requires_all = ["q", "k"])]
    n: Option<usize>,

    /// Odd modulus
    #[arg(long, requires_all = ["n", "k"])]
    q: Option<i64>,

    /// Bits per block
    #[arg(long, requires_all = ["n", "q"])]
    k: Option<usize>,

    /// Accept a modulus below 10·n·(ln n)²
    #[arg(long, requires = "n")]
    unchecked: bool,

    /// Seed for deterministic key generation
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct EncryptArgs {
    /// Public key file
    #[arg(long)]
    public: PathBuf,

    /// Message text
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    message: Option<String>,

    /// File holding the message text
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the ciphertext
    #[arg(long)]
    output: PathBuf,

    /// Seed for deterministic encryption
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct DecryptArgs {
    /// Private key file
    #[arg(long)]
    private: PathBuf,

    /// Public key file supplying the modulus
    #[arg(long, conflicts_with = "q")]
    public: Option<PathBuf>,

    /// Modulus, if the private key header does not record it
    #[arg(long)]
    q: Option<i64>,

    /// Ciphertext file
    #[arg(long)]
    input: PathBuf,

    /// Where to write the plaintext (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Keygen(args) => run_keygen(args),
        Commands::Encrypt(args) => run_encrypt(args),
        Commands::Decrypt(args) => run_decrypt(args),
        Commands::Fingerprint { public } => {
            let pk = format::import_public_key(&public)
                .with_context(|| format!("failed to read public key {}", public.display()))?;
            println!("{}", pk.fingerprint());
            Ok(())
        }
    }
}

fn make_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

fn resolve_params(args: &KeygenArgs) -> Result<LatticeParams> {
    let params = match (args.preset, args.n, args.q, args.k) {
        (Some(preset), ..) => preset.lattice_params(),
        (None, Some(n), Some(q), Some(k)) if args.unchecked => LatticeParams::new_unchecked(n, q, k)?,
        (None, Some(n), Some(q), Some(k)) => LatticeParams::new(n, q, k)?,
        (None, None, None, None) => ParameterSet::Toy.lattice_params(),
        _ => bail!("--n, --q and --k must be given together"),
    };
    Ok(params)
}

fn run_keygen(args: KeygenArgs) -> Result<()> {
    let params = resolve_params(&args).context("invalid parameters")?;
    let mut rng = make_rng(args.seed);

    info!("Generating keys with n = {}, q = {}, k = {}", params.n, params.q, params.k);
    let (pk, sk) = keygen(params, &mut rng).context("key generation failed")?;

    format::export_public_key(&pk, &args.public)
        .with_context(|| format!("failed to write {}", args.public.display()))?;
    format::export_private_key(&sk, &args.private)
        .with_context(|| format!("failed to write {}", args.private.display()))?;

    info!("Public key written to {}", args.public.display());
    info!("Private key written to {}", args.private.display());
    info!("Block size: {} bytes", params.block_bytes());
    println!("{}", pk.fingerprint());
    Ok(())
}

fn run_encrypt(args: EncryptArgs) -> Result<()> {
    let mut cipher = LpsCipher::new();
    cipher
        .import_public(&args.public)
        .with_context(|| format!("failed to read public key {}", args.public.display()))?;

    let message = match (args.message, args.input) {
        (Some(message), _) => message,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("either --message or --input is required"),
    };

    let mut rng = make_rng(args.seed);
    let ciphertext = cipher
        .encrypt_str(&message, &mut rng)
        .context("encryption failed")?;

    format::write_ciphertext(&ciphertext, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Ciphertext of {} integers written to {}", ciphertext.len(), args.output.display());
    Ok(())
}

fn run_decrypt(args: DecryptArgs) -> Result<()> {
    let mut cipher = LpsCipher::new();

    if let Some(public) = &args.public {
        cipher
            .import_public(public)
            .with_context(|| format!("failed to read public key {}", public.display()))?;
    }

    match args.q {
        Some(q) => {
            let sk = format::import_private_key(&args.private, Some(q))
                .with_context(|| format!("failed to read private key {}", args.private.display()))?;
            cipher = LpsCipher::with_private(sk);
        }
        None => cipher
            .import_private(&args.private)
            .with_context(|| format!("failed to read private key {}", args.private.display()))?,
    }

    let text = cipher
        .decrypt_file(&args.input)
        .with_context(|| format!("failed to decrypt {}", args.input.display()))?;

    match args.output {
        Some(path) => {
            fs::write(&path, &text).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Plaintext written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
