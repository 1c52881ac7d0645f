use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use saltwrap_core::{CryptoLayer, CryptoProvider};

mod commands;
mod keyfile;
mod logging;

#[derive(Parser)]
#[command(
    name = "saltwrap",
    version,
    about = "Box, sign and hash through a swappable crypto provider"
)]
struct Cli {
    /// Primitive implementation to use
    #[arg(long, global = true, value_enum, default_value_t = Provider::Sodium)]
    provider: Provider,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Provider {
    Sodium,
    Dalek,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KeyKind {
    Box,
    Sign,
}

#[derive(Subcommand)]
enum Command {
    // Generate a keypair as <name>.key / <name>.pub (hex)
    Keygen {
        #[arg(long, value_enum)]
        kind: KeyKind,

        #[arg(long)]
        out_dir: PathBuf,

        #[arg(long)]
        name: String,

        /// Derive a signing keypair from a 32-byte hex seed file
        #[arg(long)]
        seed: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        force: bool,
    },

    // Encrypt to a peer's box public key
    Seal {
        /// Own box secret key file
        #[arg(long)]
        secret: PathBuf,

        /// Peer box public key file
        #[arg(long)]
        peer: PathBuf,

        /// 24-byte nonce as hex; never reuse one with the same key pair
        #[arg(long)]
        nonce: String,

        #[arg(long, default_value = "-")]
        input: PathBuf,

        #[arg(long, default_value = "-")]
        output: PathBuf,
    },

    // Decrypt a sealed message from a peer
    Open {
        #[arg(long)]
        secret: PathBuf,

        #[arg(long)]
        peer: PathBuf,

        #[arg(long)]
        nonce: String,

        #[arg(long, default_value = "-")]
        input: PathBuf,

        #[arg(long, default_value = "-")]
        output: PathBuf,
    },

    // Sign a message (signature || message, or a hex signature with --detached)
    Sign {
        #[arg(long)]
        secret: PathBuf,

        #[arg(long, default_value = "-")]
        input: PathBuf,

        #[arg(long, default_value = "-")]
        output: PathBuf,

        #[arg(long, default_value_t = false)]
        detached: bool,
    },

    // Verify a signed message, or a message against a detached signature
    Verify {
        #[arg(long)]
        public: PathBuf,

        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// Hex signature file for detached verification
        #[arg(long)]
        signature: Option<PathBuf>,

        /// Where to write the recovered message (combined form only)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    // SHA-512 digest as hex
    Hash {
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// Stream the input through the multi-part API in chunks of this size
        #[arg(long)]
        chunk_size: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.provider {
        Provider::Sodium => run(&saltwrap_crypto_sodium::layer(), cli.cmd),
        Provider::Dalek => run(&saltwrap_crypto_dalek::layer(), cli.cmd),
    }
}

fn run<P: CryptoProvider>(crypto: &CryptoLayer<P>, cmd: Command) -> Result<()> {
    debug!(provider = P::NAME, "provider selected");

    match cmd {
        Command::Keygen { kind, out_dir, name, seed, force } => {
            commands::keygen(crypto, kind, &out_dir, &name, seed.as_deref(), force)
        }
        Command::Seal { secret, peer, nonce, input, output } => commands::seal(
            crypto,
            commands::BoxArgs {
                secret: &secret,
                peer: &peer,
                nonce: &nonce,
                input: &input,
                output: &output,
            },
        ),
        Command::Open { secret, peer, nonce, input, output } => commands::open(
            crypto,
            commands::BoxArgs {
                secret: &secret,
                peer: &peer,
                nonce: &nonce,
                input: &input,
                output: &output,
            },
        ),
        Command::Sign { secret, input, output, detached } => {
            commands::sign(crypto, &secret, &input, &output, detached)
        }
        Command::Verify { public, input, signature, output } => {
            commands::verify(crypto, &public, &input, signature.as_deref(), output.as_deref())
        }
        Command::Hash { input, chunk_size } => commands::hash(crypto, &input, chunk_size),
    }
}
