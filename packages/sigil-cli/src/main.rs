//! Sigil CLI
//!
//! Sign and verify messages (and JSON documents) with NaCl-style keys:
//!
//! 1. **generate**: create a key pair and write the armored keys to files
//!    or stdout.
//!
//! 2. **sign**: read a message from a file or stdin, sign it with a private
//!    key resolved from an explicit value, a key file, or an environment
//!    variable, and write the signed output.
//!
//! 3. **verify**: the reverse — check a signed message or document and
//!    write the recovered payload.

mod ops;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use ops::KeySource;

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "sigil",
    version,
    about = "Sign and verify messages and JSON documents with NaCl-style keys"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key pair and write the armored keys
    #[command(visible_alias = "gen")]
    Generate {
        /// Public key file ("-" for stdout)
        #[arg(short = 'p', long, default_value = "-")]
        public_key_file: String,

        /// Secret key file ("-" for stdout)
        #[arg(short = 's', long, default_value = "-")]
        secret_key_file: String,
    },

    /// Sign a message or JSON document with a private key
    Sign {
        /// Private key text (takes precedence over --key-file and $env)
        #[arg(long, value_name = "KEY")]
        key: Option<String>,

        /// File holding the armored private key
        #[arg(short = 's', long, value_name = "PATH")]
        key_file: Option<PathBuf>,

        /// Environment variable to read the private key from
        #[arg(long, default_value = ops::DEFAULT_PRIVATE_KEY_ENV, value_name = "VAR")]
        env: String,

        /// Message file ("-" for stdin)
        #[arg(short = 'm', long, default_value = "-")]
        message_file: String,

        /// Signed output file ("-" for stdout)
        #[arg(short = 'x', long, default_value = "-")]
        output: String,

        /// Treat the input as a JSON object and embed a detached signature
        /// instead of producing the combined signature‖message form
        #[arg(long)]
        json: bool,
    },

    /// Verify a signed message or document and write the payload
    Verify {
        /// Public key text (takes precedence over --key-file and $env)
        #[arg(long, value_name = "KEY")]
        key: Option<String>,

        /// File holding the armored public key
        #[arg(short = 'p', long, value_name = "PATH")]
        key_file: Option<PathBuf>,

        /// Environment variable to read the public key from
        #[arg(long, default_value = ops::DEFAULT_PUBLIC_KEY_ENV, value_name = "VAR")]
        env: String,

        /// Signed input file ("-" for stdin)
        #[arg(short = 'x', long, default_value = "-")]
        input: String,

        /// Payload output file ("-" for stdout)
        #[arg(short = 'm', long, default_value = "-")]
        output: String,

        /// Treat the input as a signed JSON document
        #[arg(long)]
        json: bool,
    },
}

// ── Entry Point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr; stdout is reserved for key and payload output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sigil=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            public_key_file,
            secret_key_file,
        } => ops::generate_key_files(&public_key_file, &secret_key_file),

        Command::Sign {
            key,
            key_file,
            env,
            message_file,
            output,
            json,
        } => {
            let source = KeySource {
                literal: key,
                file: key_file,
                env,
            };
            ops::sign_file(&source, &message_file, &output, json)
        }

        Command::Verify {
            key,
            key_file,
            env,
            input,
            output,
            json,
        } => {
            let source = KeySource {
                literal: key,
                file: key_file,
                env,
            };
            ops::verify_file(&source, &input, &output, json)
        }
    }
}
