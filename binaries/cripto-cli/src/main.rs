//! Criptoanalisis CLI
//!
//! Shift and repeating-key XOR tooling: encode, decode and recover keys.

mod report;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cripto_attack::{CaesarEngine, Dictionary, XorEngine, XorKeySpace};
use cripto_config::{AttackConfig, Execution, ScoringMode};
use cripto_core::{hex, Lexicon, ShiftCipher, XorCipher};

#[derive(Parser)]
#[command(name = "cripto")]
#[command(about = "Caesar and repeating-key XOR cryptanalysis toolkit")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/criptoanalisis/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shift cipher over letters and digits
    Caesar {
        #[command(subcommand)]
        command: CaesarCommands,
    },

    /// Repeating-key XOR
    Xor {
        #[command(subcommand)]
        command: XorCommands,
    },
}

#[derive(Subcommand)]
enum CaesarCommands {
    /// Encode text with a shift
    Encode(ShiftArgs),

    /// Decode text with a shift
    Decode {
        #[command(flatten)]
        args: ShiftArgs,

        /// Undo the digit shift on its own instead of deriving it from the letter inverse
        #[arg(long)]
        exact_digits: bool,
    },

    /// Recover the shift of a ciphertext
    Crack {
        /// Ciphertext
        text: String,

        /// Also rank candidates with the remote congruence service
        #[arg(long)]
        remote: bool,

        /// Word list used for local scoring: english, spanish
        #[arg(short, long)]
        lexicon: Option<Lexicon>,

        /// List all 26 decodings instead of ranking them
        #[arg(long)]
        all: bool,
    },
}

#[derive(Args)]
struct ShiftArgs {
    /// Shift value (may be negative)
    #[arg(short, long, allow_hyphen_values = true)]
    shift: i32,

    /// Text to transform
    text: String,
}

#[derive(Subcommand)]
enum XorCommands {
    /// XOR text with a key and print hex
    Encode {
        #[arg(short, long)]
        key: String,

        /// Plaintext
        text: String,
    },

    /// XOR hex input with a key and print text
    Decode {
        #[arg(short, long)]
        key: String,

        /// Hex ciphertext, spaces allowed
        hex: String,
    },

    /// Search for keys that decode to readable text
    Crack {
        /// Ciphertext (raw text, or hex with --hex)
        input: String,

        /// Treat input as hex
        #[arg(long)]
        hex: bool,

        #[arg(short, long, value_enum, default_value_t = Strategy::All)]
        strategy: Strategy,

        /// Key list, one key per line
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Split exhaustive searches across worker threads
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    OneByte,
    TwoByte,
    Dictionary,
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs)?;

    let config = AttackConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Caesar { command } => cmd_caesar(command, config).await,
        Commands::Xor { command } => cmd_xor(command, config).await,
    }
}

fn init_logging(verbose: u8, json: bool) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("cripto={}", level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn cmd_caesar(command: CaesarCommands, mut config: AttackConfig) -> Result<()> {
    match command {
        CaesarCommands::Encode(args) => {
            println!("{}", ShiftCipher::encode(&args.text, args.shift));
            Ok(())
        }

        CaesarCommands::Decode { args, exact_digits } => {
            let decoded = if exact_digits {
                ShiftCipher::invert(&args.text, args.shift)
            } else {
                ShiftCipher::decode(&args.text, args.shift)
            };
            println!("{}", decoded);
            Ok(())
        }

        CaesarCommands::Crack { text, remote, lexicon, all } => {
            if remote {
                config.scoring = ScoringMode::Remote;
            }
            if let Some(lexicon) = lexicon {
                config.lexicon = lexicon;
            }

            let engine = CaesarEngine::from_config(&config);
            if all {
                println!("{}", report::caesar_listing(&text, &engine.candidates(&text)));
                return Ok(());
            }

            let result = engine.evaluate(&text).await;
            println!("{}", report::caesar_report(&text, &result));
            Ok(())
        }
    }
}

async fn cmd_xor(command: XorCommands, mut config: AttackConfig) -> Result<()> {
    match command {
        XorCommands::Encode { key, text } => {
            let encoded = XorCipher::transform(text.as_bytes(), key.as_bytes());
            println!("{}", hex::to_spaced(&encoded));
            Ok(())
        }

        XorCommands::Decode { key, hex: input } => {
            let decoded = XorCipher::transform(&hex::parse_lenient(&input), key.as_bytes());
            println!("{}", String::from_utf8_lossy(&decoded));
            Ok(())
        }

        XorCommands::Crack { input, hex: is_hex, strategy, dictionary, parallel } => {
            if let Some(path) = dictionary {
                config.xor.dictionary = path;
            }
            if parallel {
                config.xor.execution = Execution::Parallel;
            }

            let ciphertext: Arc<[u8]> = if is_hex {
                hex::parse_lenient(&input).into()
            } else {
                input.into_bytes().into()
            };

            let engine = XorEngine::from_settings(&config.xor);
            for space in key_spaces(strategy, &config) {
                if let XorKeySpace::Dictionary(dictionary) = &space {
                    println!("\n{}", report::dictionary_note(dictionary));
                }
                let findings = engine.run(space, Arc::clone(&ciphertext)).await;
                println!("{}", report::xor_findings(&findings));
            }
            Ok(())
        }
    }
}

fn key_spaces(strategy: Strategy, config: &AttackConfig) -> Vec<XorKeySpace> {
    let dictionary = || XorKeySpace::Dictionary(Dictionary::load(&config.xor.dictionary));
    match strategy {
        Strategy::OneByte => vec![XorKeySpace::SingleByte],
        Strategy::TwoByte => vec![XorKeySpace::TwoByte],
        Strategy::Dictionary => vec![dictionary()],
        Strategy::All => vec![XorKeySpace::SingleByte, XorKeySpace::TwoByte, dictionary()],
    }
}
