//! Command-line interface for the AIM one-way functions.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use aim_diag::{linearized, trace};
use aim_runtime::{evaluate, evaluate_auto, parse_rsp, KatRecord, OneWayFunction, Variant};
use aim_runtime::{AIM128, AIM192, AIM256};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// AIM one-way function CLI.
#[derive(Parser)]
#[command(
    name = "aim",
    version,
    author,
    about = "Evaluate and inspect the AIM-I/III/V one-way functions"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the one-way function; the variant follows from the input width.
    Eval {
        /// Preimage as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        pt: String,
        /// Initialization vector of the same width.
        #[arg(long, value_name = "HEX")]
        iv: String,
    },
    /// Verify known-answer key pairs, given inline or as a `.rsp` file.
    Kat {
        /// Public key `iv || ct` as hex.
        #[arg(long, value_name = "HEX", requires = "sk", conflicts_with = "file")]
        pk: Option<String>,
        /// Secret key starting with `pt`, as hex.
        #[arg(long, value_name = "HEX", requires = "pk")]
        sk: Option<String>,
        /// NIST response file with `pk = ` and `sk = ` lines.
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Generate the affine layer for an IV and report its matrices.
    Layer {
        /// Initialization vector as hex.
        #[arg(long, value_name = "HEX")]
        iv: String,
        /// Number of matrices (defaults to the variant's layer count).
        #[arg(long)]
        layers: Option<usize>,
    },
    /// Recompute the intermediate values of one evaluation and check their relations.
    Trace {
        /// Preimage as hex.
        #[arg(long, value_name = "HEX")]
        pt: String,
        /// Initialization vector as hex.
        #[arg(long, value_name = "HEX")]
        iv: String,
        /// Claimed output (evaluated from `pt` and `iv` when omitted).
        #[arg(long, value_name = "HEX")]
        ct: Option<String>,
    },
    /// Evaluate a random input and trace it.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Field degree: 128, 192 or 256.
        #[arg(long, default_value_t = 128)]
        variant: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Eval { pt, iv } => cmd_eval(&pt, &iv),
        Commands::Kat { pk, sk, file } => cmd_kat(pk.as_deref(), sk.as_deref(), file.as_ref()),
        Commands::Layer { iv, layers } => cmd_layer(&iv, layers),
        Commands::Trace { pt, iv, ct } => cmd_trace(&pt, &iv, ct.as_deref()),
        Commands::Demo { seed, variant } => cmd_demo(seed, variant),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_eval(pt_hex: &str, iv_hex: &str) -> Result<()> {
    let pt = parse_hex("pt", pt_hex)?;
    let iv = parse_hex("iv", iv_hex)?;
    let ct = evaluate_auto(&pt, &iv).context("evaluate")?;
    println!("{}", hex::encode_upper(ct));
    Ok(())
}

fn cmd_kat(pk: Option<&str>, sk: Option<&str>, file: Option<&PathBuf>) -> Result<()> {
    let records = match (pk, sk, file) {
        (Some(pk), Some(sk), None) => {
            vec![KatRecord::from_hex(pk, sk).context("parse key pair")?]
        }
        (None, None, Some(path)) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            parse_rsp(&text).with_context(|| format!("parse {}", path.display()))?
        }
        _ => bail!("pass either --pk and --sk, or --file"),
    };
    if records.is_empty() {
        bail!("no key pairs found");
    }

    let mut failures = 0usize;
    for (count, record) in records.iter().enumerate() {
        let ok = record.verify().context("evaluate record")?;
        println!(
            "count = {count}: {} {}",
            record.variant,
            if ok { "ok" } else { "MISMATCH" }
        );
        if !ok {
            failures += 1;
        }
    }
    info!(records = records.len(), failures, "verified known answers");
    if failures > 0 {
        bail!("{failures} of {} records failed", records.len());
    }
    Ok(())
}

fn cmd_layer(iv_hex: &str, layers: Option<usize>) -> Result<()> {
    let iv = parse_hex("iv", iv_hex)?;
    let variant = Variant::from_len(iv.len()).context("select variant from IV width")?;
    let layers = layers.unwrap_or(variant.params().layers());
    println!("variant: {variant}");
    match variant {
        Variant::Aim128 => report_layer(&AIM128, &iv, layers),
        Variant::Aim192 => report_layer(&AIM192, &iv, layers),
        Variant::Aim256 => report_layer(&AIM256, &iv, layers),
    }
}

fn report_layer<const N: usize>(
    aim: &OneWayFunction<N>,
    iv: &[u8],
    layers: usize,
) -> Result<()> {
    let layer = aim_gen::generate_layer(aim.field(), iv, layers).context("generate layer")?;
    for (idx, matrix) in layer.matrices.iter().enumerate() {
        println!(
            "A[{idx}]: rank {}/{}, first row {:x}",
            matrix.rank(),
            aim.field().degree(),
            matrix.entries()[0]
        );
    }
    println!("b:    {:x}", layer.constant);
    Ok(())
}

fn cmd_trace(pt_hex: &str, iv_hex: &str, ct_hex: Option<&str>) -> Result<()> {
    let pt = parse_hex("pt", pt_hex)?;
    let iv = parse_hex("iv", iv_hex)?;
    let variant = Variant::from_len(pt.len()).context("select variant from preimage width")?;
    let ct = match ct_hex {
        Some(value) => parse_hex("ct", value)?,
        None => evaluate(variant, &pt, &iv).context("evaluate")?,
    };
    match variant {
        Variant::Aim128 => report_trace(&AIM128, &pt, &iv, &ct),
        Variant::Aim192 => report_trace(&AIM192, &pt, &iv, &ct),
        Variant::Aim256 => report_trace(&AIM256, &pt, &iv, &ct),
    }
}

fn report_trace<const N: usize>(
    aim: &OneWayFunction<N>,
    pt: &[u8],
    iv: &[u8],
    ct: &[u8],
) -> Result<()> {
    let t = trace(aim, pt, iv, ct).context("trace evaluation")?;
    println!("x=  {:x}", t.x);
    println!("c=  {:x}", t.c);
    println!("u=  {:x}", t.u);
    println!("d=  {:x}", t.d);
    println!("r1= {:x}", t.r1);
    println!("r2= {:x}", t.r2);

    let l = linearized(aim, pt, iv, ct).context("linearized recomputation")?;
    println!("p1= {:x}", l.p1);
    println!("p2= {:x}", l.p2);

    if !t.is_consistent() || !l.is_consistent() {
        bail!("intermediate values are inconsistent with the claimed output");
    }
    println!("consistent");
    Ok(())
}

fn cmd_demo(seed: Option<u64>, bits: usize) -> Result<()> {
    let variant = Variant::from_bits(bits).context("select variant")?;
    let mut rng = seeded_rng(seed);
    let mut pt = vec![0u8; variant.byte_len()];
    let mut iv = vec![0u8; variant.byte_len()];
    rng.fill_bytes(&mut pt);
    rng.fill_bytes(&mut iv);

    let ct = evaluate(variant, &pt, &iv).context("evaluate")?;
    println!("variant: {variant}");
    println!("pt: {}", hex::encode_upper(&pt));
    println!("iv: {}", hex::encode_upper(&iv));
    println!("ct: {}", hex::encode_upper(&ct));
    cmd_trace(&hex::encode(&pt), &hex::encode(&iv), Some(&hex::encode(&ct)))
}

fn parse_hex(label: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).with_context(|| format!("decode {label} hex"))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
