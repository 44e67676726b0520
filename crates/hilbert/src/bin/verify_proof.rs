//! Verify a proof stored as JSON
//!
//! Exit status: 0 if the proof verifies, 1 if it does not, 2 on a usage
//! error or if the file cannot be read or parsed.

use hilbert::{Proof, TruthTable};
use std::io::Read;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <proof.json | -> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --print    Print the proof before verifying it");
    std::process::exit(2);
}

fn main() {
    // RUST_LOG controls log levels, e.g. RUST_LOG=hilbert=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let path = &args[1];
    let mut print = false;
    for arg in &args[2..] {
        match arg.as_str() {
            "--print" => print = true,
            _ => {
                eprintln!("Unknown option: {}", arg);
                usage(&args[0]);
            }
        }
    }

    let text = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    let text = match text {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path, e);
            std::process::exit(2);
        }
    };

    let proof = match Proof::from_json_str(&text) {
        Ok(proof) => proof,
        Err(e) => {
            eprintln!("Cannot load proof: {}", e);
            std::process::exit(2);
        }
    };

    if print {
        println!("{}\n", proof);
    }

    match proof.verify(&TruthTable) {
        Ok(()) => {
            println!("Valid proof of {} ({} lines)", proof.conclusion, proof.len());
        }
        Err(e) => {
            println!("Invalid proof: {}", e);
            std::process::exit(1);
        }
    }
}
