//! # Ganadera Registry Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ ganadera transactions add -m 1-1234-0567 -c Bovino -q 3 -p 10.50     │
//! │                                                                         │
//! │  main.rs ────► .env, tracing, argument parsing                         │
//! │  lib.rs  ────► store, probe, initial load, dispatch, render            │
//! │                                                                         │
//! │  ● Connected to data service                                            │
//! │  ✓ Transaction registered successfully: 3 × Bovino for $31.50          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 1 when the command fails.

use clap::Parser;

use ganadera_registry::cli::Cli;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment or config.toml may be enough
    dotenvy::dotenv().ok();

    ganadera_registry::init_tracing();

    let cli = Cli::parse();
    if let Err(err) = ganadera_registry::run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
