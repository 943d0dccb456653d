//! # Seed Data Loader
//!
//! Inserts the sample members, categories and transactions into the
//! configured Supabase project.
//!
//! ## Usage
//! ```bash
//! # Uses SUPABASE_URL / SUPABASE_ANON_KEY (or config.toml)
//! cargo run -p ganadera-remote --bin seed
//!
//! # Point at another project for this run
//! cargo run -p ganadera-remote --bin seed -- --url https://xyz.supabase.co --key <anon key>
//!
//! # Dry run against an in-memory store
//! cargo run -p ganadera-remote --bin seed -- --memory
//! ```
//!
//! Nothing is inserted if the project already has active members.

use std::env;

use ganadera_remote::sample::seed_sample_data;
use ganadera_remote::{MemoryStore, Remote, RemoteConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config = RemoteConfig::load()?;
    let mut in_memory = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--url" | "-u" => {
                if i + 1 < args.len() {
                    config.url = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--key" | "-k" => {
                if i + 1 < args.len() {
                    config.anon_key = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--memory" | "-m" => in_memory = true,
            "--help" | "-h" => {
                println!("Ganadera Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --url <URL>    Service URL (default: $SUPABASE_URL)");
                println!("  -k, --key <KEY>    Anon key (default: $SUPABASE_ANON_KEY)");
                println!("  -m, --memory       Seed an in-memory store instead");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ganadera Seed Data Loader");
    println!("============================");

    let remote = if in_memory {
        println!("Target: in-memory store");
        Remote::in_memory(MemoryStore::new())
    } else {
        let endpoint = config.validate()?;
        println!("Target: {}", endpoint.base_url);
        Remote::connect(endpoint)?
    };

    remote.ping().await?;
    println!("✓ Service reachable");

    let start = std::time::Instant::now();
    let report = seed_sample_data(&remote).await?;

    if report.members == 0 {
        println!("⚠ Project already has members; nothing inserted.");
        return Ok(());
    }

    println!();
    println!("✓ Inserted {} members", report.members);
    println!("✓ Inserted {} livestock categories", report.categories);
    println!("✓ Inserted {} transactions", report.transactions);
    println!("  in {:?}", start.elapsed());

    let members = remote.members().list_active().await?;
    let transactions = remote.transactions().list_recent_enriched().await?;
    let unresolved = transactions
        .iter()
        .filter(|t| t.member.is_missing() || t.category.is_missing())
        .count();
    println!();
    println!("Verifying: {} active members now listed", members.len());
    println!(
        "Verifying: {} transactions, {} with unresolved member or category",
        transactions.len(),
        unresolved
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
