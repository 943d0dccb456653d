//! # Ganadera Registry Library
//!
//! State container, commands and views for the livestock cooperative's
//! registry, plus the `run` entry point used by the `ganadera` binary.
//!
//! ## Module Structure
//! ```text
//! ganadera_registry/
//! ├── lib.rs          ◄─── You are here (setup, run)
//! ├── main.rs         ◄─── Binary entry point
//! ├── cli.rs          ◄─── clap definition
//! ├── error.rs        ◄─── ApiError type
//! ├── state/          ◄─── RegistryState, ConnectionProbe, Navigation, DisplayConfig
//! ├── commands/       ◄─── Member, category, transaction, summary, status
//! └── views/          ◄─── Text tables
//! ```
//!
//! ## Startup Sequence
//! 1. Load `.env` (main.rs)
//! 2. Initialize tracing
//! 3. Resolve the store: hosted service from config, or seeded memory (`--offline`)
//! 4. Probe the connection
//! 5. Load members, categories and transactions concurrently
//! 6. Run the subcommand and render

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;
pub mod views;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{CategoryAction, Cli, Commands, MemberAction, TransactionAction};
use crate::commands::{category, member, status, summary, transaction};
use crate::error::ApiError;
use crate::state::{ConnectionProbe, DisplayConfig, NavigationState, RegistryState, View};
use ganadera_core::{CategoryForm, MemberForm, TransactionForm};
use ganadera_remote::sample::seed_sample_data;
use ganadera_remote::{MemoryStore, Remote, RemoteConfig, RemoteError, RemoteResult};

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `ERROR`: Service failures
/// - `WARN`: Failed operations, unreachable service
/// - `INFO`: Loads and creates
/// - `DEBUG`: Row counts, payload summaries
///
/// Override with `RUST_LOG`, e.g. `RUST_LOG=ganadera_remote=debug`.
/// Logs go to stderr so tables and JSON stay clean on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ganadera=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The hosted service from configuration, or a seeded in-memory store.
async fn open_remote(offline: bool) -> RemoteResult<Remote> {
    if offline {
        let remote = Remote::in_memory(MemoryStore::new());
        seed_sample_data(&remote).await?;
        return Ok(remote);
    }
    let config = RemoteConfig::load()?;
    Remote::from_config(&config)
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), ApiError> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("{}", text());
    }
    Ok(())
}

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let display = DisplayConfig::from_env();

    let remote = match open_remote(cli.offline).await {
        Ok(remote) => remote,
        Err(RemoteError::Config(e)) => {
            let probe = ConnectionProbe::unconfigured(e.clone());
            emit(cli.json, &status::get_status(&probe, None), || {
                views::connection_line(&probe.status())
            })?;
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let probe = ConnectionProbe::new(remote.clone());
    let connection = probe.check().await;
    if !cli.json {
        println!("{}\n", views::connection_line(&connection));
    }

    let state = RegistryState::new(remote);
    let nav = NavigationState::new();
    state.initialize().await;
    debug!(
        members = state.members().len(),
        categories = state.categories().len(),
        transactions = state.transactions().len(),
        "Registry ready"
    );

    let result = dispatch(&cli, &state, &nav, &probe, &display).await;

    if !cli.json {
        if let Some(line) = views::banner(state.error().as_deref()) {
            eprintln!("\n{}", line);
        }
    }
    result
}

async fn dispatch(
    cli: &Cli,
    state: &RegistryState,
    nav: &NavigationState,
    probe: &ConnectionProbe,
    display: &DisplayConfig,
) -> Result<(), ApiError> {
    let json = cli.json;

    match &cli.command {
        Commands::Status => {
            let dto = status::get_status(probe, Some(state));
            emit(json, &dto, || {
                let mut lines: Vec<String> = dto
                    .operations
                    .iter()
                    .map(|op| match &op.message {
                        Some(message) => format!("{:<18} {} ({})", op.operation, op.state, message),
                        None => format!("{:<18} {}", op.operation, op.state),
                    })
                    .collect();
                lines.insert(0, "Operations".to_string());
                lines.join("\n")
            })
        }

        Commands::Members { action } => match action {
            MemberAction::List => {
                nav.with_nav_mut(|n| n.show(View::Members));
                let rows = member::list_members(state);
                emit(json, &rows, || views::members::render(&rows, display))
            }
            MemberAction::Add {
                first_name,
                last_name,
                cedula,
                phone,
                address,
                email,
            } => {
                let mut form = MemberForm {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    national_id: cedula.clone(),
                    phone: phone.clone(),
                    address: address.clone(),
                    email: email.clone(),
                };
                let dto = member::create_member(state, &mut form).await?;
                info!(id = %dto.id, "Member registered");
                emit(json, &dto, || {
                    format!(
                        "✓ Member registered successfully: {}\n\n{}",
                        dto.picker_label,
                        views::render_view(View::Members, state, display)
                    )
                })
            }
        },

        Commands::Categories { action } => match action {
            CategoryAction::List => {
                nav.with_nav_mut(|n| n.show(View::Categories));
                let rows = category::list_categories(state);
                emit(json, &rows, || views::categories::render(&rows))
            }
            CategoryAction::Add { name, description } => {
                nav.with_nav_mut(|n| {
                    n.show(View::Categories);
                    n.open_category_modal()
                });
                let mut form = CategoryForm {
                    name: name.clone(),
                    description: description.clone(),
                };
                let dto = category::create_category(state, nav, &mut form).await?;
                emit(json, &dto, || {
                    format!(
                        "✓ Livestock category registered successfully: {}\n\n{}",
                        dto.name,
                        views::render_view(View::Categories, state, display)
                    )
                })
            }
        },

        Commands::Transactions { action } => match action {
            TransactionAction::List { member: None } => {
                nav.with_nav_mut(|n| n.show(View::Transactions));
                let rows = transaction::list_transactions(state);
                emit(json, &rows, || views::transactions::render(&rows, display))
            }
            TransactionAction::List {
                member: Some(key),
            } => {
                let owner = member::resolve_member(state, key)?;
                let rows = transaction::list_member_transactions(state, &owner.id).await?;
                emit(json, &rows, || {
                    format!(
                        "{}\n\n{}",
                        owner.full_name(),
                        views::transactions::render(&rows, display)
                    )
                })
            }
            TransactionAction::Add {
                member: member_key,
                category: category_key,
                quantity,
                price,
                notes,
            } => {
                nav.with_nav_mut(|n| n.show(View::NewTransaction));
                let member_id = match member_key.trim() {
                    "" => String::new(),
                    key => member::resolve_member(state, key)?.id,
                };
                let category_id = match category_key.trim() {
                    "" => String::new(),
                    key => category::resolve_category(state, key)?.id,
                };
                let mut form = TransactionForm {
                    member_id,
                    category_id,
                    quantity: quantity.clone(),
                    unit_price: price.clone(),
                    notes: notes.clone(),
                };
                if let Some(total) = transaction::preview_total(&form) {
                    debug!(total = %total, "Transaction preview");
                }

                let dto = transaction::create_transaction(state, nav, &mut form).await?;
                let view = nav.with_nav(|n| n.active());
                emit(json, &dto, || {
                    format!(
                        "✓ Transaction registered successfully: {} × {} for {}\n\n{}",
                        dto.quantity,
                        dto.category_name,
                        display.format_optional_money(dto.total),
                        views::render_view(view, state, display)
                    )
                })
            }
        },

        Commands::Summary { member: key, date } => {
            let member_id = match key {
                Some(key) => Some(member::resolve_member(state, key)?.id),
                None => None,
            };
            let dto = summary::get_summary(state, member_id, *date);
            emit(json, &dto, || views::summary::render(&dto, display))
        }

        Commands::Show { view } => {
            nav.with_nav_mut(|n| n.show(*view));
            let active = nav.with_nav(|n| n.active());
            emit(json, &nav.with_nav(|n| n.clone()), || {
                format!("{}\n\n{}", active.label(), views::render_view(active, state, display))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    async fn offline_state() -> RegistryState {
        let remote = open_remote(true).await.unwrap();
        let state = RegistryState::new(remote);
        state.initialize().await;
        state
    }

    #[tokio::test]
    async fn test_offline_store_is_seeded() {
        let state = offline_state().await;
        assert!(!state.members().is_empty());
        assert!(!state.categories().is_empty());
        assert!(state
            .transactions()
            .iter()
            .all(|t| !t.member.is_missing() && !t.category.is_missing()));
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_dispatch_transaction_add_by_cedula_and_name() {
        let state = offline_state().await;
        let nav = NavigationState::new();
        let probe = ConnectionProbe::new(state.remote().clone());
        let before = state.transactions().len();
        let target = state.members()[0].clone();
        let category_name = state.categories()[0].name.to_uppercase();

        let cli = Cli::try_parse_from([
            "ganadera",
            "--json",
            "transactions",
            "add",
            "--member",
            target.national_id.as_str(),
            "--category",
            category_name.as_str(),
            "--quantity",
            "2",
        ])
        .unwrap();
        dispatch(&cli, &state, &nav, &probe, &DisplayConfig::default())
            .await
            .unwrap();

        let rows = state.transactions();
        assert_eq!(rows.len(), before + 1);
        assert_eq!(rows[0].transaction.member_id, target.id);
        assert_eq!(nav.with_nav(|n| n.active()), View::Transactions);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_member_is_not_found() {
        let state = offline_state().await;
        let probe = ConnectionProbe::new(state.remote().clone());
        let cli = Cli::try_parse_from(["ganadera", "summary", "--member", "0-0000-0000"]).unwrap();

        let err = dispatch(&cli, &state, &NavigationState::new(), &probe, &DisplayConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }
}
