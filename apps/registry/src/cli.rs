//! Command line definition.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::state::View;

#[derive(Debug, Parser)]
#[command(
    name = "ganadera",
    about = "Ganadera Registry: members, livestock categories and transactions",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Work against a seeded in-memory store instead of the hosted service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the connection and show the status of every operation
    Status,
    /// Cooperative members
    Members {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Livestock categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Livestock transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionAction,
    },
    /// Per-member totals with a per-category breakdown
    Summary {
        /// Member id or cédula
        #[arg(short, long)]
        member: Option<String>,
        /// Only transactions registered on this day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Render a view: socios, tipos, registros or nuevo-registro
    Show { view: View },
}

#[derive(Debug, Subcommand)]
pub enum MemberAction {
    /// List active members by name
    List,
    /// Register a member. Every field but email is required
    Add {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// National id
        #[arg(long, default_value = "")]
        cedula: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        email: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    /// List active categories by name
    List,
    /// Add a livestock category
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TransactionAction {
    /// List transactions, newest first
    List {
        /// Only this member's transactions (id or cédula)
        #[arg(short, long)]
        member: Option<String>,
    },
    /// Register a transaction
    Add {
        /// Member id or cédula
        #[arg(short, long, default_value = "")]
        member: String,
        /// Category id or name
        #[arg(short, long, default_value = "")]
        category: String,
        #[arg(short, long, default_value = "")]
        quantity: String,
        /// Unit price; 0 when omitted
        #[arg(short, long, default_value = "")]
        price: String,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transaction_add() {
        let cli = Cli::try_parse_from([
            "ganadera", "--offline", "transactions", "add", "-m", "1-1234-0567", "-c", "Bovino",
            "-q", "3", "-p", "10.50",
        ])
        .unwrap();
        assert!(cli.offline);
        match cli.command {
            Commands::Transactions {
                action: TransactionAction::Add { member, quantity, notes, .. },
            } => {
                assert_eq!(member, "1-1234-0567");
                assert_eq!(quantity, "3");
                assert_eq!(notes, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_show_and_summary() {
        let cli = Cli::try_parse_from(["ganadera", "show", "nuevo-registro"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { view: View::NewTransaction }));

        let cli = Cli::try_parse_from(["ganadera", "summary", "--date", "2024-07-02"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary { date: Some(d), .. } if d == NaiveDate::from_ymd_opt(2024, 7, 2).unwrap()
        ));

        assert!(Cli::try_parse_from(["ganadera", "show", "corrales"]).is_err());
    }
}
