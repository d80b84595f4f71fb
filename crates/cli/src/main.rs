//! Delivery Hub CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! hub-cli migrate
//!
//! # Create a user of any role
//! hub-cli user create -u ops -e ops@example.com -p 'long-password' -r admin
//!
//! # Load demo vendors, menus and accounts
//! hub-cli seed --file crates/cli/seed/demo.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `HUB_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use delivery_hub_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "hub-cli")]
#[command(author, version, about = "Delivery Hub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Load demo data from a YAML file
    Seed {
        /// Path to the seed file
        #[arg(short, long, default_value = "crates/cli/seed/demo.yaml")]
        file: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`customer`, `driver`, `vendor`, `admin`)
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Given name
        #[arg(long, default_value = "Hub")]
        first_name: String,

        /// Family name
        #[arg(long, default_value = "User")]
        last_name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                email,
                password,
                role,
                first_name,
                last_name,
            } => {
                commands::user::create(commands::user::CreateUser {
                    username,
                    email,
                    password,
                    role,
                    first_name,
                    last_name,
                })
                .await?;
            }
        },
        Commands::Seed { file } => commands::seed::run(&file).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_user_create() {
        let cli = Cli::try_parse_from([
            "hub-cli", "user", "create", "-u", "ops", "-e", "ops@example.com", "-p",
            "long-password", "-r", "admin",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::User {
                action: UserAction::Create {
                    role: Role::Admin,
                    ..
                }
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_role() {
        let cli = Cli::try_parse_from([
            "hub-cli", "user", "create", "-u", "x", "-e", "x@example.com", "-p", "password1",
            "-r", "root",
        ]);
        assert!(cli.is_err());
    }
}
