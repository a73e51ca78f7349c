//! Giftshelf CLI - operate a persisted shop snapshot from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Load a fetched catalog
//! gs-cli catalog load catalog.json
//!
//! # Start a purchase and later redeem it
//! gs-cli cards init --brand Amazon.com --amount 25
//! gs-cli cards redeem 5f0c... --claim-code AAAA-BBBB
//!
//! # Work against the test network
//! gs-cli --network test cards list
//!
//! # Apply a raw action
//! gs-cli dispatch action.json
//! ```
//!
//! # Environment Variables
//!
//! See `giftshelf_shop::config`. `--state` and `--network` override them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use giftshelf_core::NetworkId;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Giftshelf CLI tools")]
struct Cli {
    /// Snapshot file (overrides `GIFTSHELF_STATE_PATH`)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Network for gift card commands (overrides `GIFTSHELF_NETWORK`)
    #[arg(long, global = true)]
    network: Option<NetworkId>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the whole snapshot
    Show,
    /// Manage the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage purchased gift cards
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },
    /// Manage contact details
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Apply a raw action read from a JSON file
    Dispatch {
        /// Path to `{"type": ..., "payload": ...}`
        file: PathBuf,
    },
    /// Wipe the catalog, gift cards, and contact details
    Reset,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Apply a fetched catalog payload (JSON or YAML)
    Load { file: PathBuf },
    /// List purchasable brands
    List,
}

#[derive(Subcommand)]
enum CardsAction {
    /// List gift cards on the current network
    List {
        /// Show archived cards instead of active ones
        #[arg(long)]
        archived: bool,
    },
    /// Start a purchase
    Init {
        #[arg(short, long)]
        brand: String,
        #[arg(short, long)]
        amount: Decimal,
        /// Defaults to the brand's catalog currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Defaults to a random UUID
        #[arg(long)]
        invoice_id: Option<String>,
    },
    /// Replace the card list with a JSON array from the server
    Set { file: PathBuf },
    /// Record a redemption
    Redeem {
        invoice_id: String,
        #[arg(long)]
        claim_code: String,
        #[arg(long)]
        pin: Option<String>,
    },
    /// Toggle whether a card is archived
    Archive { invoice_id: String },
    /// Overwrite a card's status
    Status { invoice_id: String, status: String },
    /// Remove purchases that were never confirmed
    DeleteUnsold,
    /// Remove every card on every network
    Clear,
}

#[derive(Subcommand)]
enum ContactAction {
    Email {
        email: String,
    },
    Phone {
        phone: String,
        /// Dialing prefix, e.g. 1
        #[arg(long)]
        country_code: String,
        /// ISO 3166-1 alpha-2, e.g. US
        #[arg(long)]
        iso: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut session = commands::Session::open(cli.state, cli.network).await?;

    match cli.command {
        Commands::Show => session.show()?,
        Commands::Catalog { action } => match action {
            CatalogAction::Load { file } => commands::catalog::load(&mut session, &file).await?,
            CatalogAction::List => commands::catalog::list(&session)?,
        },
        Commands::Cards { action } => match action {
            CardsAction::List { archived } => commands::cards::list(&session, archived)?,
            CardsAction::Init {
                brand,
                amount,
                currency,
                invoice_id,
            } => {
                commands::cards::init(&mut session, &brand, amount, currency, invoice_id).await?;
            }
            CardsAction::Set { file } => commands::cards::set(&mut session, &file).await?,
            CardsAction::Redeem {
                invoice_id,
                claim_code,
                pin,
            } => commands::cards::redeem(&mut session, &invoice_id, claim_code, pin).await?,
            CardsAction::Archive { invoice_id } => {
                commands::cards::archive(&mut session, &invoice_id).await?;
            }
            CardsAction::Status { invoice_id, status } => {
                commands::cards::status(&mut session, invoice_id, status).await?;
            }
            CardsAction::DeleteUnsold => commands::cards::delete_unsold(&mut session).await?,
            CardsAction::Clear => commands::cards::clear(&mut session).await?,
        },
        Commands::Contact { action } => match action {
            ContactAction::Email { email } => commands::contact::email(&mut session, &email).await?,
            ContactAction::Phone {
                phone,
                country_code,
                iso,
            } => commands::contact::phone(&mut session, &phone, country_code, iso).await?,
        },
        Commands::Dispatch { file } => session.dispatch_file(&file).await?,
        Commands::Reset => session.reset().await?,
    }

    session.close();
    Ok(())
}
