//! Club admin CLI for member search and PayPal invoicing.
//!
//! Every command prints its result as pretty JSON on stdout.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailchimp_client::MailchimpClient;
use paypal::{InvoiceClientRegistry, InvoiceOptions, SearchCriteria};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "club")]
#[command(about = "Club member search and invoicing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mailchimp member lookups
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// PayPal invoicing
    Invoices {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Search members by name or email
    Search { query: String },
}

#[derive(Subcommand)]
enum InvoiceCommands {
    /// Reserve the next invoice number
    NextNumber,

    /// List the first page of invoices
    List,

    /// Search invoices
    Search {
        #[arg(long)]
        status: Vec<String>,
        #[arg(long)]
        recipient_email: Option<String>,
        #[arg(long)]
        reference: Option<String>,
    },

    /// Show one invoice
    Detail { id: String },

    /// Send a draft invoice
    Send { id: String },

    /// Delete a draft invoice
    Delete { id: String },

    /// List invoice templates
    Templates,

    /// Create an invoice from a raw PayPal payload (JSON file)
    Create { file: PathBuf },

    /// Build and create an invoice from club fee options (JSON file)
    Generate { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paypal=debug,mailchimp_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Members { command } => run_members(&config, command).await,
        Commands::Invoices { command } => {
            let registry = InvoiceClientRegistry::new();
            run_invoices(&config, &registry, command).await
        }
    }
}

async fn run_members(config: &Config, command: MemberCommands) -> Result<()> {
    let client = MailchimpClient::new(config.mailchimp_api_key.clone())
        .context("Invalid MAILCHIMP_API_KEY")?;

    match command {
        MemberCommands::Search { query } => {
            let members = client
                .search_members(&query)
                .await
                .context("Member search failed")?;
            print_json(&members)
        }
    }
}

async fn run_invoices(
    config: &Config,
    registry: &InvoiceClientRegistry,
    command: InvoiceCommands,
) -> Result<()> {
    let client = registry
        .get_client(config.paypal_credentials())
        .await
        .context("Failed to authenticate with PayPal")?;

    match command {
        InvoiceCommands::NextNumber => {
            let number = client.generate_next_invoice_number().await?;
            print_json(&serde_json::json!({ "invoice_number": number }))
        }
        InvoiceCommands::List => print_json(&client.list().await?),
        InvoiceCommands::Search {
            status,
            recipient_email,
            reference,
        } => {
            let criteria = SearchCriteria {
                recipient_email,
                reference,
                status,
                ..Default::default()
            };
            print_json(&client.search(&criteria).await?)
        }
        InvoiceCommands::Detail { id } => print_json(&client.detail(&id).await?),
        InvoiceCommands::Send { id } => print_json(&client.send(&id).await?),
        InvoiceCommands::Delete { id } => {
            client.delete(&id).await?;
            tracing::info!(invoice_id = %id, "Invoice deleted");
            Ok(())
        }
        InvoiceCommands::Templates => print_json(&client.list_templates().await?),
        InvoiceCommands::Create { file } => {
            let payload: serde_json::Value = read_json(&file)?;
            print_json(&client.create(&payload).await?)
        }
        InvoiceCommands::Generate { file } => {
            let options: InvoiceOptions = read_json(&file)?;
            print_json(&client.generate(&options).await?)
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", file.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
