//! Identity Client - command line entry point
//!
//! Drives the identity API from a terminal. Responses are printed to stdout
//! as JSON; logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use identity_client::{
    AsyncIdentityClient, CachedIdentityClient, Config, IdentityClient, IdentityHttpClient,
    PhoneNumber, VerificationId,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "identity-client", version, about = "Manage your identity profile")]
struct Cli {
    /// Always go to the API, even for repeated profile reads
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the authenticated user's profile
    Profile,
    /// Register a phone number
    RegisterPhone { phone: String },
    /// Register an email address
    RegisterEmail { address: String },
    /// Send (or resend) a verification code
    SendCode { id: VerificationId },
    /// Confirm a verification code
    ConfirmCode { id: VerificationId, code: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &dyn IdentityClient, command: Command) -> Result<()> {
    match command {
        Command::Profile => print_json(&client.get_profile().await?),
        Command::RegisterPhone { phone } => {
            let phone = PhoneNumber::new(phone)?;
            print_json(&client.register_phone_number(&phone).await?)
        }
        Command::RegisterEmail { address } => {
            print_json(&client.register_email_address(&address).await?)
        }
        Command::SendCode { id } => print_json(&client.send_verification_code(id).await?),
        Command::ConfirmCode { id, code } => {
            print_json(&client.confirm_verification_code(id, &code).await?)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Logs go to stderr so stdout stays machine readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using identity API at {}", config.api_url);

    let http = IdentityHttpClient::new(&config);
    let metrics = http.metrics().clone();
    let mut client = Arc::new(AsyncIdentityClient::new(http)) as Arc<dyn IdentityClient>;

    if config.profile_cache_enabled() && !cli.no_cache {
        client = Arc::new(
            CachedIdentityClient::new(client, Duration::from_secs(config.profile_cache_ttl_secs))
                .with_metrics(metrics.clone()),
        ) as Arc<dyn IdentityClient>;
    }

    let outcome = run(client.as_ref(), cli.command).await;

    if let Err(e) = &outcome {
        error!("Command failed: {}", e);
    }

    let summary = metrics.summary();
    info!(
        requests = summary.http_requests_total,
        errors = summary.http_errors_total,
        avg_ms = summary.http_duration_avg_ms,
        "Done"
    );

    outcome
}
