//! `twilite` CLI: send a single SMS through the Twilio Messages API.
//!
//! Credentials come from the environment (`TWILIO_ACCOUNT_SID`,
//! `TWILIO_AUTH_TOKEN`, `TWILIO_PHONE_NUMBER`); the destination and body
//! come from flags. Prints `ok` and exits 0 on success; logs the error and
//! exits non-zero otherwise.

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use twilite::{Config, MessageBody, RawPhoneNumber, SendMessage, TwilioClient};

#[derive(Debug, Parser)]
#[command(name = "twilite", version, about = "Send an SMS through the Twilio REST API")]
struct Cli {
    /// Destination phone number, e.g. +12025550123.
    #[arg(long)]
    to: String,

    /// Message text.
    #[arg(long)]
    msg: String,

    /// HTTP timeout per request attempt, in seconds.
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        return ExitCode::FAILURE;
    }
    println!("ok");
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.timeout)?;
    let client = TwilioClient::new(config);

    let to = RawPhoneNumber::new(cli.to)?;
    let body = MessageBody::new(cli.msg)?;
    client.send_message(SendMessage::new(to, body)).await?;

    Ok(())
}

/// Initialize [`Config`] from the `TWILIO_*` environment variables, with
/// message concatenation enabled.
fn load_config(timeout: u64) -> Result<Config, Box<dyn Error>> {
    let sid = require_env("TWILIO_ACCOUNT_SID")?;
    let token = require_env("TWILIO_AUTH_TOKEN")?;
    let from = require_env("TWILIO_PHONE_NUMBER")?;

    Ok(Config::new(
        sid,
        token,
        from,
        Duration::from_secs(timeout),
        true,
    )?)
}

fn require_env(name: &str) -> Result<String, Box<dyn Error>> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("please export {name}").into()),
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
