use std::io::{self, Read};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use webhook_sign::{SignatureGenerator, parse_payload};

mod config;
mod report;

use config::Config;

/**
    Signs a webhook payload for manual testing of a receiver.

    Reads the payload as a JSON object from stdin and the secret from
    `WEBHOOK_SECRET` (a `.env` file in the working directory is honored).
    Prints the canonical body and its signature to stdout.
*/
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!(header = %config.header, "loaded configuration");

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read payload from stdin")?;
    let payload = parse_payload(&input).context("failed to parse payload")?;

    let generator = SignatureGenerator::new(config.secret);
    let signed = generator
        .sign(&payload)
        .context("failed to sign payload")?;
    tracing::info!(body_len = signed.body.len(), "payload signed");

    report::write_report(&mut io::stdout().lock(), &signed, &config.header)
        .context("failed to write output")?;

    Ok(())
}
