use anyhow::{Context, Result};
use clap::Parser;
use gnip_kinesis::params::Params;
use gnip_kinesis::{ConfigurationProvider, CredentialsProvider};
use tracing::{info, warn};

fn main() -> Result<()> {
    let params = Params::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let provider = ConfigurationProvider::configure_from(&params.config)
        .context("Failed to configure producer")?;

    let settings = provider
        .settings()
        .context("Failed to resolve producer settings")?;

    // values never leave the process, only whether they are there
    let credentials = provider.credentials();
    if credentials.is_complete() {
        info!("AWS credentials found in environment");
    } else {
        warn!(
            access_key_id = credentials.access_key_id().is_some(),
            secret_key = credentials.secret_key().is_some(),
            "AWS credentials incomplete, request signing may fail"
        );
    }

    let out = if params.compact {
        serde_json::to_string(&settings)?
    } else {
        serde_json::to_string_pretty(&settings)?
    };
    println!("{out}");

    Ok(())
}
