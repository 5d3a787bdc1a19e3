//! Resolve a CEP by racing BrasilAPI against ViaCEP and printing whichever answers first

use anyhow::Result;
use cep_race::lookup::fetch::{fetch_brasilapi, fetch_viacep};
use cep_race::lookup::utils::build_client;
use cep_race::lookup::{Provider, Race, RaceError};
use cep_race::Config;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Race two CEP lookup services and print the first answer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Postal code to look up. Overrides the CEP environment variable
    cep: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(cep) = args.cep {
        config.cep = cep;
    }
    info!("Looking up CEP {}", config.cep);

    let client = build_client(config.timeout)?;

    let race = Race::start(
        (Provider::BrasilApi, {
            let client = client.clone();
            let url = config.brasilapi_url.clone();
            let cep = config.cep.clone();
            async move { fetch_brasilapi(&client, &url, &cep).await }
        }),
        (Provider::ViaCep, {
            let url = config.viacep_url.clone();
            let cep = config.cep.clone();
            async move { fetch_viacep(&client, &url, &cep).await }
        }),
    );

    let (winner, draining) = race.winner().await;

    if let Ok(winner) = &winner {
        print!("{}", winner);
    }

    // Never leave the slower lookup behind
    draining.wait().await;

    match winner {
        Ok(_) => Ok(()),
        Err(RaceError::AllFailed(failures)) => {
            for failure in &failures {
                error!("✗ {}", failure);
            }
            Err(RaceError::AllFailed(failures).into())
        }
    }
}
