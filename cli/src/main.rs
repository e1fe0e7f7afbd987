//! `pokedex` entry point - the composition root.
//!
//! Builds the transport and the store once, runs a single aggregation, and
//! renders the requested view from the store's snapshot.

mod parser;
mod view;

use anyhow::{bail, Context};
use clap::Parser;
use pokedex_core::{PokemonStore, ReqwestTransport};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::parser::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();
    let transport =
        ReqwestTransport::new(&config).context("failed to build HTTP transport")?;
    let store = PokemonStore::new(&config, transport);

    let mut updates = store.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let loading = updates.borrow_and_update().loading;
            debug!(loading, "store updated");
        }
    });

    store.fetch_all().await;
    if let Some(err) = store.snapshot().last_error {
        bail!("could not load Pokémon from {}: {err}", config.base_url());
    }

    match cli.command {
        Commands::List => {
            let pokemons = store.pokemons();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&pokemons)?);
            } else {
                print!("{}", view::render_list(&pokemons));
            }
        }
        Commands::Show { name } => {
            let Some(record) = store.find(&name) else {
                bail!("no Pokémon named '{name}' in the first {} entries", cli.limit);
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", view::render_detail(&record));
            }
        }
    }

    Ok(())
}
