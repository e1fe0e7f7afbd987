//! Command-line definition.

use std::time::Duration;

use clap::{Parser, Subcommand};
use pokedex_core::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};

/// Browse Pokémon aggregated from PokéAPI.
#[derive(Debug, Parser)]
#[command(name = "pokedex", version)]
pub struct Cli {
    /// API root to read from
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Number of index entries to aggregate
    #[arg(long, env = "POKEDEX_LIMIT", default_value_t = DEFAULT_PAGE_LIMIT, global = true)]
    pub limit: u32,

    /// Per-request timeout; requests may hang forever when unset
    #[arg(long, env = "POKEDEX_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// List every aggregated Pokémon
    List,
    /// Show one Pokémon in detail
    Show {
        /// Name as it appears in the index, e.g. "ditto"
        name: String,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new()
            .with_base_url(self.base_url.as_str())
            .with_page_limit(self.limit);
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_target_public_api() {
        let cli = Cli::try_parse_from(["pokedex", "list"]).unwrap();
        assert_eq!(cli.command, Commands::List);
        let config = cli.client_config();
        assert_eq!(config.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(config.page_limit(), 100);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pokedex",
            "show",
            "ditto",
            "--base-url",
            "http://127.0.0.1:3000/",
            "--limit",
            "5",
            "--timeout-secs",
            "2",
            "--json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Show {
                name: "ditto".to_string()
            }
        );
        assert!(cli.json);
        let config = cli.client_config();
        assert_eq!(config.base_url(), "http://127.0.0.1:3000");
        assert_eq!(config.page_limit(), 5);
        assert_eq!(config.timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn show_requires_a_name() {
        assert!(Cli::try_parse_from(["pokedex", "show"]).is_err());
    }
}
