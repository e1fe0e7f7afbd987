//! Application state store: the aggregated collection plus a loading flag.
//!
//! # Design
//! State lives in a `tokio::sync::watch` channel. Every mutation publishes a
//! whole new `StoreState`, so subscribers only ever observe a fully consistent
//! collection, never a half-replaced one. The store is an explicit handle
//! built once by the host and passed to whatever needs it; there is no global.
//!
//! `fetch_all` is the single point of failure containment: aggregation errors
//! are logged and recorded in `last_error`, the held collection is left as it
//! was, and the loading flag is reset by a drop guard on every exit path.

use tokio::sync::watch;
use tracing::{error, info};

use crate::aggregate::Aggregator;
use crate::config::ClientConfig;
use crate::http::Transport;
use crate::record::{PokemonPatch, PokemonRecord};

/// Snapshot published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub pokemons: Vec<PokemonRecord>,
    pub loading: bool,
    /// Message from the most recent failed `fetch_all`, cleared on success.
    pub last_error: Option<String>,
}

pub struct PokemonStore<T: Transport> {
    aggregator: Aggregator<T>,
    state: watch::Sender<StoreState>,
}

impl<T: Transport> PokemonStore<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            aggregator: Aggregator::new(config, transport),
            state: watch::Sender::new(StoreState::default()),
        }
    }

    /// Runs the Collection Aggregator and replaces the collection on success.
    /// Never fails; see `StoreState::last_error`.
    ///
    /// Overlapping calls share one flag: the first to finish clears `loading`
    /// while later calls are still in flight.
    pub async fn fetch_all(&self) {
        self.state.send_modify(|s| s.loading = true);
        let _loading = LoadingGuard(&self.state);

        match self.aggregator.fetch_collection().await {
            Ok(records) => {
                info!(count = records.len(), "replacing collection");
                self.state.send_modify(|s| {
                    s.pokemons = records;
                    s.last_error = None;
                });
            }
            Err(err) => {
                error!(error = %err, "error fetching pokemon");
                self.state
                    .send_modify(|s| s.last_error = Some(err.to_string()));
            }
        }
    }

    pub fn replace_all(&self, records: Vec<PokemonRecord>) {
        self.state.send_modify(|s| s.pokemons = records);
    }

    /// Merges `patch` into the first record named `name`. Returns whether a
    /// record matched; no match is a silent no-op.
    pub fn patch_by_name(&self, name: &str, patch: PokemonPatch) -> bool {
        self.state.send_if_modified(|s| {
            match s.pokemons.iter_mut().find(|p| p.name == name) {
                Some(record) => {
                    patch.apply(record);
                    true
                }
                None => false,
            }
        })
    }

    pub fn find(&self, name: &str) -> Option<PokemonRecord> {
        self.state
            .borrow()
            .pokemons
            .iter()
            .find(|p| p.name == name)
            .cloned()
    }

    pub fn pokemons(&self) -> Vec<PokemonRecord> {
        self.state.borrow().pokemons.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every published change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }
}

struct LoadingGuard<'a>(&'a watch::Sender<StoreState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.loading = false);
    }
}
