//! Async PokéAPI aggregation core and state store.
//!
//! # Overview
//! Turns the paginated `/pokemon` index plus each entry's detail, species, and
//! type sub-resources into a flat, ordered collection of `PokemonRecord`s, and
//! holds that collection in an observable `PokemonStore`.
//!
//! # Design
//! - `PokeClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Transport` is the I/O seam. `ReqwestTransport` is the production
//!   implementation; tests inject fakes that resolve out of order.
//! - `Aggregator` fans out concurrently and fans in all-or-nothing, preserving
//!   index order.
//! - `PokemonStore` contains failures, publishes whole-state snapshots over a
//!   watch channel, and always resets its loading flag.
//! - Wire DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod record;
pub mod store;
pub mod types;

pub use aggregate::Aggregator;
pub use client::PokeClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use record::{PokemonPatch, PokemonRecord, NO_DESCRIPTION};
pub use store::{PokemonStore, StoreState};
pub use types::{PokemonDetail, PokemonSummary, SpeciesDetail, TypeDetail};
