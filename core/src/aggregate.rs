//! Fan-out/fan-in aggregation of PokéAPI resources into `PokemonRecord`s.
//!
//! # Design
//! Both aggregators are all-or-nothing: the first failed sub-fetch aborts the
//! whole call and no partial record or partial collection is returned.
//! Concurrency is cooperative. Sibling fetches are issued together and joined
//! with `try_join`/`try_join_all`, which yield results in input order
//! regardless of completion order.
//!
//! No retry, deduplication, or timeout lives here; a timeout, if any, is the
//! transport's business.

use futures_util::future::{try_join, try_join_all};
use tracing::{debug, info};

use crate::client::PokeClient;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::http::Transport;
use crate::record::PokemonRecord;
use crate::types::{PokemonDetail, PokemonSummary, SpeciesDetail, TypeDetail};

pub struct Aggregator<T: Transport> {
    client: PokeClient,
    transport: T,
}

impl<T: Transport> Aggregator<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: PokeClient::new(config),
            transport,
        }
    }

    /// Collection Aggregator: one record per index entry, in index order.
    pub async fn fetch_collection(&self) -> ApiResult<Vec<PokemonRecord>> {
        let summaries = self.fetch_index().await?;
        debug!(count = summaries.len(), "fetched index");

        let records =
            try_join_all(summaries.iter().map(|summary| self.fetch_record(&summary.url))).await?;
        info!(count = records.len(), "aggregated collection");
        Ok(records)
    }

    /// Detail Aggregator: detail first, then species and every type
    /// concurrently, then the merge.
    pub async fn fetch_record(&self, detail_url: &str) -> ApiResult<PokemonRecord> {
        let detail = self.fetch_detail(detail_url).await?;

        let species = self.fetch_species(&detail.species.url);
        let types = try_join_all(
            detail
                .types
                .iter()
                .map(|slot| self.fetch_type(&slot.type_ref.url)),
        );
        let (species, types) = try_join(species, types).await?;

        debug!(name = %detail.name, "assembled record");
        Ok(PokemonRecord::assemble(&detail, &species, &types))
    }

    async fn fetch_index(&self) -> ApiResult<Vec<PokemonSummary>> {
        let request = self.client.build_index_request();
        let url = request.url.clone();
        let response = self.transport.execute(request).await?;
        self.client.parse_index(&url, response)
    }

    async fn fetch_detail(&self, url: &str) -> ApiResult<PokemonDetail> {
        let response = self
            .transport
            .execute(self.client.build_resource_request(url))
            .await?;
        self.client.parse_detail(url, response)
    }

    async fn fetch_species(&self, url: &str) -> ApiResult<SpeciesDetail> {
        let response = self
            .transport
            .execute(self.client.build_resource_request(url))
            .await?;
        self.client.parse_species(url, response)
    }

    async fn fetch_type(&self, url: &str) -> ApiResult<TypeDetail> {
        let response = self
            .transport
            .execute(self.client.build_resource_request(url))
            .await?;
        self.client.parse_type(url, response)
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::testing::{FakeTransport, BASE};
    use super::*;
    use crate::error::ApiError;

    fn aggregator(transport: FakeTransport) -> Aggregator<FakeTransport> {
        Aggregator::new(
            &ClientConfig::new().with_base_url(BASE).with_page_limit(100),
            transport,
        )
    }

    #[tokio::test]
    async fn ditto_is_weak_to_fighting() {
        let transport =
            FakeTransport::new().with_pokemon("ditto", &[("normal", &["fighting"])], 20, "Ditto.");
        let record = aggregator(transport)
            .fetch_record(&format!("{BASE}/pokemon/ditto"))
            .await
            .unwrap();
        assert_eq!(record.weaknesses, "fighting");
        assert_eq!(record.types, "normal");
    }

    #[tokio::test]
    async fn record_merges_all_sub_resources() {
        let transport = FakeTransport::new().with_pokemon(
            "bulbasaur",
            &[("grass", &["fire", "ice", "flying"]), ("poison", &["ground", "psychic"])],
            65,
            "A strange seed\u{000C}was planted.",
        );
        let record = aggregator(transport)
            .fetch_record(&format!("{BASE}/pokemon/bulbasaur"))
            .await
            .unwrap();

        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.image_url.as_deref(), Some("http://fake/img/bulbasaur.png"));
        assert_eq!(record.types, "grass, poison");
        assert_eq!(record.abilities, "overgrow");
        assert_eq!(record.base_experience, Some(64));
        assert_eq!(record.special_attack, Some(65));
        assert_eq!(record.tanking, Some(49));
        assert_eq!(record.weaknesses, "fire, ice, flying, ground, psychic");
        assert_eq!(record.description, "A strange seed was planted.");
    }

    #[tokio::test]
    async fn type_order_survives_out_of_order_completion() {
        let transport = FakeTransport::new()
            .with_pokemon(
                "charizard",
                &[("fire", &["water", "rock"]), ("flying", &["rock", "electric"])],
                109,
                "x",
            )
            .with_delay(&format!("{BASE}/type/fire"), Duration::from_millis(40));
        let record = aggregator(transport)
            .fetch_record(&format!("{BASE}/pokemon/charizard"))
            .await
            .unwrap();
        assert_eq!(record.types, "fire, flying");
        assert_eq!(record.weaknesses, "water, rock, electric");
    }

    #[tokio::test]
    async fn failed_type_fetch_fails_the_record() {
        let transport = FakeTransport::new()
            .with_pokemon("eevee", &[("normal", &["fighting"])], 45, "x")
            .with_status(&format!("{BASE}/type/normal"), 500);
        let err = aggregator(transport)
            .fetch_record(&format!("{BASE}/pokemon/eevee"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[tokio::test]
    async fn collection_keeps_index_order() {
        let transport = FakeTransport::new()
            .with_index(&["a", "b", "c"], 100)
            .with_pokemon("a", &[("normal", &["fighting"])], 11, "A")
            .with_pokemon("b", &[("normal", &["fighting"])], 22, "B")
            .with_pokemon("c", &[("normal", &["fighting"])], 33, "C")
            .with_delay(&format!("{BASE}/pokemon/a"), Duration::from_millis(60))
            .with_delay(&format!("{BASE}/pokemon/b"), Duration::from_millis(30));
        let agg = aggregator(transport);
        let records = agg.fetch_collection().await.unwrap();

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        let attacks: Vec<_> = records.iter().map(|r| r.special_attack).collect();
        assert_eq!(attacks, [Some(11), Some(22), Some(33)]);

        // "c" finished its detail fetch before "a" did.
        let completed = agg.transport.completed.lock().unwrap();
        let pos = |url: &str| completed.iter().position(|u| u == url).unwrap();
        assert!(pos(&format!("{BASE}/pokemon/c")) < pos(&format!("{BASE}/pokemon/a")));
    }

    #[tokio::test]
    async fn one_failed_entry_fails_the_collection() {
        let transport = FakeTransport::new()
            .with_index(&["a", "missing"], 100)
            .with_pokemon("a", &[("normal", &["fighting"])], 11, "A");
        let err = aggregator(transport).fetch_collection().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref url } if url.ends_with("/pokemon/missing")));
    }

    #[tokio::test]
    async fn empty_index_yields_empty_collection() {
        let transport = FakeTransport::new().with_index(&[], 100);
        let records = aggregator(transport).fetch_collection().await.unwrap();
        assert!(records.is_empty());
    }
}
