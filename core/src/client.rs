//! Stateless HTTP request builder and response parser for PokéAPI.
//!
//! # Design
//! `PokeClient` holds only the API root and page limit and carries no mutable
//! state between calls. Each resource is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{IndexPage, PokemonDetail, PokemonSummary, SpeciesDetail, TypeDetail};

#[derive(Debug, Clone)]
pub struct PokeClient {
    base_url: String,
    page_limit: u32,
}

impl PokeClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            page_limit: config.page_limit(),
        }
    }

    /// The single fixed-size index page. No follow-up pages are requested.
    pub fn build_index_request(&self) -> HttpRequest {
        self.build_resource_request(&format!(
            "{}/pokemon?limit={}",
            self.base_url, self.page_limit
        ))
    }

    /// Requests an absolute resource URL taken from a previous response.
    pub fn build_resource_request(&self, url: &str) -> HttpRequest {
        HttpRequest {
            url: url.to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn parse_index(&self, url: &str, response: HttpResponse) -> ApiResult<Vec<PokemonSummary>> {
        decode::<IndexPage>(url, response).map(|page| page.results)
    }

    pub fn parse_detail(&self, url: &str, response: HttpResponse) -> ApiResult<PokemonDetail> {
        decode(url, response)
    }

    pub fn parse_species(&self, url: &str, response: HttpResponse) -> ApiResult<SpeciesDetail> {
        decode(url, response)
    }

    pub fn parse_type(&self, url: &str, response: HttpResponse) -> ApiResult<TypeDetail> {
        decode(url, response)
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: HttpResponse) -> ApiResult<T> {
    check_status(url, &response)?;
    serde_json::from_str(&response.body).map_err(|source| ApiError::Deserialization {
        url: url.to_string(),
        source,
    })
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(url: &str, response: &HttpResponse) -> ApiResult<()> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound {
            url: url.to_string(),
        }),
        status => Err(ApiError::HttpError {
            status,
            url: url.to_string(),
            body: response.body.clone(),
        }),
    }
}
