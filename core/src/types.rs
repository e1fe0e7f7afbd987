//! Wire DTOs for the subset of PokéAPI this crate reads.
//!
//! # Design
//! Only the fields the aggregators consume are modelled; serde ignores the
//! rest. Fields the API is allowed to omit (artwork, base experience, stats,
//! flavor text) are `Option` or `#[serde(default)]`. Everything else is
//! required, so a missing `species`, `types`, `abilities`, or
//! `double_damage_from` key is a decode failure that aborts the record. The mock-server crate defines its own fixtures
//! independently; integration tests catch drift between the two.

use serde::{Deserialize, Serialize};

/// A `{name, url}` pair, the API's universal reference shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One index entry: name plus detail URL. Consumed immediately by the
/// Detail Aggregator.
pub type PokemonSummary = NamedResource;

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPage {
    pub results: Vec<PokemonSummary>,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    pub species: NamedResource,
}

impl PokemonDetail {
    /// `sprites.other["official-artwork"].front_default`, if every level exists.
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()?
            .official_artwork
            .as_ref()?
            .front_default
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// `GET /pokemon-species/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDetail {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDetail {
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageRelations {
    pub double_damage_from: Vec<NamedResource>,
}
