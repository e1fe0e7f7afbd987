//! PokéAPI-shaped mock server.
//!
//! Serves the four resources the client core reads (index, detail, species,
//! type) from an in-memory `Dataset`. Every embedded reference is an absolute
//! URL under the server's own base URL, so a client can follow them exactly as
//! it would against the real API. Tests build datasets with dangling
//! references to exercise failure paths.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// PokéAPI's default page size when `limit` is omitted.
const DEFAULT_LIMIT: usize = 20;

#[derive(Clone, Debug)]
pub struct PokemonFixture {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub artwork: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<(String, u32)>,
    /// Species name; may point at a species missing from the dataset.
    pub species: String,
}

impl PokemonFixture {
    pub fn new(name: &str, types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            height: 1,
            weight: 1,
            base_experience: None,
            artwork: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            abilities: Vec::new(),
            stats: Vec::new(),
            species: name.to_string(),
        }
    }

    pub fn with_stat(mut self, name: &str, value: u32) -> Self {
        self.stats.push((name.to_string(), value));
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pokemon: Vec<PokemonFixture>,
    /// species name -> (language, flavor text)
    species: HashMap<String, Vec<(String, String)>>,
    /// type name -> "double damage from" type names
    types: HashMap<String, Vec<String>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, pokemon: PokemonFixture) -> Self {
        self.pokemon.push(pokemon);
        self
    }

    pub fn with_species(mut self, name: &str, entries: &[(&str, &str)]) -> Self {
        self.species.insert(
            name.to_string(),
            entries
                .iter()
                .map(|(lang, text)| (lang.to_string(), text.to_string()))
                .collect(),
        );
        self
    }

    pub fn with_type(mut self, name: &str, double_damage_from: &[&str]) -> Self {
        self.types.insert(
            name.to_string(),
            double_damage_from.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Three well-known Pokémon with their real types, stats, and text.
    pub fn sample() -> Self {
        let artwork = |id: u32| {
            Some(format!(
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
            ))
        };

        Self::new()
            .with_type("grass", &["flying", "poison", "bug", "fire", "ice"])
            .with_type("poison", &["ground", "psychic"])
            .with_type("fire", &["ground", "rock", "water"])
            .with_type("normal", &["fighting"])
            .with_type("fighting", &["flying", "psychic", "fairy"])
            .with_species(
                "bulbasaur",
                &[(
                    "en",
                    "A strange seed was\nplanted on its\nback at birth.\u{000C}The plant sprouts\nand grows with\nthis POKéMON.",
                )],
            )
            .with_species(
                "charmander",
                &[(
                    "en",
                    "Obviously prefers\nhot places. When\nit rains, steam\u{000C}is said to spout\nfrom the tip of\nits tail.",
                )],
            )
            .with_species(
                "ditto",
                &[
                    ("ja", "細胞の 構成を 組み替えて 変身する 能力を 持つ。"),
                    (
                        "en",
                        "Capable of copying\nan enemy's genetic\ncode to instantly\u{000C}transform itself\ninto a duplicate\nof the enemy.",
                    ),
                ],
            )
            .with_pokemon(PokemonFixture {
                height: 7,
                weight: 69,
                base_experience: Some(64),
                artwork: artwork(1),
                abilities: vec!["overgrow".to_string(), "chlorophyll".to_string()],
                ..PokemonFixture::new("bulbasaur", &["grass", "poison"])
                    .with_stat("hp", 45)
                    .with_stat("attack", 49)
                    .with_stat("defense", 49)
                    .with_stat("special-attack", 65)
                    .with_stat("special-defense", 65)
                    .with_stat("speed", 45)
            })
            .with_pokemon(PokemonFixture {
                height: 6,
                weight: 85,
                base_experience: Some(62),
                artwork: artwork(4),
                abilities: vec!["blaze".to_string(), "solar-power".to_string()],
                ..PokemonFixture::new("charmander", &["fire"])
                    .with_stat("hp", 39)
                    .with_stat("attack", 52)
                    .with_stat("defense", 43)
                    .with_stat("special-attack", 60)
                    .with_stat("special-defense", 50)
                    .with_stat("speed", 65)
            })
            .with_pokemon(PokemonFixture {
                height: 3,
                weight: 40,
                base_experience: Some(101),
                artwork: artwork(132),
                abilities: vec!["limber".to_string(), "imposter".to_string()],
                ..PokemonFixture::new("ditto", &["normal"])
                    .with_stat("hp", 48)
                    .with_stat("attack", 48)
                    .with_stat("defense", 48)
                    .with_stat("special-attack", 48)
                    .with_stat("special-defense", 48)
                    .with_stat("speed", 48)
            })
    }
}

#[derive(Clone)]
struct AppState {
    base_url: Arc<str>,
    dataset: Arc<Dataset>,
}

impl AppState {
    fn url(&self, kind: &str, name: &str) -> String {
        format!("{}/{kind}/{name}", self.base_url)
    }

    fn named(&self, kind: &str, name: &str) -> Value {
        json!({"name": name, "url": self.url(kind, name)})
    }
}

#[derive(Deserialize)]
pub struct IndexParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Router whose embedded URLs are rooted at `base_url`.
pub fn app(base_url: &str, dataset: Dataset) -> Router {
    let state = AppState {
        base_url: Arc::from(base_url.trim_end_matches('/')),
        dataset: Arc::new(dataset),
    };
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{name}", get(get_pokemon))
        .route("/pokemon-species/{name}", get(get_species))
        .route("/type/{name}", get(get_type))
        .with_state(state)
}

/// Serve the sample dataset on `listener`.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Dataset::sample()).await
}

pub async fn run_with(listener: TcpListener, dataset: Dataset) -> Result<(), std::io::Error> {
    let base_url = format!("http://{}", listener.local_addr()?);
    axum::serve(listener, app(&base_url, dataset)).await
}

async fn list_pokemon(State(state): State<AppState>, Query(params): Query<IndexParams>) -> Json<Value> {
    let all = &state.dataset.pokemon;
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let results: Vec<Value> = all
        .iter()
        .skip(offset)
        .take(limit)
        .map(|p| state.named("pokemon", &p.name))
        .collect();
    let end = offset.saturating_add(limit);
    let next = (end < all.len())
        .then(|| format!("{}/pokemon?offset={end}&limit={limit}", state.base_url));
    Json(json!({
        "count": all.len(),
        "next": next,
        "previous": Value::Null,
        "results": results,
    }))
}

async fn get_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let p = state
        .dataset
        .pokemon
        .iter()
        .find(|p| p.name == name)
        .ok_or(StatusCode::NOT_FOUND)?;

    let types: Vec<Value> = p
        .types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": state.named("type", t)}))
        .collect();
    let abilities: Vec<Value> = p
        .abilities
        .iter()
        .enumerate()
        .map(|(i, a)| json!({"ability": state.named("ability", a), "is_hidden": false, "slot": i + 1}))
        .collect();
    let stats: Vec<Value> = p
        .stats
        .iter()
        .map(|(s, v)| json!({"base_stat": v, "effort": 0, "stat": state.named("stat", s)}))
        .collect();

    Ok(Json(json!({
        "name": p.name,
        "height": p.height,
        "weight": p.weight,
        "base_experience": p.base_experience,
        "sprites": {
            "front_default": Value::Null,
            "other": {"official-artwork": {"front_default": p.artwork}},
        },
        "types": types,
        "abilities": abilities,
        "stats": stats,
        "species": state.named("pokemon-species", &p.species),
    })))
}

async fn get_species(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let entries = state
        .dataset
        .species
        .get(&name)
        .ok_or(StatusCode::NOT_FOUND)?;
    let flavor_text_entries: Vec<Value> = entries
        .iter()
        .map(|(lang, text)| {
            json!({
                "flavor_text": text,
                "language": state.named("language", lang),
                "version": state.named("version", "red"),
            })
        })
        .collect();
    Ok(Json(json!({
        "name": name,
        "flavor_text_entries": flavor_text_entries,
    })))
}

async fn get_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let weak_to = state
        .dataset
        .types
        .get(&name)
        .ok_or(StatusCode::NOT_FOUND)?;
    let double_damage_from: Vec<Value> =
        weak_to.iter().map(|t| state.named("type", t)).collect();
    Ok(Json(json!({
        "name": name,
        "damage_relations": {
            "double_damage_from": double_damage_from,
            "half_damage_from": [],
            "no_damage_from": [],
        },
    })))
}
