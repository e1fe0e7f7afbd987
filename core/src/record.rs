//! The flattened view model and the pure merge step that produces it.
//!
//! Nothing in here performs I/O. `PokemonRecord::assemble` runs only once the
//! detail, species, and every type resource for one Pokémon have resolved.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{PokemonDetail, SpeciesDetail, StatEntry, TypeDetail};

/// Shown when a species has no English flavor text.
pub const NO_DESCRIPTION: &str = "No description available";

const SPECIAL_ATTACK: &str = "special-attack";
const DEFENSE: &str = "defense";
const ENGLISH: &str = "en";
const LIST_SEPARATOR: &str = ", ";

/// One UI-ready Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonRecord {
    pub name: String,
    pub image_url: Option<String>,
    pub height: u32,
    pub weight: u32,
    pub types: String,
    pub abilities: String,
    pub base_experience: Option<u32>,
    pub special_attack: Option<u32>,
    /// Defense stat.
    pub tanking: Option<u32>,
    pub weaknesses: String,
    pub description: String,
}

impl PokemonRecord {
    pub fn assemble(detail: &PokemonDetail, species: &SpeciesDetail, types: &[TypeDetail]) -> Self {
        Self {
            name: detail.name.clone(),
            image_url: detail.artwork_url().map(str::to_string),
            height: detail.height,
            weight: detail.weight,
            types: join(detail.types.iter().map(|t| t.type_ref.name.as_str())),
            abilities: join(detail.abilities.iter().map(|a| a.ability.name.as_str())),
            base_experience: detail.base_experience,
            special_attack: find_stat(&detail.stats, SPECIAL_ATTACK),
            tanking: find_stat(&detail.stats, DEFENSE),
            weaknesses: join(weaknesses(types).iter().map(String::as_str)),
            description: english_description(species),
        }
    }
}

/// Partial update applied by `PokemonStore::patch_by_name`.
///
/// `None` leaves a field unchanged. Nullable fields take `Some(None)` to clear
/// them. The name is the lookup key and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonPatch {
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_experience: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub special_attack: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub tanking: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PokemonPatch {
    pub fn apply(self, record: &mut PokemonRecord) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut record.image_url, self.image_url);
        set(&mut record.height, self.height);
        set(&mut record.weight, self.weight);
        set(&mut record.types, self.types);
        set(&mut record.abilities, self.abilities);
        set(&mut record.base_experience, self.base_experience);
        set(&mut record.special_attack, self.special_attack);
        set(&mut record.tanking, self.tanking);
        set(&mut record.weaknesses, self.weaknesses);
        set(&mut record.description, self.description);
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Union of every type's "double damage from" names, first occurrence wins.
pub fn weaknesses(types: &[TypeDetail]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for name in types
        .iter()
        .flat_map(|t| t.damage_relations.double_damage_from.iter())
        .map(|r| &r.name)
    {
        if !seen.contains(name) {
            seen.push(name.clone());
        }
    }
    seen
}

/// Case-sensitive lookup; `None` when the stat is not listed.
pub fn find_stat(stats: &[StatEntry], name: &str) -> Option<u32> {
    stats
        .iter()
        .find(|s| s.stat.name == name)
        .map(|s| s.base_stat)
}

/// First English flavor text with form feeds replaced by spaces.
pub fn english_description(species: &SpeciesDetail) -> String {
    species
        .flavor_text_entries
        .iter()
        .find(|e| e.language.name == ENGLISH)
        .map(|e| e.flavor_text.replace('\u{000C}', " "))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(LIST_SEPARATOR)
}
