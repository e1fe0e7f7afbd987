//! Text rendering for the list and detail views.
//!
//! Format-only: records arrive fully merged from the store.

use std::fmt::Write;

use pokedex_core::PokemonRecord;

const NAME_WIDTH: usize = 14;
const TYPES_WIDTH: usize = 18;

pub fn render_list(records: &[PokemonRecord]) -> String {
    if records.is_empty() {
        return "No Pokémon loaded.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:<TYPES_WIDTH$} WEAK TO",
        "NAME", "TYPES"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} {:<TYPES_WIDTH$} {}",
            record.name, record.types, record.weaknesses
        );
    }
    out
}

pub fn render_detail(record: &PokemonRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.name);
    let _ = writeln!(out, "{}", "-".repeat(record.name.chars().count()));
    let rows = [
        ("Image", optional(record.image_url.as_deref())),
        ("Height", record.height.to_string()),
        ("Weight", record.weight.to_string()),
        ("Types", record.types.clone()),
        ("Abilities", record.abilities.clone()),
        ("Base experience", optional(record.base_experience)),
        ("Special attack", optional(record.special_attack)),
        ("Defense", optional(record.tanking)),
        ("Weak to", record.weaknesses.clone()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<16} {value}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.description);
    out
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
