//! Verify the merge step and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector carries raw detail, species, and type payloads plus the record
//! they should merge into. Payloads go through `PokeClient::parse_*` as
//! simulated 200 responses, so decoding and merging are exercised together.
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use pokedex_core::{ClientConfig, HttpResponse, PokeClient, PokemonRecord};

fn client() -> PokeClient {
    PokeClient::new(&ClientConfig::default())
}

fn simulated(body: &serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn record_test_vectors() {
    let raw = include_str!("../../test-vectors/records.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let detail = c
            .parse_detail("detail", simulated(&case["detail"]))
            .unwrap_or_else(|e| panic!("{name}: detail: {e}"));
        let species = c
            .parse_species("species", simulated(&case["species"]))
            .unwrap_or_else(|e| panic!("{name}: species: {e}"));
        let types: Vec<_> = case["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| c.parse_type("type", simulated(t)).unwrap())
            .collect();

        let record = PokemonRecord::assemble(&detail, &species, &types);

        let expected: PokemonRecord =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(record, expected, "{name}: merged record");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            case["expected_result"],
            "{name}: serialized record"
        );
    }
}
