//! Live tests against the real REST Countries API.
//!
//! Opt-in: `cargo test --features online`. Kept out of the default run so CI
//! does not depend on the external service.

#![cfg(feature = "online")]

use atlas_rs::Client;
use atlas_rs::models::Region;

#[test]
fn fetch_all_returns_unique_sorted_ready_records() {
    let client = Client::default();
    let countries = client.fetch_all().unwrap();
    // ~195 independent states; guard loosely against projection breakage.
    assert!(countries.len() > 150, "got {}", countries.len());

    let mut ids: Vec<&str> = countries.iter().map(|c| c.cca3.as_str()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(before, ids.len(), "cca3 must be unique");

    assert!(countries.iter().all(|c| c.cca3.len() == 3));
    assert!(countries.iter().any(|c| c.region == Region::Europe));
}

#[test]
fn fetch_by_codes_returns_matches_and_skips_unknown() {
    let client = Client::default();
    let codes = vec!["DEU".to_string(), "BRA".to_string(), "XXX".to_string()];
    let countries = client.fetch_by_codes(&codes).unwrap();
    let ids: Vec<&str> = countries.iter().map(|c| c.cca3.as_str()).collect();
    assert!(ids.contains(&"DEU"));
    assert!(ids.contains(&"BRA"));
    assert!(!ids.contains(&"XXX"));
}
