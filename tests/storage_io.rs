use atlas_rs::models::{Country, CountryName, CurrencyInfo, Flags, Region};
use atlas_rs::storage;
use std::collections::BTreeMap;
use std::fs;
use tempfile::tempdir;

fn sample() -> Vec<Country> {
    let mut currencies = BTreeMap::new();
    currencies.insert(
        "EUR".to_string(),
        CurrencyInfo {
            name: "Euro".into(),
            symbol: Some("€".into()),
        },
    );
    let mut languages = BTreeMap::new();
    languages.insert("fra".to_string(), "French".to_string());

    vec![Country {
        name: CountryName {
            common: "France".into(),
            official: "French Republic".into(),
        },
        cca3: "FRA".into(),
        capital: vec!["Paris".into()],
        region: Region::Europe,
        subregion: Some("Western Europe".into()),
        population: 67_391_582,
        area: 551_695.0,
        flags: Flags {
            png: "https://flagcdn.com/w320/fr.png".into(),
            svg: "https://flagcdn.com/fr.svg".into(),
            alt: None,
        },
        currencies: Some(currencies),
        languages: Some(languages),
        borders: Some(vec!["BEL".into(), "DEU".into(), "ESP".into()]),
    }]
}

#[test]
fn csv_has_header_and_flattened_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("countries.csv");
    storage::save_csv(&sample(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("cca3,name,official_name,region"));

    let row = lines.next().unwrap();
    assert!(row.contains("FRA"));
    assert!(row.contains("French Republic"));
    assert!(row.contains("Europe"));
    assert!(row.contains("67391582"));
    assert!(row.contains("Paris"));
    assert!(row.contains("French"));
    assert!(row.contains("BEL, DEU, ESP"));
}

#[test]
fn json_round_trips_through_the_model() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("countries.json");
    let countries = sample();
    storage::save_json(&countries, &path).unwrap();

    let back: Vec<Country> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, countries);
}
