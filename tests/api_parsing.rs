use atlas_rs::ApiError;
use atlas_rs::models::{Country, Region};

#[test]
fn parse_sample_json() {
    let sample = r#"
    [
      {
        "name": {"common": "Germany", "official": "Federal Republic of Germany"},
        "cca3": "DEU",
        "capital": ["Berlin"],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 83240525,
        "area": 357114.0,
        "flags": {"png": "https://flagcdn.com/w320/de.png", "svg": "https://flagcdn.com/de.svg", "alt": "The flag of Germany"},
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "languages": {"deu": "German"},
        "borders": ["AUT", "BEL", "CZE", "DNK", "FRA", "LUX", "NLD", "POL", "CHE"]
      },
      {
        "name": {"common": "Brazil", "official": "Federative Republic of Brazil"},
        "cca3": "BRA",
        "capital": ["Brasília"],
        "region": "Americas",
        "subregion": "South America",
        "population": 212559417,
        "area": 8515767.0,
        "flags": {"png": "", "svg": ""},
        "currencies": {"BRL": {"name": "Brazilian real", "symbol": "R$"}},
        "languages": {"por": "Portuguese"}
      }
    ]
    "#;

    let countries: Vec<Country> = serde_json::from_str(sample).unwrap();
    assert_eq!(countries.len(), 2);

    let de = &countries[0];
    assert_eq!(de.cca3, "DEU");
    assert_eq!(de.display_name(), "Germany");
    assert_eq!(de.region, Region::Europe);
    assert_eq!(de.population, 83_240_525);
    assert_eq!(de.first_capital(), Some("Berlin"));
    assert_eq!(de.borders.as_ref().unwrap().len(), 9);
    assert_eq!(
        de.currencies.as_ref().unwrap()["EUR"].symbol.as_deref(),
        Some("€")
    );

    let br = &countries[1];
    assert_eq!(br.region, Region::Americas);
    // borders omitted entirely for island-less projections
    assert!(br.borders.is_none());
    assert!(br.flags.alt.is_none());
}

#[test]
fn optional_fields_may_be_absent() {
    // Antarctica-adjacent records can lack capital, subregion, currencies,
    // languages, and borders.
    let sample = r#"
    {
      "name": {"common": "Bouvet Island", "official": "Bouvet Island"},
      "cca3": "BVT",
      "region": "Antarctic",
      "population": 0,
      "area": 49.0,
      "flags": {"png": "", "svg": ""}
    }
    "#;
    let c: Country = serde_json::from_str(sample).unwrap();
    assert_eq!(c.region, Region::Antarctic);
    assert!(c.capital.is_empty());
    assert!(c.first_capital().is_none());
    assert!(c.capitals_joined().is_none());
    assert!(c.subregion.is_none());
    assert!(c.currencies.is_none());
    assert!(c.languages.is_none());
}

#[test]
fn unexpected_region_does_not_fail_the_decode() {
    let sample = r#"
    {
      "name": {"common": "Atlantis", "official": "Kingdom of Atlantis"},
      "cca3": "ATL",
      "region": "Mythical",
      "population": 1,
      "area": 1.0,
      "flags": {"png": "", "svg": ""}
    }
    "#;
    let c: Country = serde_json::from_str(sample).unwrap();
    assert_eq!(c.region, Region::Unknown);
    // An unknown region never matches any of the six selectable ones.
    assert!(Region::ALL.iter().all(|r| *r != c.region));
}

#[test]
fn region_parse_is_case_insensitive() {
    assert_eq!(Region::parse("europe"), Some(Region::Europe));
    assert_eq!(Region::parse(" AMERICAS "), Some(Region::Americas));
    assert_eq!(Region::parse("Atlantis"), None);
    assert_eq!(Region::parse("unknown"), None);
}

#[test]
fn http_400_maps_to_recovery_message() {
    let err = ApiError::Http { status: 400 };
    let msg = err.user_message();
    assert!(msg.contains("400"));
    assert!(msg.contains("Trying to recover"));
}

#[test]
fn http_500_passes_raw_message_through() {
    let err = ApiError::Http { status: 500 };
    assert_eq!(err.user_message(), "request failed with HTTP 500");
    assert_eq!(err.user_message(), err.to_string());
}

#[test]
fn decode_error_passes_raw_message_through() {
    let bad = serde_json::from_str::<Vec<Country>>("not json").unwrap_err();
    let err = ApiError::Decode(bad);
    assert!(err.user_message().starts_with("failed to decode response"));
}

#[test]
fn empty_codes_short_circuit_without_network() {
    // Point the client at an unroutable base URL: if a request were issued,
    // this would fail instead of returning an empty list.
    let mut client = atlas_rs::Client::default();
    client.base_url = "http://127.0.0.1:1/v3.1".into();
    let result = client.fetch_by_codes(&[]).unwrap();
    assert!(result.is_empty());
}
