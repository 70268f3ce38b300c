use atlas_rs::models::{Country, CountryName, Flags, Region};
use atlas_rs::viz;

fn country(common: &str, cca3: &str, population: u64, area: f64) -> Country {
    Country {
        name: CountryName {
            common: common.into(),
            official: common.into(),
        },
        cca3: cca3.into(),
        capital: vec![],
        region: Region::Europe,
        subregion: None,
        population,
        area,
        flags: Flags::default(),
        currencies: None,
        languages: None,
        borders: None,
    }
}

#[test]
fn series_are_keyed_by_cca3_in_given_order() {
    let a = country("Brazil", "BRA", 210_000_000, 8_515_767.0);
    let b = country("France", "FRA", 67_000_000, 551_695.0);
    let refs = vec![&a, &b];

    let population = viz::population_data(&refs);
    assert_eq!(population.len(), 2);
    assert_eq!(population[0].label, "BRA");
    assert_eq!(population[0].full, "Brazil");
    assert_eq!(population[0].value, 210_000_000.0);
    assert_eq!(population[1].label, "FRA");

    let area = viz::area_data(&refs);
    assert_eq!(area[0].value, 8_515_767.0);
    assert_eq!(area[1].value, 551_695.0);
}

#[test]
fn palette_assigns_by_position_and_cycles() {
    let first = viz::palette_color(0);
    assert_eq!(first, viz::PALETTE[0]);
    assert_eq!(viz::palette_color(3), viz::PALETTE[3]);
    // Position 4 wraps back to the first color.
    assert_eq!(viz::palette_color(4), first);
}

#[test]
fn locale_formatting_matches_expected_grouping() {
    let loc_en = viz::map_locale("en");
    let loc_de = viz::map_locale("de");
    let loc_pt = viz::map_locale("pt_BR");
    assert_eq!(viz::fmt_int(1_234_567, loc_en), "1,234,567");
    assert_eq!(viz::fmt_int(1_234_567, loc_de), "1.234.567");
    assert_eq!(viz::fmt_int(1_234_567, loc_pt), "1.234.567");
    // Unknown tags fall back to English.
    assert_eq!(viz::fmt_int(1_000, viz::map_locale("xx")), "1,000");
}

#[test]
fn area_formatting_drops_whole_number_decimals() {
    let loc_en = viz::map_locale("en");
    assert_eq!(viz::fmt_area(551_695.0, loc_en), "551,695");
    assert_eq!(viz::fmt_area(40.25, loc_en), "40.3");
    assert_eq!(viz::fmt_area(f64::NAN, loc_en), "NA");
    assert_eq!(viz::fmt_area(-1.0, loc_en), "NA");
}
