//! Data shaping for the comparison charts, plus locale-aware number
//! formatting.
//!
//! Chart rendering itself is delegated to an external collaborator (the GUI
//! feeds `egui_plot`, the CLI draws proportional text bars); this module only
//! produces the simple label/value rows both consume, keyed by cca3 with a
//! fixed 4-color palette cycled by position.

use crate::models::Country;
use num_format::{Locale, ToFormattedString};

/// One bar: short axis label (cca3), full name for tooltips, numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub label: String,
    pub full: String,
    pub value: f64,
}

/// The comparison palette, cycled by position: indigo, pink, green, amber.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (99, 102, 241),  // indigo (#6366F1)
    (236, 72, 153),  // pink   (#EC4899)
    (16, 185, 129),  // green  (#10B981)
    (245, 158, 11),  // amber  (#F59E0B)
];

#[inline]
pub fn palette_color(idx: usize) -> (u8, u8, u8) {
    PALETTE[idx % PALETTE.len()]
}

/// Population series for the compared countries, in the given order.
pub fn population_data(countries: &[&Country]) -> Vec<ChartDatum> {
    countries
        .iter()
        .map(|c| ChartDatum {
            label: c.cca3.clone(),
            full: c.display_name().to_string(),
            value: c.population as f64,
        })
        .collect()
}

/// Area (km²) series for the compared countries, in the given order.
pub fn area_data(countries: &[&Country]) -> Vec<ChartDatum> {
    countries
        .iter()
        .map(|c| ChartDatum {
            label: c.cca3.clone(),
            full: c.display_name().to_string(),
            value: c.area,
        })
        .collect()
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`,
/// `german`, `fr`, `es`, `it`, `pt`, `pt_BR`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Grouped integer formatting, e.g. `83_240_525` -> `83,240,525` for `en`.
pub fn fmt_int(value: u64, locale: &'static Locale) -> String {
    value.to_formatted_string(locale)
}

/// Format an area value: grouped integer part, one decimal only when the
/// value is not whole.
pub fn fmt_area(value: f64, locale: &'static Locale) -> String {
    if !value.is_finite() || value < 0.0 {
        return "NA".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    let whole = rounded.trunc() as u64;
    let tenths = ((rounded - rounded.trunc()) * 10.0).round() as u64;
    if tenths == 0 {
        whole.to_formatted_string(locale)
    } else {
        format!("{}.{}", whole.to_formatted_string(locale), tenths)
    }
}
