use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse geographic grouping used by the REST Countries dataset.
///
/// `Unknown` absorbs any region string the API may add later so that a single
/// unexpected record never fails the whole decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Antarctic,
    Unknown,
}

/// Serde helper: any region string outside the six fixed values maps to
/// `Unknown` instead of failing the decode.
impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct RegionVisitor;

        impl<'de> Visitor<'de> for RegionVisitor {
            type Value = Region;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a region name string")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match s {
                    "Africa" => Region::Africa,
                    "Americas" => Region::Americas,
                    "Asia" => Region::Asia,
                    "Europe" => Region::Europe,
                    "Oceania" => Region::Oceania,
                    "Antarctic" => Region::Antarctic,
                    _ => Region::Unknown,
                })
            }
        }

        deserializer.deserialize_str(RegionVisitor)
    }
}

impl Region {
    /// The six selectable regions, in UI order.
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Antarctic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Antarctic => "Antarctic",
            Region::Unknown => "Unknown",
        }
    }

    /// Parse a user-supplied region name, case-insensitive. `None` for
    /// anything that is not one of the six fixed regions.
    pub fn parse(s: &str) -> Option<Region> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common and official country names as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

/// Flag image references. `alt` is a textual description, present for most
/// but not all countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One currency entry, keyed by its ISO code in `Country::currencies`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyInfo {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// One country record from the REST Countries v3.1 API, restricted to the
/// fields this crate requests (see `api::FIELDS`).
///
/// Records are read-only after fetch; a new fetch replaces the whole list.
/// `cca3` is the unique key used everywhere (favorites, comparison, charts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub name: CountryName,
    pub cca3: String,
    #[serde(default)]
    pub capital: Vec<String>,
    pub region: Region,
    #[serde(default)]
    pub subregion: Option<String>,
    pub population: u64,
    pub area: f64,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, CurrencyInfo>>,
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

impl Country {
    /// The name shown in lists, search, and sorting.
    pub fn display_name(&self) -> &str {
        &self.name.common
    }

    /// First capital, if any. Most states have exactly one; a few have none.
    pub fn first_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// All capitals joined for display, or `None` when the list is empty.
    pub fn capitals_joined(&self) -> Option<String> {
        if self.capital.is_empty() {
            None
        } else {
            Some(self.capital.join(", "))
        }
    }

    /// Language names joined for display.
    pub fn languages_joined(&self) -> Option<String> {
        self.languages
            .as_ref()
            .filter(|m| !m.is_empty())
            .map(|m| m.values().cloned().collect::<Vec<_>>().join(", "))
    }

    /// Currencies as `Name (symbol)` joined for display.
    pub fn currencies_joined(&self) -> Option<String> {
        self.currencies.as_ref().filter(|m| !m.is_empty()).map(|m| {
            m.values()
                .map(|c| match &c.symbol {
                    Some(s) => format!("{} ({})", c.name, s),
                    None => c.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
    }
}

/// One-time normalization applied right after a successful fetch: the list is
/// kept alphabetical by common name so the filter pass never has to re-sort.
pub fn sort_by_display_name(countries: &mut [Country]) {
    countries.sort_by(|a, b| a.name.common.cmp(&b.name.common));
}
