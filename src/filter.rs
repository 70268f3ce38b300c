//! Pure derivation of the visible country subset from the full list, the
//! search text, the region selection, and the favorites-only flag.

use crate::models::{Country, Region};

/// Transient filter state. The derived view has no identity of its own; it
/// is recomputed from these inputs whenever any of them changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    /// Case-insensitive substring match against the common name. Empty
    /// matches everything.
    pub search: String,
    /// `None` matches all regions.
    pub region: Option<Region>,
    /// When set, only countries whose id is currently a favorite pass.
    pub favorites_only: bool,
}

impl Filters {
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.region.is_none() && !self.favorites_only
    }
}

fn matches(country: &Country, filters: &Filters, is_favorite: &dyn Fn(&str) -> bool) -> bool {
    let matches_search = filters.search.is_empty()
        || country
            .display_name()
            .to_lowercase()
            .contains(&filters.search.to_lowercase());
    let matches_region = filters.region.is_none_or(|r| country.region == r);
    let matches_favorites = !filters.favorites_only || is_favorite(&country.cca3);
    matches_search && matches_region && matches_favorites
}

/// Apply all filter rules conjunctively, preserving input order. The input
/// list is expected to be pre-sorted at load time; this never re-sorts.
pub fn apply<'a>(
    countries: &'a [Country],
    filters: &Filters,
    is_favorite: impl Fn(&str) -> bool,
) -> Vec<&'a Country> {
    countries
        .iter()
        .filter(|c| matches(c, filters, &is_favorite))
        .collect()
}

/// Memoized variant of [`apply`] keyed on input identity.
///
/// Callers pass revision counters for the two mutable inputs (the loaded
/// list and the favorites set) together with the filter values; when nothing
/// relevant changed since the last call, the cached index vector is reused
/// without re-scanning the list.
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(u64, u64, Filters)>,
    indices: Vec<usize>,
}

impl FilterCache {
    /// Recompute only when `(list_rev, favorites_rev, filters)` differs from
    /// the previous call.
    pub fn visible<'a>(
        &mut self,
        countries: &'a [Country],
        filters: &Filters,
        list_rev: u64,
        favorites_rev: u64,
        is_favorite: impl Fn(&str) -> bool,
    ) -> Vec<&'a Country> {
        let key = (list_rev, favorites_rev, filters.clone());
        if self.key.as_ref() != Some(&key) {
            self.indices = countries
                .iter()
                .enumerate()
                .filter(|(_, c)| matches(c, filters, &is_favorite))
                .map(|(i, _)| i)
                .collect();
            self.key = Some(key);
        }
        self.indices.iter().map(|&i| &countries[i]).collect()
    }

    /// The last computed subset without checking freshness. Out-of-range
    /// indices (a shrunk list without a recompute) are skipped.
    pub fn cached<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        self.indices
            .iter()
            .filter_map(|&i| countries.get(i))
            .collect()
    }

    /// Whether the last computation is still valid for the given key.
    pub fn is_fresh(&self, filters: &Filters, list_rev: u64, favorites_rev: u64) -> bool {
        self.key
            .as_ref()
            .is_some_and(|k| k.0 == list_rev && k.1 == favorites_rev && &k.2 == filters)
    }

    /// Drop the cached result, forcing the next call to recompute.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }
}
