//! Application controller: owns the whole UI state and orchestrates the
//! fetch lifecycle.
//!
//! All mutation goes through handler methods on [`AppState`]; views receive
//! read-only borrows. The fetch runs on a background thread and reports back
//! over an mpsc channel which the UI thread polls every frame.
//!
//! Every fetch attempt is tagged with a monotonically increasing sequence
//! number; a completion is applied only when its tag equals the latest
//! issued. A retry therefore supersedes any still-outstanding request, and a
//! late response from a superseded fetch is discarded instead of racing the
//! newer one.

use crate::api::{ApiError, Client};
use crate::compare::{CompareSelection, ToggleOutcome};
use crate::favorites::Favorites;
use crate::filter::{FilterCache, Filters};
use crate::models::{self, Country, Region};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Warning shown when a fifth country is added to the comparison.
pub const COMPARE_LIMIT_MESSAGE: &str = "You can compare at most 4 countries at a time.";

/// Fetch lifecycle. `Failed` and `Loaded` both re-enter `Loading` on retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

struct FetchOutcome {
    seq: u64,
    result: Result<Vec<Country>, ApiError>,
}

/// Central application state: the loaded list, fetch lifecycle, filters,
/// favorites, and the comparison selection.
pub struct AppState {
    countries: Vec<Country>,
    phase: Phase,
    fetch_seq: u64,
    retry_count: u64,
    receiver: Option<Receiver<FetchOutcome>>,
    filters: Filters,
    favorites: Favorites,
    compare: CompareSelection,
    cache: FilterCache,
    list_rev: u64,
    last_updated: Option<DateTime<Local>>,
}

impl AppState {
    pub fn new(favorites: Favorites) -> Self {
        Self {
            countries: Vec::new(),
            phase: Phase::Idle,
            fetch_seq: 0,
            retry_count: 0,
            receiver: None,
            filters: Filters::default(),
            favorites,
            compare: CompareSelection::new(),
            cache: FilterCache::default(),
            list_rev: 0,
            last_updated: None,
        }
    }

    // ----- fetch lifecycle -------------------------------------------------

    /// Enter `Loading` and issue a new sequence number. Clears any prior
    /// error; the stale list stays visible behind the loading indicator.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.phase = Phase::Loading;
        self.fetch_seq
    }

    /// Start a background fetch of the full list. Any response from an
    /// earlier, still-outstanding fetch will be discarded on arrival.
    pub fn spawn_fetch(&mut self, client: &Client) {
        let seq = self.begin_fetch();
        let (tx, rx) = mpsc::channel();
        self.receiver = Some(rx);
        let client = client.clone();
        thread::spawn(move || {
            let result = client.fetch_all();
            let _ = tx.send(FetchOutcome { seq, result });
        });
    }

    /// Manual retry: always re-enters `Loading`, whatever the current phase.
    pub fn retry(&mut self, client: &Client) {
        self.retry_count += 1;
        info!("retry #{} requested", self.retry_count);
        self.spawn_fetch(client);
    }

    /// Drain completed fetches from the channel. Returns `true` when a
    /// result was applied (the caller may want to repaint).
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        loop {
            let outcome = match &self.receiver {
                Some(rx) => match rx.try_recv() {
                    Ok(o) => o,
                    Err(_) => break,
                },
                None => break,
            };
            applied |= self.apply_fetch(outcome.seq, outcome.result);
        }
        applied
    }

    /// Apply one fetch completion. Only the latest issued sequence number is
    /// accepted; anything older is a superseded request and is dropped.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<Country>, ApiError>) -> bool {
        if seq != self.fetch_seq {
            debug!("discarding stale fetch result (seq {seq}, latest {})", self.fetch_seq);
            return false;
        }
        self.receiver = None;
        match result {
            Ok(mut list) => {
                models::sort_by_display_name(&mut list);
                info!("loaded {} countries", list.len());
                self.countries = list;
                self.phase = Phase::Loaded;
                self.last_updated = Some(Local::now());
            }
            Err(e) => {
                self.countries = Vec::new();
                self.phase = Phase::Failed(e.user_message());
            }
        }
        self.list_rev += 1;
        true
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn retry_count(&self) -> u64 {
        self.retry_count
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    // ----- filtering -------------------------------------------------------

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_search(&mut self, search: String) {
        self.filters.search = search;
    }

    pub fn set_region(&mut self, region: Option<Region>) {
        self.filters.region = region;
    }

    pub fn set_favorites_only(&mut self, on: bool) {
        self.filters.favorites_only = on;
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
    }

    /// Recompute the visible subset if any input changed since last time.
    pub fn refresh_visible(&mut self) {
        let favorites = &self.favorites;
        self.cache.visible(
            &self.countries,
            &self.filters,
            self.list_rev,
            favorites.revision(),
            |id| favorites.contains(id),
        );
    }

    /// The currently visible subset, from the memoized filter pass. Call
    /// [`AppState::refresh_visible`] first when inputs may have changed.
    pub fn visible(&self) -> Vec<&Country> {
        self.cache.cached(&self.countries)
    }

    // ----- favorites -------------------------------------------------------

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites_len(&self) -> usize {
        self.favorites.len()
    }

    /// Toggle and persist; returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites.toggle(id)
    }

    // ----- comparison ------------------------------------------------------

    pub fn compare(&self) -> &CompareSelection {
        &self.compare
    }

    pub fn toggle_compare(&mut self, id: &str) -> ToggleOutcome {
        self.compare.toggle(id)
    }

    pub fn remove_from_compare(&mut self, id: &str) {
        self.compare.remove(id);
    }

    pub fn clear_compare(&mut self) {
        self.compare.clear();
    }

    /// The selected countries in master-list order.
    pub fn compare_countries(&self) -> Vec<&Country> {
        self.compare.resolve(&self.countries)
    }
}
