//! atlas-rs
//!
//! A lightweight Rust library for exploring world countries via the REST
//! Countries API: fetch the independent-country dataset, search and filter
//! it, keep persisted favorites, and compare up to four countries side by
//! side. Pairs with the `atlas` CLI and the `atlas-gui` desktop app.
//!
//! ### Features
//! - Fetch all independent countries, or look up specific cca3 codes
//! - Pure, memoized filtering by name, region, and favorites
//! - Persisted favorites with a pluggable storage backend
//! - Bounded comparison selection plus chart-ready data series
//! - Save the (filtered) list as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use atlas_rs::{Client, filter};
//!
//! let client = Client::default();
//! let mut countries = client.fetch_all()?;
//! atlas_rs::models::sort_by_display_name(&mut countries);
//!
//! let filters = filter::Filters {
//!     search: "ger".into(),
//!     region: None,
//!     favorites_only: false,
//! };
//! let visible = filter::apply(&countries, &filters, |_| false);
//! println!("{} matches", visible.len());
//! # Ok::<(), atlas_rs::ApiError>(())
//! ```

pub mod api;
pub mod app;
pub mod compare;
pub mod favorites;
pub mod filter;
pub mod models;
pub mod storage;
pub mod viz;

pub use api::{ApiError, Client};
pub use compare::{CompareSelection, MAX_COMPARE, ToggleOutcome};
pub use favorites::Favorites;
pub use filter::Filters;
pub use models::{Country, Region};
