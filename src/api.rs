/// Synchronous client for the **REST Countries API (v3.1)**.
///
/// Two read-only endpoints are used: `independent` (the full list of
/// independent countries) and `alpha` (lookup by cca3 codes). Both requests
/// carry an explicit field projection, which keeps payloads small and avoids
/// the HTTP 400 responses the API returns for oversized unprojected queries.
///
/// ### Notes
/// - No internal retries: whether and when to re-issue a failed fetch is the
///   caller's decision (see `app::AppState::retry`).
/// - Unknown codes passed to [`Client::fetch_by_codes`] are silently absent
///   from the result, not reported as errors.
///
/// Typical usage:
/// ```no_run
/// # use atlas_rs::Client;
/// let client = Client::default();
/// let countries = client.fetch_all()?;
/// # Ok::<(), atlas_rs::ApiError>(())
/// ```
use crate::models::Country;
use log::{debug, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

/// Fixed field projection requested from the API.
pub const FIELDS: &str =
    "name,cca3,capital,region,subregion,population,area,flags,currencies,languages,borders";

/// Everything that can go wrong at the fetch boundary.
///
/// The taxonomy is deliberately flat: transport failure, non-success status,
/// or an undecodable body. Nothing structured survives past the controller;
/// the UI only ever sees [`ApiError::user_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The server answered with a non-success status code.
    #[error("request failed with HTTP {status}")]
    Http { status: u16 },
    /// The body arrived but could not be parsed into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// The sanitized display string shown to the user.
    ///
    /// HTTP 400 gets a friendlier message implying transient recovery (the
    /// API intermittently rejects otherwise-valid projected queries); every
    /// other failure passes its raw message through.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status: 400 } => {
                "Communication error with the server (400). Trying to recover...".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("atlas_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://restcountries.com/v3.1".into(),
            http,
        }
    }
}

// Allow -, _, . unescaped; country codes are plain ASCII letters anyway.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl Client {
    /// Fetch the full independent-country dataset, field-projected.
    ///
    /// ### Errors
    /// - [`ApiError::Network`] on transport failure
    /// - [`ApiError::Http`] on a non-2xx response
    /// - [`ApiError::Decode`] when the body is not the expected JSON array
    pub fn fetch_all(&self) -> Result<Vec<Country>, ApiError> {
        let url = format!(
            "{}/independent?status=true&fields={}",
            self.base_url, FIELDS
        );
        self.get_countries(&url)
    }

    /// Fetch the countries matching the given cca3 codes.
    ///
    /// Empty input short-circuits to an empty result without touching the
    /// network. Unknown codes are simply absent from the result.
    pub fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>, ApiError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let code_spec = enc_join(codes.iter().map(|s| s.as_str()));
        let url = format!(
            "{}/alpha?codes={}&fields={}",
            self.base_url, code_spec, FIELDS
        );
        self.get_countries(&url)
    }

    fn get_countries(&self, url: &str) -> Result<Vec<Country>, ApiError> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().map_err(|e| {
            warn!("transport failure for {}: {}", url, e);
            ApiError::Network(e)
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status.as_u16(), url);
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(ApiError::Network)?;
        let countries: Vec<Country> = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        debug!("{} countries decoded from {}", countries.len(), url);
        Ok(countries)
    }
}
