//! Byte loading for archive documents, from disk or over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::{Result, ScorecardError};
use tracing::debug;

/// Fetches `url` with a GET request and returns the body.
///
/// Non-success statuses are errors; the body of a 404 page is not an archive.
pub fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed: reqwest::Url = url.parse().map_err(|e| ScorecardError::Fetch {
        year: None,
        reason: format!("invalid URL '{url}': {e}"),
    })?;
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads a document from a local file path or, for `http(s)://` sources, over
/// the network.
#[tracing::instrument(skip(client))]
pub fn load_source<C: HttpClient + ?Sized>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source)?
    } else {
        std::fs::read(source).map_err(|e| ScorecardError::Fetch {
            year: None,
            reason: format!("cannot read '{source}': {e}"),
        })?
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}
