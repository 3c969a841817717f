//! BCB SGS open-data integration.
//!
//! Each fetch fails soft: any transport, read, or decode problem is logged and
//! turned into `None`. The caller decides what a missing series means.

use reqwest::blocking::Client;

use crate::config::{SeriesSource, Sources};
use crate::domain::{Indicator, RawObservation};

pub struct BcbClient {
    client: Client,
}

impl Default for BcbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BcbClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch both series concurrently; returns once both have settled.
    pub fn fetch_pair(
        &self,
        sources: &Sources,
    ) -> (Option<Vec<RawObservation>>, Option<Vec<RawObservation>>) {
        rayon::join(
            || self.fetch(Indicator::Ipca, &sources.ipca),
            || self.fetch(Indicator::Igpm, &sources.igpm),
        )
    }

    /// Fetch one series from its source.
    pub fn fetch(&self, indicator: Indicator, source: &SeriesSource) -> Option<Vec<RawObservation>> {
        tracing::debug!(series = indicator.display_name(), source = %source.describe(), "fetching");
        let body = match source {
            SeriesSource::Url(url) => self.get_body(indicator, url)?,
            SeriesSource::File(path) => match std::fs::read_to_string(path) {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!(
                        series = indicator.display_name(),
                        path = %path.display(),
                        "failed to read series file: {e}"
                    );
                    return None;
                }
            },
        };

        let records = parse_payload(indicator, &body)?;
        tracing::info!(
            series = indicator.display_name(),
            records = records.len(),
            "series fetched"
        );
        Some(records)
    }

    fn get_body(&self, indicator: Indicator, url: &str) -> Option<String> {
        let resp = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(series = indicator.display_name(), %url, "request failed: {e}");
                return None;
            }
        };

        // Status alone doesn't fail the fetch; an error body won't decode anyway.
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(series = indicator.display_name(), %url, %status, "non-success status");
        }

        match resp.text() {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!(series = indicator.display_name(), %url, "failed to read body: {e}");
                None
            }
        }
    }
}

/// Decode an SGS JSON payload, logging and returning `None` on failure.
pub fn parse_payload(indicator: Indicator, body: &str) -> Option<Vec<RawObservation>> {
    match serde_json::from_str::<Vec<RawObservation>>(body) {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::error!(series = indicator.display_name(), "failed to decode payload: {e}");
            None
        }
    }
}
