use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};

use super::Recommendation;
use super::parse::parse_recommendations;

/// Blocking client for the `/recommend` endpoint; runs on a worker thread so
/// the UI never waits on the network.
pub struct RecommendClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl RecommendClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn fetch_recommendations(&self, term: &str) -> Result<Vec<Recommendation>> {
        let url = format!("{}/recommend", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("flavor", term)])
            .send()
            .with_context(|| format!("request to {url} failed for flavor {term:?}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "recommendation endpoint returned {status} for flavor {term:?}"
            ));
        }

        let body = response
            .text()
            .with_context(|| format!("failed to read recommendation body for flavor {term:?}"))?;
        parse_recommendations(&body)
    }

    /// Fetches every term in order. A failed term degrades to an empty list so
    /// the rest of the graph still renders.
    pub fn fetch_all(&self, terms: &[String]) -> Vec<(String, Vec<Recommendation>)> {
        terms
            .iter()
            .map(|term| match self.fetch_recommendations(term) {
                Ok(recommendations) => {
                    debug!(%term, count = recommendations.len(), "fetched recommendations");
                    (term.clone(), recommendations)
                }
                Err(error) => {
                    warn!(%term, %error, "recommendation fetch failed; treating as empty");
                    (term.clone(), Vec::new())
                }
            })
            .collect()
    }
}
