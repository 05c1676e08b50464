//! Zillow lookups via RapidAPI.
//!
//! Two endpoints on the `zillow-com1` RapidAPI service: `/locationSuggestions`
//! resolves a free-text address to a ZPID, `/valueHistory/listingPrices`
//! returns the listing-price chart for a ZPID. One request per call, no
//! retries; anything that goes wrong is logged and degrades to
//! `Lookup::Failed` or an empty history.

use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{FetchPriceHistory, Lookup, RequestFailure, ResolveZpid};
use crate::domain::{local_date_from_epoch_ms, PricePoint, Zpid};

/// RapidAPI host for the Zillow service.
pub const DEFAULT_HOST: &str = "zillow-com1.p.rapidapi.com";

/// `/locationSuggestions` response.
#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    #[serde(default)]
    results: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    #[serde(rename = "metaData", default)]
    meta_data: Option<SuggestionMeta>,
}

#[derive(Debug, Deserialize)]
struct SuggestionMeta {
    #[serde(default)]
    zpid: Option<ZpidValue>,
}

/// The zpid field arrives as a JSON number for most records and a JSON
/// string for some; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZpidValue {
    Number(u64),
    Text(String),
}

impl From<ZpidValue> for Zpid {
    fn from(value: ZpidValue) -> Self {
        match value {
            ZpidValue::Number(n) => Zpid::new(n.to_string()),
            ZpidValue::Text(s) => Zpid::new(s),
        }
    }
}

/// `/valueHistory/listingPrices` response.
#[derive(Debug, Deserialize)]
struct ValueHistoryResponse {
    #[serde(rename = "chartData", default)]
    chart_data: Vec<ChartSeries>,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    #[serde(default)]
    points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ChartPoint {
    /// Milliseconds since the Unix epoch.
    x: i64,
    /// Listing price on that date.
    y: f64,
}

/// Blocking client for the two RapidAPI endpoints.
pub struct RapidApiClient {
    client: reqwest::blocking::Client,
    host: String,
    api_key: String,
}

impl RapidApiClient {
    /// Build a client for `host` authenticating with `api_key`.
    ///
    /// Transport settings stay at reqwest's defaults; the report runs one
    /// request at a time and tolerates slow responses.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            host: host.into(),
            api_key: api_key.into(),
        }
    }

    /// Issue a GET and return the status plus the full body text.
    fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let url = format!("https://{}{path}", self.host);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header("x-rapidapi-key", self.api_key.as_str())
            .header("x-rapidapi-host", self.host.as_str())
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        Ok((status, body))
    }
}

impl ResolveZpid for RapidApiClient {
    fn resolve(&self, address: &str) -> Lookup {
        let (status, body) = match self.get("/locationSuggestions", &[("q", address)]) {
            Ok(ok) => ok,
            Err(err) => {
                warn!(address, error = %err, "location suggestion request failed");
                return Lookup::Failed(RequestFailure {
                    status: None,
                    detail: err.to_string(),
                });
            }
        };

        if !status.is_success() {
            warn!(
                address,
                status = status.as_u16(),
                body = %body,
                "location suggestion returned non-success status"
            );
            return Lookup::Failed(RequestFailure {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        match serde_json::from_str::<SuggestionsResponse>(&body) {
            Ok(parsed) => first_zpid(parsed),
            Err(err) => {
                warn!(address, error = %err, "malformed location suggestion response");
                Lookup::Failed(RequestFailure {
                    status: Some(status.as_u16()),
                    detail: err.to_string(),
                })
            }
        }
    }
}

impl FetchPriceHistory for RapidApiClient {
    fn fetch_history(&self, zpid: &Zpid) -> Vec<PricePoint> {
        let query = [("zpid", zpid.as_str())];
        let (status, body) = match self.get("/valueHistory/listingPrices", &query) {
            Ok(ok) => ok,
            Err(err) => {
                warn!(%zpid, error = %err, "price history request failed");
                return Vec::new();
            }
        };

        if !status.is_success() {
            warn!(
                %zpid,
                status = status.as_u16(),
                body = %body,
                "price history returned non-success status"
            );
            return Vec::new();
        }

        debug!(%zpid, body = %body, "price history response");

        match serde_json::from_str::<ValueHistoryResponse>(&body) {
            Ok(parsed) => history_from_response(parsed),
            Err(err) => {
                warn!(%zpid, error = %err, "malformed price history response");
                Vec::new()
            }
        }
    }
}

/// The first result's zpid, if any.
///
/// Only the first suggestion is consulted; a first result without a zpid
/// counts as not found even when later results carry one.
fn first_zpid(resp: SuggestionsResponse) -> Lookup {
    resp.results
        .into_iter()
        .next()
        .and_then(|suggestion| suggestion.meta_data)
        .and_then(|meta| meta.zpid)
        .map(|zpid| Lookup::Found(zpid.into()))
        .unwrap_or(Lookup::NotFound)
}

/// Points of the first chart series, most recent first, converted to local
/// calendar dates.
fn history_from_response(resp: ValueHistoryResponse) -> Vec<PricePoint> {
    let Some(series) = resp.chart_data.into_iter().next() else {
        return Vec::new();
    };

    let mut points = series.points;
    points.sort_by(|a, b| b.x.cmp(&a.x));

    points
        .into_iter()
        .filter_map(|point| match local_date_from_epoch_ms(point.x) {
            Some(date) => Some(PricePoint {
                date,
                price: point.y,
            }),
            None => {
                warn!(x = point.x, "dropping price point with out-of-range timestamp");
                None
            }
        })
        .collect()
}
