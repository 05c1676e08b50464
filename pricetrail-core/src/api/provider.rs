//! Lookup traits and structured lookup outcomes.
//!
//! The report builder only depends on these traits, so the HTTP client can
//! be swapped out and tests can run against in-memory tables.

use crate::domain::{PricePoint, Zpid};

/// Outcome of an address → ZPID lookup.
///
/// `NotFound` (the service answered, no match) and `Failed` (the request
/// itself went wrong) are distinct variants: the report treats both as an
/// unresolved address, diagnostics and one-shot commands do not.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Zpid),
    NotFound,
    Failed(RequestFailure),
}

impl Lookup {
    /// Collapse to the value the report builder cares about.
    pub fn zpid(self) -> Option<Zpid> {
        match self {
            Lookup::Found(zpid) => Some(zpid),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Why a request produced no usable response.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    /// HTTP status when the server answered; `None` for transport errors.
    pub status: Option<u16>,
    /// Response body or transport error text.
    pub detail: String,
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.detail),
            None => write!(f, "transport error: {}", self.detail),
        }
    }
}

/// Resolves a free-text address to a property identifier.
pub trait ResolveZpid {
    fn resolve(&self, address: &str) -> Lookup;
}

/// Fetches the listing-price history for a property.
///
/// Infallible by contract: any problem degrades to an empty history with
/// the cause logged, so callers never branch on a fetch error.
pub trait FetchPriceHistory {
    /// Price points sorted most recent first; empty when the property has
    /// no chart data or the request failed.
    fn fetch_history(&self, zpid: &Zpid) -> Vec<PricePoint>;
}
