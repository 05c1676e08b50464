//! Remote lookups: capability traits and the RapidAPI client.

pub mod provider;
pub mod zillow;

pub use provider::{FetchPriceHistory, Lookup, RequestFailure, ResolveZpid};
pub use zillow::{RapidApiClient, DEFAULT_HOST};
