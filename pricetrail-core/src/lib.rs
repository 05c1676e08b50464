//! PriceTrail Core — address-to-price-history report engine.
//!
//! The pipeline has two remote stages and two local ones:
//! - Resolve each free-text address to its Zillow property identifier (ZPID)
//! - Fetch the property's listing-price history
//! - Shape the three most recent (date, price) pairs into a report row
//! - Export all rows as a CSV document
//!
//! Network access sits behind the `api::provider` traits, so the report
//! builder runs against in-memory tables in tests and the RapidAPI client
//! stays swappable.

pub mod api;
pub mod config;
pub mod credential;
pub mod domain;
pub mod export;
pub mod report;
