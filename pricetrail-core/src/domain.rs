//! Core report types: property identifiers, price points, and output rows.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Cell written to the ZPID column when no identifier could be resolved.
pub const ZPID_NOT_FOUND: &str = "ZPID not found";

/// Cell written to both halves of an empty date/price slot.
pub const NO_DATA: &str = "No data";

/// Number of date/price slots in every report row.
pub const PRICE_SLOTS: usize = 3;

/// Zillow property identifier.
///
/// The suggestion endpoint returns this as a JSON number for most records
/// and a JSON string for some; both normalize to the same canonical string
/// here. A `Zpid` is never synthesized locally — every value comes out of a
/// lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zpid(String);

impl Zpid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Zpid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One listing-price observation: the calendar date the price was recorded
/// and the asking price on that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// One output record: the input address, the resolved identifier (if any),
/// and up to three price points, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub address: String,
    pub zpid: Option<Zpid>,
    pub prices: [Option<PricePoint>; PRICE_SLOTS],
}

impl ReportRow {
    /// Assemble a row from a price history already sorted most recent
    /// first. Slots beyond the history length stay empty.
    pub fn new(address: impl Into<String>, zpid: Option<Zpid>, history: &[PricePoint]) -> Self {
        Self {
            address: address.into(),
            zpid,
            prices: std::array::from_fn(|i| history.get(i).cloned()),
        }
    }

    /// Render the row as its eight CSV cells, substituting sentinels for
    /// the identifier and for every empty slot.
    pub fn csv_record(&self) -> [String; 8] {
        let zpid = match &self.zpid {
            Some(zpid) => zpid.to_string(),
            None => ZPID_NOT_FOUND.to_string(),
        };
        [
            self.address.clone(),
            zpid,
            date_cell(&self.prices[0]),
            price_cell(&self.prices[0]),
            date_cell(&self.prices[1]),
            price_cell(&self.prices[1]),
            date_cell(&self.prices[2]),
            price_cell(&self.prices[2]),
        ]
    }
}

fn date_cell(slot: &Option<PricePoint>) -> String {
    match slot {
        Some(point) => point.date.to_string(),
        None => NO_DATA.to_string(),
    }
}

fn price_cell(slot: &Option<PricePoint>) -> String {
    match slot {
        Some(point) => format_price(point.price),
        None => NO_DATA.to_string(),
    }
}

/// Format a price for output.
///
/// The wire carries prices as JSON numbers and listing prices are almost
/// always whole dollars; integral values render without a trailing `.0` so
/// cells read `250000`, not `250000.0`.
pub fn format_price(price: f64) -> String {
    // 9e15 keeps the cast inside f64's exact integer range.
    if price.is_finite() && price.fract() == 0.0 && price.abs() < 9e15 {
        format!("{}", price as i64)
    } else {
        price.to_string()
    }
}

/// Convert an epoch-millisecond timestamp to a calendar date in `tz`.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn date_from_epoch_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Convert an epoch-millisecond timestamp to a calendar date in the
/// machine's local time zone, the zone price-history timestamps are
/// reported in.
pub fn local_date_from_epoch_ms(ms: i64) -> Option<NaiveDate> {
    date_from_epoch_ms(ms, &Local)
}
