//! Report assembly — drives both lookups per address and builds rows.

use tracing::warn;

use crate::api::provider::{FetchPriceHistory, Lookup, ResolveZpid};
use crate::domain::ReportRow;

/// Per-address progress callbacks for report runs.
pub trait ReportProgress {
    /// Called before an address is resolved.
    fn on_address_start(&self, address: &str, index: usize, total: usize);

    /// Called once the address's row is assembled.
    fn on_address_complete(&self, row: &ReportRow, index: usize, total: usize);

    /// Called after the last address.
    fn on_report_complete(&self, summary: &ReportSummary);
}

/// Progress reporter that prints one line per address to stdout.
pub struct StdoutProgress;

impl ReportProgress for StdoutProgress {
    fn on_address_start(&self, address: &str, index: usize, total: usize) {
        println!("[{}/{}] {address}", index + 1, total);
    }

    fn on_address_complete(&self, row: &ReportRow, _index: usize, _total: usize) {
        match &row.zpid {
            Some(zpid) => {
                let points = row.prices.iter().flatten().count();
                println!("  OK: zpid {zpid}, {points} price point(s)");
            }
            None => println!("  no ZPID"),
        }
    }

    fn on_report_complete(&self, summary: &ReportSummary) {
        println!(
            "\nReport complete: {}/{} addresses resolved, {} without a ZPID",
            summary.resolved, summary.total, summary.unresolved
        );
    }
}

/// No-op reporter for tests and one-shot commands.
pub struct SilentProgress;

impl ReportProgress for SilentProgress {
    fn on_address_start(&self, _address: &str, _index: usize, _total: usize) {}
    fn on_address_complete(&self, _row: &ReportRow, _index: usize, _total: usize) {}
    fn on_report_complete(&self, _summary: &ReportSummary) {}
}

/// Outcome counts for a finished report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl ReportSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let resolved = rows.iter().filter(|row| row.zpid.is_some()).count();
        Self {
            total: rows.len(),
            resolved,
            unresolved: rows.len() - resolved,
        }
    }

    pub fn all_resolved(&self) -> bool {
        self.unresolved == 0
    }
}

/// Build one row per address, in input order.
///
/// Addresses are processed independently and strictly in sequence: a failed
/// lookup yields a sentinel row and the loop moves on. The history fetch
/// only runs for addresses that resolved.
pub fn build_rows(
    resolver: &dyn ResolveZpid,
    fetcher: &dyn FetchPriceHistory,
    addresses: &[String],
    progress: &dyn ReportProgress,
) -> Vec<ReportRow> {
    let total = addresses.len();
    let mut rows = Vec::with_capacity(total);

    for (i, address) in addresses.iter().enumerate() {
        progress.on_address_start(address, i, total);

        let row = match resolver.resolve(address) {
            Lookup::Found(zpid) => {
                let history = fetcher.fetch_history(&zpid);
                ReportRow::new(address.clone(), Some(zpid), &history)
            }
            Lookup::NotFound | Lookup::Failed(_) => {
                warn!("ZPID not found for address: {address}");
                ReportRow::new(address.clone(), None, &[])
            }
        };

        progress.on_address_complete(&row, i, total);
        rows.push(row);
    }

    progress.on_report_complete(&ReportSummary::from_rows(&rows));
    rows
}
