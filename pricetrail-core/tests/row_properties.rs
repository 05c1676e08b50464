//! Property tests for report-row invariants.
//!
//! Uses proptest to verify:
//! 1. Slot mirroring — the three slots are exactly the first three history
//!    points, in order
//! 2. Sentinel coverage — sentinel cells appear for precisely the slots the
//!    history cannot fill
//! 3. Render determinism — the same rows always produce the same CSV bytes

use chrono::NaiveDate;
use proptest::prelude::*;

use pricetrail_core::domain::{PricePoint, ReportRow, Zpid, NO_DATA, PRICE_SLOTS};
use pricetrail_core::export::render_csv;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1_000.0..5_000_000.0_f64).prop_map(|p| p.round())
}

/// A history already sorted most recent first, the order fetchers deliver.
fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec((0i64..20_000, arb_price()), 0..max_len).prop_map(|mut raw| {
        raw.sort_by(|a, b| b.0.cmp(&a.0));
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        raw.into_iter()
            .map(|(days, price)| PricePoint {
                date: epoch + chrono::Duration::days(days),
                price,
            })
            .collect()
    })
}

fn arb_address() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.']{1,40}"
}

// ── 1. Slot mirroring ────────────────────────────────────────────────

proptest! {
    /// Slots hold exactly the first three history points, in order.
    #[test]
    fn slots_mirror_history_prefix(history in arb_history(8)) {
        let row = ReportRow::new("prop", Some(Zpid::new("1")), &history);
        for i in 0..PRICE_SLOTS {
            prop_assert_eq!(row.prices[i].as_ref(), history.get(i));
        }
    }

    /// Row assembly never reorders a sorted history.
    #[test]
    fn filled_slots_keep_descending_dates(history in arb_history(8)) {
        let row = ReportRow::new("prop", Some(Zpid::new("1")), &history);
        let dates: Vec<NaiveDate> = row.prices.iter().flatten().map(|p| p.date).collect();
        prop_assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }
}

// ── 2. Sentinel coverage ─────────────────────────────────────────────

proptest! {
    /// Sentinel cells appear for precisely the slots the history leaves empty.
    #[test]
    fn sentinels_cover_exactly_the_empty_slots(history in arb_history(6)) {
        let row = ReportRow::new("prop", Some(Zpid::new("1")), &history);
        let record = row.csv_record();

        let filled = history.len().min(PRICE_SLOTS);
        let sentinel_cells = record[2..].iter().filter(|cell| *cell == NO_DATA).count();
        prop_assert_eq!(sentinel_cells, (PRICE_SLOTS - filled) * 2);

        // Sentinels occupy the trailing cells, never interleave with data.
        let data_cells = &record[2..2 + filled * 2];
        prop_assert!(data_cells.iter().all(|cell| cell != NO_DATA));
    }
}

// ── 3. Render determinism ────────────────────────────────────────────

proptest! {
    /// The same rows always render to the same bytes.
    #[test]
    fn render_is_deterministic(
        address in arb_address(),
        history in arb_history(5),
    ) {
        let rows = vec![
            ReportRow::new(address, Some(Zpid::new("99")), &history),
            ReportRow::new("Nowhere Ln", None, &[]),
        ];
        let first = render_csv(&rows).unwrap();
        let second = render_csv(&rows).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every rendered report has the header plus one line per row.
    #[test]
    fn render_has_one_line_per_row(histories in prop::collection::vec(arb_history(4), 0..6)) {
        let rows: Vec<ReportRow> = histories
            .iter()
            .enumerate()
            .map(|(i, history)| ReportRow::new(format!("{i} Prop St"), Some(Zpid::new(i.to_string())), history))
            .collect();
        let csv = render_csv(&rows).unwrap();
        prop_assert_eq!(csv.lines().count(), rows.len() + 1);
    }
}
