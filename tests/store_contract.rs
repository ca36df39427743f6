//! Behaviour every expense backend must share, checked through `LedgerService`.

mod common;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use kakeibo_core::{CoreError, LedgerService};
use kakeibo_domain::ExpenseId;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// Civil (UTC+9) wall-clock time on 2026-10-`day`.
fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    jst()
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn ledgers() -> Vec<(&'static str, LedgerService)> {
    common::all_stores()
        .into_iter()
        .map(|(name, store)| (name, LedgerService::new(store, jst())))
        .collect()
}

#[test]
fn add_sum_delete_round_trip() {
    for (backend, ledger) in ledgers() {
        let start = at(17, 0, 0);
        let end = at(18, 0, 0);
        ledger.add(at(17, 8, 0), "food", 500, Some("bento")).unwrap();
        let second = ledger.add(at(17, 12, 0), "transport", 700, None).unwrap();
        ledger.add(at(17, 19, 0), "daily_goods", 300, None).unwrap();

        assert_eq!(ledger.sum_in_range(start, end).unwrap(), 1500, "{backend}");

        ledger.delete(second).unwrap();
        assert_eq!(ledger.sum_in_range(start, end).unwrap(), 800, "{backend}");
        assert_eq!(ledger.count().unwrap(), 2, "{backend}");
    }
}

#[test]
fn listing_is_newest_first_with_ties_by_id() {
    for (backend, ledger) in ledgers() {
        let early = ledger.add(at(3, 9, 0), "food", 100, None).unwrap();
        let tie_a = ledger.add(at(5, 9, 0), "social", 200, None).unwrap();
        let tie_b = ledger.add(at(5, 9, 0), "social", 300, None).unwrap();
        let late = ledger.add(at(20, 21, 0), "medical", 400, None).unwrap();

        let ids: Vec<ExpenseId> = ledger
            .month_expenses(2026, 10)
            .unwrap()
            .into_iter()
            .map(|expense| expense.id)
            .collect();
        assert_eq!(ids, vec![late, tie_b, tie_a, early], "{backend}");
    }
}

#[test]
fn windows_include_start_and_exclude_end() {
    for (backend, ledger) in ledgers() {
        ledger.add(at(10, 0, 0), "other", 1, None).unwrap();
        ledger.add(at(11, 0, 0), "other", 10, None).unwrap();

        assert_eq!(ledger.sum_in_range(at(10, 0, 0), at(11, 0, 0)).unwrap(), 1, "{backend}");
        let listed = ledger.list_in_range(at(10, 0, 0), at(11, 0, 0)).unwrap();
        assert_eq!(listed.len(), 1, "{backend}");
        assert_eq!(listed[0].amount, 1, "{backend}");
    }
}

#[test]
fn empty_ranges_sum_to_zero() {
    for (backend, ledger) in ledgers() {
        ledger.add(at(1, 12, 0), "food", 999, None).unwrap();
        assert_eq!(ledger.sum_in_range(at(2, 0, 0), at(3, 0, 0)).unwrap(), 0, "{backend}");
        assert!(ledger.list_in_range(at(2, 0, 0), at(3, 0, 0)).unwrap().is_empty());
        assert_eq!(ledger.month_total(2026, 11).unwrap(), 0, "{backend}");

        let instant = at(1, 12, 0);
        assert_eq!(ledger.sum_in_range(instant, instant).unwrap(), 0, "{backend}");
        assert!(ledger.list_in_range(instant, instant).unwrap().is_empty(), "{backend}");
    }
}

#[test]
fn overflowing_totals_are_errors_not_panics() {
    for (backend, ledger) in ledgers() {
        ledger.add(at(17, 9, 0), "food", i64::MAX, None).unwrap();
        ledger.add(at(17, 10, 0), "food", 1, None).unwrap();

        let err = ledger.month_total(2026, 10).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "{backend}: {err:?}");
        assert!(ledger.sum_in_range(at(17, 0, 0), at(18, 0, 0)).is_err(), "{backend}");
        assert_eq!(
            ledger.sum_in_range(at(17, 0, 0), at(17, 9, 30)).unwrap(),
            i64::MAX,
            "{backend}"
        );
    }
}

#[test]
fn deleting_missing_ids_reports_not_found() {
    for (backend, ledger) in ledgers() {
        let id = ledger.add(at(1, 12, 0), "food", 10, None).unwrap();
        ledger.delete(id).unwrap();
        let err = ledger.delete(id).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(missing) if missing == id), "{backend}");
    }
}

#[test]
fn ids_increase_and_are_not_reused() {
    for (backend, ledger) in ledgers() {
        let first = ledger.add(at(1, 1, 0), "food", 1, None).unwrap();
        let second = ledger.add(at(1, 2, 0), "food", 1, None).unwrap();
        assert!(second > first, "{backend}");
        assert!(!first.is_placeholder(), "{backend}");

        ledger.delete(second).unwrap();
        let third = ledger.add(at(1, 3, 0), "food", 1, None).unwrap();
        assert!(third > second, "{backend}");
    }
}

#[test]
fn stored_fields_come_back_unchanged() {
    for (backend, ledger) in ledgers() {
        let when = at(17, 12, 34);
        let id = ledger.add(when, "交際", 4_500, Some("歓迎会")).unwrap();
        let listed = ledger.month_expenses(2026, 10).unwrap();
        let stored = &listed[0];
        assert_eq!(stored.id, id, "{backend}");
        assert_eq!(stored.timestamp, when, "{backend}");
        assert_eq!(stored.category.key(), "social", "{backend}");
        assert_eq!(stored.amount, 4_500, "{backend}");
        assert_eq!(stored.memo.as_deref(), Some("歓迎会"), "{backend}");
    }
}

#[test]
fn invalid_input_never_reaches_the_store() {
    for (backend, ledger) in ledgers() {
        assert!(matches!(
            ledger.add(at(1, 1, 0), "food", -1, None),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            ledger.add(at(1, 1, 0), "rent", 1, None),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(ledger.count().unwrap(), 0, "{backend}");
    }
}

#[test]
fn civil_day_boundaries_follow_the_offset() {
    for (backend, ledger) in ledgers() {
        // 23:59 and 00:01 local straddle midnight, both on the same UTC date.
        ledger.add(at(16, 23, 59), "food", 100, None).unwrap();
        ledger.add(at(17, 0, 1), "food", 200, None).unwrap();
        let day = chrono::NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(ledger.spent_on(day).unwrap(), 200, "{backend}");
        assert_eq!(ledger.month_spent_before(day).unwrap(), 100, "{backend}");
    }
}
