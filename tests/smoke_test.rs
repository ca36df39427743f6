use chrono::{NaiveDate, TimeZone, Utc};
use kakeibo::{
    config::{budget_calculator, civil_offset, manager_with_base},
    init,
    storage::open_ledger,
};
use kakeibo_core::BudgetService;
use kakeibo_domain::Judgement;
use tempfile::tempdir;

#[test]
fn ledger_budget_smoke() {
    init();

    let base = tempdir().expect("tempdir");
    let manager = manager_with_base(base.path().to_path_buf()).expect("config manager");
    let config = manager.load().expect("default config");
    let ledger = open_ledger(&config, base.path()).expect("ledger");
    let offset = civil_offset(&config).expect("offset");

    let lunch = offset
        .with_ymd_and_hms(2026, 10, 17, 12, 30, 0)
        .unwrap()
        .with_timezone(&Utc);
    ledger.add(lunch, "food", 600, Some("ramen")).expect("add lunch");
    ledger.add(lunch, "transport", 420, None).expect("add fare");

    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let report =
        BudgetService::daily_report(&ledger, &budget_calculator(&config), today, Some(30))
            .expect("report");
    assert_eq!(report.spent_today, 1_020);
    assert_eq!(report.limit, 1_000.0);
    assert_eq!(report.judgement, Judgement::Over);
    assert_eq!(report.overage, 20.0);
}
