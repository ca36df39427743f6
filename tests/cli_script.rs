mod common;

use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

#[test]
fn script_mode_runs_add_list_delete_flow() {
    let home = common::temp_dir();
    let input = "goal 30000\n\
                 days 30\n\
                 add 500 food bento\n\
                 add 700 transport\n\
                 add 300 daily_goods\n\
                 list\n\
                 delete 2\n\
                 list\n\
                 status\n\
                 exit\n";

    common::script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added expense #1: ¥500 食費 (food)"))
        .stdout(contains("Total: ¥1,500 (3 expenses)"))
        .stdout(contains("Deleted expense #2: ¥700 交通 (transport)"))
        .stdout(contains("Total: ¥800 (2 expenses)"))
        .stdout(contains("OK: spent today ¥800 / limit ¥1,000"))
        .stdout(contains("limit = goal ¥30,000 / 30 days = 1,000.00 per day"));
}

#[test]
fn spending_past_the_limit_is_judged_over() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin("days 30\nadd 1001 entertainment\nstatus\n")
        .assert()
        .success()
        .stdout(contains("OVER: spent today ¥1,001 (¥1 over)"));
}

#[test]
fn status_header_shows_civil_fetch_time() {
    let home = common::temp_dir();
    let output = common::script_command(&home)
        .write_stdin("status\n")
        .output()
        .expect("run shell");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let header =
        Regex::new(r"Fetched at \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} \(UTC\+09:00\)").unwrap();
    assert!(header.is_match(&stdout), "{stdout}");
    assert!(stdout.contains("OK: spent today ¥0"), "{stdout}");
}

#[test]
fn delete_sentinel_and_missing_ids_are_reported() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin("delete 0\ndelete 99\ndelete abc\n")
        .assert()
        .success()
        .stdout(contains("WARNING: [!] Select an expense id to delete"))
        .stdout(contains("ERROR: [x] Expense not found: 99"))
        .stdout(contains("invalid expense id `abc`"));
}

#[test]
fn invalid_amounts_and_categories_are_rejected() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin("add -100 food\nadd 100 rent\nadd 100\nlist\n")
        .assert()
        .success()
        .stdout(contains("Validation failed"))
        .stdout(contains("unknown category `rent`"))
        .stdout(contains("usage: add <amount> <category>"))
        .stdout(contains("No expenses recorded for"));
}

#[test]
fn expenses_persist_between_sessions() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin("add 1200 social --at \"2026-09-30 23:30\" farewell party\n")
        .assert()
        .success();

    common::script_command(&home)
        .write_stdin("list 2026-09\nsum 2026-09-01 2026-10-01\nlist 2026-10\n")
        .assert()
        .success()
        .stdout(contains("2026-09-30 23:30"))
        .stdout(contains("farewell party"))
        .stdout(contains("Spent from 2026-09-01 until 2026-10-01: ¥1,200"))
        .stdout(contains("No expenses recorded for 2026-10 yet."));
}

#[test]
fn backend_switch_writes_json_document() {
    let home = TempDir::new().expect("temp home");
    let mut cmd = common::script_command(home.path());
    cmd.write_stdin("config set backend json\nadd 250 medical\n")
        .assert()
        .success()
        .stdout(contains("Updated `backend`."));

    home.child("config/config.json")
        .assert(predicate::str::contains("\"storage_backend\": \"json\""));
    home.child("data/expenses.json")
        .assert(predicate::str::contains("\"category\": \"medical\""));
}

#[test]
fn plan_switches_status_to_remaining_budget() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin("days 10\nplan set 200000 110000\nstatus\nplan clear\nplan\n")
        .assert()
        .success()
        .stdout(contains("Spendable"))
        .stdout(contains("¥60,000"))
        .stdout(contains("limit = remaining budget"))
        .stdout(contains("No monthly plan set"));
}

#[test]
fn extreme_amounts_are_reported_without_crashing() {
    let home = common::temp_dir();
    common::script_command(&home)
        .write_stdin(
            "goal 9223372036854775807\n\
             plan set 0 9223372036854775807\n\
             status\n\
             add 9223372036854775807 food\n\
             add 1 food\n\
             list\n\
             status\n\
             version\n",
        )
        .assert()
        .success()
        .stdout(contains("limit = remaining budget ¥0"))
        .stdout(contains("Validation failed: total amount exceeds the supported range"))
        .stdout(contains("Build hash"));
}
