mod common;

use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use common::script_command;

#[test]
fn script_mode_prorates_both_fees() {
    let home = TempDir::new().unwrap();
    let input = "date 2025-01-11\nfee management 10,000\nfee reserve 15000\nshow\nexit\n";

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("OK: Settlement date set to 2025年1月11日."))
        .stdout(contains("OK: Management fee set to 10,000."))
        .stdout(contains("Seller ¥8,065 (10 days) | Buyer ¥16,935 (21 days)"))
        .stdout(contains("=== Proration result ==="))
        .stdout(contains("Settlement on 2025年1月11日 (31 days in month)"))
        .stdout(contains("  Total:          ¥16,935"));
}

#[test]
fn one_shot_calc_reports_rounding_gap() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("calc 2025-04-16 15\n")
        .assert()
        .success()
        .stdout(contains("Seller: 15 days, ¥8"))
        .stdout(contains("Buyer:  15 days, ¥8"))
        .stdout(contains("Shares total ¥16 against monthly charges of ¥15 (+1)."));
}

#[test]
fn invalid_date_withholds_the_result() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("fee management 10000\ndate 2025-02-30\nshow\njson\n")
        .assert()
        .success()
        .stdout(contains("No result until the date is valid."))
        .stdout(contains("`2025-02-30` is not a valid settlement date; no result."))
        .stdout(contains("Proration result").not())
        .stderr(contains("ERROR: No result to print."));
}

#[test]
fn manual_mode_waits_for_calculate() {
    let home = TempDir::new().unwrap();
    let input = "mode manual\ndate 2024-02-29\nfee management 2900\nshow\ncalculate\n";

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("HINT: Inputs changed. Run `calculate` to refresh the result."))
        .stdout(contains("Settlement on 2024年2月29日 (29 days in month)"))
        .stdout(contains("  Management fee: ¥2,800"));

    let config = std::fs::read_to_string(home.path().join("config").join("config.json")).unwrap();
    assert!(config.contains("\"recalc_mode\": \"manual\""));
}

#[test]
fn json_command_prints_machine_readable_result() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("date 2025-01-31\nfee management 3100\njson\n")
        .assert()
        .success()
        .stdout(contains("\"settlement_date\": \"2025-01-31\""))
        .stdout(contains("\"seller_amount\": 3000"))
        .stdout(contains("\"buyer_amount\": 100"));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("calculat\n")
        .assert()
        .success()
        .stdout(contains("WARNING: Unknown command `calculat`."))
        .stdout(contains("HINT: Did you mean `calculate`?"));
}

#[test]
fn bad_arguments_are_reported_without_stopping() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("fee rent 100\ncalc 2025-01-11 10000\n")
        .assert()
        .success()
        .stderr(contains("ERROR: unknown fee `rent`"))
        .stdout(contains("HINT: Use `help <command>` for usage details."))
        .stdout(contains("Seller: 10 days, ¥3,226"));
}

#[test]
fn config_set_changes_formatting() {
    let home = TempDir::new().unwrap();
    let input = "config set locale en-US\ncalc 2025-01-11 10000\n";

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("OK: Set `locale` to `en-US`."))
        .stdout(contains("Settlement on January 11, 2025"))
        .stdout(contains("Buyer:  21 days, ¥6,774"));
}

#[test]
fn currency_is_not_configurable() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("config set currency USD\ncalc 2025-01-11 10000\n")
        .assert()
        .success()
        .stderr(contains("unknown setting `currency`"))
        .stdout(contains("Seller: 10 days, ¥3,226"));
}

#[test]
fn help_lists_usage_lines() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("help\nhelp fee\nversion\n")
        .assert()
        .success()
        .stdout(contains("=== Commands ==="))
        .stdout(contains("calc <YYYY-MM-DD> <amount> [reserve]"))
        .stdout(contains("  usage: fee <management|reserve> <amount>"))
        .stdout(contains("Config file"));
}

#[test]
fn twenty_digit_amounts_are_clamped_not_fatal() {
    let home = TempDir::new().unwrap();
    let input = "date 2025-01-11\nfee management 99999999999999999999\nshow\n";

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("WARNING: Amount exceeds the ¥1,000,000,000,000,000 limit"))
        .stdout(contains(
            "Seller ¥322,580,645,161,290 (10 days) | Buyer ¥677,419,354,838,710 (21 days)",
        ))
        .stdout(contains("  Total:          ¥677,419,354,838,710"))
        .stderr(contains("panicked").not());
}

#[test]
fn fee_and_calc_agree_on_the_same_text() {
    let home = TempDir::new().unwrap();
    let input = "date 2025-01-11\nfee management 1.000\ncalc 2025-01-11 1.000\n";

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("OK: Management fee set to 1,000."))
        .stdout(contains("Seller ¥323 (10 days) | Buyer ¥677 (21 days)"))
        .stdout(contains("Seller: 10 days, ¥323"))
        .stdout(contains("Buyer:  21 days, ¥677"));
}

#[test]
fn rust_log_enables_debug_events() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .env("RUST_LOG", "proration_core=debug")
        .write_stdin("calc 2025-01-11 10000\n")
        .assert()
        .success()
        .stderr(contains("prorated monthly amount"))
        .stderr(contains("dispatching command"));
}

#[test]
fn default_logging_hides_debug_events() {
    let home = TempDir::new().unwrap();

    script_command(home.path())
        .write_stdin("calc 2025-01-11 10000\n")
        .assert()
        .success()
        .stderr(contains("shell started"))
        .stderr(contains("prorated monthly amount").not());
}
