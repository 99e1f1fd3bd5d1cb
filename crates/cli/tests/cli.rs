use assert_cmd::Command;

fn lectern() -> Command {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.env("LECTERN_CONFIG_DIR", std::env::temp_dir().join("lectern-cli-tests-no-config"))
        .env_remove("LECTERN_ENV")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn browse_json_reports_first_page() {
    let output = lectern().args(["browse", "--json"]).output().unwrap();
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["result_count"], 8);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["displayed_books"].as_array().unwrap().len(), 6);
}

#[test]
fn browse_clamps_requested_page() {
    let output = lectern()
        .args(["browse", "--json", "--page", "9"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["current_page"], 2);
    assert_eq!(page["displayed_books"].as_array().unwrap().len(), 2);
}

#[test]
fn browse_unavailable_lists_checked_out_books() {
    let output = lectern()
        .args(["browse", "--availability", "unavailable"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Found 2 book(s)"));
    assert!(text.contains("War and Peace"));
    assert!(text.contains("The Idiot"));
    assert!(text.contains("ISBN 978-5-17-091234-7"));
    assert!(text.contains("ISBN 978-5-17-088765-4"));
    assert!(text.contains("Page 1 of 1"));
    assert!(!text.contains("Next page"));
}

#[test]
fn browse_reports_position_with_no_matches() {
    let output = lectern()
        .args(["browse", "--search", "zzz"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Found 0 book(s)"));
    assert!(text.contains("Page 1 of 1"));
}

#[test]
fn browse_first_page_points_to_the_next() {
    let output = lectern().args(["browse"]).output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Found 8 book(s)"));
    assert!(text.contains("Page 1 of 2"));
    assert!(text.contains("Next page: --page 2"));
    assert!(text.contains("ISBN 978-5-17-095423-1"));
}

#[test]
fn browse_rejects_unknown_sort_key() {
    let output = lectern()
        .args(["browse", "--sort", "popularity"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown sort key"));
}

#[test]
fn page_size_comes_from_environment() {
    let output = lectern()
        .env("LECTERN_CATALOG__PAGE_SIZE", "3")
        .args(["browse", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total_pages"], 3);
}

#[test]
fn facets_start_with_all() {
    let output = lectern().args(["facets", "--json"]).output().unwrap();
    assert!(output.status.success());

    let facets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(facets["genres"][0], "all");
    assert_eq!(facets["genres"].as_array().unwrap().len(), 4);
}

#[test]
fn show_prints_reserve_parameters() {
    let output = lectern().args(["show", "3"]).output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("The Master and Margarita"));
    assert!(text.contains(
        "Reserve: lectern reserve --title \"The Master and Margarita\" \
         --author \"Mikhail Bulgakov\" --year \"1967\" --isbn \"978-5-389-15678-2\""
    ));
}

#[test]
fn show_unknown_book_fails() {
    let output = lectern().args(["show", "99"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no book with id 99"));
}

#[test]
fn reserve_confirms_and_returns_to_catalog() {
    let output = lectern()
        .args([
            "reserve",
            "--book-id",
            "3",
            "--last-name",
            "Berlioz",
            "--first-name",
            "Mikhail",
            "--library-card",
            "LC-1967",
            "--email",
            "berlioz@example.org",
            "--redirect-delay-ms",
            "10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Reserved \"The Master and Margarita\""));
    assert!(text.contains("Reservation terms:"));
    assert!(text.contains("  - The book will be held for you for 3 days"));
    assert!(text.contains("  - The loan period is 14 days"));
    assert!(text.contains("Bring your library card"));
    assert!(text.contains("held for you for 3 days"));
    assert!(text.contains("Returning to catalog"));
}

#[test]
fn reserve_without_email_is_rejected() {
    let output = lectern()
        .args([
            "reserve",
            "--last-name",
            "Raskolnikov",
            "--first-name",
            "Rodion",
            "--library-card",
            "LC-0042",
            "--redirect-delay-ms",
            "10",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing: email"));
    assert!(!stdout(&output).contains("Reserved"));
    assert!(!stdout(&output).contains("Reservation terms"));
}

#[test]
fn reserve_rejects_past_pickup_date() {
    let output = lectern()
        .args([
            "reserve",
            "--last-name",
            "Raskolnikov",
            "--first-name",
            "Rodion",
            "--library-card",
            "LC-0042",
            "--email",
            "rodion@example.org",
            "--pickup-date",
            "1866-01-01",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is before today"));
}

#[test]
fn reserve_terms_follow_configured_loan_period() {
    let output = lectern()
        .env("LECTERN_RESERVATION__LOAN_DAYS", "21")
        .args([
            "reserve",
            "--book-id",
            "5",
            "--last-name",
            "Larina",
            "--first-name",
            "Tatyana",
            "--library-card",
            "LC-1833",
            "--email",
            "tatyana@example.org",
            "--redirect-delay-ms",
            "10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("The loan period is 21 days"));
    assert!(!text.contains("The loan period is 14 days"));
}
