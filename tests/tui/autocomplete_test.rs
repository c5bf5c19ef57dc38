//! End-to-end tests for the category field: filtering, selection, dismissal
//! and the Print button.

use super::common::{run_json, run_with_config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_focus_shows_all_categories_sorted() {
    let (code, json) = run_json("click:field");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["dropdown_visible"], true);
    assert_eq!(json["state"]["suggestion_count"], 9);
    assert_eq!(json["state"]["suggestions"][0], "Beverages");
    assert_eq!(json["state"]["highlighted"], "Beverages");
}

#[test]
fn test_prefix_filter_is_case_insensitive() {
    let (code, json) = run_json(
        "key:tab,type:F,assert:state:suggestions=Fees|Food,type:O,assert:state:suggestions=Food",
    );

    assert_eq!(code, 0, "{json}");
    assert_eq!(json["assertions"]["passed"], 2);
    assert_eq!(json["state"]["input_text"], "FO");
}

#[test]
fn test_leading_spaces_are_ignored() {
    let (code, json) = run_json("key:tab,key:space,type:re");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], " re");
    assert_eq!(json["state"]["suggestions"][0], "Rent");
    assert_eq!(json["state"]["suggestion_count"], 1);
}

#[test]
fn test_no_matches() {
    let (code, json) = run_json("key:tab,type:xyz,assert:contains:No matches");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["dropdown_visible"], true);
    assert_eq!(json["state"]["suggestion_count"], 0);
    assert!(json["state"]["highlighted"].is_null());
}

#[test]
fn test_click_item_fills_field() {
    let (code, json) = run_json("click:field,type:b,click:item:Bills");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "Bills");
    assert_eq!(json["state"]["cursor"], 5);
    assert_eq!(json["state"]["dropdown_visible"], false);
    assert_eq!(json["state"]["focus"], "Field");
}

#[test]
fn test_keyboard_selection() {
    let (code, json) = run_json("key:tab,type:f,key:down,key:tab");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "Food");
    assert_eq!(json["state"]["dropdown_visible"], false);
}

#[test]
fn test_editing_after_select_reopens() {
    let (code, json) = run_json("key:tab,type:f,key:tab,key:backspace");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "Fee");
    assert_eq!(json["state"]["dropdown_visible"], true);
    assert_eq!(json["state"]["suggestions"][0], "Fees");
}

#[test]
fn test_outside_click_keeps_text() {
    let (code, json) = run_json("click:field,type:oth,click:outside");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "oth");
    assert_eq!(json["state"]["dropdown_visible"], false);
    assert_eq!(json["state"]["focus"], "None");
}

#[test]
fn test_enter_submits_and_closes() {
    let (code, json) = run_json("key:tab,type:sp,key:enter");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "sp");
    assert_eq!(json["state"]["dropdown_visible"], false);
    assert_eq!(json["state"]["focus"], "None");
}

#[test]
fn test_list_border_click_keeps_list_open() {
    let (code, json) = run_json("click:field,click:list");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["dropdown_visible"], true);
    assert_eq!(json["state"]["focus"], "Field");
}

#[test]
fn test_print_click_changes_nothing() {
    let (code, json) = run_json("click:field,type:sp,click:print,key:ctrl+q");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "sp");
    assert_eq!(json["state"]["dropdown_visible"], true);
    assert_eq!(json["state"]["focus"], "Field");
    assert_eq!(json["state"]["running"], false);
}

#[test]
fn test_print_key_changes_nothing() {
    let (code, json) = run_json("key:backtab,key:enter,key:space");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["focus"], "Print");
    assert_eq!(json["state"]["input_text"], "");
    assert_eq!(json["state"]["dropdown_visible"], false);
}

#[test]
fn test_scroll_reveals_last_category() {
    let (code, json) = run_json(
        "key:tab,assert:not-contains:Travel,scroll:down,scroll:down,scroll:down,assert:contains:Travel",
    );

    assert_eq!(code, 0, "{json}");
    assert_eq!(json["assertions"]["passed"], 2);
}

#[test]
fn test_custom_categories_from_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "categories = [\"Tea\", \"Toast\", \"Coffee\"]\n\n[ui]\ndropdown_max_height = 2"
    )
    .unwrap();

    let (code, stdout, stderr) = run_with_config(
        config.path(),
        &["--headless", "--events", "key:tab,type:t", "--output", "json"],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["state"]["suggestions"][0], "Tea");
    assert_eq!(json["state"]["suggestions"][1], "Toast");
    assert_eq!(json["state"]["suggestion_count"], 2);
}

#[test]
fn test_invalid_config_is_reported() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[ui]\ndropdown_max_height = 0").unwrap();

    let (code, _, stderr) = run_with_config(config.path(), &["--headless", "--events", "key:tab"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("dropdown_max_height"));
}

#[test]
fn test_tab_after_scrolling_accepts_visible_row() {
    let (code, json) = run_json("key:tab,scroll:down,scroll:down,scroll:down,key:tab");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "Food");
    assert_eq!(json["state"]["dropdown_visible"], false);
}
