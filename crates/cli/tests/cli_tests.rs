//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("ladle")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-q", "div@id=ctitle"])
        .assert()
        .success()
        .stdout("Python\n");
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("comic.html")).unwrap();
    cmd()
        .args(["-", "-q", "a@rel=next", "-f", "text"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout("Next >\n");
}

#[test]
fn test_cli_chained_find_all() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-q", "ul@class=comicNav", "-q", "a", "--all", "-f", "text"])
        .assert()
        .success()
        .stdout("|<\n< Prev\nNext >\n");
}

#[test]
fn test_cli_any_tag_query() {
    cmd()
        .args([&get_fixture_path("hello_world.html"), "-q", "@id=4", "-f", "text"])
        .assert()
        .success()
        .stdout("Last one\n");
}

#[test]
fn test_cli_strict_matching() {
    let path = get_fixture_path("multiple_classes.html");

    cmd()
        .args([&path, "-q", "div@class=first", "-f", "text"])
        .assert()
        .success()
        .stdout("Multiple classes\n");

    cmd()
        .args([&path, "-q", "div@class=first", "--strict", "-f", "text"])
        .assert()
        .success()
        .stdout("Single class\n");
}

#[test]
fn test_cli_attrs_format() {
    let output = cmd()
        .args([&get_fixture_path("comic.html"), "-q", "div@id=comic", "-q", "img", "-f", "attrs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let attrs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(attrs["src"], "//imgs.xkcd.com/comics/python.png");
    assert_eq!(attrs["alt"], "Python");
}

#[test]
fn test_cli_attrs_all_is_always_an_array() {
    let output = cmd()
        .args([&get_fixture_path("comic.html"), "-q", "div@id=comic", "-q", "img", "--all", "-f", "attrs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let attrs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(attrs.as_array().unwrap().len(), 1);
    assert_eq!(attrs[0]["alt"], "Python");
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args([&get_fixture_path("hello_world.html"), "-q", "div", "--all", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["value"], "div");
    assert_eq!(records[5]["attrs"]["id"], "5");
}

#[test]
fn test_cli_html_format() {
    cmd()
        .args([&get_fixture_path("hello_world.html"), "-q", "ul", "-q", "li", "-f", "html"])
        .assert()
        .success()
        .stdout("<li>To a <a href=\"hello.jsp\">JSP page</a> right?</li>\n");
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.txt");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .args([&get_fixture_path("comic.html"), "-q", "div@id=ctitle"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(output).unwrap(), "Python\n");
}

#[test]
fn test_cli_missing_element_fails() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-q", "div@id=linkz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("element `div` with attributes `id linkz` not found"));
}

#[test]
fn test_cli_find_all_no_matches_succeeds() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-q", "table", "--all", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_text_missing_fails() {
    cmd()
        .args([&get_fixture_path("hello_world.html"), "-q", "div@id=3", "-f", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text node found"));
}

#[test]
fn test_cli_invalid_query() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-q", "div@id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid query"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-f", "yaml"])
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_invalid_header() {
    cmd()
        .args([&get_fixture_path("comic.html"), "-H", "no-colon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header"));
}

#[test]
fn test_cli_fail_fast_aborts() {
    cmd()
        .args([&get_fixture_path("comic.html"), "--fail-fast", "-q", "div@id=linkz"])
        .assert()
        .failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("comic.html"), "-q", "div@id=ctitle"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ladle v"))
        .stderr(predicate::str::contains("xkcd: Python"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ladle"));
}

#[test]
fn test_cli_completions_use_kebab_case_flags() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--user-agent"))
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--user_agent").not());
}
