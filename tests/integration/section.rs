use predicates::prelude::*;

use crate::common::TestWiki;

const PAGE: &str = "First section\n----\nSecond section\n\n----\n\nThird section";

/// Each section is printed byte for byte, marker line terminators included
#[test]
fn test_section_prints_exact_text() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", PAGE).unwrap();

    for (n, expected) in [("1", "First section\n"), ("2", "\nSecond section\n\n"), ("3", "\n\nThird section")] {
        wiki.command().args(["section", "Main.txt", n]).assert().success().stdout(expected);
    }
}

/// Markers at the very start and end give empty sections
#[test]
fn test_section_empty_edges() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Edges.txt", "----\nSecond section\n----").unwrap();

    wiki.command().args(["section", "Edges.txt", "1"]).assert().success().stdout("");
    wiki.command().args(["section", "Edges.txt", "2"]).assert().success().stdout("\nSecond section\n");
    wiki.command().args(["section", "Edges.txt", "3"]).assert().success().stdout("");
}

/// Longer hyphen runs are still a single marker
#[test]
fn test_section_long_marker() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Long.txt", "one\n----------------\ntwo").unwrap();

    wiki.command().args(["section", "Long.txt", "2"]).assert().success().stdout("\ntwo");
}

/// Out-of-range numbers fail instead of being clamped
#[test]
fn test_section_out_of_range() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", PAGE).unwrap();

    for n in ["0", "-1", "4", "5"] {
        wiki.command()
            .args(["section", "Main.txt", n])
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("error:").and(predicate::str::contains("Invalid section index")));
    }
}

/// A page without markers is a single section
#[test]
fn test_section_without_markers() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Plain.txt", "just text\n--- not a marker\n").unwrap();

    let output = wiki.run_wikirender(&["section", "Plain.txt", "1"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "just text\n--- not a marker\n");

    let output = wiki.run_wikirender(&["section", "Plain.txt", "2"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("no section no. 2"), "stderr: {}", output.stderr);
}

/// Missing files are reported with a suggestion
#[test]
fn test_section_missing_file() {
    let wiki = TestWiki::new().unwrap();

    wiki.command()
        .args(["section", "Nope.txt", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nope.txt"));
}
