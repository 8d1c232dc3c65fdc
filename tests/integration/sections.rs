use predicates::prelude::*;

use crate::common::TestWiki;

#[test]
fn test_sections_lists_previews() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "Intro line\n----\n\nDetails here\n----").unwrap();

    wiki.command()
        .args(["sections", "Main.txt"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 section(s)")
                .and(predicate::str::contains("Intro line"))
                .and(predicate::str::contains("Details here"))
                .and(predicate::str::contains("(empty)")),
        );
}

#[test]
fn test_sections_json() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "a\n----\nbb").unwrap();

    let output = wiki.run_wikirender(&["sections", "--json", "Main.txt"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);

    let report: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(report["count"], 2);
    assert_eq!(report["sections"][0]["index"], 1);
    assert_eq!(report["sections"][0]["bytes"], 2);
    assert_eq!(report["sections"][1]["preview"], "bb");
    assert_eq!(report["sections"][1]["bytes"], 3);
}
