use predicates::prelude::*;

use crate::common::TestWiki;

/// Variables from --var reach plugins, and text outside plugins is untouched
#[test]
fn test_render_with_variables() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "By [{Variable var='author'}] on {{ not expanded }}\n").unwrap();

    wiki.command()
        .args(["render", "Main.txt", "--var", "author=Alice"])
        .assert()
        .success()
        .stdout("By Alice on {{ not expanded }}\n");
}

/// Text parameters go through template expansion before the plugin runs
#[test]
fn test_render_expands_text_parameters() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "[{Variable var='{{ which }}'}] / [{$pagename}]").unwrap();

    let output = wiki
        .run_wikirender(&["render", "Main.txt", "--var", "which=author", "--var", "author=Bob"])
        .unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "Bob / Main\n");
}

/// A failing plugin becomes marker text and the rest of the page still renders
#[test]
fn test_render_isolates_plugin_failures() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page(
        "Main.txt",
        "before [{NoSuchThing}] middle [{Variable var='{{ missing }}'}] after [{Counter}]",
    )
    .unwrap();

    let output = wiki.run_wikirender(&["render", "Main.txt"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("before Plugin insertion failed: No such plugin: 'NoSuchThing'"));
    assert!(output.stdout.contains(" middle Plugin insertion failed: "));
    assert!(output.stdout.ends_with(" after 1\n"));
}

/// Counters advance within a page and restart on every page
#[test]
fn test_render_counter_per_page() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("a.txt", "[{Counter}] [{Counter}]").unwrap();
    wiki.write_page("b.txt", "[{Counter}]").unwrap();

    let output = wiki.run_wikirender(&["render", "a.txt", "b.txt"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("==> a.txt <==\n1 2\n"));
    assert!(output.stdout.contains("==> b.txt <==\n1\n"));
    assert!(output.stdout.find("a.txt").unwrap() < output.stdout.find("b.txt").unwrap());
}

/// HTML output escapes page text, inserts plugin output as-is and wraps failures
#[test]
fn test_render_html() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "<b>[{Variable var='who'}]</b> [{Broken}]").unwrap();

    wiki.command()
        .args(["render", "--html", "--var", "who=<i>Ann</i>", "Main.txt"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("&lt;b&gt;<i>Ann</i>&lt;&#x2F;b&gt;")
                .and(predicate::str::contains("<span class=\"error\">Plugin insertion failed: ")),
        );
}

/// Directories are searched recursively for page files
#[test]
fn test_render_directory() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("one.txt", "One").unwrap();
    wiki.write_page("nested/two.wiki", "Two is [{$pagename}]").unwrap();
    wiki.write_page("skip.md", "Skipped").unwrap();

    let output = wiki.run_wikirender(&["render", "."]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("One"));
    assert!(output.stdout.contains("Two is two"));
    assert!(!output.stdout.contains("Skipped"));
}

#[test]
fn test_render_empty_directory() {
    let wiki = TestWiki::new().unwrap();
    std::fs::create_dir_all(wiki.pages_path().join("empty")).unwrap();

    wiki.command()
        .args(["render", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No wiki pages found"));
}

/// Only the requested section is rendered
#[test]
fn test_render_single_section() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "[{Counter}]\n----\nSecond [{Counter}]").unwrap();

    wiki.command()
        .args(["render", "--section", "2", "Main.txt"])
        .assert()
        .success()
        .stdout("\nSecond 1\n");
}

#[test]
fn test_render_rejects_bad_assignment() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "text").unwrap();

    wiki.command()
        .args(["render", "--var", "novalue", "Main.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid variable assignment 'novalue'"))
        .stderr(predicate::str::contains("--var NAME=VALUE"));
}
