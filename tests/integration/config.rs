use predicates::prelude::*;

use crate::common::TestWiki;

/// Configured variables seed every page; --var wins over them
#[test]
fn test_config_variables_and_overrides() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_config("[variables]\nauthor = \"Config\"\nsite = \"Docs\"\n").unwrap();
    wiki.write_page("Main.txt", "[{$author}]@[{$site}]").unwrap();

    wiki.command().args(["render", "Main.txt"]).assert().success().stdout("Config@Docs\n");
    wiki.command()
        .args(["render", "Main.txt", "--var", "author=Cli"])
        .assert()
        .success()
        .stdout("Cli@Docs\n");
}

/// Disabled plugins fail in place without failing the page
#[test]
fn test_config_disabled_plugin() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_config("[plugins]\ndisabled = [\"CurrentTime\"]\n").unwrap();
    wiki.write_page("Main.txt", "Now: [{CurrentTime}] [{Counter}]").unwrap();

    wiki.command()
        .args(["render", "Main.txt"])
        .assert()
        .success()
        .stdout("Now: Plugin insertion failed: Plugin 'CurrentTime' is disabled 1\n");
}

/// The configured format applies unless overridden on the command line
#[test]
fn test_config_default_format() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_config("[render]\nformat = \"html\"\n").unwrap();
    wiki.write_page("Main.txt", "a < b").unwrap();

    wiki.command().args(["render", "Main.txt"]).assert().success().stdout("a &lt; b\n");
    wiki.command()
        .args(["render", "--format", "text", "Main.txt"])
        .assert()
        .success()
        .stdout("a < b\n");
}

/// An explicit --config path must exist
#[test]
fn test_config_flag_missing_file() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_page("Main.txt", "text").unwrap();

    wiki.command()
        .args(["--config", "does-not-exist.toml", "render", "Main.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[test]
fn test_config_invalid_toml() {
    let wiki = TestWiki::new().unwrap();
    wiki.write_config("[variables\n").unwrap();
    wiki.write_page("Main.txt", "text").unwrap();

    wiki.command().args(["render", "Main.txt"]).assert().failure().stderr(predicate::str::contains("error:"));
}
