//! End-to-end tests for the `folio` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const CONFIG: &str = r##"
root = "/archive"
timezone = "+09:00"

[[series]]
name = "journal"
folder = "Journal"
specificities = [{ axis = "page", min = 1, max = 999 }]
template = ["J", { axis = "page", pad = 3 }, ".", { property = "title" }]

[[series]]
name = "atlas"
specificities = [
    { axis = "volume", min = 1, max = 20 },
    { axis = "plate", min = 1, max = 99 },
    { axis = "sub", min = 1, max = 26 },
]
template = ["V", { axis = "volume" }, "-P", { axis = "plate", pad = 2 }, { axis = "sub", mode = "letter" }]

[tags.oak]
category = "tree"
plain = "Oak"
ascii = "oak"
social = "#oak"

[tags.rose]
category = "flower"
plain = "Rose"

[genres.tree]
metadata_head = "Flora"
social_head = "#flora"
default_fragment = "trees"

[genres.flower]
metadata_head = "Flora"
social_head = "#flowers"
default_fragment = "flowers"
"##;

fn folio() -> Command {
    Command::cargo_bin("folio").unwrap()
}

/// Temp dir with the test config written to `folio.toml`.
fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("folio.toml").write_str(CONFIG).unwrap();
    temp
}

fn with_config(temp: &TempDir) -> Command {
    let mut cmd = folio();
    cmd.arg("--config").arg(temp.child("folio.toml").path());
    cmd
}

#[test]
fn help_lists_commands() {
    folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("argfile"));
}

#[test]
fn version_flag() {
    folio()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn resolve_full_name() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "journal", "7", "--prop", "title=draft", "--policy", "fail"])
        .assert()
        .success()
        .stdout("J007.draft\n");
}

#[test]
fn resolve_globs_unknown_positions() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "atlas", "1", "_", "_"])
        .assert()
        .success()
        .stdout("V1-P**\n");
}

#[test]
fn resolve_limit_cuts_after_axis() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "atlas", "3", "12", "2", "--limit", "plate"])
        .assert()
        .success()
        .stdout("V3-P12*\n");
}

#[test]
fn resolve_pattern_includes_folder() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "atlas", "3", "12", "_", "--pattern"])
        .assert()
        .success()
        .stdout("/archive/atlas/V3-P12*.*\n");
}

#[test]
fn resolve_fail_names_missing_fragment() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "journal", "7", "--policy", "fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("property 'title'"));
}

#[test]
fn resolve_absent_reports_no_name() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "journal", "7", "--policy", "absent"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no name"));
}

#[test]
fn resolve_letter_axis() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "atlas", "2", "5", "26"])
        .assert()
        .success()
        .stdout("V2-P05Z\n");
}

#[test]
fn unknown_series_fails() {
    let temp = setup();
    with_config(&temp)
        .args(["resolve", "ledger", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown series: ledger"));
}

#[test]
fn series_list_and_show() {
    let temp = setup();
    with_config(&temp)
        .args(["series", "list"])
        .assert()
        .success()
        .stdout("atlas\njournal\n");

    with_config(&temp)
        .args(["series", "show", "journal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folder:   Journal"))
        .stdout(predicate::str::contains("template: J{page:3}.{@title}"));
}

#[test]
fn genre_of_tags() {
    let temp = setup();
    with_config(&temp)
        .args(["genre", "oak"])
        .assert()
        .success()
        .stdout("tree\n");

    with_config(&temp)
        .args(["genre", "oak", "rose"])
        .assert()
        .success()
        .stdout("mixed\n");
}

#[test]
fn manifest_json() {
    let temp = setup();
    with_config(&temp)
        .args(["manifest", "oak", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""filename": "oak""#))
        .stdout(predicate::str::contains(r##""#oak""##));
}

#[test]
fn manifest_missing_genre_fails() {
    let temp = setup();
    with_config(&temp)
        .args(["manifest", "oak", "rose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("genre 'mixed'"));
}

#[test]
fn compose_prints_archive_path() {
    let temp = setup();
    with_config(&temp)
        .args(["compose", "journal", "IMG_0001.jpg", "7", "--title", "draft"])
        .assert()
        .success()
        .stdout("/archive/Journal/J007.draft.jpg\n");
}

#[test]
fn argfile_appends_record() {
    let temp = setup();
    let out = temp.child("batch.args");

    for target in ["a.jpg", "b.jpg"] {
        with_config(&temp)
            .args(["-q", "argfile", "--out"])
            .arg(out.path())
            .args([target, "--title", "Oak leaf", "--tag", "oak"])
            .args(["--overwrite", "in-place"])
            .assert()
            .success()
            .stdout("");
    }

    out.assert(predicate::str::starts_with(
        "-Title=Oak leaf\n-Comment=\n-Keywords=\n-Keywords+=Flora\n-Keywords+=oak\n\
         -overwrite_original_in_place\na.jpg\n-execute\n",
    ));
    out.assert(predicate::str::ends_with("b.jpg\n-execute\n"));
}

#[test]
fn config_init_and_check() {
    let temp = TempDir::new().unwrap();
    let config = temp.child("new/config.toml");

    folio()
        .args(["config", "init", "--path"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    config.assert(predicate::path::exists());

    folio()
        .arg("--config")
        .arg(config.path())
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (1 series"));

    folio()
        .args(["config", "init", "--path"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn completion_bash() {
    folio()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}
