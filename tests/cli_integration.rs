//! Integration tests for the `dotp` binary.
//!
//! Every test runs non-interactively: the password comes from
//! `DOTP_PASSWD` and the vault lives in a temp dir passed with `--vault`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "123456";
const SECRET: &str = "JBSWY3DPEHPK3PXP";

/// Helper: a `dotp` command isolated from the user's config and vault.
fn dotp(tmp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("dotp").expect("binary should exist");
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("DOTP_PASSWD", PASSWORD)
        .env("DOTP_VAULT", tmp.path().join("test.dotp"))
        .env_remove("DOTP_LOG");
    cmd
}

/// Helper: a temp dir holding an initialised vault.
fn initialised() -> TempDir {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp).arg("init").assert().success();
    tmp
}

fn add(tmp: &TempDir, label: &str) {
    dotp(tmp).args(["add", label, SECRET]).assert().success();
}

// ---------------------------------------------------------------------------
// Help and usage
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn version_flag_shows_name() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dotp"));
}

#[test]
fn no_args_shows_usage() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotp"));
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_vault_file() {
    let tmp = initialised();
    tmp.child("test.dotp").assert(predicate::path::is_file());
}

#[test]
fn init_creates_missing_parent_directory() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .env("DOTP_VAULT", tmp.path().join("nested/dir/v.dotp"))
        .arg("init")
        .assert()
        .success();
    tmp.child("nested/dir/v.dotp").assert(predicate::path::is_file());
}

#[test]
fn init_twice_fails() {
    let tmp = initialised();
    dotp(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_non_numeric_password() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .env("DOTP_PASSWD", "hunter2")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("6 digits"));
    tmp.child("test.dotp").assert(predicate::path::missing());
}

// ---------------------------------------------------------------------------
// Entry commands
// ---------------------------------------------------------------------------

#[test]
fn commands_need_an_existing_vault() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn failed_get_keeps_stdout_clean() {
    let tmp = TempDir::new().unwrap();
    dotp(&tmp)
        .args(["get", "github"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dotp init"));
}

#[test]
fn get_prints_only_the_code() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{6}\n$").unwrap());
}

#[test]
fn get_falls_back_to_prefix() {
    let tmp = initialised();
    add(&tmp, "GitHub: octocat");

    dotp(&tmp)
        .args(["get", "git"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{6}\n$").unwrap());
}

#[test]
fn get_unknown_label_fails() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["get", "gitlab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'gitlab' not found"));
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = initialised();
    dotp(&tmp)
        .env("DOTP_PASSWD", "000000")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be decrypted"));
}

#[test]
fn duplicate_label_is_rejected() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["add", "GITHUB", SECRET])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn list_and_search_show_labels() {
    let tmp = initialised();
    add(&tmp, "GitHub");
    add(&tmp, "Mail");

    dotp(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid until"))
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Mail"));

    dotp(&tmp)
        .args(["search", "hub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Mail").not());
}

#[test]
fn remove_with_force_deletes_entry() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["remove", "github", "--force"])
        .assert()
        .success();
    dotp(&tmp).args(["get", "GitHub"]).assert().failure();
}

#[test]
fn remove_unknown_label_fails() {
    let tmp = initialised();
    dotp(&tmp)
        .args(["remove", "nothing", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn edit_renames_entry() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["edit", "git", "--label", "Work GitHub", "--digits", "8"])
        .assert()
        .success();

    dotp(&tmp)
        .args(["get", "work"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{8}\n$").unwrap());
}

// ---------------------------------------------------------------------------
// import / export
// ---------------------------------------------------------------------------

#[test]
fn import_adds_new_entries_and_skips_duplicates() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    let file = tmp.child("codes.txt");
    file.write_str(&format!(
        "otpauth://totp/GitHub?secret={SECRET}\n\
         otpauth://totp/Mail%3A%20me?secret={SECRET}\n\
         otpauth://totp/Broken?digits=6\n"
    ))
    .unwrap();

    dotp(&tmp)
        .args(["import", "codes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 entry"))
        .stdout(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("1 malformed"));

    dotp(&tmp)
        .args(["get", "mail: me"])
        .assert()
        .success();
}

#[test]
fn import_missing_file_fails() {
    let tmp = initialised();
    dotp(&tmp)
        .args(["import", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("import file not found"));
}

#[test]
fn export_writes_uris_and_aegis() {
    let tmp = initialised();
    add(&tmp, "GitHub: octocat");

    dotp(&tmp).args(["export", "out.txt"]).assert().success();
    tmp.child("out.txt").assert(predicate::str::contains(
        "otpauth://totp/GitHub:%20octocat?",
    ));

    dotp(&tmp)
        .args(["export", "out.json", "--aegis"])
        .assert()
        .success();
    tmp.child("out.json")
        .assert(predicate::str::contains("\"issuer\": \"GitHub\""))
        .assert(predicate::str::contains("\"name\": \"octocat\""));
}

#[test]
fn export_refuses_to_overwrite_the_vault() {
    let tmp = initialised();
    add(&tmp, "GitHub");

    dotp(&tmp)
        .args(["export", "test.dotp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to export"));

    let vault = tmp.path().join("test.dotp");
    let renamed = tmp.path().join("vault-copy");
    std::fs::copy(&vault, &renamed).unwrap();
    dotp(&tmp)
        .env("DOTP_VAULT", &renamed)
        .args(["export", "vault-copy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to export"));

    dotp(&tmp)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{6}\n$").unwrap());
    dotp(&tmp)
        .env("DOTP_VAULT", &renamed)
        .args(["get", "github"])
        .assert()
        .success();
}
