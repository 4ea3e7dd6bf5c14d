//! CLI surface smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_all_subcommands() {
    Command::cargo_bin("lictrack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("status")
                .and(predicate::str::contains("licenses"))
                .and(predicate::str::contains("secrets")),
        );
}

#[test]
fn version_flag_prints_version() {
    Command::cargo_bin("lictrack")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn secrets_without_configuration_fails() {
    Command::cargo_bin("lictrack")
        .unwrap()
        .env_remove("SECRET_SERVER_URL")
        .env_remove("SECRET_SERVER_ID")
        .arg("secrets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("secrets.server_url"));
}
