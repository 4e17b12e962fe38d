//! CLI integration tests
//!
//! Runs the binary against a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("caravel-setup").unwrap();
    cmd.env("CARAVEL_SETUP_DATA_DIR", dir.path());
    cmd
}

/// Pull the token line out of `token create` output
fn extract_token(stdout: &str) -> String {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| line.len() == 64 && line.chars().all(|c| c.is_ascii_hexdigit()))
        .expect("token line in output")
        .to_string()
}

#[test]
fn no_args_prints_guidance() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("token create"));
}

#[test]
fn status_on_fresh_server() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Caravel Server Configuration"))
        .stdout(predicate::str::contains("Not configured"))
        .stdout(predicate::str::contains("admin: no"));
}

#[test]
fn token_create_is_visible_in_status() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args(["token", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One-time setup token"));

    cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Outstanding setup tokens: 1"))
        .stdout(predicate::str::contains("token created"));
}

#[test]
fn token_revoke_clears_outstanding_tokens() {
    let dir = TempDir::new().unwrap();

    cmd(&dir).args(["token", "create"]).assert().success();
    cmd(&dir)
        .args(["token", "revoke"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revoked 1 setup token(s)."));
}

#[test]
fn smtp_without_a_session_fails() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args([
            "smtp",
            "--hostname",
            "mail.example.com",
            "--return-address",
            "caravel@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No setup session"));
}

#[test]
fn smtp_with_a_redeemed_token_saves_the_config() {
    let dir = TempDir::new().unwrap();

    let create = cmd(&dir).args(["token", "create"]).assert().success();
    let stdout = String::from_utf8(create.get_output().stdout.clone()).unwrap();
    let token = extract_token(&stdout);

    cmd(&dir)
        .args([
            "smtp",
            "--token",
            &token,
            "--hostname",
            "mail.example.com",
            "--port",
            "587",
            "--return-address",
            "caravel@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration saved"));

    cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("mail.example.com:587"));

    // The redeemed session is stored, so a second call needs no token
    cmd(&dir)
        .args([
            "smtp",
            "--hostname",
            "smtp.example.net",
            "--return-address",
            "caravel@example.com",
        ])
        .assert()
        .success();
}
