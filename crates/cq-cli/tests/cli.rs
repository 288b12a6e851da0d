use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "comments": [
    {"comment_ID": "1", "comment_post_ID": "10", "comment_author": "Ada", "comment_type": "comment", "comment_parent": "0", "comment_approved": "1", "comment_date": "2024-01-02 03:04:05"},
    {"comment_ID": "2", "comment_post_ID": "10", "comment_author": "Bob", "comment_type": "review", "comment_parent": "1", "comment_approved": 1},
    {"comment_ID": "3", "comment_post_ID": "10", "comment_author": "Spammer", "comment_type": "pingback", "comment_approved": "spam"}
  ],
  "comment_meta": {"2": {"rating": ["4"], "blank": [""]}},
  "posts": [{"ID": 10, "post_title": "Launch notes"}],
  "users": []
}"#;

const CONFIG: &str = r#"
[registry]
types = ["comment", "review"]

[registry.classes]
review = "Review"

[registry.default_args]
status = "approve"
number = 10

[links]
admin_url = "https://example.org/wp-admin"
"#;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("snapshot.json"), SNAPSHOT).unwrap();
    fs::write(dir.path().join("config.toml"), CONFIG).unwrap();
    dir
}

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("comment-query").unwrap();
    cmd.current_dir(dir.path())
        .arg("--no-color")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .env("COMMENT_QUERY_SNAPSHOT", dir.path().join("snapshot.json"));
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("comment-query")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_show_resolves_registered_kind() {
    let dir = setup();
    cmd(&dir)
        .args(["show", "2", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"review\""))
        .stdout(predicate::str::contains("\"comment_author\": \"Bob\""));
}

#[test]
fn test_show_related() {
    let dir = setup();
    cmd(&dir)
        .args(["show", "2", "--related"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 by Ada"))
        .stdout(predicate::str::contains("Launch notes"))
        .stdout(predicate::str::contains("comment.php?action=editcomment&c=2"));
}

#[test]
fn test_show_unrecognized_type_fails() {
    let dir = setup();
    cmd(&dir)
        .args(["show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Comment 3 not found"));
}

#[test]
fn test_show_missing_comment_fails() {
    let dir = setup();
    cmd(&dir).args(["show", "99"]).assert().failure();
}

#[test]
fn test_list_by_ids() {
    let dir = setup();
    cmd(&dir)
        .args(["list", "--ids", "1,2", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"comment_ID\": \"1\""))
        .stdout(predicate::str::contains("\"comment_ID\": \"2\""))
        .stdout(predicate::str::contains("Spammer").not());
}

#[test]
fn test_list_uses_calling_kind() {
    let dir = setup();
    cmd(&dir)
        .args(["list", "--kind", "note", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"note\""))
        .stdout(predicate::str::contains("\"kind\": \"review\"").not());
}

#[test]
fn test_args_normalization() {
    let dir = setup();
    cmd(&dir)
        .args(["args", "--arg", "type=pingback", "--arg", "number=5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"approve\""))
        .stdout(predicate::str::contains("\"number\": 5"))
        .stdout(predicate::str::contains("pingback").not());
}

#[test]
fn test_meta_defaults_on_empty_value() {
    let dir = setup();
    cmd(&dir)
        .args(["meta", "2", "rating"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"4\""));

    cmd(&dir)
        .args(["meta", "2", "blank", "--default", "fallback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fallback\""));
}

#[test]
fn test_config_show() {
    let dir = setup();
    cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[registry]"))
        .stdout(predicate::str::contains("review"));
}

#[test]
fn test_missing_snapshot_fails() {
    let dir = setup();
    Command::cargo_bin("comment-query")
        .unwrap()
        .current_dir(dir.path())
        .args(["show", "1", "--snapshot"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open snapshot"));
}
