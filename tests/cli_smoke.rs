use assert_cmd::prelude::*;
use chrono::{Days, Local};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    git_with_env(dir, args, &[]);
}

fn git_with_env(dir: &Path, args: &[&str], envs: &[(&str, &str)]) {
    assert!(Command::new("git")
        .args(args)
        .envs(envs.iter().copied())
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, author: Option<&str>) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    let message = format!("add {name}");
    let mut args = vec!["commit", "-m", message.as_str()];
    let author_arg;
    if let Some(author) = author {
        author_arg = format!("--author={author}");
        args.push(author_arg.as_str());
    }
    git(dir, &args);
}

fn heatwave(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("heatwave").unwrap();
    cmd.current_dir(dir).arg(dir);
    cmd
}

#[test]
fn json_counts_todays_commits() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", None);
    commit_file(dir.path(), "b.txt", "b\n", None);

    let out = heatwave(dir.path())
        .args(["-a", "--json", "-y", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let windows = v["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["total_commits"].as_u64(), Some(2));
    assert_eq!(windows[0]["days"][0]["level"].as_u64(), Some(2));
    assert_eq!(windows[1]["total_commits"].as_u64(), Some(0));
    assert_eq!(v["users"][0].as_str(), Some("All"));
}

#[test]
fn commits_land_on_their_author_date() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    fs::write(dir.path().join("old.txt"), "old\n").unwrap();
    git(dir.path(), &["add", "."]);

    let authored = Local::now().date_naive() - Days::new(100);
    let author_date = format!("{}T12:00:00", authored.format("%Y-%m-%d"));
    git_with_env(
        dir.path(),
        &["commit", "-m", "rebased later"],
        &[("GIT_AUTHOR_DATE", author_date.as_str())],
    );

    let out = heatwave(dir.path())
        .args(["-a", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let expected = authored.format("%Y-%m-%d").to_string();
    let days = v["windows"][0]["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"].as_str(), Some(expected.as_str()));
}

#[test]
fn users_are_matched_and_merged() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", Some("Alice Smith <alice@example.com>"));
    commit_file(dir.path(), "b.txt", "b\n", Some("Bob Jones <bob@example.com>"));
    commit_file(dir.path(), "c.txt", "c\n", Some("Carol <carol@example.com>"));

    let out = heatwave(dir.path())
        .args(["ALICE,", "bob", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["windows"][0]["total_commits"].as_u64(), Some(2));
}

#[test]
fn symbol_map_has_rows_and_legend() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", None);

    let out = heatwave(dir.path())
        .args(["your", "--status-type", "symbol", "-o", "3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.lines().any(|l| l.starts_with("Mon  ")));
    assert!(text.lines().any(|l| l.starts_with("Fri  ")));
    assert!(text.contains("  == COMMITS =="));
    assert!(text.contains("    ....  3 "));
    assert!(text.contains("    ####  13+"));
}

#[test]
fn number_mode_has_no_legend() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", None);

    let out = heatwave(dir.path())
        .args(["-a", "--status-type", "number", "-v"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(!text.contains("== COMMITS =="));
    assert!(text.contains("Git Author     : All"));
    assert!(text.contains("Total Commits  : 1"));
}

#[test]
fn list_committers_prints_counts() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", None);
    commit_file(dir.path(), "b.txt", "b\n", None);

    let out = heatwave(dir.path())
        .arg("-l")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Git Committers:\n"));
    assert!(text.contains("         2 - Your Name"));
}

#[test]
fn missing_user_fails() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a\n", None);

    let out = heatwave(dir.path()).assert().failure().get_output().stderr.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Must supply a USER NAME"));
}

#[test]
fn invalid_repository_path_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let out = Command::cargo_bin("heatwave")
        .unwrap()
        .arg(&missing)
        .arg("someone")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Invalid Repository Path"));
}

#[test]
fn zero_offset_is_rejected() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("heatwave")
        .unwrap()
        .arg(dir.path())
        .args(["someone", "-o", "0"])
        .assert()
        .failure();
}
