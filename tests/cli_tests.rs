//! Binary-level tests: argument contract, log file, pass loop.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mirrorsync() -> Command {
    Command::cargo_bin("mirrorsync").expect("binary built")
}

#[test]
fn test_sixth_argument_is_fatal() {
    let work = TempDir::new().expect("create tempdir");
    let log = work.path().join("run.log");

    mirrorsync()
        .args(["src", "dst", "0", "1"])
        .arg(&log)
        .arg("surplus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("surplus"));

    assert!(!log.exists(), "no pass may run after a startup error");
}

#[test]
fn test_too_few_arguments_is_fatal() {
    mirrorsync().args(["src", "dst", "1"]).assert().failure();
}

#[test]
fn test_non_numeric_interval_is_fatal() {
    let work = TempDir::new().expect("create tempdir");
    mirrorsync()
        .arg(work.path().join("src"))
        .arg(work.path().join("dst"))
        .args(["soon", "1"])
        .arg(work.path().join("run.log"))
        .assert()
        .failure();
}

#[test]
fn test_run_mirrors_and_logs_to_file_and_stdout() {
    let work = TempDir::new().expect("create tempdir");
    let src = work.path().join("src");
    let dst = work.path().join("dst");
    let log = work.path().join("run.log");
    fs::create_dir_all(src.join("sub")).expect("create src tree");
    fs::write(src.join("a.txt"), b"X").expect("write a");
    fs::write(src.join("sub/b.txt"), b"Y").expect("write b");
    fs::write(&log, b"previous run\n").expect("write stale log");

    mirrorsync()
        .arg(&src)
        .arg(&dst)
        .args(["0.01", "2"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Synchronization 2 finished ---"));

    assert_eq!(fs::read(dst.join("a.txt")).expect("read a"), b"X");
    assert_eq!(fs::read(dst.join("sub/b.txt")).expect("read b"), b"Y");

    let contents = fs::read_to_string(&log).expect("read log");
    assert!(!contents.contains("previous run"), "log file must be overwritten");
    assert!(contents.contains("--- Synchronization 1 started ---"));
    assert!(contents.contains("File copied with metadata"));
    assert!(contents.contains("Waiting 0.01 seconds before next sync"));
    assert!(contents.contains("INFO"));
}

#[test]
fn test_missing_source_is_logged_and_run_succeeds() {
    let work = TempDir::new().expect("create tempdir");
    let dst = work.path().join("dst");
    let log = work.path().join("run.log");

    mirrorsync()
        .arg(work.path().join("absent"))
        .arg(&dst)
        .args(["0", "2"])
        .arg(&log)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).expect("read log");
    assert_eq!(contents.matches("Source folder does not exist").count(), 2);
    assert!(contents.contains("ERROR"));
    assert!(!dst.exists());
}

#[test]
fn test_source_inside_destination_is_refused_before_any_pass() {
    let work = TempDir::new().expect("create tempdir");
    let src = work.path().join("src");
    let log = work.path().join("run.log");
    fs::create_dir(&src).expect("create src");
    fs::write(src.join("precious.txt"), b"keep").expect("write src file");

    mirrorsync()
        .arg(&src)
        .arg(work.path())
        .args(["0", "1"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside destination"));

    assert_eq!(fs::read(src.join("precious.txt")).expect("source intact"), b"keep");
    assert!(!log.exists(), "no pass may run after a startup error");
}
