// e2e/cli.rs: black-box tests of the huffcheck-gen and huffcheck-run binaries

#[cfg(unix)]
#[path = "../tests/support/fake_tool.rs"]
mod fake_tool;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn gen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_huffcheck-gen"))
}

fn run_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_huffcheck-run"))
}

/// Generate a reduced corpus into `dir` (the skewed fixture is shrunk).
fn generate(dir: &Path, seed: u64) -> Output {
    Command::new(gen_bin())
        .arg("--dir")
        .arg(dir)
        .args(["--seed", &seed.to_string(), "--skewed-size", "50000", "-q"])
        .output()
        .expect("failed to run huffcheck-gen")
}

// ── huffcheck-gen ─────────────────────────────────────────────────────────────

#[test]
fn gen_writes_the_catalog() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("tests");
    let out = generate(&dir, 1);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let len = |name: &str| fs::metadata(dir.join(name)).unwrap().len();
    assert_eq!(len("empty.txt"), 0);
    assert_eq!(len("single_char.txt"), 1000);
    assert_eq!(len("binary_random_1mb.bin"), 1_048_576);
    assert_eq!(len("binary_pattern.bin"), 1_048_576);
    assert_eq!(len("text_skewed.txt"), 50_000);
    assert_eq!(len("text_fibonacci.txt"), 5400);
    assert!(len("text_lorem.txt") > 0);
}

#[test]
fn gen_with_same_seed_is_reproducible() {
    let root = TempDir::new().unwrap();
    let a = root.path().join("a");
    let b = root.path().join("b");
    assert!(generate(&a, 9).status.success());
    assert!(generate(&b, 9).status.success());
    for name in ["binary_random_1mb.bin", "text_skewed.txt"] {
        assert_eq!(
            fs::read(a.join(name)).unwrap(),
            fs::read(b.join(name)).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn gen_into_unwritable_path_exits_1() {
    let root = TempDir::new().unwrap();
    let blocker = root.path().join("file");
    fs::write(&blocker, b"x").unwrap();
    // A regular file where a directory component is expected.
    let out = generate(&blocker.join("tests"), 1);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn gen_version() {
    let out = Command::new(gen_bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "{stdout}");
}

// ── huffcheck-run ─────────────────────────────────────────────────────────────

#[cfg(unix)]
fn run_with(root: &Path, script: &Path) -> Output {
    Command::new(run_bin())
        .arg("--tool")
        .arg("/bin/sh")
        .arg("--tool-arg")
        .arg(script)
        .arg("--fixtures-dir")
        .arg(root.join("tests"))
        .arg("--outputs-dir")
        .arg(root.join("tests").join("outputs"))
        .env_remove("HUFFCHECK_TOOL")
        .env_remove("HUFFCHECK_TIMEOUT")
        .output()
        .expect("failed to run huffcheck-run")
}

#[cfg(unix)]
#[test]
fn run_all_passing_exits_0() {
    let root = TempDir::new().unwrap();
    assert!(generate(&root.path().join("tests"), 2).status.success());
    let tool = fake_tool::FakeTool::new(fake_tool::ROUND_TRIP);

    let out = run_with(root.path(), &tool.script);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(out.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("Summary: 7/7 tests passed."), "{stdout}");
    assert_eq!(stdout.matches("[PASS]").count(), 7, "{stdout}");
    assert!(stdout.contains("Testing "), "{stdout}");
}

#[cfg(unix)]
#[test]
fn run_with_failing_tool_exits_1() {
    let root = TempDir::new().unwrap();
    assert!(generate(&root.path().join("tests"), 2).status.success());
    let tool = fake_tool::FakeTool::new(fake_tool::FAILING);

    let out = run_with(root.path(), &tool.script);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(out.status.code(), Some(1), "{stdout}");
    assert!(stdout.contains("Summary: 0/7 tests passed."), "{stdout}");
    assert!(stdout.contains("[FAIL]"), "{stdout}");
    assert!(stdout.contains("execution failed with exit status 2"), "{stdout}");
}

#[cfg(unix)]
#[test]
fn run_with_empty_fixtures_dir_passes_vacuously() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("tests")).unwrap();
    let tool = fake_tool::FakeTool::new(fake_tool::ROUND_TRIP);

    let out = run_with(root.path(), &tool.script);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout.contains("Summary: 0/0 tests passed."), "{stdout}");
}

#[test]
fn run_with_missing_fixtures_dir_exits_1() {
    let root = TempDir::new().unwrap();
    let out = Command::new(run_bin())
        .arg("--fixtures-dir")
        .arg(root.path().join("absent"))
        .arg("--outputs-dir")
        .arg(root.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}
