use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;

fn sample_repo(root: &Path) {
    fs::write(root.join("README.md"), "# Sample\nA tiny demo project.").unwrap();
    fs::write(root.join("package.json"), "{\"name\": \"sample\"}").unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.py"), "print('hello')").unwrap();
}

#[test]
fn packs_a_local_checkout() {
    let temp = tempfile::tempdir().unwrap();
    sample_repo(temp.path());

    Command::cargo_bin("repopack")
        .unwrap()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(contains("=== REPOSITORY METADATA ==="))
        .stdout(contains("=== DIRECTORY STRUCTURE ==="))
        .stdout(contains("--- README.md ---"))
        .stdout(contains("print('hello')"));
}

#[test]
fn json_report_includes_accounting() {
    let temp = tempfile::tempdir().unwrap();
    sample_repo(temp.path());

    Command::cargo_bin("repopack")
        .unwrap()
        .arg(temp.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("\"packed_files\""))
        .stdout(contains("\"max_chars\""));
}

#[test]
fn tight_budget_truncates_low_priority_files() {
    let temp = tempfile::tempdir().unwrap();
    sample_repo(temp.path());
    fs::write(temp.path().join("src/big.py"), "x".repeat(4_000)).unwrap();

    Command::cargo_bin("repopack")
        .unwrap()
        .arg(temp.path())
        .arg("--budget")
        .arg("1200")
        .assert()
        .success()
        .stdout(contains("--- README.md ---"))
        .stdout(contains("--- src/big.py (truncated) ---"));
}

#[test]
fn repo_flag_labels_the_document() {
    let temp = tempfile::tempdir().unwrap();
    sample_repo(temp.path());

    Command::cargo_bin("repopack")
        .unwrap()
        .arg(temp.path())
        .arg("--repo")
        .arg("https://github.com/octo/sample.git")
        .assert()
        .success()
        .stdout(contains("Name: sample"))
        .stdout(contains("Owner: octo"));
}

#[test]
fn malformed_repo_flag_fails() {
    let temp = tempfile::tempdir().unwrap();
    sample_repo(temp.path());

    Command::cargo_bin("repopack")
        .unwrap()
        .arg(temp.path())
        .arg("--repo")
        .arg("https://gitlab.com/a/b")
        .assert()
        .failure();
}

#[test]
fn missing_root_fails() {
    Command::cargo_bin("repopack")
        .unwrap()
        .arg("/definitely/not/a/repo")
        .assert()
        .failure();
}
