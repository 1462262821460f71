//! Integration tests for the create-errika binary.
//!
//! Most runs pass `--skip-install`; the install tests put a fake `pnpm`
//! script on a private PATH instead of a real package manager.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Minimal template root with every app subtree
fn template() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "package.json", "{\"name\": \"errika-app\"}");
    write(root, "turbo.json", "{}");
    for app in ["http-backend", "ws-backend", "web-next", "web-react", "web-rn"] {
        write(root, &format!("apps/{}/package.json", app), app);
    }
    temp
}

fn create_errika(cwd: &Path, template: &Path) -> Command {
    let mut cmd = Command::cargo_bin("create-errika").unwrap();
    cmd.current_dir(cwd)
        .arg("--template-dir")
        .arg(template)
        .arg("--skip-install");
    cmd
}

/// Command that probes PATH and runs the install, with `path` as the only PATH entry
#[cfg(unix)]
fn create_errika_with_path(cwd: &Path, template: &Path, path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("create-errika").unwrap();
    cmd.current_dir(cwd)
        .env("PATH", path)
        .arg("--template-dir")
        .arg(template);
    cmd
}

/// Writes an executable `pnpm` into `bin` that logs its cwd and arguments
/// into `log` and exits with `code`
#[cfg(unix)]
fn fake_pnpm(bin: &Path, log: &Path, code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 9.0.0; exit 0; fi\n\
         pwd > \"{log}/cwd\"\n\
         echo \"$@\" > \"{log}/args\"\n\
         exit {code}\n",
        log = log.display(),
        code = code
    );
    let path = bin.join("pnpm");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn combined_output(output: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_direct_mode_creates_project() {
    let template = template();
    let cwd = TempDir::new().unwrap();

    create_errika(cwd.path(), template.path())
        .arg("my-app")
        .assert()
        .success();

    let app = cwd.path().join("my-app");
    assert!(app.join("package.json").is_file());
    assert!(app.join("turbo.json").is_file());
    assert!(app.join("apps/http-backend/package.json").is_file());
    assert!(app.join("apps/ws-backend/package.json").is_file());
    // Direct mode defaults to the client-only React variant
    assert_eq!(
        fs::read_to_string(app.join("apps/web/package.json")).unwrap(),
        "web-react"
    );
    assert!(!app.join("apps/mobile").exists());
    assert!(!app.join("apps/web-react").exists());
}

#[test]
fn test_current_directory_sentinel() {
    let template = template();
    let cwd = TempDir::new().unwrap();

    create_errika(cwd.path(), template.path())
        .arg(".")
        .assert()
        .success();

    assert!(cwd.path().join("package.json").is_file());
    assert!(cwd.path().join("apps/web/package.json").is_file());
}

#[test]
fn test_non_empty_current_directory_fails() {
    let template = template();
    let cwd = TempDir::new().unwrap();
    write(cwd.path(), "notes.txt", "keep");

    let output = create_errika(cwd.path(), template.path())
        .arg(".")
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(combined_output(&output).contains("not empty"));
    assert!(!cwd.path().join("package.json").exists());
    assert_eq!(
        fs::read_to_string(cwd.path().join("notes.txt")).unwrap(),
        "keep"
    );
}

#[test]
fn test_parent_traversal_rejected() {
    let template = template();
    let root = TempDir::new().unwrap();
    let cwd = root.path().join("work");
    fs::create_dir(&cwd).unwrap();

    let output = create_errika(&cwd, template.path())
        .arg("../evil")
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(combined_output(&output).contains("Invalid project name"));
    assert!(!root.path().join("evil").exists());
    assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);
}

#[test]
fn test_reserved_name_rejected() {
    let template = template();
    let cwd = TempDir::new().unwrap();

    create_errika(cwd.path(), template.path())
        .arg("node_modules")
        .assert()
        .code(1);

    assert!(!cwd.path().join("node_modules").exists());
}

#[test]
fn test_missing_template_dir_fails() {
    let cwd = TempDir::new().unwrap();
    let missing = cwd.path().join("no-such-template");

    create_errika(cwd.path(), &missing)
        .arg("my-app")
        .assert()
        .code(1);

    assert!(!cwd.path().join("my-app").exists());
}

#[test]
fn test_missing_default_variant_is_copy_error() {
    let template = template();
    fs::remove_dir_all(template.path().join("apps/web-react")).unwrap();
    let cwd = TempDir::new().unwrap();

    create_errika(cwd.path(), template.path())
        .arg("my-app")
        .assert()
        .code(1);

    // No rollback: the shared files copied before the failure remain
    assert!(cwd.path().join("my-app/package.json").is_file());
    assert!(!cwd.path().join("my-app/apps/web").exists());
}

#[test]
fn test_help_mentions_usage() {
    Command::cargo_bin("create-errika")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--template-dir"))
        .stdout(predicate::str::contains("--skip-install"));
}

#[cfg(unix)]
#[test]
fn test_install_runs_in_project_directory() {
    let template = template();
    let cwd = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let log = TempDir::new().unwrap();
    fake_pnpm(bin.path(), log.path(), 0);

    let output = create_errika_with_path(cwd.path(), template.path(), bin.path())
        .arg("my-app")
        .assert()
        .success()
        .get_output()
        .clone();

    let expected_cwd = cwd.path().canonicalize().unwrap().join("my-app");
    assert_eq!(
        fs::read_to_string(log.path().join("cwd")).unwrap().trim(),
        expected_cwd.to_str().unwrap()
    );
    assert_eq!(
        fs::read_to_string(log.path().join("args")).unwrap().trim(),
        "install"
    );
    // Piped output goes through the plain reporter, including the probed version
    let text = combined_output(&output);
    assert!(text.contains("pnpm (9.0.0)"));
    assert!(text.contains("pnpm dev"));
    assert!(!text.contains("pnpm install"));
}

#[cfg(unix)]
#[test]
fn test_failed_install_exits_with_error_and_keeps_files() {
    let template = template();
    let cwd = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let log = TempDir::new().unwrap();
    fake_pnpm(bin.path(), log.path(), 3);

    let output = create_errika_with_path(cwd.path(), template.path(), bin.path())
        .arg("my-app")
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(combined_output(&output).contains("`pnpm install` failed with exit code 3"));
    let app = cwd.path().join("my-app");
    assert!(app.join("package.json").is_file());
    assert!(app.join("apps/web/package.json").is_file());
}

#[cfg(unix)]
#[test]
fn test_missing_package_manager_prints_hint() {
    let template = template();
    let cwd = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();

    let output = create_errika_with_path(cwd.path(), template.path(), empty_path.path())
        .arg("my-app")
        .assert()
        .code(1)
        .get_output()
        .clone();

    let text = combined_output(&output);
    assert!(text.contains("pnpm was not found on your PATH"));
    assert!(text.contains("npm install -g pnpm"));
    assert!(!cwd.path().join("my-app").exists());
}
