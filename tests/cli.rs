use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("secure-setup").unwrap()
}

#[test]
fn help_lists_operation_modes() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--full"))
        .stdout(contains("--mtls-only"))
        .stdout(contains("--apple-profile"))
        .stdout(contains("--portal"))
        .stdout(contains("--github-ssh"));
}

#[test]
fn mode_flags_conflict() {
    cmd()
        .args(["--portal", "--mtls-only"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn portal_mode_aborts_without_domain() {
    let dir = tempfile::tempdir().unwrap();

    // stdin is closed, so the domain prompt falls through to empty input
    cmd()
        .arg("--portal")
        .arg("--work-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("domain"));

    // fatal before any artifact is written
    assert!(!dir.path().join("filebrowser/conf/docker-compose.yml").exists());
}

#[test]
fn portal_mode_writes_compose_and_settings() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args([
            "--portal",
            "--domain",
            "example.com",
            "--ha-subdomain",
            "ha",
            "--portal-subdomain",
            "files",
        ])
        .arg("--work-dir")
        .arg(dir.path())
        .assert()
        .success();

    let compose =
        std::fs::read_to_string(dir.path().join("filebrowser/conf/docker-compose.yml")).unwrap();
    assert!(compose.contains("filebrowser/filebrowser:latest"));
    assert!(compose.contains("/srv"));

    let settings =
        std::fs::read_to_string(dir.path().join("filebrowser/conf/settings.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&settings).unwrap();
    assert_eq!(value["root"], "/srv");
    assert_eq!(value["auth"]["method"], "json");

    assert!(dir.path().join("filebrowser/srv").is_dir());
}

#[test]
fn rerun_keeps_existing_artifacts_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let portal_args = |c: &mut Command| {
        c.args(["--portal", "--domain", "example.com", "--ha-subdomain", "ha"])
            .args(["--portal-subdomain", "files"])
            .arg("--work-dir")
            .arg(dir.path());
    };

    let mut first = cmd();
    portal_args(&mut first);
    first.assert().success();

    // Simulate operator hand-edits, then rerun with stdin closed: the
    // override/keep prompt defaults to keep.
    let compose_path = dir.path().join("filebrowser/conf/docker-compose.yml");
    std::fs::write(&compose_path, "# hand-edited\n").unwrap();

    let mut second = cmd();
    portal_args(&mut second);
    second.assert().success();

    assert_eq!(
        std::fs::read_to_string(&compose_path).unwrap(),
        "# hand-edited\n"
    );
}

#[test]
fn apple_profile_mode_requires_existing_identity() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["--apple-profile", "--domain", "example.com", "--ha-subdomain", "ha"])
        .arg("--work-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("client.pem"));
}
