use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn fingerprint() -> assert_cmd::Command {
    cargo_bin_cmd!("fingerprint")
}

/// A Ruby app whose config points at a bundler that cannot exist, so the
/// probes take the bundler-unavailable path deterministically.
fn rack_app() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Gemfile"), "source 'https://rubygems.org'\ngem 'rack'\n").unwrap();
    std::fs::write(tmp.path().join("config.ru"), "run ->(env) { [200, {}, ['ok']] }\n").unwrap();
    std::fs::write(
        tmp.path().join("fingerprint.toml"),
        "[probe]\nbundler = \"definitely-not-bundler-xyz\"\n",
    )
    .unwrap();
    tmp
}

// ── Help / Version ──

#[test]
fn shows_help() {
    fingerprint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("App Engine deployment config"));
}

#[test]
fn shows_version() {
    fingerprint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fingerprint"));
}

// ── gen-config ──

#[test]
fn gen_config_writes_app_yaml() {
    let tmp = rack_app();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("gem install bundler"))
        .stderr(predicate::str::contains("Writing [app.yaml]"));

    let app_yaml = std::fs::read_to_string(tmp.path().join("app.yaml")).unwrap();
    assert_eq!(
        app_yaml,
        "env: flex\nruntime: ruby\nentrypoint: bundle exec rackup -p 8080 -E deployment config.ru\n"
    );
    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn gen_config_custom_writes_dockerfile() {
    let tmp = rack_app();
    std::fs::write(tmp.path().join(".ruby-version"), "1.9.3\n").unwrap();

    fingerprint()
        .args(["gen-config", "--no-prompt", "--custom"])
        .arg(tmp.path())
        .assert()
        .success();

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("rbenv install -s 1.9.3-p551"));
    assert!(dockerfile.contains("ENTRYPOINT bundle exec rackup -p 8080 -E deployment config.ru"));
    assert!(tmp.path().join(".dockerignore").exists());
}

#[test]
fn gen_config_twice_reports_existing_files() {
    let tmp = rack_app();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .success();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("All config files already exist"));
}

#[test]
fn gen_config_fails_outside_ruby_app() {
    let tmp = TempDir::new().unwrap();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not look like a Ruby app"));
}

#[test]
fn gen_config_without_entrypoint_fails_non_interactively() {
    let tmp = rack_app();
    std::fs::remove_file(tmp.path().join("config.ru")).unwrap();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("entrypoint"));

    assert!(!tmp.path().join("app.yaml").exists());
}

#[test]
fn gen_config_uses_explicit_app_yaml() {
    let tmp = rack_app();
    let config = tmp.path().join("service.yaml");
    std::fs::write(&config, "runtime: ruby\nentrypoint: ruby app.rb\n").unwrap();

    fingerprint()
        .args(["gen-config", "--no-prompt", "--custom", "--config"])
        .arg(&config)
        .arg(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join("app.yaml").exists());
    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("ENTRYPOINT ruby app.rb"));
}

// ── detect ──

#[test]
fn detect_json_writes_nothing() {
    let tmp = rack_app();

    fingerprint()
        .args(["detect", "--no-prompt", "--custom", "--json"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"entrypoint\": \"bundle exec rackup -p 8080 -E deployment config.ru\"",
        ))
        .stdout(predicate::str::contains("\"Dockerfile\""));

    assert!(!tmp.path().join("app.yaml").exists());
    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn detect_prints_summary() {
    let tmp = rack_app();

    fingerprint()
        .args(["detect", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ruby:       base image default"))
        .stdout(predicate::str::contains("Would write: app.yaml"));
}

// ── doctor ──

#[test]
fn doctor_reports_missing_bundler() {
    let tmp = rack_app();

    fingerprint()
        .arg("doctor")
        .arg(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("[OK] Gemfile"))
        .stdout(predicate::str::contains("[NG] bundler"));
}

#[test]
fn rejects_invalid_config() {
    let tmp = rack_app();
    std::fs::write(tmp.path().join("fingerprint.toml"), "[probe\n").unwrap();

    fingerprint()
        .args(["gen-config", "--no-prompt"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("fingerprint.toml"));
}
