#[path = "common/mod.rs"]
mod common;

use assert_cmd::Command;
use common::write_config;
use predicates::prelude::*;

fn prodserver() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("prodserver"))
}

#[test]
fn list_prints_registered_names_in_order() {
    let (_dir, config) = write_config(
        r#"version: "1"
wsgi_app: "myproject.wsgi:application"
servers:
  web:
    backend: "gunicorn"
  worker:
    backend: "db-worker"
  api:
    backend: "uvicorn"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::diff("web\nworker\napi\n"));
}

#[test]
fn list_never_constructs_a_backend() {
    // The only entry would fail construction (celery without an app), but
    // listing must not get that far.
    let (_dir, config) = write_config(
        r#"version: "1"
servers:
  worker:
    backend: "celery"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::diff("worker\n"));
}

#[test]
fn unknown_name_fails_and_lists_available_servers() {
    let (_dir, config) = write_config(
        r#"version: "1"
wsgi_app: "myproject.wsgi:application"
servers:
  web:
    backend: "gunicorn"
  worker:
    backend: "db-worker"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Server named 'missing' not found in configuration",
        ))
        .stderr(predicate::str::contains("Available servers: web, worker"));
}

#[test]
fn missing_backend_field_is_a_configuration_error() {
    let (_dir, config) = write_config(
        r#"version: "1"
servers:
  web:
    args:
      bind: "0.0.0.0:8222"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("web")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Backend not configured for server named 'web'",
        ));
}

#[test]
fn unknown_backend_is_a_configuration_error() {
    let (_dir, config) = write_config(
        r#"version: "1"
servers:
  web:
    backend: "nginx"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown backend 'nginx' for server named 'web'",
        ));
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    prodserver()
        .arg("start")
        .arg("--config")
        .arg("/nonexistent/prodserver.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn empty_registry_is_a_configuration_error() {
    let (_dir, config) = write_config(
        r#"version: "1"
servers: {}
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No servers configured"));
}
