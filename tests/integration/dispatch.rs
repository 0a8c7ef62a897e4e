#[path = "common/mod.rs"]
mod common;

use assert_cmd::Command;
use common::write_config;
use predicates::prelude::*;

fn prodserver() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("prodserver"))
}

// Worker backends delegate through the configured `manage` argv, so pointing
// it at `echo` turns delegation into an observable line of output.

#[test]
fn omitted_name_dispatches_the_first_registered_server() {
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["echo"]
servers:
  worker:
    backend: "db-worker"
    args:
      interval: "5"
  other:
    backend: "db-worker"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("db_worker --interval=5"));
}

#[test]
fn named_dispatch_appends_the_prepared_args() {
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["echo"]
servers:
  first:
    backend: "db-worker"
  tasks:
    backend: "db-worker"
    args:
      verbosity: "2"
      batch-size: "10"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("tasks")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "db_worker --verbosity=2 --batch-size=10",
        ));
}

#[test]
fn qcluster_dispatches_when_registered() {
    // `echo -c "import django_q"` exits zero, so the probe sees the package
    // as installed.
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["echo"]
installed_apps:
  - "django_q"
servers:
  qworker:
    backend: "qcluster"
    args:
      verbosity: "1"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("qworker")
        .assert()
        .success()
        .stdout(predicate::str::contains("qcluster --verbosity=1"));
}

#[test]
fn qcluster_fails_when_not_registered() {
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["echo"]
installed_apps:
  - "myapp"
servers:
  qworker:
    backend: "qcluster"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("qworker")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Add 'django_q' to installed_apps"));
}

#[test]
fn qcluster_fails_when_the_package_probe_fails() {
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["/nonexistent/interpreter"]
servers:
  qworker:
    backend: "qcluster"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("qworker")
        .assert()
        .failure()
        .stderr(predicate::str::contains("django-q2 is required"));
}

#[test]
fn delegation_failure_exits_nonzero() {
    let (_dir, config) = write_config(
        r#"version: "1"
manage: ["/nonexistent/manage-program"]
servers:
  worker:
    backend: "db-worker"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("worker")
        .assert()
        .failure();
}

#[test]
fn celery_without_an_app_is_a_configuration_error() {
    let (_dir, config) = write_config(
        r#"version: "1"
servers:
  worker:
    backend: "celery"
    args:
      concurrency: "4"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("worker")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "requires a 'app' entry in its configuration",
        ));
}

#[test]
fn granian_invalid_boolean_is_a_configuration_error() {
    let (_dir, config) = write_config(
        r#"version: "1"
asgi_app: "myproject.asgi:application"
servers:
  web:
    backend: "granian-asgi"
    args:
      reload: "maybe"
"#,
    );

    prodserver()
        .arg("start")
        .arg("--config")
        .arg(&config)
        .arg("web")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value 'maybe'"));
}
