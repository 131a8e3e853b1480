use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn shipjar_cmd() -> Command {
    let mut cmd = Command::cargo_bin("shipjar").unwrap();
    cmd.env_remove("GPG_KEY_ID").env_remove("GPG_PASSWORD");
    cmd
}

fn android_library(dir: &std::path::Path) {
    fs::write(
        dir.join("shipjar.toml"),
        r#"
[project]
name = "ui"
group = "com.example.android"
version = "0.1.0-LOCAL"
plugins = ["com.android.library", "org.jetbrains.kotlin.android"]
"#,
    )
    .unwrap();
}

#[test]
fn test_publish_dry_run_lists_ordered_tasks() {
    let tmp = TempDir::new().unwrap();
    android_library(tmp.path());

    shipjar_cmd()
        .current_dir(tmp.path())
        .args(["publish", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "assembleRelease\npublishComponent\nandroidSourceJarForRelease\npublishMavenPublicationToMavenRepository\n",
        ));
}

#[test]
fn test_publish_missing_variant_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shipjar.toml"),
        r#"
[project]
name = "ui"
group = "com.example"
version = "0.1.0-LOCAL"
plugins = ["com.android.library"]
build-types = ["debug", "qa"]

[publish]
android-variant = "release"
"#,
    )
    .unwrap();

    shipjar_cmd()
        .current_dir(tmp.path())
        .args(["publish", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No variant `release`"));
}

#[cfg(unix)]
fn fake_host(dir: &std::path::Path, exit_code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-gradle");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$@\" > \"$(dirname \"$0\")/invoked.txt\"\necho \"plan=$SHIPJAR_PLAN\" >> \"$(dirname \"$0\")/invoked.txt\"\necho \"BUILD FINISHED\"\nexit {exit_code}\n"
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_publish_runs_host_and_reports() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shipjar.toml"),
        "[project]\nname = \"app\"\ngroup = \"com.example\"\n\n[host]\ncommand = \"./fake-gradle\"\n",
    )
    .unwrap();
    fake_host(tmp.path(), 0);
    let core = tmp.path().join("core");
    fs::create_dir(&core).unwrap();
    fs::write(
        core.join("shipjar.toml"),
        "[project]\nname = \"core\"\nversion = \"1.0.0-LOCAL\"\nplugins = [\"java-library\"]\n\n[host]\ncommand = \"./fake-gradle\"\n",
    )
    .unwrap();

    shipjar_cmd()
        .current_dir(&core)
        .args(["publish"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Component dependency url: implementation 'com.example:core:1.0.0-LOCAL'",
        ))
        .stdout(predicate::str::contains("Published at: file://"));

    let invoked = fs::read_to_string(tmp.path().join("invoked.txt")).unwrap();
    assert!(invoked.starts_with(
        "classes javaSourceJarForCore javadoc simpleJavadocJarForCore publishMavenPublicationToMavenRepository"
    ));
    assert!(invoked.contains("shipjar-plan.json"));
    assert!(core.join("build/shipjar-plan.json").is_file());
}

#[cfg(unix)]
#[test]
fn test_publish_host_failure_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shipjar.toml"),
        "[project]\nname = \"core\"\ngroup = \"com.example\"\nversion = \"1.0.0-LOCAL\"\nplugins = [\"java\"]\n\n[host]\ncommand = \"./fake-gradle\"\n",
    )
    .unwrap();
    fake_host(tmp.path(), 3);

    shipjar_cmd()
        .current_dir(tmp.path())
        .args(["publish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("published succeed").not());
}

#[cfg(unix)]
#[test]
fn test_publish_verbose_shows_host_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shipjar.toml"),
        "[project]\nname = \"core\"\ngroup = \"com.example\"\nversion = \"1.0.0-LOCAL\"\nplugins = [\"java\"]\n\n[host]\ncommand = \"./fake-gradle\"\n",
    )
    .unwrap();
    fake_host(tmp.path(), 0);

    shipjar_cmd()
        .current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .args(["-v", "publish"])
        .assert()
        .success()
        .stderr(predicate::str::contains("BUILD FINISHED"))
        .stdout(predicate::str::contains("BUILD FINISHED").not());
}
