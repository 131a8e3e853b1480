use std::collections::BTreeMap;
use std::path::Path;

use shipjar_core::config::{PublishConfig, ResolvedConfig};
use shipjar_core::project::Project;
use shipjar_core::properties::FallbackSources;
use shipjar_core::version::VersionSuffix;
use shipjar_maven::repository::select_repository;
use shipjar_util::errors::ShipjarError;

fn resolved(version: &str, release: &str, snapshot: &str) -> ResolvedConfig {
    let mut project = Project::new("core", "/work/core");
    project.group = "com.example".to_string();
    let cfg = PublishConfig {
        version: version.to_string(),
        user_name: "deployer".to_string(),
        password: "s3cret".to_string(),
        release_repo_url: release.to_string(),
        snapshot_repo_url: snapshot.to_string(),
        ..PublishConfig::default()
    };
    cfg.resolve(&project, &FallbackSources::new(BTreeMap::new(), BTreeMap::new()))
        .unwrap()
}

#[test]
fn snapshot_goes_to_snapshot_url_with_credentials() {
    let cfg = resolved("1.0.0-SNAPSHOT", "https://repo/releases", "https://repo/snapshots");
    let target = select_repository(&cfg, Path::new("/work/core/build")).unwrap();
    assert_eq!(target.suffix, VersionSuffix::Snapshot);
    assert_eq!(target.location(), "https://repo/snapshots");
    assert!(target.credentials_required);
    assert_eq!(target.repository.username.as_deref(), Some("deployer"));
    assert_eq!(target.repository.password.as_deref(), Some("s3cret"));
}

#[test]
fn release_goes_to_release_url() {
    let cfg = resolved("2.0.0", "https://repo/releases/", "");
    let target = select_repository(&cfg, Path::new("/work/core/build")).unwrap();
    assert_eq!(target.suffix, VersionSuffix::Release);
    assert_eq!(target.location(), "https://repo/releases");
    assert!(target.credentials_required);
}

#[test]
fn local_goes_to_build_dir_without_credentials() {
    let cfg = resolved("1.0.0-LOCAL", "", "");
    let target = select_repository(&cfg, Path::new("/work/core/build")).unwrap();
    assert_eq!(target.suffix, VersionSuffix::Local);
    assert_eq!(target.location(), "file:///work/core/build/repository");
    assert!(!target.credentials_required);
    assert!(!target.repository.has_auth());
}

#[test]
fn release_without_release_url_names_the_field() {
    let cfg = resolved("2.0.0", "", "https://repo/snapshots");
    match select_repository(&cfg, Path::new("/work/core/build")) {
        Err(ShipjarError::Configuration { message }) => assert!(message.contains("releaseRepoUrl")),
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[test]
fn snapshot_without_snapshot_url_names_the_field() {
    let cfg = resolved("2.0.0-SNAPSHOT", "https://repo/releases", "");
    match select_repository(&cfg, Path::new("/work/core/build")) {
        Err(ShipjarError::Configuration { message }) => assert!(message.contains("snapshotRepoUrl")),
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[test]
fn selection_follows_the_final_version() {
    let local = resolved("1.0.0-LOCAL", "https://repo/releases", "https://repo/snapshots");
    let mut cfg = local.into_inner();
    cfg.version = "1.0.0".to_string();
    let mut project = Project::new("core", "/work/core");
    project.group = "com.example".to_string();
    let cfg = cfg.resolve(&project, &FallbackSources::default()).unwrap();

    let target = select_repository(&cfg, Path::new("/work/core/build")).unwrap();
    assert_eq!(target.location(), "https://repo/releases");
}
