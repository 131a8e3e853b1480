use std::collections::BTreeMap;

use shipjar_core::config::PublishConfig;
use shipjar_core::project::{Project, ProjectIdentity};
use shipjar_core::properties::FallbackSources;
use shipjar_util::errors::ShipjarError;

fn project(group: &str, version: &str) -> Project {
    let mut p = Project::new("core", "/work/app/core");
    p.group = group.to_string();
    p.version = version.to_string();
    p
}

fn with_root(mut p: Project, root_name: &str, root_group: &str) -> Project {
    p.ancestors.push(ProjectIdentity {
        name: root_name.to_string(),
        group: root_group.to_string(),
        dir: "/work/app".into(),
    });
    p
}

fn repo_properties() -> FallbackSources {
    let mut props = BTreeMap::new();
    props.insert("REPO_USER".to_string(), "deployer".to_string());
    props.insert("REPO_PASSWORD".to_string(), "s3cret".to_string());
    props.insert(
        "REPO_RELEASE_URL".to_string(),
        "https://nexus.example.com/releases".to_string(),
    );
    props.insert(
        "REPO_SNAPSHOT_URL".to_string(),
        "https://nexus.example.com/snapshots".to_string(),
    );
    FallbackSources::new(props, BTreeMap::new())
}

fn expect_config_error(result: Result<impl std::fmt::Debug, ShipjarError>) -> String {
    match result {
        Err(ShipjarError::Configuration { message }) => message,
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[test]
fn user_values_take_priority() {
    let cfg = PublishConfig {
        group: "com.user".to_string(),
        artifact_id: "custom".to_string(),
        version: "3.0.0".to_string(),
        user_name: "me".to_string(),
        password: "pw".to_string(),
        release_repo_url: "https://repo.user/releases".to_string(),
        ..PublishConfig::default()
    };
    let resolved = cfg.resolve(&project("com.project", "1.0.0"), &repo_properties()).unwrap();

    assert_eq!(resolved.group, "com.user");
    assert_eq!(resolved.artifact_id, "custom");
    assert_eq!(resolved.version, "3.0.0");
    assert_eq!(resolved.user_name, "me");
    assert_eq!(resolved.password, "pw");
    assert_eq!(resolved.release_repo_url, "https://repo.user/releases");
    assert_eq!(resolved.snapshot_repo_url, "https://nexus.example.com/snapshots");
}

#[test]
fn blank_fields_default_from_project_and_properties() {
    let resolved = PublishConfig::default()
        .resolve(&project("com.example", "1.0.0"), &repo_properties())
        .unwrap();

    assert_eq!(resolved.group, "com.example");
    assert_eq!(resolved.artifact_id, "core");
    assert_eq!(resolved.version, "1.0.0");
    assert_eq!(resolved.user_name, "deployer");
    assert_eq!(resolved.password, "s3cret");
    assert_eq!(resolved.coordinate(), "com.example:core:1.0.0");
}

#[test]
fn whitespace_only_values_count_as_blank() {
    let cfg = PublishConfig {
        group: "   ".to_string(),
        ..PublishConfig::default()
    };
    let resolved = cfg
        .resolve(&project("com.example", "1.0.0-LOCAL"), &FallbackSources::default())
        .unwrap();
    assert_eq!(resolved.group, "com.example");
}

#[test]
fn group_comes_from_nearest_ancestor() {
    let mut p = project("", "1.0.0-LOCAL");
    p.ancestors.push(ProjectIdentity {
        name: "libs".to_string(),
        group: "com.example.libs".to_string(),
        dir: "/work/app/libs".into(),
    });
    let p = with_root(p, "app", "com.example");

    let resolved = PublishConfig::default()
        .resolve(&p, &FallbackSources::default())
        .unwrap();
    assert_eq!(resolved.group, "com.example.libs");
}

#[test]
fn implicit_root_name_groups_are_skipped() {
    let mut p = project("app.core", "1.0.0-LOCAL");
    p.ancestors.push(ProjectIdentity {
        name: "libs".to_string(),
        group: "app".to_string(),
        dir: "/work/app/libs".into(),
    });
    let p = with_root(p, "app", "org.example");

    let resolved = PublishConfig::default()
        .resolve(&p, &FallbackSources::default())
        .unwrap();
    assert_eq!(resolved.group, "org.example");
}

#[test]
fn missing_group_everywhere_fails_naming_group() {
    let p = with_root(project("", "1.0.0-LOCAL"), "app", "");
    let message = expect_config_error(PublishConfig::default().resolve(&p, &FallbackSources::default()));
    assert!(message.contains("group"), "got: {message}");
}

#[test]
fn missing_version_fails() {
    let message = expect_config_error(
        PublishConfig::default().resolve(&project("com.example", ""), &repo_properties()),
    );
    assert!(message.contains("version"), "got: {message}");
}

#[test]
fn unspecified_sentinel_counts_as_missing_version() {
    let message = expect_config_error(
        PublishConfig::default().resolve(&project("com.example", "unspecified"), &repo_properties()),
    );
    assert!(message.contains("unspecified version"), "got: {message}");
}

#[test]
fn local_version_never_requires_credentials() {
    let cfg = PublishConfig {
        version: "1.0.0-LOCAL".to_string(),
        ..PublishConfig::default()
    };
    let resolved = cfg
        .resolve(&project("com.example", ""), &FallbackSources::default())
        .unwrap();
    assert!(resolved.user_name.is_empty());
    assert!(resolved.password.is_empty());
    assert!(resolved.release_repo_url.is_empty());
}

#[test]
fn local_version_leaves_repository_fields_as_is() {
    let cfg = PublishConfig {
        version: "1.0.0-LOCAL".to_string(),
        user_name: "kept".to_string(),
        ..PublishConfig::default()
    };
    let resolved = cfg.resolve(&project("com.example", ""), &repo_properties()).unwrap();
    assert_eq!(resolved.user_name, "kept");
    assert!(resolved.password.is_empty());
}

#[test]
fn release_without_any_repository_settings_fails() {
    let cfg = PublishConfig {
        version: "2.0.0".to_string(),
        ..PublishConfig::default()
    };
    let message = expect_config_error(
        cfg.resolve(&project("com.example", ""), &FallbackSources::default()),
    );
    assert!(message.contains("userName"), "got: {message}");
    assert!(message.contains("password"), "got: {message}");
    assert!(message.contains("releaseRepoUrl"), "got: {message}");
}

#[test]
fn snapshot_url_alone_satisfies_validation() {
    let cfg = PublishConfig {
        version: "2.0.0-SNAPSHOT".to_string(),
        user_name: "u".to_string(),
        password: "p".to_string(),
        snapshot_repo_url: "https://repo/snapshots".to_string(),
        ..PublishConfig::default()
    };
    assert!(cfg
        .resolve(&project("com.example", ""), &FallbackSources::default())
        .is_ok());
}

#[test]
fn missing_password_only_names_password() {
    let cfg = PublishConfig {
        version: "2.0.0".to_string(),
        user_name: "u".to_string(),
        release_repo_url: "https://repo/releases".to_string(),
        ..PublishConfig::default()
    };
    let message = expect_config_error(
        cfg.resolve(&project("com.example", ""), &FallbackSources::default()),
    );
    assert!(message.ends_with("password"), "got: {message}");
}

#[test]
fn ossrh_environment_fills_credentials_after_properties() {
    let mut env = BTreeMap::new();
    env.insert("OSSRH_USERNAME".to_string(), "ossrh-user".to_string());
    env.insert("OSSRH_PASSWORD".to_string(), "ossrh-pass".to_string());
    let mut props = BTreeMap::new();
    props.insert("REPO_USER".to_string(), "prop-user".to_string());
    props.insert("REPO_RELEASE_URL".to_string(), "https://repo/releases".to_string());
    let sources = FallbackSources::new(props, env);

    let resolved = PublishConfig::default()
        .resolve(&project("com.example", "1.0.0"), &sources)
        .unwrap();
    assert_eq!(resolved.user_name, "prop-user");
    assert_eq!(resolved.password, "ossrh-pass");
}

#[test]
fn resolve_is_idempotent() {
    let sources = repo_properties();
    let inputs = vec![
        (PublishConfig::default(), project("com.example", "1.0.0")),
        (PublishConfig::default(), project("com.example", "1.0.0-SNAPSHOT")),
        (PublishConfig::default(), project("com.example", "1.0.0-LOCAL")),
        (
            PublishConfig {
                artifact_id: "renamed".to_string(),
                description: "desc".to_string(),
                pack_source_code: false,
                ..PublishConfig::default()
            },
            with_root(project("", "0.1.0"), "app", "org.example"),
        ),
    ];

    for (cfg, p) in inputs {
        let once = cfg.resolve(&p, &sources).unwrap();
        let twice = once.clone().into_inner().resolve(&p, &sources).unwrap();
        assert_eq!(once, twice);
    }
}
