use shipjar_core::version::VersionSuffix;

#[test]
fn local_suffix() {
    assert_eq!(VersionSuffix::of("1.0.0-LOCAL"), VersionSuffix::Local);
    assert!(!VersionSuffix::Local.requires_credentials());
}

#[test]
fn snapshot_suffix() {
    assert_eq!(VersionSuffix::of("1.0.0-SNAPSHOT"), VersionSuffix::Snapshot);
    assert!(VersionSuffix::Snapshot.requires_credentials());
}

#[test]
fn anything_else_is_release() {
    assert_eq!(VersionSuffix::of("2.0.0"), VersionSuffix::Release);
    assert_eq!(VersionSuffix::of("1.0.0-alpha"), VersionSuffix::Release);
    assert_eq!(VersionSuffix::of("1.0.0-local"), VersionSuffix::Release);
    assert!(VersionSuffix::Release.requires_credentials());
}

#[test]
fn suffix_must_be_trailing() {
    assert_eq!(VersionSuffix::of("1.0.0-SNAPSHOT.1"), VersionSuffix::Release);
    assert_eq!(VersionSuffix::of("1.0.0-LOCAL-SNAPSHOT"), VersionSuffix::Snapshot);
}
