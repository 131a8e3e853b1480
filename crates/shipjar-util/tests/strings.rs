use shipjar_util::strings::{capitalize, is_blank, or_if_blank};

#[test]
fn capitalize_first_letter_only() {
    assert_eq!(capitalize("release"), "Release");
    assert_eq!(capitalize("myLib"), "MyLib");
    assert_eq!(capitalize("Core"), "Core");
    assert_eq!(capitalize(""), "");
}

#[test]
fn blank_detection_trims_whitespace() {
    assert!(is_blank(""));
    assert!(is_blank("   \t"));
    assert!(!is_blank(" x "));
}

#[test]
fn or_if_blank_prefers_value() {
    assert_eq!(
        or_if_blank("set", || Some("fallback".to_string())),
        Some("set".to_string())
    );
    assert_eq!(
        or_if_blank("  ", || Some("fallback".to_string())),
        Some("fallback".to_string())
    );
    assert_eq!(or_if_blank("", || None), None);
}
