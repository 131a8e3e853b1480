//! Platform classification from a project's applied plugins.
//!
//! A host project may carry several capability markers at once (an Android
//! library that also applies Kotlin, for instance). [`classify`] picks exactly
//! one [`PlatformKind`] using a fixed priority order.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

pub const ANDROID_APPLICATION: &str = "com.android.application";
pub const ANDROID_LIBRARY: &str = "com.android.library";
pub const JAVA_LIBRARY: &str = "java-library";
pub const JAVA: &str = "java";
pub const KOTLIN_JVM: &str = "org.jetbrains.kotlin.jvm";
pub const GRADLE_PLUGIN: &str = "java-gradle-plugin";
pub const KOTLIN_JS: &str = "org.jetbrains.kotlin.js";
pub const KOTLIN_MULTIPLATFORM: &str = "org.jetbrains.kotlin.multiplatform";
pub const DOKKA: &str = "org.jetbrains.dokka";
pub const DOKKA_ANDROID: &str = "org.jetbrains.dokka-android";

/// The kind of buildable module a project is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    AndroidApplication,
    AndroidLibrary,
    JavaLibrary,
    KotlinLibrary,
    KotlinJsLibrary,
    KotlinMultiplatform,
    GradlePlugin,
    Unsupported,
}

impl PlatformKind {
    /// Every kind, `Unsupported` last.
    pub const ALL: [PlatformKind; 8] = [
        Self::AndroidApplication,
        Self::AndroidLibrary,
        Self::JavaLibrary,
        Self::KotlinLibrary,
        Self::KotlinJsLibrary,
        Self::KotlinMultiplatform,
        Self::GradlePlugin,
        Self::Unsupported,
    ];

    /// Returns `true` if this is one of the Android kinds.
    pub fn is_android(&self) -> bool {
        matches!(self, Self::AndroidApplication | Self::AndroidLibrary)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AndroidApplication => "android-application",
            Self::AndroidLibrary => "android-library",
            Self::JavaLibrary => "java-library",
            Self::KotlinLibrary => "kotlin-library",
            Self::KotlinJsLibrary => "kotlin-js-library",
            Self::KotlinMultiplatform => "kotlin-multiplatform",
            Self::GradlePlugin => "gradle-plugin",
            Self::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// Map a set of capability ids to exactly one platform.
///
/// Priority: application > android-library > java > kotlin-jvm >
/// gradle-plugin > kotlin-js > kotlin-multiplatform. Never fails.
pub fn classify(capabilities: &BTreeSet<String>) -> PlatformKind {
    let has = |id: &str| capabilities.contains(id);
    if has(ANDROID_APPLICATION) {
        PlatformKind::AndroidApplication
    } else if has(ANDROID_LIBRARY) {
        PlatformKind::AndroidLibrary
    } else if has(JAVA_LIBRARY) || has(JAVA) {
        PlatformKind::JavaLibrary
    } else if has(KOTLIN_JVM) {
        PlatformKind::KotlinLibrary
    } else if has(GRADLE_PLUGIN) {
        PlatformKind::GradlePlugin
    } else if has(KOTLIN_JS) {
        PlatformKind::KotlinJsLibrary
    } else if has(KOTLIN_MULTIPLATFORM) {
        PlatformKind::KotlinMultiplatform
    } else {
        PlatformKind::Unsupported
    }
}

/// Whether a documentation generator (Dokka) is applied.
pub fn has_doc_generator(capabilities: &BTreeSet<String>) -> bool {
    capabilities.contains(DOKKA) || capabilities.contains(DOKKA_ANDROID)
}
