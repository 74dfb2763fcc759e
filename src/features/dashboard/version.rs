//! Version Banner
//!
//! Warns when the backend integration and this build disagree on version.

use semver::Version;

use crate::i18n::{Locale, t_format};

/// Version of this build
pub const FRONTEND_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Both versions when they parse and differ
pub fn version_mismatch(backend: &str, frontend: &str) -> Option<(Version, Version)> {
    let backend = Version::parse(backend.trim().trim_start_matches('v')).ok()?;
    let frontend = Version::parse(frontend.trim().trim_start_matches('v')).ok()?;
    (backend != frontend).then_some((backend, frontend))
}

/// Banner text, or None when there is nothing to report
pub fn version_banner(backend: Option<&str>, locale: Locale) -> Option<String> {
    let (backend, frontend) = version_mismatch(backend?, FRONTEND_VERSION)?;
    let backend = backend.to_string();
    let frontend = frontend.to_string();
    Some(t_format(
        locale,
        "version-mismatch",
        &[("frontend", frontend.as_str()), ("backend", backend.as_str())],
    ))
}
