//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "src/content".into()
    }

    pub fn collection() -> String {
        "blog".into()
    }
}

// ============================================================================
// [feed] Section Defaults
// ============================================================================

pub mod feed {
    pub fn path() -> String {
        "/rss.xml".into()
    }

    pub fn favicon() -> String {
        "favicon.svg".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "dist".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4321
    }
}
