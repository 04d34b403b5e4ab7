//! Session identity as handed to us by the dialogue platform.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

static SESSION_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/sessions/([^/]+)/contexts/").expect("session path pattern is valid")
});

/// Pulls the session id out of a context path such as
/// `projects/p/agent/sessions/<id>/contexts/ongoing-order`.
///
/// Returns an empty string when the path has no `sessions/<id>/contexts/` segment.
pub fn extract_session_id(session_path: &str) -> String {
    SESSION_PATH
        .captures(session_path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Key of an in-progress order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Extracts the id from a platform session path. `None` means "no session".
    pub fn from_session_path(session_path: &str) -> Option<Self> {
        Self::new(extract_session_id(session_path))
    }

    /// Wraps a raw id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
