//! Role keyword table: role identifier → ordered keyword list, with a `default` fallback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Role used when a requested role has no entry of its own.
pub const DEFAULT_ROLE: &str = "default";

const BUILTIN_TABLE: &str = include_str!("../../data/job_keywords.json");

/// Immutable keyword table, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    roles: HashMap<String, Vec<String>>,
}

impl KeywordSet {
    /// Parses a JSON object of `{ "<role>": ["keyword", ...] }`.
    /// The table must carry a `default` entry.
    pub fn from_json(raw: &str) -> Result<Self> {
        let set: KeywordSet =
            serde_json::from_str(raw).context("Keyword table is not a role → keyword list map")?;
        if !set.roles.contains_key(DEFAULT_ROLE) {
            bail!("Keyword table has no '{DEFAULT_ROLE}' role");
        }
        Ok(set)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword table {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// The table compiled into the binary.
    pub fn builtin() -> &'static KeywordSet {
        static BUILTIN: OnceLock<KeywordSet> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            // Covered by test_builtin_table_parses.
            KeywordSet::from_json(BUILTIN_TABLE).expect("built-in keyword table is valid")
        })
    }

    /// Keywords for `role`, falling back to the `default` entry for unknown roles.
    pub fn for_role(&self, role: &str) -> &[String] {
        self.roles
            .get(role)
            .or_else(|| self.roles.get(DEFAULT_ROLE))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let set = KeywordSet::from_json(BUILTIN_TABLE).unwrap();
        assert!(set.has_role(DEFAULT_ROLE));
        assert!(set.has_role("software_engineer"));
        assert!(!set.for_role(DEFAULT_ROLE).is_empty());
    }

    #[test]
    fn test_unknown_role_falls_back_to_default() {
        let set = KeywordSet::builtin();
        assert_eq!(set.for_role("astronaut"), set.for_role(DEFAULT_ROLE));
    }

    #[test]
    fn test_known_role_keeps_table_order() {
        let set = KeywordSet::from_json(r#"{"default": ["a"], "qa": ["selenium", "jira", "api"]}"#)
            .unwrap();
        assert_eq!(set.for_role("qa"), ["selenium", "jira", "api"]);
    }

    #[test]
    fn test_table_without_default_is_rejected() {
        let err = KeywordSet::from_json(r#"{"qa": ["selenium"]}"#).unwrap_err();
        assert!(err.to_string().contains("default"));
    }

    #[test]
    fn test_malformed_table_is_rejected() {
        assert!(KeywordSet::from_json(r#"{"default": "rust"}"#).is_err());
    }
}
