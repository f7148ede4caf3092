// ABOUTME: Client environment values that are literals or host variable references.
// ABOUTME: References are resolved against the process environment when the file is loaded.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromHost {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Resolve this value for the client variable `name`.
    pub fn resolve(&self, name: &str) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromHost { var, default } => std::env::var(var)
                .ok()
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar {
                    name: name.to_string(),
                    var: var.clone(),
                }),
        }
    }
}

/// Resolve every value in name order, so the first missing reference reported
/// is always the same one.
pub fn resolve_env_map(map: &BTreeMap<String, EnvValue>) -> Result<BTreeMap<String, String>> {
    map.iter()
        .map(|(name, value)| value.resolve(name).map(|resolved| (name.clone(), resolved)))
        .collect()
}
