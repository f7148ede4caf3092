// ABOUTME: Project configuration for stevedore.yml.
// ABOUTME: Supplies the explicit client executable and environment for a project.

mod env_value;
mod init;

pub use env_value::{EnvValue, resolve_env_map};
pub use init::init_config;

use crate::error::{Error, Result};
use crate::overrides::OverrideSource;
use crate::resolver::ClientParameters;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "stevedore.yml";
pub const CONFIG_FILENAME_ALT: &str = "stevedore.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stevedore/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub docker_client: DockerClientConfig,
}

/// Explicit client settings. Unset fields fall through to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockerClientConfig {
    #[serde(default)]
    pub executable: Option<PathBuf>,

    #[serde(default)]
    pub environment: Option<BTreeMap<String, EnvValue>>,
}

impl ProjectConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading project configuration");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Build client parameters with this file's values as the explicit tier.
    ///
    /// Host variable references in the environment are resolved here.
    pub fn into_parameters<S: OverrideSource>(self, source: S) -> Result<ClientParameters<S>> {
        let mut params = ClientParameters::new(source);

        if let Some(executable) = self.docker_client.executable {
            params.set_executable(executable);
        }

        if let Some(environment) = &self.docker_client.environment {
            params.set_environment(resolve_env_map(environment)?);
        }

        Ok(params)
    }
}
