// ABOUTME: Resolved container client configuration and its builder.
// ABOUTME: Immutable snapshot of the executable and environment handed to the invoker.

mod environment;

pub use environment::{InvalidConfiguration, validate_entry};

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Executable used when neither an override nor an explicit value is present.
/// Resolved through the invoker's normal `PATH` lookup.
pub const DEFAULT_DOCKER_CLIENT: &str = "docker";

/// Executable path and environment for one container client invocation.
///
/// Equality and hashing only consider the environment. Two configurations that
/// point at different executables but carry the same environment compare equal.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    environment: Option<BTreeMap<String, String>>,
    executable: Option<PathBuf>,
}

impl ClientConfiguration {
    pub fn builder() -> ClientConfigurationBuilder {
        ClientConfigurationBuilder::default()
    }

    /// Variables to add to the child process. `None` means inherit and add nothing.
    pub fn environment(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref()
    }

    /// Executable to run. `None` means use the default client.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }
}

impl PartialEq for ClientConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.environment == other.environment
    }
}

impl Eq for ClientConfiguration {}

impl Hash for ClientConfiguration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.environment.hash(state);
    }
}

/// Staged assembler for [`ClientConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigurationBuilder {
    environment: Option<BTreeMap<String, String>>,
    executable: Option<PathBuf>,
}

impl ClientConfigurationBuilder {
    /// Set the environment variables for the client.
    ///
    /// `None` clears any previously set map. A map with an entry the operating
    /// system cannot carry is rejected and the builder is left untouched.
    pub fn environment<I, K, V>(
        &mut self,
        environment: Option<I>,
    ) -> Result<&mut Self, InvalidConfiguration>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let Some(entries) = environment else {
            self.environment = None;
            return Ok(self);
        };

        let mut validated = BTreeMap::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            validate_entry(&key, &value)?;
            validated.insert(key, value);
        }

        self.environment = Some(validated);
        Ok(self)
    }

    /// Set the client executable. Stored verbatim; existence is checked at invocation.
    pub fn executable(&mut self, executable: Option<impl Into<PathBuf>>) -> &mut Self {
        self.executable = executable.map(Into::into);
        self
    }

    pub fn build(&self) -> ClientConfiguration {
        ClientConfiguration {
            environment: self.environment.clone(),
            executable: self.executable.clone(),
        }
    }
}
