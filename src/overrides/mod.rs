// ABOUTME: Ambient override sources consulted before explicit configuration.
// ABOUTME: Provides the OverrideSource trait, process environment lookup, and layering.

mod parse;

pub use parse::{
    ConfigurationParseError, parse_executable_property, parse_map_override, parse_map_property,
};

use std::collections::HashMap;
use std::ffi::OsString;

/// Property holding a `key=value,...` environment override for the client.
pub const ENVIRONMENT_PROPERTY: &str = "stevedore.dockerClient.environment";

/// Property holding an executable path override for the client.
pub const EXECUTABLE_PROPERTY: &str = "stevedore.dockerClient.executable";

/// A process-wide key/value store that can override explicit configuration.
///
/// Implementations are read on every resolution and never cached, so a value
/// that changes between two reads is observed by the second one. Values are
/// raw OS strings: a present value is always returned, even when it is not UTF-8.
pub trait OverrideSource {
    fn lookup(&self, key: &str) -> Option<OsString>;
}

impl<T: OverrideSource + ?Sized> OverrideSource for &T {
    fn lookup(&self, key: &str) -> Option<OsString> {
        (**self).lookup(key)
    }
}

impl OverrideSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl OverrideSource for HashMap<String, OsString> {
    fn lookup(&self, key: &str) -> Option<OsString> {
        self.get(key).cloned()
    }
}

/// Reads overrides from the process environment.
///
/// `stevedore.dockerClient.executable` is read from
/// `STEVEDORE_DOCKERCLIENT_EXECUTABLE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl OverrideSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<OsString> {
        std::env::var_os(env_var_name(key))
    }
}

/// Environment variable name for a property key.
pub fn env_var_name(key: &str) -> String {
    key.to_ascii_uppercase().replace('.', "_")
}

/// Two sources where the first one wins.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> Layered<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: OverrideSource, B: OverrideSource> OverrideSource for Layered<A, B> {
    fn lookup(&self, key: &str) -> Option<OsString> {
        self.primary
            .lookup(key)
            .or_else(|| self.fallback.lookup(key))
    }
}
