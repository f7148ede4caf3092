// ABOUTME: Client parameters with override > explicit > default precedence.
// ABOUTME: Every read consults the override source again; nothing is memoized.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;

use snafu::ResultExt;

use super::error::{ParseSnafu, ResolveError};
use crate::client::{ClientConfiguration, DEFAULT_DOCKER_CLIENT};
use crate::overrides::{
    ConfigurationParseError, ENVIRONMENT_PROPERTY, EXECUTABLE_PROPERTY, OverrideSource,
    parse_executable_property, parse_map_override,
};

/// Which precedence tier produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Override,
    Explicit,
    Default,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Override => write!(f, "override"),
            Tier::Explicit => write!(f, "explicit"),
            Tier::Default => write!(f, "default"),
        }
    }
}

/// A resolved value together with the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub tier: Tier,
}

/// Both parameters as resolved by one pass over the tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub executable: Resolved<PathBuf>,
    pub environment: Resolved<BTreeMap<String, String>>,
}

impl Resolution {
    /// Freeze the resolved values for the invoker, rejecting variables a child
    /// process cannot receive.
    pub fn configuration(&self) -> Result<ClientConfiguration, ResolveError> {
        let config = ClientConfiguration::builder()
            .environment(Some(self.environment.value.clone()))?
            .executable(Some(self.executable.value.clone()))
            .build();
        Ok(config)
    }
}

/// User-facing client settings for a build.
///
/// Setters record explicit values. Getters apply the override source first, so
/// a per-invocation override always wins without being a separate knob.
#[derive(Debug, Clone)]
pub struct ClientParameters<S> {
    source: S,
    executable: Option<PathBuf>,
    environment: Option<BTreeMap<String, String>>,
}

impl<S: OverrideSource> ClientParameters<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            executable: None,
            environment: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn set_executable(&mut self, executable: impl Into<PathBuf>) -> &mut Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn clear_executable(&mut self) -> &mut Self {
        self.executable = None;
        self
    }

    pub fn set_environment<I, K, V>(&mut self, environment: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            environment
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn clear_environment(&mut self) -> &mut Self {
        self.environment = None;
        self
    }

    /// Effective executable.
    pub fn executable(&self) -> Result<PathBuf, ResolveError> {
        self.resolve_executable().map(|r| r.value)
    }

    /// Effective environment. Empty means pass the caller's environment through.
    pub fn environment(&self) -> Result<BTreeMap<String, String>, ResolveError> {
        self.resolve_environment().map(|r| r.value)
    }

    pub fn resolve_executable(&self) -> Result<Resolved<PathBuf>, ResolveError> {
        resolve(
            &self.source,
            EXECUTABLE_PROPERTY,
            self.executable.as_ref(),
            || PathBuf::from(DEFAULT_DOCKER_CLIENT),
            parse_executable_property,
        )
    }

    pub fn resolve_environment(&self) -> Result<Resolved<BTreeMap<String, String>>, ResolveError> {
        resolve(
            &self.source,
            ENVIRONMENT_PROPERTY,
            self.environment.as_ref(),
            BTreeMap::new,
            parse_map_override,
        )
    }

    /// Resolve both parameters.
    ///
    /// The two values are read one after the other with no snapshot between them.
    pub fn resolve(&self) -> Result<Resolution, ResolveError> {
        Ok(Resolution {
            executable: self.resolve_executable()?,
            environment: self.resolve_environment()?,
        })
    }

    /// Resolve both parameters and freeze them for the invoker.
    pub fn configuration(&self) -> Result<ClientConfiguration, ResolveError> {
        self.resolve()?.configuration()
    }
}

fn resolve<S, T, D, P>(
    source: &S,
    property: &'static str,
    explicit: Option<&T>,
    default: D,
    parse: P,
) -> Result<Resolved<T>, ResolveError>
where
    S: OverrideSource,
    T: Clone,
    D: FnOnce() -> T,
    P: FnOnce(&OsStr) -> Result<T, ConfigurationParseError>,
{
    let resolved = if let Some(raw) = source.lookup(property) {
        Resolved {
            value: parse(&raw).context(ParseSnafu { property })?,
            tier: Tier::Override,
        }
    } else if let Some(value) = explicit {
        Resolved {
            value: value.clone(),
            tier: Tier::Explicit,
        }
    } else {
        Resolved {
            value: default(),
            tier: Tier::Default,
        }
    };

    tracing::debug!(property, tier = %resolved.tier, "resolved client parameter");
    Ok(resolved)
}
