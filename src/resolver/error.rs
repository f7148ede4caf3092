// ABOUTME: Resolution error types with SNAFU pattern.
// ABOUTME: Unifies override parse failures and environment validation for programmatic handling.

use snafu::Snafu;

use crate::client::InvalidConfiguration;
use crate::overrides::ConfigurationParseError;

/// Failure to resolve the effective client configuration.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ResolveError {
    #[snafu(display("malformed override in {property}: {source}"))]
    Parse {
        property: &'static str,
        source: ConfigurationParseError,
    },

    #[snafu(display("invalid client environment: {source}"))]
    Invalid { source: InvalidConfiguration },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// An ambient override was present but could not be parsed.
    MalformedOverride,
    /// The resolved environment holds an entry a process cannot receive.
    InvalidEnvironment,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::Parse { .. } => ResolveErrorKind::MalformedOverride,
            ResolveError::Invalid { .. } => ResolveErrorKind::InvalidEnvironment,
        }
    }

    /// Property key of the override that failed to parse.
    pub fn property(&self) -> Option<&'static str> {
        match self {
            ResolveError::Parse { property, .. } => Some(*property),
            ResolveError::Invalid { .. } => None,
        }
    }
}

impl From<InvalidConfiguration> for ResolveError {
    fn from(source: InvalidConfiguration) -> Self {
        ResolveError::Invalid { source }
    }
}
