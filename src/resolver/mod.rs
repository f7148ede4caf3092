// ABOUTME: Resolution of the effective container client settings.
// ABOUTME: Applies ambient overrides, then explicit values, then built-in defaults.

mod error;
mod parameters;

pub use error::{ResolveError, ResolveErrorKind};
pub use parameters::{ClientParameters, Resolution, Resolved, Tier};
