//! Route identity types and build-time error definitions.

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Boxed error returned by handlers and lock predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixed-width token identifying a route within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

/// Errors raised while building a scope.
///
/// These describe a broken handler tree, so they are never part of the
/// dispatch taxonomy and cannot be suppressed.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two routes hashed to the same ID.
    #[error("Duplicate route id {route_id} for {route_path} (already used by {existing})")]
    DuplicateRouteId {
        route_id: RouteId,
        route_path: String,
        existing: String,
    },

    /// The same name appears twice inside one group.
    #[error("Duplicate name {name:?} under {parent}")]
    DuplicateName { parent: String, name: String },

    /// A name that cannot be placed in a route path.
    #[error("Invalid name {name:?} under {parent}: {reason}")]
    InvalidName {
        parent: String,
        name: String,
        reason: &'static str,
    },

    /// The scope configuration failed validation.
    #[error("Invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
