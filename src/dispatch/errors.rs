//! Dispatch failure categories.

use std::fmt;

use thiserror::Error;

use crate::routing::types::BoxError;

/// Expected, suppressible dispatch failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown route ID: stale, tampered, or foreign identifier.
    RouteNotFound,
    /// A lock in the route's chain denied or failed.
    FailedUnlock,
    /// The payload could not be decoded into the handler's arguments.
    InvalidPayload,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RouteNotFound => "route_not_found",
            ErrorKind::FailedUnlock => "failed_unlock",
            ErrorKind::InvalidPayload => "invalid_payload",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`Scope::dispatch`](crate::Scope::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Route {route_id} not found for id {identifier}")]
    RouteNotFound { identifier: String, route_id: String },

    #[error(
        "Failed unlock {lock} > {rest}: {cause} for id {identifier}",
        lock = lock_label(.lock_path),
        rest = route_below(.lock_path, .route_path)
    )]
    FailedUnlock {
        identifier: String,
        /// Path of the scope whose lock denied (`""` for the root scope).
        lock_path: String,
        route_path: String,
        cause: String,
    },

    #[error("Invalid payload for id {identifier} at {route_path}: {payload} -> {detail}")]
    InvalidPayload {
        identifier: String,
        route_path: String,
        payload: String,
        detail: String,
    },

    /// The handler's own error, passed through untouched.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Category of this failure; `None` for handler errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DispatchError::RouteNotFound { .. } => Some(ErrorKind::RouteNotFound),
            DispatchError::FailedUnlock { .. } => Some(ErrorKind::FailedUnlock),
            DispatchError::InvalidPayload { .. } => Some(ErrorKind::InvalidPayload),
            DispatchError::Handler(_) => None,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    /// The identifier that was dispatched, when the engine rejected it.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            DispatchError::RouteNotFound { identifier, .. }
            | DispatchError::FailedUnlock { identifier, .. }
            | DispatchError::InvalidPayload { identifier, .. } => Some(identifier),
            DispatchError::Handler(_) => None,
        }
    }

    /// Recover the handler's error.
    pub fn into_handler_error(self) -> Result<BoxError, Self> {
        match self {
            DispatchError::Handler(err) => Ok(err),
            other => Err(other),
        }
    }
}

fn lock_label(lock_path: &str) -> &str {
    if lock_path.is_empty() {
        "<root>"
    } else {
        lock_path
    }
}

fn route_below<'a>(lock_path: &str, route_path: &'a str) -> &'a str {
    route_path.strip_prefix(lock_path).unwrap_or(route_path)
}
