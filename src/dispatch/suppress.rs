//! Selective suppression of expected dispatch failures.
//!
//! An identifier can outlive the scope that issued it (a button clicked
//! after a redeploy, a permission revoked since render time). Callers that
//! consider such cases normal can absorb one category while every other
//! failure, handler errors included, keeps propagating:
//!
//! ```rust,ignore
//! scope.dispatch(&custom_id, ctx).await.allow(ErrorKind::RouteNotFound)?;
//!
//! // or, as a continuation
//! scope
//!     .dispatch(&custom_id, ctx)
//!     .await
//!     .map(Outcome::Handled)
//!     .or_else(allow_error::route_not_found)?;
//! ```

use tracing::debug;

use crate::dispatch::errors::{DispatchError, ErrorKind};
use crate::dispatch::scope::Dispatched;

/// Result of a dispatch after suppression was applied.
#[derive(Debug)]
pub enum Outcome {
    /// The handler ran.
    Handled(Dispatched),
    /// An allowed failure was absorbed.
    Suppressed(DispatchError),
}

impl Outcome {
    pub fn handled(self) -> Option<Dispatched> {
        match self {
            Outcome::Handled(dispatched) => Some(dispatched),
            Outcome::Suppressed(_) => None,
        }
    }

    pub fn suppressed(&self) -> Option<&DispatchError> {
        match self {
            Outcome::Handled(_) => None,
            Outcome::Suppressed(err) => Some(err),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Outcome::Suppressed(_))
    }
}

/// Continuation absorbing failures of `kind` and re-raising anything else.
pub fn silence(kind: ErrorKind) -> impl Fn(DispatchError) -> Result<Outcome, DispatchError> {
    move |err| silence_any(&[kind], err)
}

fn silence_any(kinds: &[ErrorKind], err: DispatchError) -> Result<Outcome, DispatchError> {
    match err.kind() {
        Some(kind) if kinds.contains(&kind) => {
            debug!(kind = %kind, error = %err, "Suppressed dispatch failure");
            Ok(Outcome::Suppressed(err))
        }
        _ => Err(err),
    }
}

/// Ready-made continuations, one per category.
pub mod allow_error {
    use super::{silence, Outcome};
    use crate::dispatch::errors::{DispatchError, ErrorKind};

    pub fn route_not_found(err: DispatchError) -> Result<Outcome, DispatchError> {
        silence(ErrorKind::RouteNotFound)(err)
    }

    pub fn failed_unlock(err: DispatchError) -> Result<Outcome, DispatchError> {
        silence(ErrorKind::FailedUnlock)(err)
    }

    pub fn invalid_payload(err: DispatchError) -> Result<Outcome, DispatchError> {
        silence(ErrorKind::InvalidPayload)(err)
    }
}

/// Suppression helpers on dispatch results.
pub trait AllowError {
    /// Absorb failures of `kind`.
    fn allow(self, kind: ErrorKind) -> Result<Outcome, DispatchError>;

    /// Absorb failures of any of `kinds`.
    fn allow_any(self, kinds: &[ErrorKind]) -> Result<Outcome, DispatchError>;
}

impl AllowError for Result<Dispatched, DispatchError> {
    fn allow(self, kind: ErrorKind) -> Result<Outcome, DispatchError> {
        self.map(Outcome::Handled).or_else(silence(kind))
    }

    fn allow_any(self, kinds: &[ErrorKind]) -> Result<Outcome, DispatchError> {
        self.map(Outcome::Handled)
            .or_else(|err| silence_any(kinds, err))
    }
}
