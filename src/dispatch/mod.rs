//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! identifier + context
//!     → split at id_width (RouteId | payload)
//!     → route table lookup           miss → RouteNotFound
//!     → lock chain, outermost first  deny → FailedUnlock
//!     → codec decode + arity check   bad  → InvalidPayload
//!     → handler(context, Args)       err  → Handler (passed through)
//!     → Dispatched { route_path, result }
//!
//! caller side:
//!     → suppress.rs (absorb one expected category, re-raise the rest)
//! ```

pub mod args;
pub mod errors;
pub mod scope;
pub mod suppress;

pub use args::{ArgError, Args};
pub use errors::{DispatchError, ErrorKind};
pub use scope::{Dispatched, Flare, Scope};
pub use suppress::{allow_error, silence, AllowError, Outcome};
