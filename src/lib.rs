//! Compact, tamper-tolerant callback identifiers for chat interactions.
//!
//! Handlers are declared as a tree of named endpoints, optionally guarded
//! by locks. Building a [`Scope`] compiles the tree into a route table
//! keyed by short deterministic route IDs, and a [`Router`] that renders
//! identifiers (`RouteId + payload`) small enough for a 100-character
//! custom ID. Dispatching an identifier resolves the route, runs its lock
//! chain, decodes the payload and invokes the handler.

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod observability;
pub mod routing;

pub use codec::{Codec, DecodeError, EncodeError};
pub use config::FlareConfig;
pub use dispatch::{
    allow_error, silence, AllowError, ArgError, Args, DispatchError, Dispatched, ErrorKind, Flare,
    Outcome, Scope,
};
pub use routing::{BoxError, BuildError, Endpoints, Generator, Handler, Lock, Router, RouteId};
