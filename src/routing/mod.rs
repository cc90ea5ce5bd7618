//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Scope definition (at build time):
//!     Endpoints<C> tree { Handler | Scope | Group }
//!     → builder.rs (depth-first walk)
//!         → hash.rs (route path + arity → RouteId)
//!         → locks.rs (lock chain snapshot per route)
//!     → RouteTable<C> (RouteId → RouteEntry, immutable)
//!     → router.rs (Router mirror: same shape, generators at the leaves)
//!
//! Identifier issue (at render time):
//!     router.id("page/open", &(3,))
//!     → Generator → RouteId + encoded payload
//! ```
//!
//! # Design Decisions
//! - Routes compiled once per scope, immutable afterwards
//! - Deterministic IDs: no random seed, stable across restarts
//! - Collisions are build errors, never resolved at dispatch time
//! - Lock chains are values threaded through the walk, not shared state

pub mod builder;
pub mod hash;
pub mod locks;
pub mod node;
pub mod router;
pub mod types;

pub use builder::{RouteEntry, RouteTable};
pub use locks::{Lock, LockChain, LockLink};
pub use node::{Endpoints, Handler, Node, ScopeDefinition};
pub use router::{Generator, Router, RouterNode};
pub use types::{BoxError, BuildError, RouteId};
