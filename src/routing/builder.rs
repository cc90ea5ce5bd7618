//! Route table construction.
//!
//! # Responsibilities
//! - Walk the handler tree depth-first in insertion order
//! - Assign each handler its route ID and reject collisions
//! - Snapshot the accumulated lock chain into every route entry
//! - Produce the mirrored [`Router`] alongside the table
//!
//! # Design Decisions
//! - One pass builds both outputs, so the router can never reference a
//!   route missing from the table
//! - Nested scopes are re-walked under the parent's path: their routes get
//!   IDs derived from the full path, not from where they were first built
//! - Name validation happens here because this is the earliest point a
//!   broken tree can be observed at runtime

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::FlareConfig;
use crate::routing::locks::{Lock, LockChain};
use crate::routing::node::{Endpoints, Handler, Node};
use crate::routing::router::{Generator, Router, RouterNode};
use crate::routing::types::{BuildError, RouteId};

/// Everything the dispatcher needs to run one route.
pub struct RouteEntry<C> {
    pub(crate) handler: Handler<C>,
    pub(crate) locks: LockChain<C>,
    pub(crate) route_path: String,
}

impl<C> RouteEntry<C> {
    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    pub fn locks(&self) -> &LockChain<C> {
        &self.locks
    }

    pub fn params(&self) -> usize {
        self.handler.params()
    }
}

/// Route ID → entry. Built once, never mutated afterwards.
pub type RouteTable<C> = HashMap<RouteId, RouteEntry<C>>;

/// Build the route table and router mirror for `endpoints`.
///
/// `root_lock` is the scope's own lock; it heads every chain under the
/// root path (`""`).
pub fn build_routes<C>(
    endpoints: &Endpoints<C>,
    root_lock: Option<&Lock<C>>,
    config: &FlareConfig,
) -> Result<(RouteTable<C>, Router), BuildError> {
    let chain = match root_lock {
        Some(lock) => LockChain::new().extended("", lock.clone()),
        None => LockChain::new(),
    };

    let mut builder = TableBuilder {
        config,
        table: HashMap::new(),
    };
    let router = builder.walk(endpoints, "", &chain)?;
    Ok((builder.table, router))
}

struct TableBuilder<'a, C> {
    config: &'a FlareConfig,
    table: RouteTable<C>,
}

impl<C> TableBuilder<'_, C> {
    fn walk(
        &mut self,
        endpoints: &Endpoints<C>,
        prefix: &str,
        chain: &LockChain<C>,
    ) -> Result<Router, BuildError> {
        let config = self.config;
        let separator = config.routing.separator.as_str();
        let mut seen = HashSet::new();
        let mut branch = Router::new(separator);

        for (name, node) in endpoints.iter() {
            self.check_name(prefix, name)?;
            if !seen.insert(name) {
                return Err(BuildError::DuplicateName {
                    parent: display_parent(prefix, separator),
                    name: name.to_string(),
                });
            }

            let route = format!("{prefix}{separator}{name}");
            let mirrored = match node {
                Node::Handler(handler) => RouterNode::Generator(self.register(route, handler, chain)?),
                Node::Scope(definition) => {
                    let nested = match definition.lock() {
                        Some(lock) => chain.extended(route.clone(), lock.clone()),
                        None => chain.clone(),
                    };
                    RouterNode::Branch(self.walk(definition.endpoints(), &route, &nested)?)
                }
                Node::Group(group) => RouterNode::Branch(self.walk(group, &route, chain)?),
            };
            branch.insert(name, mirrored);
        }

        Ok(branch)
    }

    fn register(
        &mut self,
        route: String,
        handler: &Handler<C>,
        chain: &LockChain<C>,
    ) -> Result<Generator, BuildError> {
        let config = self.config;
        let generator = Generator::new(route.clone(), handler.params(), config);
        let route_id = generator.route_id().clone();

        if let Some(existing) = self.table.get(&route_id) {
            return Err(BuildError::DuplicateRouteId {
                route_id,
                route_path: route,
                existing: existing.route_path.clone(),
            });
        }

        debug!(
            route = %route,
            route_id = %route_id,
            params = handler.params(),
            locks = chain.len(),
            "Registered route"
        );

        self.table.insert(
            route_id,
            RouteEntry {
                handler: handler.clone(),
                locks: chain.clone(),
                route_path: route,
            },
        );
        Ok(generator)
    }

    fn check_name(&self, prefix: &str, name: &str) -> Result<(), BuildError> {
        let separator = self.config.routing.separator.as_str();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.contains(separator) {
            Some("name contains the route separator")
        } else if name.trim() != name {
            Some("name has leading or trailing whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(BuildError::InvalidName {
                parent: display_parent(prefix, separator),
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

fn display_parent(prefix: &str, separator: &str) -> String {
    if prefix.is_empty() {
        separator.to_string()
    } else {
        prefix.to_string()
    }
}
