//! Scope construction and identifier dispatch.
//!
//! # Responsibilities
//! - Build a scope (route table + router) from an endpoint tree
//! - Resolve an incoming identifier to its route
//! - Run the route's lock chain, outermost first
//! - Decode and bound-check the payload, then invoke the handler
//!
//! # Design Decisions
//! - The route table sits behind an `Arc` and is never mutated, so any
//!   number of dispatches can run concurrently without locking
//! - Locks are awaited one after another and short-circuit on denial
//! - Handler errors are returned as-is inside `DispatchError::Handler`

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::{split_identifier, Codec};
use crate::config::validation::validate_config;
use crate::config::FlareConfig;
use crate::dispatch::args::Args;
use crate::dispatch::errors::DispatchError;
use crate::observability::metrics;
use crate::routing::builder::{build_routes, RouteTable};
use crate::routing::locks::Lock;
use crate::routing::node::{Endpoints, ScopeDefinition};
use crate::routing::router::Router;
use crate::routing::types::BuildError;

/// Entry point for building scopes that share a context type and config.
///
/// ```rust,ignore
/// let admin = Flare::<Ctx>::new()
///     .lock(Lock::from_fn(|ctx: &Ctx| ctx.is_admin))
///     .scope(Endpoints::new().handler("delete", delete))?;
///
/// let scope = Flare::<Ctx>::new().scope(
///     Endpoints::new().group("page", Endpoints::new().scope("admin", &admin)),
/// )?;
/// ```
pub struct Flare<C> {
    config: FlareConfig,
    lock: Option<Lock<C>>,
}

impl<C: Clone + Send + Sync + 'static> Flare<C> {
    pub fn new() -> Self {
        Self {
            config: FlareConfig::default(),
            lock: None,
        }
    }

    pub fn with_config(mut self, config: FlareConfig) -> Self {
        self.config = config;
        self
    }

    /// Guard every route of the next scope with `lock`.
    pub fn lock(mut self, lock: Lock<C>) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn scope(&self, endpoints: Endpoints<C>) -> Result<Scope<C>, BuildError> {
        Scope::build(endpoints, self.lock.clone(), self.config.clone())
    }
}

impl<C: Clone + Send + Sync + 'static> Default for Flare<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful dispatch: the route that ran and the handler's result.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub route_path: String,
    pub result: Value,
}

/// A built handler tree: route table, router mirror, and dispatcher.
pub struct Scope<C> {
    definition: Arc<ScopeDefinition<C>>,
    table: Arc<RouteTable<C>>,
    router: Arc<Router>,
    config: Arc<FlareConfig>,
    codec: Codec,
}

impl<C> Clone for Scope<C> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            table: Arc::clone(&self.table),
            router: Arc::clone(&self.router),
            config: Arc::clone(&self.config),
            codec: self.codec,
        }
    }
}

impl<C> Scope<C> {
    /// The mirrored tree used to render identifiers.
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &FlareConfig {
        &self.config
    }

    pub fn route_count(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn definition(&self) -> Arc<ScopeDefinition<C>> {
        Arc::clone(&self.definition)
    }
}

impl<C: Clone + Send + Sync + 'static> Scope<C> {
    pub fn build(
        endpoints: Endpoints<C>,
        lock: Option<Lock<C>>,
        config: FlareConfig,
    ) -> Result<Self, BuildError> {
        validate_config(&config).map_err(BuildError::InvalidConfig)?;

        let (table, router) = build_routes(&endpoints, lock.as_ref(), &config)?;
        metrics::record_routes_registered(table.len());
        debug!(routes = table.len(), locked = lock.is_some(), "Scope built");

        Ok(Self {
            definition: Arc::new(ScopeDefinition::new(endpoints, lock)),
            table: Arc::new(table),
            router: Arc::new(router),
            codec: Codec::from_config(&config),
            config: Arc::new(config),
        })
    }

    /// Resolve `identifier`, authorize with `ctx`, and run its handler.
    pub async fn dispatch(&self, identifier: &str, ctx: C) -> Result<Dispatched, DispatchError> {
        let started = Instant::now();
        let result = self.execute(identifier, ctx).await;
        metrics::record_dispatch(&result, started.elapsed());
        result
    }

    async fn execute(&self, identifier: &str, ctx: C) -> Result<Dispatched, DispatchError> {
        let (route_id, payload) = split_identifier(identifier, self.config.routing.id_width);

        let Some(entry) = self.table.get(route_id) else {
            debug!(identifier, route_id, "Route not found");
            return Err(DispatchError::RouteNotFound {
                identifier: identifier.to_string(),
                route_id: route_id.to_string(),
            });
        };

        for link in entry.locks.iter() {
            let cause = match link.lock.check(ctx.clone()).await {
                Ok(true) => continue,
                Ok(false) => "denied".to_string(),
                Err(err) => err.to_string(),
            };
            warn!(
                route = %entry.route_path,
                lock = %link.path,
                cause = %cause,
                "Unlock failed"
            );
            return Err(DispatchError::FailedUnlock {
                identifier: identifier.to_string(),
                lock_path: link.path.clone(),
                route_path: entry.route_path.clone(),
                cause,
            });
        }

        let invalid = |detail: String| {
            debug!(route = %entry.route_path, payload, detail = %detail, "Invalid payload");
            DispatchError::InvalidPayload {
                identifier: identifier.to_string(),
                route_path: entry.route_path.clone(),
                payload: payload.to_string(),
                detail,
            }
        };

        let values = self.codec.decode(payload).map_err(|e| invalid(e.to_string()))?;
        let params = entry.handler.params();
        if values.len() > params {
            return Err(invalid(format!(
                "expected at most {params} arguments, got {}",
                values.len()
            )));
        }

        debug!(route = %entry.route_path, args = values.len(), "Dispatching");
        let result = entry
            .handler
            .call(ctx, Args::new(values))
            .await
            .map_err(DispatchError::Handler)?;

        Ok(Dispatched {
            route_path: entry.route_path.clone(),
            result,
        })
    }
}

impl Scope<()> {
    /// Dispatch on a scope built without a context.
    pub async fn dispatch_plain(&self, identifier: &str) -> Result<Dispatched, DispatchError> {
        self.dispatch(identifier, ()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::node::Handler;
    use crate::routing::types::BoxError;
    use serde_json::json;

    fn echo(params: usize) -> Handler<()> {
        Handler::infallible(params, |_, args: Args| async move { args.into_inner() })
    }

    #[tokio::test]
    async fn test_dispatch_round_trip() {
        let scope = Flare::<()>::new()
            .scope(Endpoints::new().group("a", Endpoints::new().handler("b", echo(2))))
            .unwrap();

        let id = scope.router().id("a/b", &(1, "two")).unwrap();
        let out = scope.dispatch_plain(&id).await.unwrap();
        assert_eq!(out.route_path, "/a/b");
        assert_eq!(out.result, json!([1, "two"]));
    }

    #[tokio::test]
    async fn test_fewer_args_allowed_more_rejected() {
        let scope = Flare::<()>::new()
            .scope(Endpoints::new().handler("b", echo(2)))
            .unwrap();
        let route_id = scope.router().generator("b").unwrap().route_id().to_string();

        let out = scope.dispatch_plain(&format!("{route_id}[1]")).await.unwrap();
        assert_eq!(out.result, json!([1]));
        let out = scope.dispatch_plain(&route_id).await.unwrap();
        assert_eq!(out.result, json!([]));

        let err = scope
            .dispatch_plain(&format!("{route_id}[1,2,3]"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPayload { ref detail, .. } if detail.contains("at most 2")));
    }

    #[tokio::test]
    async fn test_handler_error_passes_through() {
        let failing: Handler<()> =
            Handler::new(0, |_, _| async { Err::<(), BoxError>("out of stock".into()) });
        let scope = Flare::<()>::new()
            .scope(Endpoints::new().handler("buy", failing))
            .unwrap();

        let id = scope.router().id("buy", &()).unwrap();
        assert!(id.ends_with("[]"));
        let err = scope.dispatch_plain(&id).await.unwrap_err();
        assert_eq!(err.kind(), None);
        assert_eq!(err.into_handler_error().unwrap().to_string(), "out of stock");
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let mut config = FlareConfig::default();
        config.routing.separator = String::new();
        let err = Flare::<()>::new()
            .with_config(config)
            .scope(Endpoints::new())
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::InvalidConfig(_)));
    }
}
