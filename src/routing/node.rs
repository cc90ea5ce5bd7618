//! Handler tree definitions.
//!
//! A scope is described by an [`Endpoints`] tree whose nodes are one of
//! three kinds: a handler leaf, a previously built (possibly locked) scope,
//! or a plain named group. The builder walks this sum type directly.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;

use crate::dispatch::args::Args;
use crate::dispatch::scope::Scope;
use crate::routing::locks::Lock;
use crate::routing::types::BoxError;

type HandlerFn<C> = dyn Fn(C, Args) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync;

/// A callable leaf: the declared parameter count plus the async body.
///
/// `params` counts every argument the handler accepts after the context,
/// optional trailing ones included. It feeds the route ID and caps the
/// number of arguments a payload may carry.
pub struct Handler<C> {
    params: usize,
    call: Arc<HandlerFn<C>>,
}

impl<C: Send + 'static> Handler<C> {
    pub fn new<F, Fut, T, E>(params: usize, f: F) -> Self
    where
        F: Fn(C, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize + 'static,
        E: Into<BoxError> + 'static,
    {
        let call = move |ctx: C, args: Args| {
            f(ctx, args)
                .map(|res| -> Result<Value, BoxError> {
                    let value = res.map_err(Into::<BoxError>::into)?;
                    serde_json::to_value(value).map_err(BoxError::from)
                })
                .boxed()
        };
        Self {
            params,
            call: Arc::new(call),
        }
    }

    /// Handler whose body cannot fail.
    pub fn infallible<F, Fut, T>(params: usize, f: F) -> Self
    where
        F: Fn(C, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Serialize + 'static,
    {
        Self::new(params, move |ctx: C, args: Args| {
            f(ctx, args).map(Ok::<T, BoxError>)
        })
    }
}

impl<C> Handler<C> {
    pub fn params(&self) -> usize {
        self.params
    }

    pub(crate) fn call(&self, ctx: C, args: Args) -> BoxFuture<'static, Result<Value, BoxError>> {
        (self.call)(ctx, args)
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self {
            params: self.params,
            call: Arc::clone(&self.call),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The reusable definition behind a built scope: its tree and its own lock.
pub struct ScopeDefinition<C> {
    endpoints: Endpoints<C>,
    lock: Option<Lock<C>>,
}

impl<C> ScopeDefinition<C> {
    pub fn new(endpoints: Endpoints<C>, lock: Option<Lock<C>>) -> Self {
        Self { endpoints, lock }
    }

    pub fn endpoints(&self) -> &Endpoints<C> {
        &self.endpoints
    }

    pub fn lock(&self) -> Option<&Lock<C>> {
        self.lock.as_ref()
    }
}

/// One node of the handler tree.
pub enum Node<C> {
    Handler(Handler<C>),
    Scope(Arc<ScopeDefinition<C>>),
    Group(Endpoints<C>),
}

impl<C> Clone for Node<C> {
    fn clone(&self) -> Self {
        match self {
            Node::Handler(handler) => Node::Handler(handler.clone()),
            Node::Scope(definition) => Node::Scope(Arc::clone(definition)),
            Node::Group(group) => Node::Group(group.clone()),
        }
    }
}

/// Named children of one tree level, kept in insertion order.
pub struct Endpoints<C> {
    entries: Vec<(String, Node<C>)>,
}

impl<C> Endpoints<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn handler(self, name: impl Into<String>, handler: Handler<C>) -> Self {
        self.node(name, Node::Handler(handler))
    }

    pub fn group(self, name: impl Into<String>, endpoints: Endpoints<C>) -> Self {
        self.node(name, Node::Group(endpoints))
    }

    /// Nest a built scope; its lock guards everything beneath `name`.
    pub fn scope(self, name: impl Into<String>, scope: &Scope<C>) -> Self {
        self.node(name, Node::Scope(scope.definition()))
    }

    pub fn node(mut self, name: impl Into<String>, node: Node<C>) -> Self {
        self.entries.push((name.into(), node));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<C>)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for Endpoints<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Endpoints<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}
