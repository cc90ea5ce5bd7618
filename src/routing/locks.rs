//! Access-control locks and their composition into chains.
//!
//! # Responsibilities
//! - Wrap caller predicates (sync, async, fallible) behind one type
//! - Accumulate ancestor locks while the builder descends the tree
//!
//! # Design Decisions
//! - A chain is an immutable value: extending it returns a new chain, so a
//!   lock added for one subtree can never leak into a sibling
//! - Order is outer-to-inner nesting order, which is also execution order
//! - `false` and `Err` are both denial; the dispatcher does not care which

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::routing::types::BoxError;

type LockFn<C> = dyn Fn(C) -> BoxFuture<'static, Result<bool, BoxError>> + Send + Sync;

/// A predicate guarding every route beneath the scope it is attached to.
pub struct Lock<C> {
    check: Arc<LockFn<C>>,
}

impl<C: Send + 'static> Lock<C> {
    /// Async predicate resolving to `true` to let the dispatch through.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            check: Arc::new(move |ctx: C| f(ctx).map(Ok::<bool, BoxError>).boxed()),
        }
    }

    /// Async predicate that may fail; a failure denies like `false`.
    pub fn fallible<F, Fut, E>(f: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            check: Arc::new(move |ctx: C| f(ctx).map(|res| res.map_err(Into::<BoxError>::into)).boxed()),
        }
    }

    /// Synchronous predicate over a borrowed context.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |ctx: C| future::ready(Ok::<bool, BoxError>(f(&ctx))).boxed()),
        }
    }

    pub(crate) fn check(&self, ctx: C) -> BoxFuture<'static, Result<bool, BoxError>> {
        (self.check)(ctx)
    }
}

impl<C> Clone for Lock<C> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<C> fmt::Debug for Lock<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock").finish_non_exhaustive()
    }
}

/// One lock together with the route path of the scope that introduced it.
pub struct LockLink<C> {
    pub path: String,
    pub lock: Lock<C>,
}

impl<C> Clone for LockLink<C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: self.lock.clone(),
        }
    }
}

impl<C> fmt::Debug for LockLink<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockLink").field("path", &self.path).finish()
    }
}

/// Ordered ancestor locks for one position in the tree.
pub struct LockChain<C> {
    links: Vec<LockLink<C>>,
}

impl<C> LockChain<C> {
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// A copy of this chain with `lock` appended under `path`.
    pub fn extended(&self, path: impl Into<String>, lock: Lock<C>) -> Self {
        let mut links = self.links.clone();
        links.push(LockLink {
            path: path.into(),
            lock,
        });
        Self { links }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LockLink<C>> {
        self.links.iter()
    }

    /// Paths of the scopes contributing locks, outermost first.
    pub fn paths(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<C> Default for LockChain<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for LockChain<C> {
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
        }
    }
}

impl<C> fmt::Debug for LockChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}
