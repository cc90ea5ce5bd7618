//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use flare_scope::{Args, Endpoints, Flare, Handler, Lock, Scope};

/// Ordered record of which locks and handlers ran.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Context passed to every lock and handler in the test scopes.
#[derive(Clone)]
pub struct TestCtx {
    pub user: String,
    pub admin: bool,
    pub log: CallLog,
}

pub fn ctx(user: &str, admin: bool) -> TestCtx {
    TestCtx {
        user: user.to_string(),
        admin,
        log: CallLog::default(),
    }
}

/// Lock that records its name and answers `allow`.
pub fn recording_lock(name: &'static str, allow: bool) -> Lock<TestCtx> {
    Lock::new(move |ctx: TestCtx| async move {
        ctx.log.push(name);
        allow
    })
}

/// Handler that records its name and echoes the user plus its arguments.
pub fn recording_handler(name: &'static str, params: usize) -> Handler<TestCtx> {
    Handler::infallible(params, move |ctx: TestCtx, args: Args| async move {
        ctx.log.push(name);
        serde_json::json!({ "user": ctx.user, "args": args.into_inner() })
    })
}

/// `/page/open` for everyone, `/page/admin/delete` for admins only.
pub fn paging_scope() -> Scope<TestCtx> {
    let admin = Flare::<TestCtx>::new()
        .lock(Lock::from_fn(|ctx: &TestCtx| ctx.admin))
        .scope(Endpoints::new().handler("delete", recording_handler("delete", 1)))
        .unwrap();

    Flare::<TestCtx>::new()
        .scope(
            Endpoints::new().group(
                "page",
                Endpoints::new()
                    .handler("open", recording_handler("open", 1))
                    .scope("admin", &admin),
            ),
        )
        .unwrap()
}
