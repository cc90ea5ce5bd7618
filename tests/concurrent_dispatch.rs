//! Concurrent dispatch against one shared scope.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use flare_scope::{Args, BoxError, Endpoints, ErrorKind, Flare, Handler, Lock};

mod common;

use common::{ctx, paging_scope};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_dispatch_shares_one_scope() {
    let scope = paging_scope();
    let mut tasks = Vec::new();

    for i in 0..64u32 {
        let scope = scope.clone();
        tasks.push(tokio::spawn(async move {
            let admin = i % 2 == 0;
            let id = scope.router().id("page/admin/delete", &(i,)).unwrap();
            let result = scope.dispatch(&id, ctx(&format!("user-{i}"), admin)).await;
            (admin, result)
        }));
    }

    let mut allowed = 0;
    for task in tasks {
        let (admin, result) = task.await.unwrap();
        match result {
            Ok(out) => {
                assert!(admin);
                assert_eq!(out.route_path, "/page/admin/delete");
                allowed += 1;
            }
            Err(err) => {
                assert!(!admin);
                assert!(err.is(ErrorKind::FailedUnlock));
            }
        }
    }
    assert_eq!(allowed, 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_locks_do_not_block_other_dispatches() {
    let counter = Arc::new(AtomicU32::new(0));
    let hits = counter.clone();

    let slow = Flare::<()>::new()
        .lock(Lock::new(|_: ()| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            true
        }))
        .scope(Endpoints::new().handler(
            "tick",
            Handler::new(1, move |_, args: Args| {
                let hits = hits.clone();
                async move {
                    let step: u32 = args.get(0)?;
                    Ok::<_, BoxError>(hits.fetch_add(step, Ordering::SeqCst) + step)
                }
            }),
        ))
        .unwrap();

    let started = Instant::now();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let scope = slow.clone();
            tokio::spawn(async move {
                let id = scope.router().id("tick", &(1,)).unwrap();
                scope.dispatch_plain(&id).await.unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 16);

    // Serialized, 16 locks sleeping 20ms each would take at least 320ms.
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_millis(200), "took {elapsed:?}");
}
