//! Concurrent handlers writing into one shared context.

use intake_context::{ContextConfig, ExecutionContext, Key, MaxEntries};
use intake_context_testing::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_each_land_their_write() {
    // Given: one invocation fanned out to several tasks
    let shared = scenario_context().into_shared();

    // When: each task records its own result
    let tasks: Vec<_> = (0..16_u32)
        .map(|task| {
            let shared = shared.clone();
            tokio::spawn(async move {
                let _ = shared
                    .lock()
                    .put(format!("result-{task}"), task * 10)
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    // Then: every write is present alongside the ambient entries
    let ctx = shared.lock();
    assert_eq!(ctx.len(), 18);
    for task in 0..16_u32 {
        assert_entry_eq(&ctx, format!("result-{task}"), &(task * 10));
    }
    assert_entry_eq(&ctx, "actor", &"alice");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn read_modify_write_under_the_lock_is_atomic() {
    let shared = ExecutionContext::new().into_shared();
    let _ = shared.lock().put("counter", 0_u64).unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            tokio::spawn(async move {
                for _ in 0..100 {
                    let mut ctx = shared.lock();
                    let current = ctx.get_as::<u64>("counter").unwrap().copied().unwrap();
                    let _ = ctx.put("counter", current + 1).unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_entry_eq(&shared.lock(), "counter", &800_u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn capacity_limit_holds_under_contention() {
    // Given: a shared context with room for four entries
    let config = ContextConfig::bounded(MaxEntries::try_new(4).unwrap());
    let shared = ExecutionContext::with_config(config).into_shared();

    // When: more tasks than slots race to add a key
    let tasks: Vec<_> = (0..12_usize)
        .map(|task| {
            let shared = shared.clone();
            tokio::spawn(async move { shared.lock().put(Key::new(task), task).is_ok() })
        })
        .collect();
    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap() {
            accepted += 1;
        }
    }

    // Then: exactly the limit was accepted
    assert_eq!(accepted, 4);
    assert_eq!(shared.lock().len(), 4);
}
