// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};

use super::{DocumentStore, SessionNotFound, WorkbookStore, DEFAULT_SESSION_TTL};
use crate::model::{Block, DocumentContext, ListBlock, WorkbookContext};
use crate::theme::{Theme, ThemeCatalog};

#[fixture]
fn theme() -> Arc<Theme> {
    ThemeCatalog::builtin()
        .expect("builtin themes")
        .resolve("default")
}

fn document(theme: &Arc<Theme>) -> DocumentContext {
    DocumentContext::new("T", None, "/tmp/t.docx", Arc::clone(theme))
}

fn list(item: &str) -> Block {
    Block::List(ListBlock {
        items: vec![item.to_owned()],
        ordered: false,
    })
}

#[rstest]
#[tokio::test]
async fn create_then_lock_returns_the_context(theme: Arc<Theme>) {
    let store = DocumentStore::default();
    let handle = store.create(document(&theme)).await;

    let mut guard = store.lock(handle.as_str()).await.expect("session exists");
    guard.push(list("a"));
    drop(guard);

    let guard = store.lock(handle.as_str()).await.expect("session exists");
    assert_eq!(guard.blocks().len(), 1);
    assert_eq!(guard.handle(), &handle);
}

#[tokio::test]
async fn unknown_handle_is_not_found() {
    let store = WorkbookStore::default();
    let err = store.lock("excel_0_missing").await.err().expect("not found");
    assert_eq!(
        err,
        SessionNotFound {
            kind: "workbook",
            handle: "excel_0_missing".to_owned()
        }
    );
    assert_eq!(err.to_string(), "workbook excel_0_missing does not exist");
}

#[rstest]
#[tokio::test]
async fn removed_session_is_gone(theme: Arc<Theme>) {
    let store = DocumentStore::default();
    let handle = store.create(document(&theme)).await;

    let guard = store.lock(handle.as_str()).await.expect("session exists");
    store.remove(guard).await;

    assert!(store.lock(handle.as_str()).await.is_err());
    assert!(store.is_empty().await);
}

#[rstest]
#[tokio::test]
async fn waiter_queued_behind_a_save_sees_not_found(theme: Arc<Theme>) {
    let store = Arc::new(DocumentStore::default());
    let handle = store.create(document(&theme)).await;

    let guard = store.lock(handle.as_str()).await.expect("session exists");
    let waiter = {
        let store = Arc::clone(&store);
        let handle = handle.as_str().to_owned();
        tokio::spawn(async move { store.lock(&handle).await.map(|_| ()) })
    };
    tokio::task::yield_now().await;
    store.remove(guard).await;

    let result = waiter.await.expect("join waiter");
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn same_handle_calls_apply_in_arrival_order(theme: Arc<Theme>) {
    let store = Arc::new(DocumentStore::default());
    let handle = store.create(document(&theme)).await;

    let first = store.lock(handle.as_str()).await.expect("session exists");
    let mut tasks = Vec::new();
    for i in 0..5 {
        let store = Arc::clone(&store);
        let handle = handle.as_str().to_owned();
        tasks.push(tokio::spawn(async move {
            let mut guard = store.lock(&handle).await.expect("session exists");
            tokio::task::yield_now().await;
            guard.push(list(&i.to_string()));
        }));
        tokio::task::yield_now().await;
    }
    drop(first);
    for task in tasks {
        task.await.expect("join");
    }

    let guard = store.lock(handle.as_str()).await.expect("session exists");
    let order: Vec<String> = guard
        .blocks()
        .iter()
        .map(|block| match block {
            Block::List(list) => list.items[0].clone(),
            other => panic!("unexpected block {}", other.kind()),
        })
        .collect();
    assert_eq!(order, ["0", "1", "2", "3", "4"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn expired_sessions_are_swept_on_the_next_create(theme: Arc<Theme>) {
    let store = DocumentStore::default();
    let old = store.create(document(&theme)).await;

    tokio::time::advance(Duration::from_secs(20 * 60)).await;
    let young = store.create(document(&theme)).await;

    tokio::time::advance(Duration::from_secs(11 * 60)).await;
    // Past the TTL but not yet swept: still usable.
    assert!(store.lock(old.as_str()).await.is_ok());

    let _trigger = store.create(document(&theme)).await;

    assert!(store.lock(old.as_str()).await.is_err());
    assert!(store.lock(young.as_str()).await.is_ok());
    assert_eq!(store.len().await, 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn explicit_sweep_respects_custom_ttl(theme: Arc<Theme>) {
    let store = DocumentStore::new(Duration::from_secs(60));
    assert_ne!(store.ttl(), DEFAULT_SESSION_TTL);
    store.create(document(&theme)).await;

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(store.sweep_expired().await, 0);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(store.sweep_expired().await, 1);
}

#[rstest]
#[tokio::test]
async fn stores_are_independent_per_kind(theme: Arc<Theme>) {
    let documents = DocumentStore::default();
    let workbooks = WorkbookStore::default();
    let doc = documents.create(document(&theme)).await;
    let wb = workbooks
        .create(WorkbookContext::new("W", "/tmp/w.xlsx", Arc::clone(&theme)))
        .await;

    assert!(workbooks.lock(doc.as_str()).await.is_err());
    assert!(documents.lock(wb.as_str()).await.is_err());
    assert!(doc.as_str().starts_with("word_"));
    assert!(wb.as_str().starts_with("excel_"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn waiter_on_a_swept_session_is_not_told_it_succeeded(theme: Arc<Theme>) {
    let store = Arc::new(DocumentStore::default());
    let handle = store.create(document(&theme)).await;

    let guard = store.lock(handle.as_str()).await.expect("session exists");
    let waiter = {
        let store = Arc::clone(&store);
        let handle = handle.as_str().to_owned();
        tokio::spawn(async move {
            let mut doc = store.lock(&handle).await?;
            doc.push(list("late"));
            Ok::<(), SessionNotFound>(())
        })
    };
    tokio::task::yield_now().await;

    tokio::time::advance(DEFAULT_SESSION_TTL + Duration::from_secs(60)).await;
    let _trigger = store.create(document(&theme)).await;
    drop(guard);

    let queued = waiter.await.expect("join waiter");
    assert_eq!(
        queued,
        Err(SessionNotFound {
            kind: "document",
            handle: handle.as_str().to_owned(),
        })
    );
    assert!(store.lock(handle.as_str()).await.is_err());
    assert_eq!(store.len().await, 1);
}
