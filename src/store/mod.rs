// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory session stores.
//!
//! One store exists per session kind. Each entry owns a build context behind its own async
//! mutex, so calls against the same handle run one at a time in arrival order while calls
//! against different handles never wait on each other. Entries older than the TTL are swept
//! lazily whenever a new session of the same kind is created; there is no background timer.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

use crate::model::{DocumentContext, DocumentKind, Handle, HandleKind, WorkbookContext, WorkbookKind};

/// Default lifetime of an unsaved session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// A build context that can live in a [`SessionStore`].
pub trait SessionContext: Send + 'static {
    type Kind: HandleKind;
}

impl SessionContext for DocumentContext {
    type Kind = DocumentKind;
}

impl SessionContext for WorkbookContext {
    type Kind = WorkbookKind;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {handle} does not exist")]
pub struct SessionNotFound {
    pub kind: &'static str,
    pub handle: String,
}

struct Slot<C> {
    context: C,
    closed: bool,
}

struct Entry<C> {
    created_at: Instant,
    slot: Arc<Mutex<Slot<C>>>,
}

pub struct SessionStore<C: SessionContext> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<C>>>,
}

pub type DocumentStore = SessionStore<DocumentContext>;
pub type WorkbookStore = SessionStore<WorkbookContext>;

/// Exclusive access to one session's build context for the duration of a call.
pub struct SessionGuard<C: SessionContext> {
    handle: Handle<C::Kind>,
    slot: OwnedMutexGuard<Slot<C>>,
}

impl<C: SessionContext> SessionGuard<C> {
    pub fn handle(&self) -> &Handle<C::Kind> {
        &self.handle
    }
}

impl<C: SessionContext> Deref for SessionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.slot.context
    }
}

impl<C: SessionContext> DerefMut for SessionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.slot.context
    }
}

impl<C: SessionContext> SessionStore<C> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sweeps expired entries, then stores `context` under a freshly generated handle.
    pub async fn create(&self, context: C) -> Handle<C::Kind> {
        let mut entries = self.entries.lock().await;
        let swept = sweep(&mut entries, self.ttl);
        if swept > 0 {
            tracing::debug!(kind = C::Kind::LABEL, swept, "expired sessions swept");
        }

        let handle = loop {
            let candidate = Handle::<C::Kind>::generate();
            if !entries.contains_key(candidate.as_str()) {
                break candidate;
            }
        };
        entries.insert(
            handle.as_str().to_owned(),
            Entry {
                created_at: Instant::now(),
                slot: Arc::new(Mutex::new(Slot {
                    context,
                    closed: false,
                })),
            },
        );
        handle
    }

    /// Waits for exclusive access to the session behind `handle`.
    ///
    /// The store-wide map lock is released before waiting on the session itself, so a slow call
    /// on one handle never blocks lookups of another.
    pub async fn lock(&self, handle: &str) -> Result<SessionGuard<C>, SessionNotFound> {
        let slot = {
            let entries = self.entries.lock().await;
            entries
                .get(handle)
                .map(|entry| Arc::clone(&entry.slot))
                .ok_or_else(|| not_found::<C>(handle))?
        };
        let mut guard = Arc::clone(&slot).lock_owned().await;
        if guard.closed {
            return Err(not_found::<C>(handle));
        }
        // The entry may have been swept while this call waited on the slot.
        let current = self
            .entries
            .lock()
            .await
            .get(handle)
            .is_some_and(|entry| Arc::ptr_eq(&entry.slot, &slot));
        if !current {
            guard.closed = true;
            return Err(not_found::<C>(handle));
        }
        Ok(SessionGuard {
            handle: Handle::from_raw(handle),
            slot: guard,
        })
    }

    /// Ends a session after a successful save. Callers queued on the same handle observe it as
    /// gone.
    pub async fn remove(&self, mut guard: SessionGuard<C>) {
        guard.slot.closed = true;
        self.entries.lock().await.remove(guard.handle.as_str());
    }

    /// Drops every entry older than the TTL and returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        sweep(&mut *self.entries.lock().await, self.ttl)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, handle: &str) -> bool {
        self.entries.lock().await.contains_key(handle)
    }
}

impl<C: SessionContext> Default for SessionStore<C> {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

fn sweep<C>(entries: &mut HashMap<String, Entry<C>>, ttl: Duration) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, entry| now.duration_since(entry.created_at) <= ttl);
    before - entries.len()
}

fn not_found<C: SessionContext>(handle: &str) -> SessionNotFound {
    SessionNotFound {
        kind: C::Kind::LABEL,
        handle: handle.to_owned(),
    }
}

#[cfg(test)]
mod tests;
