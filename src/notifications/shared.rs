// SPDX-License-Identifier: MPL-2.0
//! Shared store for multi-task hosts.
//!
//! [`SharedStore`] puts a [`NotificationStore`] behind a mutex so any task
//! can enqueue notifications, publishes a fresh snapshot to subscribers
//! after every mutation, and drives auto-dismissal from a tokio task that
//! sleeps until the next deadline.

use super::notification::{DecisionToken, Notification, NotificationId, Outcome};
use super::store::NotificationStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

struct Inner {
    store: Mutex<NotificationStore>,
    /// Wakes the expiry task when deadlines may have changed.
    changed: Arc<Notify>,
    snapshots: watch::Sender<Vec<Notification>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        // Lets a parked expiry task notice the store is gone.
        self.changed.notify_one();
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, NotificationStore> {
        // The store holds no invariant a panicking caller could break halfway.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, store: &NotificationStore) {
        self.snapshots.send_replace(store.snapshot());
        self.changed.notify_one();
    }
}

/// Cloneable handle to a process-wide notification store.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Inner>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: NotificationStore) -> Self {
        let (snapshots, _) = watch::channel(store.snapshot());
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(store),
                changed: Arc::new(Notify::new()),
                snapshots,
            }),
        }
    }

    /// Applies a mutation and publishes the resulting list.
    ///
    /// Callbacks registered on the store must not call back into this
    /// handle from inside `f`; use [`resolve`](Self::resolve) and
    /// [`invoke_action`](Self::invoke_action) to run them.
    pub fn update<R>(&self, f: impl FnOnce(&mut NotificationStore) -> R) -> R {
        let mut store = self.inner.lock();
        let result = f(&mut store);
        self.inner.publish(&store);
        result
    }

    /// Reads the store without publishing.
    pub fn read<R>(&self, f: impl FnOnce(&NotificationStore) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Current notifications, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner.snapshots.borrow().clone()
    }

    /// Receives the notification list after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.snapshots.subscribe()
    }

    /// Answers a confirm notification; the callback runs after the lock
    /// is released, so it may use this handle freely.
    pub fn resolve(&self, token: DecisionToken, outcome: Outcome) -> bool {
        let decision = self.update(|store| store.take_decision(token, outcome));
        match decision {
            Some(decision) => {
                decision.run();
                true
            }
            None => false,
        }
    }

    /// Runs a notification's action outside the lock. The notification stays.
    ///
    /// The callback is checked out of the store while it runs, so another
    /// `invoke_action` for the same id during that window (from another
    /// task, or from the callback itself) returns `false` and does nothing.
    pub fn invoke_action(&self, id: NotificationId) -> bool {
        let Some(mut callback) = self.inner.lock().take_action(id) else {
            return false;
        };
        callback();
        self.inner.lock().restore_action(id, callback);
        true
    }

    /// Expires due notifications now. Returns how many were removed.
    pub fn tick(&self, now: Instant) -> usize {
        let mut store = self.inner.lock();
        let removed = store.tick(now);
        if removed > 0 {
            self.inner.publish(&store);
        }
        removed
    }

    /// Spawns the task that removes notifications as their timers fire.
    ///
    /// Must be called from within a tokio runtime. The task stops when the
    /// returned [`ExpiryTask`] is dropped or when every `SharedStore`
    /// handle is gone.
    #[must_use]
    pub fn spawn_expiry(&self) -> ExpiryTask {
        let weak = Arc::downgrade(&self.inner);
        let changed = Arc::clone(&self.inner.changed);
        ExpiryTask(tokio::spawn(expiry_loop(weak, changed)))
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore")
            .field("store", &*self.inner.lock())
            .finish()
    }
}

/// Handle to the expiry task; aborts it on drop.
#[derive(Debug)]
pub struct ExpiryTask(JoinHandle<()>);

impl ExpiryTask {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for ExpiryTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn expiry_loop(weak: Weak<Inner>, changed: Arc<Notify>) {
    loop {
        // The Arc is only held while ticking so the store can be torn down.
        let next_deadline = {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut store = inner.lock();
            if store.tick(Instant::now()) > 0 {
                inner.publish(&store);
            }
            store.next_deadline()
        };

        match next_deadline {
            Some(deadline) => {
                tokio::select! {
                    () = changed.notified() => {}
                    () = tokio::time::sleep_until(deadline.into()) => {}
                }
            }
            None => changed.notified().await,
        }
    }
}
