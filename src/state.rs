// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable};

/// Result of a fetch as seen by a view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Ready(data) => FetchState::Ready(f(data)),
            FetchState::Failed(message) => FetchState::Failed(message),
        }
    }
}

#[derive(Debug, Default)]
struct ScopeInner {
    handles: Vec<(u64, AbortHandle)>,
    next_id: u64,
    closed: bool,
}

/// Tracks the fetches started on behalf of one view.
///
/// Tearing the scope down (explicitly or by dropping it) aborts every fetch
/// still in flight. An aborted fetch settles to `None`, so its response can
/// never be applied to a view that is gone.
#[derive(Debug, Default)]
pub struct ViewScope {
    inner: Mutex<ScopeInner>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a fetch inside this scope.
    ///
    /// Returns `None` when the scope was torn down before the fetch finished.
    pub async fn settle<F, T, E>(&self, fetch: F) -> Option<FetchState<T>>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let _registered = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            if inner.closed {
                handle.abort();
            } else {
                inner.handles.push((id, handle));
            }
            Registered { scope: self, id }
        };

        match Abortable::new(fetch, registration).await {
            Ok(result) => Some(FetchState::from_result(result)),
            Err(_aborted) => {
                tracing::debug!("fetch aborted by view teardown");
                None
            }
        }
    }

    /// Abort all in-flight fetches and refuse new ones
    pub fn teardown(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        for (_, handle) in inner.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drops the abort handle of a fetch once it settles or is abandoned
struct Registered<'a> {
    scope: &'a ViewScope,
    id: u64,
}

impl Drop for Registered<'_> {
    fn drop(&mut self) {
        self.scope
            .lock()
            .handles
            .retain(|(id, _)| *id != self.id);
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.teardown();
    }
}
