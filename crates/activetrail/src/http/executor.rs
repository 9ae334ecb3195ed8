//! Async request executor
//!
//! Drives a [`RequestCore`] over a [`Transport`] and enforces the client
//! lifecycle: requests are only admitted between `setup` and `close`.

use crate::error::{Error, Result};
use crate::http::pipeline::RequestCore;
use crate::http::request::RequestSpec;
use crate::http::response::Success;
use crate::observability::CallLog;
use activetrail_transport::Transport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Open,
    Closed,
}

#[derive(Debug)]
struct Lifecycle {
    state: RwLock<State>,
    in_flight: AtomicUsize,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            state: RwLock::new(State::Idle),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> State {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, state: State) -> State {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, state)
    }

    /// Admit one request, or explain why the client cannot take it.
    fn enter(&self) -> Result<InFlight<'_>> {
        match self.state() {
            State::Open => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                Ok(InFlight { lifecycle: self })
            }
            State::Idle => Err(Error::Usage(
                "client is not open; call setup() or use scope()".to_string(),
            )),
            State::Closed => Err(Error::Usage("client has been closed".to_string())),
        }
    }
}

/// Counts one admitted request until dropped, whether it completed or was
/// cancelled.
struct InFlight<'a> {
    lifecycle: &'a Lifecycle,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.lifecycle.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
struct ExecutorInner {
    core: RequestCore,
    transport: Arc<dyn Transport>,
    lifecycle: Lifecycle,
}

/// Async request executor.
///
/// Cheap to clone; clones share the transport and the lifecycle.
#[derive(Debug, Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

impl Executor {
    /// Create an executor over `transport`. It starts closed to requests
    /// until [`setup`](Self::setup) succeeds.
    pub fn new(core: RequestCore, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                core,
                transport,
                lifecycle: Lifecycle::new(),
            }),
        }
    }

    /// The shared request core.
    pub fn core(&self) -> &RequestCore {
        &self.inner.core
    }

    /// Acquire the transport's connection resources.
    ///
    /// Calling `setup` on an open executor is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::Usage`] after [`close`](Self::close); otherwise whatever the
    /// transport reports.
    pub async fn setup(&self) -> Result<()> {
        match self.inner.lifecycle.state() {
            State::Open => return Ok(()),
            State::Closed => {
                return Err(Error::Usage(
                    "client has been closed and cannot be set up again".to_string(),
                ));
            }
            State::Idle => {}
        }

        self.inner.transport.setup().await?;

        // A close that raced the setup wins
        let mut state = self
            .inner
            .lifecycle
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match *state {
            State::Closed => {
                drop(state);
                let _ = self.inner.transport.close();
                Err(Error::Usage("client was closed during setup".to_string()))
            }
            _ => {
                *state = State::Open;
                debug!(transport = self.inner.transport.name(), "Client opened");
                Ok(())
            }
        }
    }

    /// Release the transport's connection resources. Idempotent and
    /// non-blocking; requests still in flight fail with a usage error or
    /// complete on their own connection handle.
    pub fn close(&self) -> Result<()> {
        let previous = self.inner.lifecycle.set(State::Closed);
        if previous != State::Closed {
            debug!(
                transport = self.inner.transport.name(),
                in_flight = self.in_flight(),
                "Client closed"
            );
        }
        self.inner.transport.close().map_err(Error::from)
    }

    /// Check if the executor accepts requests.
    pub fn is_open(&self) -> bool {
        self.inner.lifecycle.state() == State::Open
    }

    /// Number of requests currently executing.
    pub fn in_flight(&self) -> usize {
        self.inner.lifecycle.in_flight.load(Ordering::SeqCst)
    }

    /// Execute `spec` and return the decoded JSON body.
    pub async fn execute(&self, spec: RequestSpec) -> Result<Value> {
        self.execute_inner(&spec).await.map(|success| success.value)
    }

    /// Execute `spec` and deserialize the body into `T`.
    pub async fn execute_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        self.execute_inner(&spec).await?.decode()
    }

    async fn execute_inner(&self, spec: &RequestSpec) -> Result<Success> {
        let _in_flight = self.inner.lifecycle.enter()?;
        let core = &self.inner.core;

        let request = core.prepare(spec)?;
        let mut log = CallLog::new(
            spec.method.as_str(),
            spec.path.as_str(),
            request.body.as_ref().map(Vec::len),
            core.retry_policy().max_attempts(),
        );

        let outcome = loop {
            log.sending();
            match self.inner.transport.send_http(request.clone()).await {
                Ok(response) => break Ok(response),
                Err(error) if core.should_retry(&error, log.retries()) => log.retrying(&error),
                Err(error) => break Err(error),
            }
        };

        core.finish(&log, outcome)
    }
}
