//! Blocking request executor

use crate::error::Result;
use crate::http::{RequestCore, RequestSpec, Success};
use crate::observability::CallLog;
use activetrail_transport::BlockingTransport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Drives a [`RequestCore`] over a [`BlockingTransport`].
///
/// Shares header construction, retry decisions and error classification
/// with the async [`Executor`](crate::http::Executor); only the send step
/// differs. There is no lifecycle: the transport is usable from
/// construction until it is dropped.
#[derive(Debug, Clone)]
pub struct BlockingExecutor {
    core: Arc<RequestCore>,
    transport: Arc<dyn BlockingTransport>,
}

impl BlockingExecutor {
    /// Create an executor over `transport`.
    pub fn new(core: RequestCore, transport: Arc<dyn BlockingTransport>) -> Self {
        Self {
            core: Arc::new(core),
            transport,
        }
    }

    /// The shared request core.
    pub fn core(&self) -> &RequestCore {
        &self.core
    }

    /// Execute `spec` and return the decoded JSON body.
    pub fn execute(&self, spec: RequestSpec) -> Result<Value> {
        self.execute_inner(&spec).map(|success| success.value)
    }

    /// Execute `spec` and deserialize the body into `T`.
    pub fn execute_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        self.execute_inner(&spec)?.decode()
    }

    fn execute_inner(&self, spec: &RequestSpec) -> Result<Success> {
        let core = &self.core;

        let request = core.prepare(spec)?;
        let mut log = CallLog::new(
            spec.method.as_str(),
            spec.path.as_str(),
            request.body.as_ref().map(Vec::len),
            core.retry_policy().max_attempts(),
        );

        let outcome = loop {
            log.sending();
            match self.transport.send_http(request.clone()) {
                Ok(response) => break Ok(response),
                Err(error) if core.should_retry(&error, log.retries()) => log.retrying(&error),
                Err(error) => break Err(error),
            }
        };

        core.finish(&log, outcome)
    }
}
