use std::collections::HashMap;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::config::ApiConfig;
use crate::http::cancel::{CallId, CancelHandle, Scope};
use crate::http::error::{RequestError, FALLBACK_MESSAGE};
use crate::http::request::HttpRequest;

/// Observable bookkeeping of one lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Failure body the API sends alongside a non-success status.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

type CallFuture<T> = Pin<Box<dyn Future<Output = Result<T, RequestError>> + Send>>;

/// Loading/error bookkeeping for the calls one scope issues.
///
/// Dropping the lifecycle tears its scope down: every active call is
/// cancelled and no later result touches [`RequestState`].
///
/// Overlapping calls are not serialized. Whichever settles last decides the
/// final state; callers that need mutual exclusion must not start a second
/// call while one is active.
pub struct RequestLifecycle {
    shared: Arc<Shared>,
}

struct Shared {
    client: Client,
    state: watch::Sender<RequestState>,
    active: Mutex<HashMap<CallId, CancelHandle>>,
    scope: Scope,
}

/// A started call: its id, its cancel handle, and the future that settles it.
///
/// Awaiting an `InFlight` yields the parsed payload. Dropping it before it
/// settles counts as cancellation.
pub struct InFlight<T> {
    id: CallId,
    handle: CancelHandle,
    future: CallFuture<T>,
}

impl<T> InFlight<T> {
    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

impl<T> IntoFuture for InFlight<T> {
    type Output = Result<T, RequestError>;
    type IntoFuture = CallFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl RequestLifecycle {
    pub fn new(client: Client) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            shared: Arc::new(Shared {
                client,
                state,
                active: Mutex::new(HashMap::new()),
                scope: Scope::new(),
            }),
        }
    }

    /// Build a lifecycle whose client honours the configured timeouts.
    pub fn from_config(config: &ApiConfig) -> Result<Self, RequestError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.request_timeout_seconds.into()))
            .build()?;
        Ok(Self::new(client))
    }

    pub fn state(&self) -> RequestState {
        self.shared.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.shared.state.borrow().error_message.clone()
    }

    /// Receiver that observes every state change, for views that re-render.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.shared.state.subscribe()
    }

    /// Number of calls started and neither settled nor cancelled.
    pub fn active_calls(&self) -> usize {
        self.shared.active.lock().len()
    }

    pub fn is_alive(&self) -> bool {
        self.shared.scope.is_alive()
    }

    /// Issue a call and wait for its parsed payload.
    ///
    /// `is_loading` is already `true` when this returns, before the future is
    /// first polled. Failures are written to `error_message` and also
    /// returned; a cancelled call yields [`RequestError::Cancelled`] and
    /// leaves the state alone.
    pub fn send<T>(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<T, RequestError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.start(request).into_future()
    }

    /// Like [`send`](Self::send), but hands back the call's cancel handle.
    pub fn start<T>(&self, request: HttpRequest) -> InFlight<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let id = CallId::new();
        let handle = CancelHandle::new();

        if !self.shared.scope.is_alive() {
            tracing::trace!(
                call = %id,
                url = request.url(),
                "scope torn down, call not issued"
            );
            handle.cancel();
            return InFlight {
                id,
                handle,
                future: Box::pin(async { Err::<T, _>(RequestError::Cancelled) }),
            };
        }

        self.shared.state.send_modify(|state| {
            state.error_message = None;
            state.is_loading = true;
        });
        self.shared.active.lock().insert(id, handle.clone());

        tracing::debug!(
            call = %id,
            method = %request.http_method(),
            url = request.url(),
            "request started"
        );

        // Unregisters on every path, including the future being dropped unpolled.
        let registration = scopeguard::guard((Arc::clone(&self.shared), id), |(shared, id)| {
            shared.active.lock().remove(&id);
        });

        let cancel = handle.clone();
        let future = async move {
            let shared = Arc::clone(&registration.0);

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = shared.execute::<T>(request) => Some(result),
            };
            drop(registration);

            match outcome {
                Some(result) if !cancel.is_cancelled() => {
                    shared.settle(id, &result);
                    result
                }
                _ => {
                    tracing::trace!(call = %id, "result discarded after cancellation");
                    Err(RequestError::Cancelled)
                }
            }
        };

        InFlight {
            id,
            handle,
            future: Box::pin(future),
        }
    }

    /// Forget the current error. No-op when there is none.
    pub fn clear_error(&self) {
        self.shared
            .state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Cancel one call. Returns `false` if it already settled.
    pub fn cancel(&self, id: CallId) -> bool {
        let handle = self.shared.active.lock().remove(&id);
        match handle {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every active call. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let handles: Vec<CancelHandle> = self
            .shared
            .active
            .lock()
            .drain()
            .map(|(_, handle)| handle)
            .collect();
        for handle in &handles {
            handle.cancel();
        }
        handles.len()
    }

    /// End the owning scope: stop all bookkeeping and cancel active calls.
    /// Runs automatically on drop; later calls are no-ops.
    pub fn teardown(&self) {
        // Flipped under the state lock so no settle that already saw the
        // scope alive can still be writing once this returns.
        let mut first = false;
        self.shared.state.send_if_modified(|_| {
            first = self.shared.scope.tear_down();
            false
        });

        if first {
            let cancelled = self.cancel_all();
            tracing::debug!(cancelled, "request scope torn down");
        }
    }
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl Drop for RequestLifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Shared {
    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, RequestError> {
        let response = request.into_builder(&self.client)?.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(RequestError::RequestFailed {
                status: status.as_u16(),
                message: failure_message(&body),
            });
        }

        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// The single point where a finished call writes state.
    fn settle<T>(&self, id: CallId, result: &Result<T, RequestError>) {
        let error = result.as_ref().err().map(ToString::to_string);

        let applied = self.state.send_if_modified(|state| {
            if !self.scope.is_alive() {
                return false;
            }
            if let Some(message) = error {
                state.error_message = Some(message);
            }
            state.is_loading = false;
            true
        });

        if !applied {
            tracing::trace!(call = %id, "scope torn down, result not applied");
            return;
        }
        match result {
            Ok(_) => tracing::debug!(call = %id, "request settled"),
            Err(e) => tracing::warn!(
                call = %id,
                kind = e.error_type(),
                status = e.status(),
                "request failed: {}",
                e
            ),
        }
    }
}

fn failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
