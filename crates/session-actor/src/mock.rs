//! # Mock Session Client
//!
//! `MockClient<T>` hands out a real [`SessionClient<T>`] whose requests are answered from a
//! queue of expectations instead of a running actor. Use it to test code *around* a session
//! store (dispatchers, handlers) and, above all, to inject failures that a healthy actor never
//! produces, such as a closed channel.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, replies are scripted | Real store |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Use Case** | Logic around the client | The actor or the full system |
//!
//! ```rust
//! use session_actor::mock::MockClient;
//! use session_actor::{FrameworkError, SessionEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)] struct Cart;
//! #[derive(Debug, thiserror::Error)] #[error("cart")] struct CartError;
//!
//! #[async_trait]
//! impl SessionEntity for Cart {
//!     type Key = String; type Action = (); type ActionResult = ();
//!     type Context = (); type Error = CartError;
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), CartError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Cart>::new();
//!     mock.expect_get("s1".to_string()).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get("s1".to_string()).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step assertions on each request, use [`create_mock_client`] with the
//! `expect_*` receiver helpers.

use crate::client::SessionClient;
use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use crate::message::SessionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply to the next request the mock receives.
enum Expectation<T: SessionEntity> {
    Get {
        key: T::Key,
        response: Result<Option<T>, FrameworkError>,
    },
    Delete {
        key: T::Key,
        response: Result<Option<T>, FrameworkError>,
    },
    Action {
        key: T::Key,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Upsert {
        key: T::Key,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking.
///
/// Requests must arrive in the order the expectations were queued and must target the
/// expected key; anything else panics inside the mock task, which surfaces in the test as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: SessionEntity> {
    client: SessionClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queued = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queued.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        SessionRequest::Get { key, respond_to },
                        Some(Expectation::Get { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Get for unexpected session");
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Delete { key, respond_to },
                        Some(Expectation::Delete { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Delete for unexpected session");
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Action {
                            key, respond_to, ..
                        },
                        Some(Expectation::Action { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Action for unexpected session");
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Upsert {
                            key, respond_to, ..
                        },
                        Some(Expectation::Upsert { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Upsert for unexpected session");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: SessionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `key`.
    pub fn expect_get(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { key, response }
        })
    }

    /// Expects a `delete` for `key`.
    pub fn expect_delete(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { key, response }
        })
    }

    /// Expects a `perform_action` for `key`.
    pub fn expect_action(&mut self, key: T::Key) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Action { key, response }
        })
    }

    /// Expects an `upsert` for `key`.
    pub fn expect_upsert(&mut self, key: T::Key) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Upsert { key, response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Finishes an expectation with either a successful or a failed reply.
pub struct ExpectationBuilder<T: SessionEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: SessionEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client plus the receiving end of its channel, so a test can answer each
/// request by hand.
pub fn create_mock_client<T: SessionEntity>(
    buffer_size: usize,
) -> (SessionClient<T>, mpsc::Receiver<SessionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SessionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Upsert request.
pub async fn expect_upsert<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<SessionRequest<T>>,
) -> Option<(
    T::Key,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(SessionRequest::Upsert {
            key,
            action,
            respond_to,
        }) => Some((key, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
pub async fn expect_action<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<SessionRequest<T>>,
) -> Option<(
    T::Key,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(SessionRequest::Action {
            key,
            action,
            respond_to,
        }) => Some((key, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request.
pub async fn expect_delete<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<SessionRequest<T>>,
) -> Option<(T::Key, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(SessionRequest::Delete { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}
