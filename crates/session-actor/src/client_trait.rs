//! # SessionStoreClient Trait
//!
//! A common interface for domain-specific session clients. It supplies default `get` and
//! `discard` methods on top of a wrapped [`SessionClient`].
use crate::{FrameworkError, SessionClient, SessionEntity};
use async_trait::async_trait;

/// Trait for domain clients that wrap a [`SessionClient`] and want the plain keyed
/// operations for free.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl SessionStoreClient<Cart> for CartClient {
///     type Error = CartError;
///
///     fn inner(&self) -> &SessionClient<Cart> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CartError::Unavailable(e.to_string())
///     }
/// }
///
/// // get() and discard() are now available on CartClient.
/// let cart = cart_client.get(session_key).await?;
/// ```
#[async_trait]
pub trait SessionStoreClient<T: SessionEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the wrapped generic client.
    fn inner(&self) -> &SessionClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Snapshot of the entry stored under `key`.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(key).await.map_err(Self::map_error)
    }

    /// Remove the entry stored under `key`, returning it.
    #[tracing::instrument(skip(self))]
    async fn discard(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(key).await.map_err(Self::map_error)
    }
}
