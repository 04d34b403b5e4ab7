//! # Session Actor Server
//!
//! This module defines the `SessionActor`, the task that owns every live session entry.
//! It processes messages sequentially and periodically sweeps out idle entries.

use crate::client::SessionClient;
use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use crate::message::SessionRequest;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Tuning knobs for a [`SessionActor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Capacity of the request channel. When full, client calls wait for space.
    pub buffer_size: usize,
    /// Entries not touched for this long are evicted. `None` keeps entries until deleted.
    pub idle_ttl: Option<Duration>,
    /// How often the idle sweep runs. Ignored when `idle_ttl` is `None`.
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            idle_ttl: Some(Duration::from_secs(30 * 60)),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// A stored entry plus the last time a request touched it.
#[derive(Debug)]
struct Slot<T> {
    entity: T,
    touched: Instant,
}

impl<T> Slot<T> {
    fn new(entity: T) -> Self {
        Self {
            entity,
            touched: Instant::now(),
        }
    }
}

/// The actor that owns all entries of one session type.
///
/// # Architecture Note
/// This struct is the "Server" half. It owns the `store` and the receiving end of the
/// channel, and it is the only code that ever touches the store. Two requests for the
/// same key therefore never race: the second one sees the result of the first.
///
/// # Usage Pattern
///
/// 1.  **Create**: `SessionActor::new(config)` returns the actor and its client.
/// 2.  **Wire**: pass the entity's dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use session_actor::{SessionActor, SessionConfig, SessionEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter { hits: u32 }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
///
/// #[async_trait]
/// impl SessionEntity for Counter {
///     type Key = String;
///     type Action = ();
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<u32, CounterError> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = SessionActor::<Counter>::new(SessionConfig::default());
///     tokio::spawn(actor.run(()));
///
///     let hits = client.upsert("s1".to_string(), ()).await.unwrap();
///     assert_eq!(hits, 1);
/// }
/// ```
pub struct SessionActor<T: SessionEntity> {
    receiver: mpsc::Receiver<SessionRequest<T>>,
    store: HashMap<T::Key, Slot<T>>,
    config: SessionConfig,
}

impl<T: SessionEntity> SessionActor<T> {
    /// Creates a new `SessionActor` and its associated `SessionClient`.
    pub fn new(config: SessionConfig) -> (Self, SessionClient<T>) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            config,
        };
        (actor, SessionClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(
            entity_type,
            idle_ttl_secs = self.config.idle_ttl.map(|ttl| ttl.as_secs()),
            "Session actor started"
        );

        let mut sweep = self.config.idle_ttl.map(|_| {
            let mut interval = time::interval(self.config.sweep_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg, &context, entity_type).await,
                    None => break,
                },
                now = next_sweep(&mut sweep) => {
                    let evicted = self.evict_idle(now);
                    if evicted > 0 {
                        info!(entity_type, evicted, size = self.store.len(), "Evicted idle sessions");
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(&mut self, msg: SessionRequest<T>, context: &T::Context, entity_type: &str) {
        match msg {
            SessionRequest::Get { key, respond_to } => {
                let item = self.store.get_mut(&key).map(|slot| {
                    slot.touched = Instant::now();
                    slot.entity.clone()
                });
                debug!(entity_type, %key, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            SessionRequest::Put {
                key,
                entity,
                respond_to,
            } => {
                debug!(entity_type, %key, ?entity, "Put");
                self.store.insert(key.clone(), Slot::new(entity));
                info!(entity_type, %key, size = self.store.len(), "Stored");
                let _ = respond_to.send(Ok(()));
            }
            SessionRequest::Delete { key, respond_to } => {
                let Some(slot) = self.store.get(&key) else {
                    debug!(entity_type, %key, "Delete of absent session");
                    let _ = respond_to.send(Ok(None));
                    return;
                };
                if let Err(e) = slot.entity.on_close(&key, context).await {
                    warn!(entity_type, %key, error = %e, "on_close failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                let removed = self.store.remove(&key).map(|slot| slot.entity);
                info!(entity_type, %key, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(removed));
            }
            SessionRequest::Action {
                key,
                action,
                respond_to,
            } => {
                debug!(entity_type, %key, ?action, "Action");
                let Some(slot) = self.store.get_mut(&key) else {
                    warn!(entity_type, %key, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(key.to_string())));
                    return;
                };
                slot.touched = Instant::now();
                let result = slot
                    .entity
                    .handle_action(action, context)
                    .await
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                match &result {
                    Ok(_) => info!(entity_type, %key, "Action ok"),
                    Err(e) => warn!(entity_type, %key, error = %e, "Action failed"),
                }
                let _ = respond_to.send(result);
            }
            SessionRequest::Upsert {
                key,
                action,
                respond_to,
            } => {
                debug!(entity_type, %key, ?action, "Upsert");
                if let Some(slot) = self.store.get_mut(&key) {
                    slot.touched = Instant::now();
                    let result = slot
                        .entity
                        .handle_action(action, context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    if let Err(e) = &result {
                        warn!(entity_type, %key, error = %e, "Action failed");
                    }
                    let _ = respond_to.send(result);
                    return;
                }

                let mut entity = T::default();
                if let Err(e) = entity.on_open(&key, context).await {
                    warn!(entity_type, %key, error = %e, "on_open failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                match entity.handle_action(action, context).await {
                    Ok(result) => {
                        self.store.insert(key.clone(), Slot::new(entity));
                        info!(entity_type, %key, size = self.store.len(), "Opened");
                        let _ = respond_to.send(Ok(result));
                    }
                    Err(e) => {
                        warn!(entity_type, %key, error = %e, "Action failed, session not opened");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    }
                }
            }
            SessionRequest::Len { respond_to } => {
                let _ = respond_to.send(Ok(self.store.len()));
            }
        }
    }

    /// Drops every entry idle for at least `idle_ttl` as of `now`. Returns how many went.
    fn evict_idle(&mut self, now: Instant) -> usize {
        let Some(ttl) = self.config.idle_ttl else {
            return 0;
        };
        let before = self.store.len();
        self.store
            .retain(|_, slot| now.saturating_duration_since(slot.touched) < ttl);
        before - self.store.len()
    }
}

/// Resolves on the next sweep tick, or never when eviction is disabled.
async fn next_sweep(sweep: &mut Option<Interval>) -> Instant {
    match sweep {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}
