/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Consumer-cell runtime: one mailbox, one task, strictly sequential
//! execution of everything that touches the unit's state.

use crate::manager::{
    Delivery, ItemHandler, SubscribeError, SubscriptionEpoch, SubscriptionManager,
    SubscriptionState, UnsubscribeError,
};
use crate::observability::events;
use crate::observer::StreamObserver;
use crate::provider::ProviderError;
use crate::provider_registry::StreamProviderRegistry;
use crate::stream_id::StreamId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

const COMPONENT: &str = "consumer_cell";

/// Handle-level failures for calls into a consumer cell.
#[derive(Debug)]
pub enum ConsumerError {
    /// The cell task has deactivated; this handle is permanently dead.
    CellStopped,
    Subscribe(SubscribeError),
    Unsubscribe(UnsubscribeError),
}

impl Display for ConsumerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumerError::CellStopped => write!(f, "consumer cell is stopped"),
            ConsumerError::Subscribe(err) => write!(f, "subscribe failed: {err}"),
            ConsumerError::Unsubscribe(err) => write!(f, "unsubscribe failed: {err}"),
        }
    }
}

impl Error for ConsumerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConsumerError::CellStopped => None,
            ConsumerError::Subscribe(err) => Some(err),
            ConsumerError::Unsubscribe(err) => Some(err),
        }
    }
}

/// One-shot observable snapshot of a cell's subscription slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConsumerStats {
    pub state: SubscriptionState,
    pub items_delivered: u64,
    pub delivery_faults: u64,
    pub stream_faults: u64,
}

enum Command<T> {
    Subscribe {
        stream_id: StreamId,
        provider_name: String,
        handler: ItemHandler<T>,
        reply: oneshot::Sender<Result<(), SubscribeError>>,
    },
    Unsubscribe {
        reply: oneshot::Sender<Result<(), UnsubscribeError>>,
    },
    ItemsDelivered {
        reply: oneshot::Sender<u64>,
    },
    Stats {
        reply: oneshot::Sender<ConsumerStats>,
    },
    Deliver(Delivery<T>),
    StreamCompleted {
        epoch: SubscriptionEpoch,
    },
    StreamError {
        epoch: SubscriptionEpoch,
        error: ProviderError,
    },
    Deactivate {
        reply: oneshot::Sender<()>,
    },
}

/// Handle through which the rest of the system talks to one consumer cell.
///
/// Every call enqueues a command into the cell's mailbox; the cell task
/// executes commands strictly in order, which is what gives the unit its
/// no-lock mutual exclusion. Because provider upcalls share the same
/// mailbox, a query enqueued after a delivery always observes it.
pub struct ConsumerCellHandle<T> {
    name: Arc<String>,
    commands: mpsc::UnboundedSender<Command<T>>,
}

impl<T> Clone for ConsumerCellHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            commands: self.commands.clone(),
        }
    }
}

/// Activation entry point for consumer cells.
pub struct ConsumerCell;

impl ConsumerCell {
    /// Activation hook: spawns the cell task with a fresh subscription slot
    /// (counter at zero) and returns its handle.
    pub fn activate<T: Send + 'static>(
        name: &str,
        providers: Arc<StreamProviderRegistry<T>>,
    ) -> ConsumerCellHandle<T> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let cell_name = Arc::new(name.to_string());
        let manager = SubscriptionManager::new(providers);

        debug!(
            event = events::CELL_ACTIVATED,
            component = COMPONENT,
            cell = name,
            "consumer cell activated"
        );
        tokio::spawn(run_cell(
            cell_name.clone(),
            manager,
            commands_tx.downgrade(),
            commands_rx,
        ));

        ConsumerCellHandle {
            name: cell_name,
            commands: commands_tx,
        }
    }
}

impl<T: Send + 'static> ConsumerCellHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Establishes the cell's single live subscription, replacing any
    /// existing one, and binds `handler` to it.
    pub async fn subscribe(
        &self,
        stream_id: StreamId,
        provider_name: &str,
        handler: ItemHandler<T>,
    ) -> Result<(), ConsumerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Subscribe {
                stream_id,
                provider_name: provider_name.to_string(),
                handler,
                reply: reply_tx,
            })
            .map_err(|_| ConsumerError::CellStopped)?;

        match reply_rx.await {
            Ok(result) => result.map_err(ConsumerError::Subscribe),
            Err(_) => Err(ConsumerError::CellStopped),
        }
    }

    /// Releases the cell's subscription; a no-op when none is live.
    pub async fn unsubscribe(&self) -> Result<(), ConsumerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Unsubscribe { reply: reply_tx })
            .map_err(|_| ConsumerError::CellStopped)?;

        match reply_rx.await {
            Ok(result) => result.map_err(ConsumerError::Unsubscribe),
            Err(_) => Err(ConsumerError::CellStopped),
        }
    }

    /// Items delivered under the current subscription. Pure query.
    pub async fn items_delivered(&self) -> Result<u64, ConsumerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::ItemsDelivered { reply: reply_tx })
            .map_err(|_| ConsumerError::CellStopped)?;

        reply_rx.await.map_err(|_| ConsumerError::CellStopped)
    }

    /// Snapshot of the slot's state and counters. Pure query.
    pub async fn stats(&self) -> Result<ConsumerStats, ConsumerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Stats { reply: reply_tx })
            .map_err(|_| ConsumerError::CellStopped)?;

        reply_rx.await.map_err(|_| ConsumerError::CellStopped)
    }

    /// Deactivation hook: drives teardown to completion and stops the cell
    /// task.
    ///
    /// Returns only once the slot is `Unsubscribed`; a release fault during
    /// teardown is logged, never a partial exit. Deactivating a cell that
    /// never subscribed, or that is already stopped, succeeds.
    pub async fn deactivate(&self) {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .commands
            .send(Command::Deactivate { reply: reply_tx })
            .is_err()
        {
            return;
        }
        let _ = reply_rx.await;
    }
}

/// Builds the observer whose capabilities enqueue provider upcalls into the
/// cell mailbox. Upcalls arriving after the cell stopped fail to enqueue
/// and are dropped; upcalls from a replaced subscription are dropped later
/// by the manager's epoch guard.
fn observer_for<T: Send + 'static>(
    mailbox: mpsc::WeakUnboundedSender<Command<T>>,
    epoch: SubscriptionEpoch,
) -> StreamObserver<T> {
    let next_mailbox = mailbox.clone();
    let completed_mailbox = mailbox.clone();
    let error_mailbox = mailbox;

    StreamObserver::new(
        move |item, token| {
            if let Some(commands) = next_mailbox.upgrade() {
                let _ = commands.send(Command::Deliver(Delivery { epoch, item, token }));
            }
        },
        move || {
            if let Some(commands) = completed_mailbox.upgrade() {
                let _ = commands.send(Command::StreamCompleted { epoch });
            }
        },
        move |error| {
            if let Some(commands) = error_mailbox.upgrade() {
                let _ = commands.send(Command::StreamError { epoch, error });
            }
        },
    )
}

async fn run_cell<T: Send + 'static>(
    name: Arc<String>,
    mut manager: SubscriptionManager<T>,
    observer_mailbox: mpsc::WeakUnboundedSender<Command<T>>,
    mut commands: mpsc::UnboundedReceiver<Command<T>>,
) {
    let mut handler: Option<ItemHandler<T>> = None;

    while let Some(command) = commands.recv().await {
        match command {
            Command::Subscribe {
                stream_id,
                provider_name,
                handler: next_handler,
                reply,
            } => {
                let mailbox = observer_mailbox.clone();
                let result = manager
                    .subscribe(stream_id, &provider_name, |epoch| {
                        observer_for(mailbox, epoch)
                    })
                    .await;
                if result.is_ok() {
                    handler = Some(next_handler);
                }
                let _ = reply.send(result.map(|_| ()));
            }
            Command::Unsubscribe { reply } => {
                let _ = reply.send(manager.unsubscribe().await);
            }
            Command::ItemsDelivered { reply } => {
                let _ = reply.send(manager.items_delivered());
            }
            Command::Stats { reply } => {
                let _ = reply.send(ConsumerStats {
                    state: manager.state(),
                    items_delivered: manager.items_delivered(),
                    delivery_faults: manager.delivery_faults(),
                    stream_faults: manager.stream_faults(),
                });
            }
            Command::Deliver(delivery) => {
                if let Some(handler) = handler.as_mut() {
                    manager.deliver(delivery, handler).await;
                }
            }
            Command::StreamCompleted { epoch } => manager.stream_completed(epoch),
            Command::StreamError { epoch, error } => manager.stream_error(epoch, error),
            Command::Deactivate { reply } => {
                release_on_teardown(&name, &mut manager).await;
                debug!(
                    event = events::CELL_DEACTIVATED,
                    component = COMPONENT,
                    cell = name.as_str(),
                    "consumer cell deactivated"
                );
                let _ = reply.send(());
                return;
            }
        }
    }

    // Every handle dropped without an explicit deactivation; release any
    // live subscription before the task ends.
    release_on_teardown(&name, &mut manager).await;
    debug!(
        event = events::CELL_DEACTIVATED,
        component = COMPONENT,
        cell = name.as_str(),
        "consumer cell deactivated"
    );
}

async fn release_on_teardown<T>(name: &Arc<String>, manager: &mut SubscriptionManager<T>) {
    if let Err(err) = manager.unsubscribe().await {
        warn!(
            event = events::CELL_TEARDOWN_RELEASE_FAILED,
            component = COMPONENT,
            cell = name.as_str(),
            err = %err,
            "provider release failed during deactivation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsumerCell, ConsumerError};
    use crate::manager::{HandlerError, ItemHandler, SubscriptionState};
    use crate::observer::StreamObserver;
    use crate::provider::{ProviderError, StreamHandle, StreamProvider, SubscriptionHandle};
    use crate::provider_registry::StreamProviderRegistry;
    use crate::stream_id::StreamId;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Mutex as AsyncMutex;
    use uuid::Uuid;

    struct SharedStream {
        stream_id: StreamId,
        observers: Arc<AsyncMutex<Vec<(SubscriptionHandle, StreamObserver<u32>)>>>,
    }

    #[async_trait]
    impl StreamHandle<u32> for SharedStream {
        fn stream_id(&self) -> &StreamId {
            &self.stream_id
        }

        async fn subscribe(
            &self,
            observer: StreamObserver<u32>,
        ) -> Result<SubscriptionHandle, ProviderError> {
            let handle = SubscriptionHandle::new(self.stream_id.clone());
            self.observers.lock().await.push((handle.clone(), observer));
            Ok(handle)
        }

        async fn unsubscribe(
            &self,
            subscription: &SubscriptionHandle,
        ) -> Result<(), ProviderError> {
            self.observers
                .lock()
                .await
                .retain(|(handle, _)| handle != subscription);
            Ok(())
        }
    }

    struct SharedProvider {
        name: String,
        observers: Arc<AsyncMutex<Vec<(SubscriptionHandle, StreamObserver<u32>)>>>,
    }

    impl SharedProvider {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                observers: Arc::new(AsyncMutex::new(Vec::new())),
            }
        }

        async fn push(&self, item: u32) {
            for (_, observer) in self.observers.lock().await.iter() {
                observer.next(item, None);
            }
        }
    }

    #[async_trait]
    impl StreamProvider<u32> for SharedProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn stream_handle(
            &self,
            stream_id: &StreamId,
        ) -> Result<Arc<dyn StreamHandle<u32>>, ProviderError> {
            Ok(Arc::new(SharedStream {
                stream_id: stream_id.clone(),
                observers: self.observers.clone(),
            }))
        }
    }

    fn collecting_handler() -> (ItemHandler<u32>, Arc<Mutex<Vec<u32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: ItemHandler<u32> = Box::new(move |item| {
            let sink = sink.clone();
            Box::pin(async move {
                sink.lock().expect("collector lock").push(item);
                Ok::<(), HandlerError>(())
            })
        });
        (handler, seen)
    }

    fn registry_with(provider: Arc<SharedProvider>) -> Arc<StreamProviderRegistry<u32>> {
        let mut registry = StreamProviderRegistry::new();
        registry.register(provider);
        Arc::new(registry)
    }

    #[tokio::test]
    async fn commands_and_deliveries_are_processed_in_enqueue_order() {
        let provider = Arc::new(SharedProvider::new("halo-streams"));
        let cell = ConsumerCell::activate("cell-1", registry_with(provider.clone()));
        let (handler, seen) = collecting_handler();

        cell.subscribe(
            StreamId::new("telemetry", Uuid::new_v4()),
            "halo-streams",
            handler,
        )
        .await
        .expect("subscribe should succeed");

        provider.push(10).await;
        provider.push(20).await;

        // The query rides the same mailbox as the deliveries, so it
        // observes both of them.
        assert_eq!(
            cell.items_delivered().await.expect("cell should answer"),
            2
        );
        assert_eq!(*seen.lock().expect("collector lock"), vec![10, 20]);

        cell.deactivate().await;
    }

    #[tokio::test]
    async fn deactivated_cell_rejects_further_calls() {
        let provider = Arc::new(SharedProvider::new("halo-streams"));
        let cell = ConsumerCell::activate("cell-1", registry_with(provider));

        cell.deactivate().await;
        // A second deactivation is a successful no-op.
        cell.deactivate().await;

        let err = cell
            .items_delivered()
            .await
            .expect_err("stopped cell should reject queries");
        assert!(matches!(err, ConsumerError::CellStopped));
    }

    #[tokio::test]
    async fn stats_report_the_slot_state() {
        let provider = Arc::new(SharedProvider::new("halo-streams"));
        let cell = ConsumerCell::activate("cell-1", registry_with(provider));
        let (handler, _seen) = collecting_handler();

        let before = cell.stats().await.expect("cell should answer");
        assert_eq!(before.state, SubscriptionState::Unsubscribed);

        cell.subscribe(
            StreamId::new("telemetry", Uuid::new_v4()),
            "halo-streams",
            handler,
        )
        .await
        .expect("subscribe should succeed");

        let after = cell.stats().await.expect("cell should answer");
        assert_eq!(after.state, SubscriptionState::Subscribed);
        assert_eq!(after.items_delivered, 0);

        cell.deactivate().await;
    }
}
