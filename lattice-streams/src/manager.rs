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

//! Single-subscription lifecycle state machine for one consuming unit.

use crate::observability::events;
use crate::observer::StreamObserver;
use crate::provider::{ProviderError, StreamHandle, SubscriptionHandle};
use crate::provider_registry::StreamProviderRegistry;
use crate::stream_id::{SequenceToken, StreamId};
use futures::future::BoxFuture;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

const COMPONENT: &str = "subscription_manager";

pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Per-subscription item callback. Invoked once per delivered item, in
/// arrival order; a failure is isolated to that item.
pub type ItemHandler<T> =
    Box<dyn FnMut(T) -> BoxFuture<'static, Result<(), HandlerError>> + Send>;

/// Lifecycle of the unit's single subscription slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribing,
    Subscribed,
    Unsubscribing,
}

impl Display for SubscriptionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionState::Unsubscribed => write!(f, "unsubscribed"),
            SubscriptionState::Subscribing => write!(f, "subscribing"),
            SubscriptionState::Subscribed => write!(f, "subscribed"),
            SubscriptionState::Unsubscribing => write!(f, "unsubscribing"),
        }
    }
}

/// Identity of one subscription establishment.
///
/// Every delivery carries the epoch it was produced under; deliveries with
/// an older epoch are dropped without counting.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionEpoch(Uuid);

impl SubscriptionEpoch {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SubscriptionEpoch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One provider upcall queued for the owning unit.
#[derive(Debug)]
pub struct Delivery<T> {
    pub epoch: SubscriptionEpoch,
    pub item: T,
    pub token: Option<SequenceToken>,
}

/// Subscribe failures surfaced to the owning unit.
#[derive(Debug)]
pub enum SubscribeError {
    /// The provider name was empty or blank; rejected before any provider
    /// interaction.
    EmptyProviderName,
    UnknownProvider(String),
    Provider(ProviderError),
}

impl Display for SubscribeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscribeError::EmptyProviderName => {
                write!(f, "stream provider name must not be empty")
            }
            SubscribeError::UnknownProvider(name) => {
                write!(f, "no stream provider registered under name: {name}")
            }
            SubscribeError::Provider(err) => {
                write!(f, "stream provider rejected the subscription: {err}")
            }
        }
    }
}

impl Error for SubscribeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SubscribeError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

/// Unsubscribe failures. The slot still finishes unsubscribed.
#[derive(Debug)]
pub enum UnsubscribeError {
    Provider(ProviderError),
}

impl Display for UnsubscribeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsubscribeError::Provider(err) => {
                write!(f, "stream provider failed to release the subscription: {err}")
            }
        }
    }
}

impl Error for UnsubscribeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UnsubscribeError::Provider(err) => Some(err),
        }
    }
}

struct ActiveSubscription<T> {
    epoch: SubscriptionEpoch,
    provider_name: String,
    stream: Arc<dyn StreamHandle<T>>,
    handle: SubscriptionHandle,
}

/// At-most-one live subscription for one stateful unit.
///
/// The manager carries no locking: the owning unit executes with
/// single-threaded cooperative semantics, so every method runs serialized
/// with all other calls on the same unit.
pub struct SubscriptionManager<T> {
    providers: Arc<StreamProviderRegistry<T>>,
    state: SubscriptionState,
    active: Option<ActiveSubscription<T>>,
    items_delivered: u64,
    delivery_faults: u64,
    stream_faults: u64,
}

impl<T> SubscriptionManager<T> {
    pub fn new(providers: Arc<StreamProviderRegistry<T>>) -> Self {
        Self {
            providers,
            state: SubscriptionState::Unsubscribed,
            active: None,
            items_delivered: 0,
            delivery_faults: 0,
            stream_faults: 0,
        }
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    /// Items accepted and handed to the handler under the current
    /// subscription. Frozen once the slot is unsubscribed; reset to zero by
    /// the next successful subscribe.
    pub fn items_delivered(&self) -> u64 {
        self.items_delivered
    }

    /// Handler failures isolated by the pump under the current
    /// subscription.
    pub fn delivery_faults(&self) -> u64 {
        self.delivery_faults
    }

    /// Stream-level faults reported by the provider under the current
    /// subscription.
    pub fn stream_faults(&self) -> u64 {
        self.stream_faults
    }

    /// Establishes the unit's single live subscription.
    ///
    /// Any existing live subscription is torn down first; a release fault
    /// during that teardown is logged but does not abort the new
    /// subscribe. The slot transitions to `Subscribed` only after the
    /// provider confirms the observer registration, and the delivery
    /// counters restart at zero.
    pub async fn subscribe<F>(
        &mut self,
        stream_id: StreamId,
        provider_name: &str,
        observer_factory: F,
    ) -> Result<SubscriptionEpoch, SubscribeError>
    where
        F: FnOnce(SubscriptionEpoch) -> StreamObserver<T>,
    {
        if provider_name.trim().is_empty() {
            return Err(SubscribeError::EmptyProviderName);
        }

        if matches!(
            self.state,
            SubscriptionState::Subscribed | SubscriptionState::Subscribing
        ) {
            debug!(
                event = events::SUBSCRIPTION_TEARDOWN_FORCED,
                component = COMPONENT,
                stream_id = %stream_id,
                "live subscription being replaced; tearing the previous one down first"
            );
            if let Err(err) = self.unsubscribe().await {
                warn!(
                    event = events::SUBSCRIPTION_RELEASE_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "previous subscription release failed during replacement"
                );
            }
        }

        let provider = match self.providers.resolve(provider_name) {
            Some(provider) => provider,
            None => return Err(SubscribeError::UnknownProvider(provider_name.to_string())),
        };

        self.state = SubscriptionState::Subscribing;
        debug!(
            event = events::SUBSCRIBE_START,
            component = COMPONENT,
            stream_id = %stream_id,
            provider_name,
            "subscribing"
        );

        let stream = match provider.stream_handle(&stream_id).await {
            Ok(stream) => stream,
            Err(err) => {
                self.state = SubscriptionState::Unsubscribed;
                debug!(
                    event = events::SUBSCRIBE_FAILED,
                    component = COMPONENT,
                    stream_id = %stream_id,
                    provider_name,
                    err = %err,
                    "provider could not supply a stream handle"
                );
                return Err(SubscribeError::Provider(err));
            }
        };

        let epoch = SubscriptionEpoch::fresh();
        let handle = match stream.subscribe(observer_factory(epoch)).await {
            Ok(handle) => handle,
            Err(err) => {
                self.state = SubscriptionState::Unsubscribed;
                debug!(
                    event = events::SUBSCRIBE_FAILED,
                    component = COMPONENT,
                    stream_id = %stream_id,
                    provider_name,
                    err = %err,
                    "provider rejected the observer registration"
                );
                return Err(SubscribeError::Provider(err));
            }
        };

        self.items_delivered = 0;
        self.delivery_faults = 0;
        self.stream_faults = 0;
        self.active = Some(ActiveSubscription {
            epoch,
            provider_name: provider_name.to_string(),
            stream,
            handle,
        });
        self.state = SubscriptionState::Subscribed;
        debug!(
            event = events::SUBSCRIBE_OK,
            component = COMPONENT,
            stream_id = %stream_id,
            provider_name,
            epoch = %epoch,
            "subscribed"
        );
        Ok(epoch)
    }

    /// Delivers one queued provider upcall to `handler`.
    ///
    /// Stale deliveries — an older epoch, or arriving once the slot is no
    /// longer subscribed — are dropped without touching the counter. A
    /// handler failure is isolated to its item: counted, logged, never
    /// fatal to the pump or the subscription.
    pub async fn deliver(&mut self, delivery: Delivery<T>, handler: &mut ItemHandler<T>) {
        let live = self.state == SubscriptionState::Subscribed
            && self
                .active
                .as_ref()
                .is_some_and(|active| active.epoch == delivery.epoch);
        if !live {
            debug!(
                event = events::DELIVERY_STALE_DROPPED,
                component = COMPONENT,
                state = %self.state,
                "dropping stale delivery"
            );
            return;
        }

        self.items_delivered += 1;
        trace!(
            event = events::DELIVERY_ACCEPTED,
            component = COMPONENT,
            items_delivered = self.items_delivered,
            sequence = ?delivery.token,
            "item delivered"
        );

        if let Err(err) = (handler)(delivery.item).await {
            self.delivery_faults += 1;
            warn!(
                event = events::DELIVERY_HANDLER_FAILED,
                component = COMPONENT,
                items_delivered = self.items_delivered,
                delivery_faults = self.delivery_faults,
                err = %err,
                "item handler failed; fault isolated to this item"
            );
        }
    }

    /// Releases the unit's subscription, if any.
    ///
    /// Idempotent: repeated calls are successful no-ops. The slot always
    /// finishes `Unsubscribed` with the stream reference cleared — the
    /// handle is released at most once even when the provider reports a
    /// fault, which is still surfaced to the caller.
    pub async fn unsubscribe(&mut self) -> Result<(), UnsubscribeError> {
        let active = match self.active.take() {
            Some(active) => active,
            None => {
                self.state = SubscriptionState::Unsubscribed;
                debug!(
                    event = events::UNSUBSCRIBE_NOOP,
                    component = COMPONENT,
                    "unsubscribe on an unsubscribed slot"
                );
                return Ok(());
            }
        };

        self.state = SubscriptionState::Unsubscribing;
        debug!(
            event = events::UNSUBSCRIBE_START,
            component = COMPONENT,
            provider_name = active.provider_name.as_str(),
            epoch = %active.epoch,
            "releasing subscription"
        );

        let released = active.stream.unsubscribe(&active.handle).await;
        self.state = SubscriptionState::Unsubscribed;

        match released {
            Ok(()) => {
                debug!(
                    event = events::UNSUBSCRIBE_OK,
                    component = COMPONENT,
                    epoch = %active.epoch,
                    "subscription released"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::SUBSCRIPTION_RELEASE_FAILED,
                    component = COMPONENT,
                    epoch = %active.epoch,
                    err = %err,
                    "provider release failed; slot is unsubscribed regardless"
                );
                Err(UnsubscribeError::Provider(err))
            }
        }
    }

    /// Records a completion upcall. The subscription stays registered; a
    /// completed stream simply delivers nothing further.
    pub fn stream_completed(&mut self, epoch: SubscriptionEpoch) {
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.epoch == epoch)
        {
            debug!(
                event = events::STREAM_COMPLETED,
                component = COMPONENT,
                epoch = %epoch,
                "stream completed"
            );
        }
    }

    /// Records a stream-level fault upcall without tearing down the
    /// subscription; observable through [`stream_faults`](Self::stream_faults).
    pub fn stream_error(&mut self, epoch: SubscriptionEpoch, err: ProviderError) {
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.epoch == epoch)
        {
            self.stream_faults += 1;
            warn!(
                event = events::STREAM_ERROR,
                component = COMPONENT,
                epoch = %epoch,
                stream_faults = self.stream_faults,
                err = %err,
                "stream-level error reported"
            );
        }
    }
}
