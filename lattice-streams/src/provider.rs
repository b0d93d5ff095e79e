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

//! Abstract stream-provider boundary: stream handles and the raw
//! subscribe/unsubscribe primitives beneath the subscription manager.

use crate::observer::StreamObserver;
use crate::stream_id::StreamId;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Failure classes at the provider boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderErrorKind {
    Handle,
    Subscribe,
    Unsubscribe,
}

/// Provider-specific fault carried across the boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn handle(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Handle,
            message: message.into(),
        }
    }

    pub fn subscribe(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Subscribe,
            message: message.into(),
        }
    }

    pub fn unsubscribe(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Unsubscribe,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ProviderErrorKind::Handle => {
                write!(f, "unable to obtain stream handle: {}", self.message)
            }
            ProviderErrorKind::Subscribe => {
                write!(f, "unable to register subscription: {}", self.message)
            }
            ProviderErrorKind::Unsubscribe => {
                write!(f, "unable to release subscription: {}", self.message)
            }
        }
    }
}

impl Error for ProviderError {}

/// Opaque identity of one live subscription, minted by the provider when
/// an observer registration is confirmed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionHandle {
    id: Uuid,
    stream_id: StreamId,
}

impl SubscriptionHandle {
    pub fn new(stream_id: StreamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            stream_id,
        }
    }

    pub fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }
}

impl Display for SubscriptionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.stream_id, self.id)
    }
}

/// One named ordered stream as exposed by a provider.
#[async_trait]
pub trait StreamHandle<T>: Send + Sync {
    fn stream_id(&self) -> &StreamId;

    /// Registers `observer`; the subscription is live once this returns.
    async fn subscribe(
        &self,
        observer: StreamObserver<T>,
    ) -> Result<SubscriptionHandle, ProviderError>;

    /// Releases one previously-registered subscription.
    async fn unsubscribe(&self, subscription: &SubscriptionHandle) -> Result<(), ProviderError>;
}

/// Supplies stream handles for one provider backend.
#[async_trait]
pub trait StreamProvider<T>: Send + Sync {
    /// Name units use to select this provider on subscribe.
    fn name(&self) -> &str;

    async fn stream_handle(
        &self,
        stream_id: &StreamId,
    ) -> Result<Arc<dyn StreamHandle<T>>, ProviderError>;
}
