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

use async_trait::async_trait;
use lattice_streams::{
    ProviderError, StreamHandle, StreamId, StreamObserver, StreamProvider, SubscriptionHandle,
};
use std::sync::Arc;
use tracing::debug;

/// Provider double whose observer registrations always fail, for
/// error-path tests.
pub struct FailingStreamProvider {
    name: String,
}

impl FailingStreamProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

struct FailingStream {
    stream_id: StreamId,
}

#[async_trait]
impl<T: Send + 'static> StreamHandle<T> for FailingStream {
    fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }

    async fn subscribe(
        &self,
        _observer: StreamObserver<T>,
    ) -> Result<SubscriptionHandle, ProviderError> {
        debug!(stream_id = %self.stream_id, "failing to register observer");
        Err(ProviderError::subscribe("failing to register observer"))
    }

    async fn unsubscribe(&self, _subscription: &SubscriptionHandle) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[async_trait]
impl<T: Send + 'static> StreamProvider<T> for FailingStreamProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn stream_handle(
        &self,
        stream_id: &StreamId,
    ) -> Result<Arc<dyn StreamHandle<T>>, ProviderError> {
        Ok(Arc::new(FailingStream {
            stream_id: stream_id.clone(),
        }))
    }
}
