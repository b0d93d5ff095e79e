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
    ProviderError, SequenceToken, StreamHandle, StreamId, StreamObserver, StreamProvider,
    SubscriptionHandle,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

type ObserverTable<T> = Arc<Mutex<HashMap<StreamId, Vec<(SubscriptionHandle, StreamObserver<T>)>>>>;

/// In-process stream provider delivering items to every registered
/// observer, in call order.
pub struct MemoryStreamProvider<T> {
    name: String,
    observers: ObserverTable<T>,
    released: Arc<AtomicUsize>,
}

impl<T: Clone + Send + 'static> MemoryStreamProvider<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            observers: Arc::new(Mutex::new(HashMap::new())),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delivers one item to every observer of `stream_id`.
    pub async fn deliver(&self, stream_id: &StreamId, item: T, token: Option<SequenceToken>) {
        if let Some(observers) = self.observers.lock().await.get(stream_id) {
            for (_, observer) in observers {
                observer.next(item.clone(), token);
            }
        }
    }

    /// Signals stream completion to every observer of `stream_id`.
    pub async fn complete(&self, stream_id: &StreamId) {
        if let Some(observers) = self.observers.lock().await.get(stream_id) {
            for (_, observer) in observers {
                observer.completed();
            }
        }
    }

    /// Reports a stream-level fault to every observer of `stream_id`.
    pub async fn fail(&self, stream_id: &StreamId, err: ProviderError) {
        if let Some(observers) = self.observers.lock().await.get(stream_id) {
            for (_, observer) in observers {
                observer.error(err.clone());
            }
        }
    }

    pub async fn subscriber_count(&self, stream_id: &StreamId) -> usize {
        self.observers
            .lock()
            .await
            .get(stream_id)
            .map_or(0, Vec::len)
    }

    /// Subscriptions released through any handle of this provider.
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }
}

struct MemoryStream<T> {
    stream_id: StreamId,
    observers: ObserverTable<T>,
    released: Arc<AtomicUsize>,
}

#[async_trait]
impl<T: Clone + Send + 'static> StreamHandle<T> for MemoryStream<T> {
    fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }

    async fn subscribe(
        &self,
        observer: StreamObserver<T>,
    ) -> Result<SubscriptionHandle, ProviderError> {
        let handle = SubscriptionHandle::new(self.stream_id.clone());
        self.observers
            .lock()
            .await
            .entry(self.stream_id.clone())
            .or_default()
            .push((handle.clone(), observer));
        debug!(stream_id = %self.stream_id, "registered observer");
        Ok(handle)
    }

    async fn unsubscribe(&self, subscription: &SubscriptionHandle) -> Result<(), ProviderError> {
        let mut observers = self.observers.lock().await;
        if let Some(registered) = observers.get_mut(&self.stream_id) {
            let before = registered.len();
            registered.retain(|(handle, _)| handle != subscription);
            if registered.len() < before {
                self.released.fetch_add(1, Ordering::Relaxed);
                debug!(stream_id = %self.stream_id, "released observer");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> StreamProvider<T> for MemoryStreamProvider<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn stream_handle(
        &self,
        stream_id: &StreamId,
    ) -> Result<Arc<dyn StreamHandle<T>>, ProviderError> {
        Ok(Arc::new(MemoryStream {
            stream_id: stream_id.clone(),
            observers: self.observers.clone(),
            released: self.released.clone(),
        }))
    }
}
