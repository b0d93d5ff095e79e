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

//! # lattice-streams
//!
//! `lattice-streams` implements the consuming side of lattice's ordered
//! event streams: a [`SubscriptionManager`] that holds at most one live
//! subscription for its owning unit, and the [`ConsumerCell`] runtime that
//! gives that unit single-threaded cooperative semantics — one mailbox, one
//! task, strictly sequential execution.
//!
//! Stream backends are abstract ([`StreamProvider`] + [`StreamHandle`]) and
//! are injected through a [`StreamProviderRegistry`]; subscribers register a
//! plain three-capability [`StreamObserver`] record rather than a listener
//! hierarchy. Items reach the bound handler in arrival order, a handler
//! failure is isolated to its item, and teardown is idempotent: deactivation
//! always leaves the slot unsubscribed.
//!
//! ```
//! use integration_test_utils::{collecting_handler, MemoryStreamProvider};
//! use lattice_streams::{ConsumerCell, StreamId, StreamProviderRegistry};
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = Arc::new(MemoryStreamProvider::new("halo-streams"));
//! let mut registry: StreamProviderRegistry<i32> = StreamProviderRegistry::new();
//! registry.register(provider.clone());
//!
//! let cell = ConsumerCell::activate("consumer-1", Arc::new(registry));
//! let stream_id = StreamId::new("telemetry", Uuid::new_v4());
//! let (handler, seen) = collecting_handler();
//!
//! cell.subscribe(stream_id.clone(), "halo-streams", handler)
//!     .await
//!     .unwrap();
//! provider.deliver(&stream_id, 10, None).await;
//! provider.deliver(&stream_id, 20, None).await;
//!
//! assert_eq!(cell.items_delivered().await.unwrap(), 2);
//! assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
//!
//! cell.deactivate().await;
//! # });
//! ```
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global
//! subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod consumer_cell;
pub use consumer_cell::{ConsumerCell, ConsumerCellHandle, ConsumerError, ConsumerStats};

mod manager;
pub use manager::{
    Delivery, HandlerError, ItemHandler, SubscribeError, SubscriptionEpoch, SubscriptionManager,
    SubscriptionState, UnsubscribeError,
};

#[doc(hidden)]
pub mod observability;

mod observer;
pub use observer::StreamObserver;

mod provider;
pub use provider::{
    ProviderError, ProviderErrorKind, StreamHandle, StreamProvider, SubscriptionHandle,
};

mod provider_registry;
pub use provider_registry::StreamProviderRegistry;

mod stream_id;
pub use stream_id::{SequenceToken, StreamId};
