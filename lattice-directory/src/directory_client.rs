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

//! Bounded-staleness gateway directory client over an abstract registry.

use crate::config::DirectoryConfig;
use crate::observability::events;
use crate::registry::{GatewayQuery, RegistryConnection, RegistryConnector, RegistryError};
use crate::snapshot::DirectorySnapshot;
use arc_swap::ArcSwapOption;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

const COMPONENT: &str = "directory_client";

/// Directory-client failures surfaced to callers.
#[derive(Debug)]
pub enum DirectoryError {
    /// A fetch was attempted before a successful `initialize`.
    NotInitialized,
    /// The registry could not be reached or the connection descriptor is
    /// invalid; fatal to this instance until reinitialized.
    Connection(RegistryError),
    /// A query failed after successful initialization; propagated to the
    /// caller unmodified, never retried here.
    Unavailable(RegistryError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryError::NotInitialized => {
                write!(f, "directory client is not initialized")
            }
            DirectoryError::Connection(err) => {
                write!(f, "unable to establish registry connection: {err}")
            }
            DirectoryError::Unavailable(err) => {
                write!(f, "gateway directory unavailable: {err}")
            }
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DirectoryError::NotInitialized => None,
            DirectoryError::Connection(err) | DirectoryError::Unavailable(err) => Some(err),
        }
    }
}

/// Sized holder so the query trait object can live inside `ArcSwapOption`.
struct RegistryChannel {
    queries: Arc<dyn GatewayQuery>,
}

/// Pull-based view of a cluster's client-facing entry nodes.
///
/// The client owns the connection mechanism; how stale a fetched view may
/// grow is caller-owned policy, bounded by [`max_staleness`](Self::max_staleness).
/// The client is shared infrastructure: fetches take `&self` and are safe
/// under concurrent use by many independent callers.
pub struct GatewayDirectoryClient {
    connection: RegistryConnection,
    max_staleness: Duration,
    connector: Arc<dyn RegistryConnector>,
    channel: ArcSwapOption<RegistryChannel>,
}

impl GatewayDirectoryClient {
    /// Creates an uninitialized client.
    ///
    /// Callers must call [`initialize`](Self::initialize) exactly once
    /// before any fetch.
    pub fn new(connector: Arc<dyn RegistryConnector>, config: &DirectoryConfig) -> Self {
        Self {
            connection: config.connection.clone(),
            max_staleness: config.gateway_refresh_period(),
            connector,
            channel: ArcSwapOption::empty(),
        }
    }

    /// Maximum age callers may let a fetched snapshot reach before
    /// re-fetching. Fixed at construction; enforcement is the caller's.
    pub fn max_staleness(&self) -> Duration {
        self.max_staleness
    }

    /// Always true: callers refresh by polling
    /// [`fetch_active_gateways`](Self::fetch_active_gateways), not by push
    /// notification.
    pub fn is_updatable(&self) -> bool {
        true
    }

    /// Establishes the registry query channel through the injected
    /// connector.
    ///
    /// Not retried internally; a failure leaves the client uninitialized.
    /// A second call replaces the channel.
    pub async fn initialize(&self) -> Result<(), DirectoryError> {
        trace!(
            event = events::DIRECTORY_INIT_CALLED,
            component = COMPONENT,
            dialect = self.connection.dialect.as_str(),
            "initialize called"
        );

        match self.connector.connect(&self.connection).await {
            Ok(queries) => {
                self.channel
                    .store(Some(Arc::new(RegistryChannel { queries })));
                trace!(
                    event = events::DIRECTORY_INIT_OK,
                    component = COMPONENT,
                    "registry query channel established"
                );
                Ok(())
            }
            Err(err) => {
                debug!(
                    event = events::DIRECTORY_INIT_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "unable to establish registry query channel"
                );
                Err(DirectoryError::Connection(err))
            }
        }
    }

    /// Fetches the current active-gateway view for `cluster_id`.
    ///
    /// Returns exactly the addresses of rows with active status in the
    /// requested cluster, whatever the registry handed back. Side-effect
    /// free and safe to call repeatedly; failures surface unmodified, and
    /// retry or stale-view policy belongs to the caller.
    pub async fn fetch_active_gateways(
        &self,
        cluster_id: &str,
    ) -> Result<DirectorySnapshot, DirectoryError> {
        trace!(
            event = events::GATEWAY_FETCH_CALLED,
            component = COMPONENT,
            cluster_id,
            "fetch_active_gateways called"
        );

        let channel = match self.channel.load_full() {
            Some(channel) => channel,
            None => {
                debug!(
                    event = events::GATEWAY_FETCH_UNINITIALIZED,
                    component = COMPONENT,
                    cluster_id,
                    "fetch attempted before initialize"
                );
                return Err(DirectoryError::NotInitialized);
            }
        };

        match channel.queries.gateway_records(cluster_id).await {
            Ok(records) => {
                let snapshot: DirectorySnapshot = records
                    .into_iter()
                    .filter(|record| record.is_active_in(cluster_id))
                    .map(|record| record.address)
                    .collect();
                trace!(
                    event = events::GATEWAY_FETCH_OK,
                    component = COMPONENT,
                    cluster_id,
                    gateway_count = snapshot.len(),
                    "fetched active gateways"
                );
                Ok(snapshot)
            }
            Err(err) => {
                debug!(
                    event = events::GATEWAY_FETCH_FAILED,
                    component = COMPONENT,
                    cluster_id,
                    err = %err,
                    "gateway fetch failed"
                );
                Err(DirectoryError::Unavailable(err))
            }
        }
    }
}
