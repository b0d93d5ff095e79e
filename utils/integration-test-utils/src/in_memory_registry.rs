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
use lattice_directory::{
    GatewayQuery, GatewayRecord, RegistryConnection, RegistryConnector, RegistryError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Registry double backed by a plain row list.
///
/// Returns every row recorded for the requested cluster, dead ones
/// included, so tests exercise the directory client's active filter.
pub struct InMemoryRegistry {
    rows: Mutex<Vec<GatewayRecord>>,
    fail_queries: AtomicBool,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_queries: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, record: GatewayRecord) {
        self.rows.lock().await.push(record);
    }

    /// Makes every subsequent query fail until reset, simulating a
    /// transient store fault.
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::Relaxed);
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayQuery for InMemoryRegistry {
    async fn gateway_records(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<GatewayRecord>, RegistryError> {
        if self.fail_queries.load(Ordering::Relaxed) {
            return Err(RegistryError::query("registry offline (simulated)"));
        }

        let rows: Vec<GatewayRecord> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.cluster_id == cluster_id)
            .cloned()
            .collect();
        debug!(cluster_id, row_count = rows.len(), "serving membership rows");
        Ok(rows)
    }
}

/// Connector double wiring a shared in-memory registry, optionally
/// refusing every connection attempt.
pub struct InMemoryConnector {
    registry: Arc<InMemoryRegistry>,
    refuse: bool,
}

impl InMemoryConnector {
    pub fn new(registry: Arc<InMemoryRegistry>) -> Self {
        Self {
            registry,
            refuse: false,
        }
    }

    pub fn refusing(registry: Arc<InMemoryRegistry>) -> Self {
        Self {
            registry,
            refuse: true,
        }
    }
}

#[async_trait]
impl RegistryConnector for InMemoryConnector {
    async fn connect(
        &self,
        connection: &RegistryConnection,
    ) -> Result<Arc<dyn GatewayQuery>, RegistryError> {
        if self.refuse {
            return Err(RegistryError::connection(format!(
                "refusing connection for dialect {}",
                connection.dialect
            )));
        }
        Ok(self.registry.clone())
    }
}
