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

//! Gateway registry served from a static JSON document of membership rows.
//!
//! Useful for demos and fixed deployments where the gateway set is known
//! ahead of time. The document holds one array of rows in the
//! [`GatewayRecord`] format; it is re-read on every query, so edits to the
//! file show up within the directory client's staleness bound.

use async_trait::async_trait;
use lattice_directory::{
    GatewayQuery, GatewayRecord, RegistryConnection, RegistryConnector, RegistryError,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Dialect name this connector serves; the connection string is the
/// document path.
pub const STATIC_FILE_DIALECT: &str = "static-file";

pub struct StaticFileRegistry {
    document: PathBuf,
}

impl StaticFileRegistry {
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
        }
    }

    fn load_rows(&self) -> Result<Vec<GatewayRecord>, RegistryError> {
        let text = fs::read_to_string(&self.document).map_err(|err| {
            RegistryError::query(format!(
                "unable to read gateway document {}: {err}",
                self.document.display()
            ))
        })?;

        serde_json::from_str(&text).map_err(|err| {
            RegistryError::query(format!(
                "malformed gateway document {}: {err}",
                self.document.display()
            ))
        })
    }
}

#[async_trait]
impl GatewayQuery for StaticFileRegistry {
    async fn gateway_records(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<GatewayRecord>, RegistryError> {
        let rows: Vec<GatewayRecord> = self
            .load_rows()?
            .into_iter()
            .filter(|row| row.cluster_id == cluster_id)
            .collect();
        debug!(
            cluster_id,
            row_count = rows.len(),
            document = %self.document.display(),
            "serving membership rows from document"
        );
        Ok(rows)
    }
}

/// Connector for the `static-file` dialect.
pub struct StaticFileConnector;

#[async_trait]
impl RegistryConnector for StaticFileConnector {
    async fn connect(
        &self,
        connection: &RegistryConnection,
    ) -> Result<Arc<dyn GatewayQuery>, RegistryError> {
        if connection.dialect != STATIC_FILE_DIALECT {
            return Err(RegistryError::connection(format!(
                "unsupported registry dialect: {}",
                connection.dialect
            )));
        }

        let registry = StaticFileRegistry::new(&connection.connection_string);
        // Probe the document once so a misconfigured path fails at
        // initialize rather than on the first fetch.
        registry
            .load_rows()
            .map_err(|err| RegistryError::connection(err.message().to_string()))?;

        Ok(Arc::new(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::{StaticFileConnector, StaticFileRegistry, STATIC_FILE_DIALECT};
    use lattice_directory::{
        GatewayQuery, GatewayStatus, RegistryConnection, RegistryConnector, RegistryErrorKind,
    };

    const GATEWAYS_DOCUMENT: &str = "static-configs/gateways.json";

    fn connection(dialect: &str, connection_string: &str) -> RegistryConnection {
        RegistryConnection {
            dialect: dialect.to_string(),
            connection_string: connection_string.to_string(),
        }
    }

    #[tokio::test]
    async fn serves_only_the_requested_cluster_rows() {
        let registry = StaticFileRegistry::new(GATEWAYS_DOCUMENT);

        let rows = registry
            .gateway_records("cluster-a")
            .await
            .expect("document should parse");

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.cluster_id == "cluster-a"));
        assert_eq!(
            rows.iter()
                .filter(|row| row.status == GatewayStatus::Active)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn unknown_cluster_yields_no_rows() {
        let registry = StaticFileRegistry::new(GATEWAYS_DOCUMENT);

        let rows = registry
            .gateway_records("cluster-z")
            .await
            .expect("document should parse");

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn missing_document_surfaces_a_query_fault() {
        let registry = StaticFileRegistry::new("static-configs/does-not-exist.json");

        let err = registry
            .gateway_records("cluster-a")
            .await
            .expect_err("missing document should fail");

        assert_eq!(err.kind(), RegistryErrorKind::Query);
    }

    #[tokio::test]
    async fn connector_rejects_foreign_dialects() {
        let err = match StaticFileConnector
            .connect(&connection("ado-net", GATEWAYS_DOCUMENT))
            .await
        {
            Ok(_) => panic!("foreign dialect should be rejected"),
            Err(err) => err,
        };

        assert_eq!(err.kind(), RegistryErrorKind::Connection);
    }

    #[tokio::test]
    async fn connector_probes_the_document_at_connect_time() {
        let err = match StaticFileConnector
            .connect(&connection(
                STATIC_FILE_DIALECT,
                "static-configs/does-not-exist.json",
            ))
            .await
        {
            Ok(_) => panic!("missing document should fail the connect"),
            Err(err) => err,
        };

        assert_eq!(err.kind(), RegistryErrorKind::Connection);

        let queries = StaticFileConnector
            .connect(&connection(STATIC_FILE_DIALECT, GATEWAYS_DOCUMENT))
            .await
            .expect("valid document should connect");

        assert_eq!(
            queries
                .gateway_records("cluster-b")
                .await
                .expect("document should parse")
                .len(),
            2
        );
    }
}
