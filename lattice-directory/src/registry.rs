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

//! Abstract boundary to the backing gateway-membership registry.

use crate::gateway::GatewayRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Connection descriptor consumed once at directory-client initialization.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConnection {
    pub dialect: String,
    pub connection_string: String,
}

/// Failure classes at the registry boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegistryErrorKind {
    Connection,
    Query,
}

/// Store-specific fault carried across the registry boundary.
///
/// Implementations map whatever their store raises into one of the two
/// kinds; the directory client decides how each kind surfaces to callers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryError {
    kind: RegistryErrorKind,
    message: String,
}

impl RegistryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: RegistryErrorKind::Connection,
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self {
            kind: RegistryErrorKind::Query,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RegistryErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            RegistryErrorKind::Connection => {
                write!(f, "registry connection fault: {}", self.message)
            }
            RegistryErrorKind::Query => write!(f, "registry query fault: {}", self.message),
        }
    }
}

impl Error for RegistryError {}

/// Read interface over the cluster-membership store.
#[async_trait]
pub trait GatewayQuery: Send + Sync {
    /// Returns the membership rows recorded for one cluster.
    ///
    /// Implementations may include dead rows; the directory client applies
    /// the active-status filter regardless.
    async fn gateway_records(&self, cluster_id: &str)
        -> Result<Vec<GatewayRecord>, RegistryError>;
}

/// Establishes query channels for one registry dialect.
#[async_trait]
pub trait RegistryConnector: Send + Sync {
    async fn connect(
        &self,
        connection: &RegistryConnection,
    ) -> Result<Arc<dyn GatewayQuery>, RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::{RegistryError, RegistryErrorKind};
    use std::error::Error;

    #[test]
    fn error_display_names_the_failing_side() {
        let connection = RegistryError::connection("dns lookup failed");
        let query = RegistryError::query("relation gateways does not exist");

        assert_eq!(
            connection.to_string(),
            "registry connection fault: dns lookup failed"
        );
        assert_eq!(
            query.to_string(),
            "registry query fault: relation gateways does not exist"
        );
        assert_eq!(connection.kind(), RegistryErrorKind::Connection);
        assert_eq!(query.kind(), RegistryErrorKind::Query);
        assert!(connection.source().is_none());
    }
}
