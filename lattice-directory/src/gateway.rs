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

//! Gateway membership data model shared with registry implementations.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Liveness of one gateway row as recorded in the registry.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    Active,
    Dead,
}

/// Network endpoint of a client-facing entry node.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayAddress {
    pub host: String,
    pub port: u16,
}

impl GatewayAddress {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }
}

impl Display for GatewayAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One membership row returned by a registry query.
///
/// Rows are immutable snapshots: the directory client never mutates or
/// caches them and re-fetches on every query.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayRecord {
    pub cluster_id: String,
    pub address: GatewayAddress,
    pub status: GatewayStatus,
}

impl GatewayRecord {
    /// True when this row names an active gateway of `cluster_id`.
    pub fn is_active_in(&self, cluster_id: &str) -> bool {
        self.status == GatewayStatus::Active && self.cluster_id == cluster_id
    }
}
