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

//! Directory-client configuration consumed at construction.

use crate::registry::RegistryConnection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    pub cluster_id: String,
    pub connection: RegistryConnection,
    pub gateway_refresh_period_secs: u64,
}

impl DirectoryConfig {
    /// Parses a JSON5 configuration document.
    pub fn from_json5(text: &str) -> Result<Self, json5::Error> {
        json5::from_str(text)
    }

    /// Refresh period callers must honor to keep their cached view within
    /// staleness tolerance. Becomes the client's staleness bound.
    pub fn gateway_refresh_period(&self) -> Duration {
        Duration::from_secs(self.gateway_refresh_period_secs)
    }
}
