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

use lattice_directory::{
    DirectoryConfig, GatewayAddress, GatewayDirectoryClient, RegistryConnection,
};
use registry_static_file::{StaticFileConnector, STATIC_FILE_DIALECT};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn directory_client_serves_the_documented_gateways() {
    let config = DirectoryConfig {
        cluster_id: "cluster-a".to_string(),
        connection: RegistryConnection {
            dialect: STATIC_FILE_DIALECT.to_string(),
            connection_string: "static-configs/gateways.json".to_string(),
        },
        gateway_refresh_period_secs: 60,
    };

    let client = GatewayDirectoryClient::new(Arc::new(StaticFileConnector), &config);
    client.initialize().await.expect("initialize should succeed");

    let snapshot = client
        .fetch_active_gateways(&config.cluster_id)
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.contains(&GatewayAddress::new("gw-1.cluster-a.internal", 30000)));
    assert!(snapshot.contains(&GatewayAddress::new("gw-2.cluster-a.internal", 30000)));
    assert!(!snapshot.contains(&GatewayAddress::new("gw-3.cluster-a.internal", 30000)));
}
