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

use integration_test_utils::{init_logging, InMemoryConnector, InMemoryRegistry};
use lattice_directory::{
    DirectoryConfig, DirectoryError, GatewayAddress, GatewayDirectoryClient, GatewayRecord,
    GatewayStatus, RegistryConnection,
};
use std::sync::Arc;
use std::time::Duration;

fn config() -> DirectoryConfig {
    DirectoryConfig {
        cluster_id: "cluster-a".to_string(),
        connection: RegistryConnection {
            dialect: "in-memory".to_string(),
            connection_string: "rows".to_string(),
        },
        gateway_refresh_period_secs: 60,
    }
}

fn row(cluster_id: &str, host: &str, status: GatewayStatus) -> GatewayRecord {
    GatewayRecord {
        cluster_id: cluster_id.to_string(),
        address: GatewayAddress::new(host, 30000),
        status,
    }
}

async fn seeded_registry() -> Arc<InMemoryRegistry> {
    let registry = Arc::new(InMemoryRegistry::new());
    registry
        .insert(row("cluster-a", "gw-1.cluster-a", GatewayStatus::Active))
        .await;
    registry
        .insert(row("cluster-a", "gw-2.cluster-a", GatewayStatus::Active))
        .await;
    registry
        .insert(row("cluster-a", "gw-3.cluster-a", GatewayStatus::Dead))
        .await;
    registry
        .insert(row("cluster-b", "gw-1.cluster-b", GatewayStatus::Active))
        .await;
    registry
        .insert(row("cluster-b", "gw-2.cluster-b", GatewayStatus::Active))
        .await;
    registry
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_returns_exactly_the_active_rows_of_the_requested_cluster() {
    init_logging();

    let registry = seeded_registry().await;
    let config = config();
    let client =
        GatewayDirectoryClient::new(Arc::new(InMemoryConnector::new(registry)), &config);
    client.initialize().await.expect("initialize should succeed");

    let cluster_a = client
        .fetch_active_gateways(&config.cluster_id)
        .await
        .expect("fetch should succeed");
    assert_eq!(cluster_a.len(), 2);
    assert!(cluster_a.contains(&GatewayAddress::new("gw-1.cluster-a", 30000)));
    assert!(cluster_a.contains(&GatewayAddress::new("gw-2.cluster-a", 30000)));
    assert!(!cluster_a.contains(&GatewayAddress::new("gw-3.cluster-a", 30000)));

    let cluster_b = client
        .fetch_active_gateways("cluster-b")
        .await
        .expect("fetch should succeed");
    assert_eq!(cluster_b.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn staleness_bound_is_fixed_at_construction() {
    init_logging();

    let registry = Arc::new(InMemoryRegistry::new());
    let client =
        GatewayDirectoryClient::new(Arc::new(InMemoryConnector::new(registry)), &config());

    assert_eq!(client.max_staleness(), Duration::from_secs(60));
    assert!(client.is_updatable());
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_connection_leaves_the_client_uninitialized() {
    init_logging();

    let registry = Arc::new(InMemoryRegistry::new());
    let client =
        GatewayDirectoryClient::new(Arc::new(InMemoryConnector::refusing(registry)), &config());

    let init_err = client
        .initialize()
        .await
        .expect_err("refused connection should fail the initialize");
    assert!(matches!(init_err, DirectoryError::Connection(_)));

    let fetch_err = client
        .fetch_active_gateways("cluster-a")
        .await
        .expect_err("fetch should still report the missing channel");
    assert!(matches!(fetch_err, DirectoryError::NotInitialized));
}

#[tokio::test(flavor = "multi_thread")]
async fn transient_query_fault_surfaces_unmodified_and_does_not_poison_the_client() {
    init_logging();

    let registry = seeded_registry().await;
    let client = GatewayDirectoryClient::new(
        Arc::new(InMemoryConnector::new(registry.clone())),
        &config(),
    );
    client.initialize().await.expect("initialize should succeed");

    registry.set_fail_queries(true);
    let err = client
        .fetch_active_gateways("cluster-a")
        .await
        .expect_err("fetch should surface the store fault");
    assert!(matches!(err, DirectoryError::Unavailable(_)));

    registry.set_fail_queries(false);
    let snapshot = client
        .fetch_active_gateways("cluster-a")
        .await
        .expect("recovered registry should serve again");
    assert_eq!(snapshot.len(), 2);
}
