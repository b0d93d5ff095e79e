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

//! # lattice-directory
//!
//! `lattice-directory` implements the client-side gateway directory of a
//! lattice cluster: a pull-based, bounded-staleness view of the
//! client-facing entry nodes recorded in a shared backing registry.
//!
//! The registry itself is an abstract boundary ([`GatewayQuery`] +
//! [`RegistryConnector`]); implementations are injected explicitly, never
//! resolved from ambient state. [`GatewayDirectoryClient`] owns the
//! lazily-initialized query channel and nothing else — it keeps no cache,
//! so each [`DirectorySnapshot`] is owned solely by the caller that fetched
//! it, and the caller decides how to act when the directory is unavailable.
//!
//! ```
//! use std::sync::Arc;
//! use lattice_directory::{
//!     DirectoryConfig, GatewayDirectoryClient, RegistryConnection, RegistryConnector,
//! };
//!
//! # pub mod fixed_registry {
//! #     use async_trait::async_trait;
//! #     use lattice_directory::{
//! #         GatewayAddress, GatewayQuery, GatewayRecord, GatewayStatus, RegistryConnection,
//! #         RegistryConnector, RegistryError,
//! #     };
//! #     use std::sync::Arc;
//! #
//! #     pub struct FixedRegistry;
//! #
//! #     #[async_trait]
//! #     impl GatewayQuery for FixedRegistry {
//! #         async fn gateway_records(
//! #             &self,
//! #             cluster_id: &str,
//! #         ) -> Result<Vec<GatewayRecord>, RegistryError> {
//! #             Ok(vec![GatewayRecord {
//! #                 cluster_id: cluster_id.to_string(),
//! #                 address: GatewayAddress::new("gw-1.cluster.internal", 30000),
//! #                 status: GatewayStatus::Active,
//! #             }])
//! #         }
//! #     }
//! #
//! #     pub struct FixedConnector;
//! #
//! #     #[async_trait]
//! #     impl RegistryConnector for FixedConnector {
//! #         async fn connect(
//! #             &self,
//! #             _connection: &RegistryConnection,
//! #         ) -> Result<Arc<dyn GatewayQuery>, RegistryError> {
//! #             Ok(Arc::new(FixedRegistry))
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = DirectoryConfig {
//!     cluster_id: "cluster-a".to_string(),
//!     connection: RegistryConnection {
//!         dialect: "in-memory".to_string(),
//!         connection_string: "rows".to_string(),
//!     },
//!     gateway_refresh_period_secs: 60,
//! };
//!
//! let connector: Arc<dyn RegistryConnector> = Arc::new(fixed_registry::FixedConnector);
//! let client = GatewayDirectoryClient::new(connector, &config);
//!
//! client.initialize().await.unwrap();
//! let snapshot = client.fetch_active_gateways(&config.cluster_id).await.unwrap();
//! assert_eq!(snapshot.len(), 1);
//! # });
//! ```
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global
//! subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod config;
pub use config::DirectoryConfig;

mod directory_client;
pub use directory_client::{DirectoryError, GatewayDirectoryClient};

mod gateway;
pub use gateway::{GatewayAddress, GatewayRecord, GatewayStatus};

#[doc(hidden)]
pub mod observability;

mod registry;
pub use registry::{
    GatewayQuery, RegistryConnection, RegistryConnector, RegistryError, RegistryErrorKind,
};

mod snapshot;
pub use snapshot::DirectorySnapshot;
