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

mod logging;
pub use logging::init_logging;

mod in_memory_registry;
pub use in_memory_registry::{InMemoryConnector, InMemoryRegistry};

mod memory_stream_provider;
pub use memory_stream_provider::MemoryStreamProvider;

mod failing_stream_provider;
pub use failing_stream_provider::FailingStreamProvider;

mod handlers;
pub use handlers::{collecting_handler, failing_handler};
