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

use lattice_streams::{HandlerError, ItemHandler};
use std::sync::{Arc, Mutex};

/// Handler that records every item it receives, in delivery order.
pub fn collecting_handler<T: Send + 'static>() -> (ItemHandler<T>, Arc<Mutex<Vec<T>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let handler: ItemHandler<T> = Box::new(move |item| {
        let sink = sink.clone();
        Box::pin(async move {
            sink.lock().expect("collector lock").push(item);
            Ok::<(), HandlerError>(())
        })
    });
    (handler, seen)
}

/// Handler that rejects every item with `message`.
pub fn failing_handler<T: Send + 'static>(message: &'static str) -> ItemHandler<T> {
    Box::new(move |_item| Box::pin(async move { Err::<(), HandlerError>(message.into()) }))
}
