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

//! Stream identity and per-item ordering tokens.

use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identity of a named ordered event stream: a namespace plus a UUID.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StreamId {
    namespace: String,
    id: Uuid,
}

impl StreamId {
    pub fn new(namespace: &str, id: Uuid) -> Self {
        Self {
            namespace: namespace.to_string(),
            id,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Display for StreamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.id)
    }
}

/// Ordering token a provider may attach to a delivered item.
///
/// Opaque to the subscription manager; consumers compare tokens to reason
/// about stream position.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SequenceToken {
    pub sequence_number: u64,
}

impl SequenceToken {
    pub fn new(sequence_number: u64) -> Self {
        Self { sequence_number }
    }
}

#[cfg(test)]
mod tests {
    use super::{SequenceToken, StreamId};
    use uuid::Uuid;

    #[test]
    fn stream_id_displays_namespace_and_uuid() {
        let id = Uuid::new_v4();
        let stream_id = StreamId::new("telemetry", id);

        assert_eq!(stream_id.to_string(), format!("telemetry/{id}"));
    }

    #[test]
    fn stream_ids_differ_by_namespace() {
        let id = Uuid::new_v4();

        assert_ne!(StreamId::new("telemetry", id), StreamId::new("billing", id));
    }

    #[test]
    fn sequence_tokens_order_by_sequence_number() {
        assert!(SequenceToken::new(1) < SequenceToken::new(2));
    }
}
