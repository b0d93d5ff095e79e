//! Canonical structured field keys for stream logging.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const CELL: &str = "cell";
pub const STREAM_ID: &str = "stream_id";
pub const PROVIDER_NAME: &str = "provider_name";
pub const EPOCH: &str = "epoch";
pub const STATE: &str = "state";
pub const ITEMS_DELIVERED: &str = "items_delivered";
pub const SEQUENCE: &str = "sequence";
pub const ERR: &str = "err";
