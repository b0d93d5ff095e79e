//! Canonical structured field keys for directory logging.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const CLUSTER_ID: &str = "cluster_id";
pub const DIALECT: &str = "dialect";
pub const GATEWAY_COUNT: &str = "gateway_count";
pub const ERR: &str = "err";
