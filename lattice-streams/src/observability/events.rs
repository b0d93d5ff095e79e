//! Canonical structured event names used across `lattice-streams`.

// Subscription lifecycle events.
pub const SUBSCRIBE_START: &str = "subscribe_start";
pub const SUBSCRIBE_OK: &str = "subscribe_ok";
pub const SUBSCRIBE_FAILED: &str = "subscribe_failed";
pub const SUBSCRIPTION_TEARDOWN_FORCED: &str = "subscription_teardown_forced";
pub const UNSUBSCRIBE_START: &str = "unsubscribe_start";
pub const UNSUBSCRIBE_OK: &str = "unsubscribe_ok";
pub const UNSUBSCRIBE_NOOP: &str = "unsubscribe_noop";
pub const SUBSCRIPTION_RELEASE_FAILED: &str = "subscription_release_failed";

// Delivery pump events.
pub const DELIVERY_ACCEPTED: &str = "delivery_accepted";
pub const DELIVERY_STALE_DROPPED: &str = "delivery_stale_dropped";
pub const DELIVERY_HANDLER_FAILED: &str = "delivery_handler_failed";
pub const STREAM_COMPLETED: &str = "stream_completed";
pub const STREAM_ERROR: &str = "stream_error";

// Consumer-cell lifecycle events.
pub const CELL_ACTIVATED: &str = "cell_activated";
pub const CELL_DEACTIVATED: &str = "cell_deactivated";
pub const CELL_TEARDOWN_RELEASE_FAILED: &str = "cell_teardown_release_failed";
