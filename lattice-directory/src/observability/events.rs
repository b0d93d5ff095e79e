//! Canonical structured event names used across `lattice-directory`.

// Directory-client lifecycle events.
pub const DIRECTORY_INIT_CALLED: &str = "directory_init_called";
pub const DIRECTORY_INIT_OK: &str = "directory_init_ok";
pub const DIRECTORY_INIT_FAILED: &str = "directory_init_failed";

// Gateway fetch events.
pub const GATEWAY_FETCH_CALLED: &str = "gateway_fetch_called";
pub const GATEWAY_FETCH_OK: &str = "gateway_fetch_ok";
pub const GATEWAY_FETCH_FAILED: &str = "gateway_fetch_failed";
pub const GATEWAY_FETCH_UNINITIALIZED: &str = "gateway_fetch_uninitialized";
