//! Utility modules.

/// Date/time serialization helpers shared by providers.
pub mod datetime;

/// Bounded request bodies for debug logs.
pub mod log_sanitizer;
