//! Multicloud Core Library
//!
//! Service layer on top of `multicloud-provider`:
//! - adapter registry keyed by provider id
//! - configuration (default selector, page sizes, default TTLs)
//! - DNS, cluster and storage services that fill selectors from the
//!   configuration and classify provider errors for logging
//!
//! The library never installs a logger and never builds native clients; the
//! embedding application registers adapters built from its own client factories.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{CONFIG_ENV_VAR, DnsSettings, NormalizerConfig, StorageSettings};
pub use error::{CoreError, CoreResult};
pub use services::{ClusterService, DnsService, ServiceContext, StorageService};
pub use traits::{AdapterRegistry, InMemoryAdapterRegistry};
