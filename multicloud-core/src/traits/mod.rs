//! Service layer abstraction trait definition

mod adapter_registry;

pub use adapter_registry::{AdapterRegistry, InMemoryAdapterRegistry};
