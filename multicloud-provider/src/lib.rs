//! # multicloud-provider
//!
//! A provider-agnostic model and adapter layer for DNS zones and records,
//! object-storage buckets with lifecycle policies, and managed compute clusters
//! across cloud platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Family | Feature Flag | Pagination |
//! |----------|--------|-------------|------------|
//! | Tencent Cloud PrivateDNS | DNS | `tencent` | offset + total count |
//! | AWS Route 53 | DNS | `aws` | cursor |
//! | AWS EMR | Cluster | `aws` | cursor |
//! | AWS S3 | Storage | `aws` | cursor |
//! | Tencent Cloud COS | Storage | `tencent` | cursor |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable every provider listed above.
//! - **`aws`**: Enable only the AWS adapters.
//! - **`tencent`**: Enable only the Tencent Cloud adapters.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! multicloud-provider = { version = "0.1", default-features = false, features = ["tencent"] }
//! ```
//!
//! This crate never signs or sends HTTP requests. Each adapter is handed a
//! [`ClientFactory`] producing the provider's native client (for example
//! [`providers::tencent_privatedns::PrivateDnsClient`]) for a [`Selector`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use multicloud_provider::providers::tencent_privatedns::PrivateDnsClient;
//! use multicloud_provider::{
//!     CallContext, ClientError, DnsAdapter, ListRecordsRequest, Selector,
//!     TencentPrivateDnsAdapter, client_factory_fn,
//! };
//!
//! # fn build_client(_: &Selector) -> Result<Arc<dyn PrivateDnsClient>, ClientError> {
//! #     unimplemented!()
//! # }
//! # async fn example() -> multicloud_provider::Result<()> {
//! // 1. Wrap whatever builds authenticated clients
//! let adapter = TencentPrivateDnsAdapter::new(Arc::new(client_factory_fn(build_client)));
//!
//! // 2. Every record under "api" in a zone, however many pages that takes
//! let request = ListRecordsRequest {
//!     domain: "corp.internal".to_string(),
//!     keyword: Some("api".to_string()),
//! };
//! let cx = CallContext::new();
//! let records = adapter
//!     .list_records(&Selector::profile("prod"), &request, &cx)
//!     .await?;
//! for record in &records.records {
//!     println!("{} {} -> {}", record.sub_domain, record.record_type, record.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::RequestValidation`]: bad or missing input, raised before any call
//! - [`ProviderError::ResolutionAmbiguous`]: a zone name matched zero or several zones
//! - [`ProviderError::ProviderRejected`]: the provider API refused the call
//! - [`ProviderError::UnsupportedByProvider`]: the field has no equivalent on this provider
//!
//! Nothing is retried internally. Cancellation and deadlines come from the
//! caller's [`CallContext`].

mod context;
mod error;
mod factory;
#[cfg(any(feature = "aws", feature = "tencent"))]
pub mod lifecycle;
pub mod pagination;
pub mod providers;
mod resolver;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

pub use context::{CallContext, CancelHandle};

pub use factory::{
    CachingClientFactory, ClientFactory, FnClientFactory, StaticClientFactory, client_factory_fn,
};

pub use resolver::{ResolvedZone, ZoneDirectory, resolve_zone};

// Unified traits and the native client error type (internal traits are not exported)
pub use traits::{ClientError, ClusterAdapter, DnsAdapter, RawApiError, StorageAdapter};

// Re-export types
pub use types::{
    AbortIncompleteUpload, Bucket, BucketList, Cluster, ClusterDetail, ClusterList,
    ClusterStatus, CreateBucketRequest, CreateClusterRequest, CreateRecordRequest,
    CreatedCluster, CreatedRecord, CursorPage, DeleteRecordRequest, DescribeClustersRequest,
    DescribeRecordRequest, Diagnostics, DnsRecord, Expiration, LifecycleFilter, LifecycleRule,
    ListBucketsRequest, ListClustersRequest, ListRecordsRequest, ListZonesRequest,
    ModifyRecordRequest, NoncurrentExpiration, NoncurrentTransition, OffsetPage, PageWindow,
    RecordList, RecordPage, RecordPageRequest, RecordStatus, RecordType, Selector, Tags,
    TimeWindow, Transition, Zone, ZoneList,
};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete adapters (behind feature flags)
#[cfg(feature = "aws")]
pub use providers::{EmrAdapter, Route53Adapter, Route53AdapterBuilder, S3Adapter};

#[cfg(feature = "tencent")]
pub use providers::{TencentCosAdapter, TencentPrivateDnsAdapter, TencentPrivateDnsAdapterBuilder};
