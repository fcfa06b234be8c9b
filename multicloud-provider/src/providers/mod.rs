//! Provider adapters
//!
//! Each module holds one provider's native client trait, its native request and
//! response shapes, the error mapper and the adapter implementing the unified
//! traits.

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "aws")]
pub mod aws_emr;
#[cfg(feature = "aws")]
pub mod aws_route53;
#[cfg(feature = "aws")]
pub mod aws_s3;
#[cfg(feature = "tencent")]
pub mod tencent_cos;
#[cfg(feature = "tencent")]
pub mod tencent_privatedns;

#[cfg(feature = "aws")]
pub use aws_emr::EmrAdapter;
#[cfg(feature = "aws")]
pub use aws_route53::{Route53Adapter, Route53AdapterBuilder};
#[cfg(feature = "aws")]
pub use aws_s3::S3Adapter;
#[cfg(feature = "tencent")]
pub use tencent_cos::TencentCosAdapter;
#[cfg(feature = "tencent")]
pub use tencent_privatedns::{TencentPrivateDnsAdapter, TencentPrivateDnsAdapterBuilder};
