//! AWS S3 适配器

mod adapter;
mod client;
mod error;
mod types;

use std::sync::Arc;

use crate::factory::ClientFactory;

pub use client::S3Client;
pub use types::{
    CreateBucketConfiguration, CreateBucketInput, CreateBucketOutput, ListBucketsInput,
    ListBucketsOutput, PutLifecycleInput, S3AbortIncompleteMultipartUpload, S3Bucket,
    S3Expiration, S3LifecycleConfiguration, S3LifecycleFilter, S3LifecycleRule,
    S3NoncurrentVersionExpiration, S3NoncurrentVersionTransition, S3Tag, S3Transition,
};

pub(crate) const PROVIDER_NAME: &str = "aws_s3";
/// `MaxBuckets` per listing call
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Region that rejects an explicit `LocationConstraint`.
const DEFAULT_REGION: &str = "us-east-1";

/// AWS S3 适配器
///
/// Buckets are created in the selector's region and tagged in a second call.
/// Lifecycle rules must carry a prefix filter.
pub struct S3Adapter {
    pub(crate) factory: Arc<dyn ClientFactory<dyn S3Client>>,
    pub(crate) page_size: u32,
}

impl S3Adapter {
    pub fn new(factory: Arc<dyn ClientFactory<dyn S3Client>>) -> Self {
        Self {
            factory,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Buckets requested per listing call.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}
