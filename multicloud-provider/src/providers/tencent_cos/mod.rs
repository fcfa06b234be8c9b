//! 腾讯云对象存储 (COS) 适配器

mod adapter;
mod client;
mod error;
mod types;

use std::sync::Arc;

use crate::factory::ClientFactory;

pub use client::CosClient;
pub use types::{
    CosAbortIncompleteMultipartUpload, CosBucket, CosExpiration, CosLifecycleConfiguration,
    CosLifecycleFilter, CosLifecycleRule, CosNoncurrentVersion, CosTag, CosTransition,
    ListAllMyBucketsResult,
};

pub(crate) const PROVIDER_NAME: &str = "tencent_cos";
/// `max-keys` per `GET Service` call
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 1000;

/// 腾讯云 COS 适配器
///
/// Bucket names must carry the account's `-<appid>` suffix. Buckets are created
/// in the selector's region and tagged in a second call. Lifecycle filters are
/// optional.
pub struct TencentCosAdapter {
    pub(crate) factory: Arc<dyn ClientFactory<dyn CosClient>>,
    pub(crate) page_size: u32,
}

impl TencentCosAdapter {
    pub fn new(factory: Arc<dyn ClientFactory<dyn CosClient>>) -> Self {
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
