//! 腾讯云私有域解析 (PrivateDNS) 适配器

mod adapter;
mod client;
mod error;
mod types;

use std::sync::Arc;

use crate::factory::ClientFactory;

pub use client::PrivateDnsClient;
pub use types::{
    ActionResponse, CreatePrivateZoneRecordRequest, CreatePrivateZoneRecordResponse,
    DeletePrivateZoneRecordRequest, DescribePrivateZoneListRequest,
    DescribePrivateZoneListResponse, DescribePrivateZoneRecordListRequest,
    DescribePrivateZoneRecordListResponse, Filter, ModifyPrivateZoneRecordRequest, PrivateZone,
    PrivateZoneRecord,
};

pub(crate) const PROVIDER_NAME: &str = "tencent_privatedns";
/// 原生 zone id 前缀
pub(crate) const ZONE_ID_PREFIX: &str = "zone-";
/// 单页最大记录数
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 100;
/// 创建记录时的默认 TTL（秒）
pub(crate) const DEFAULT_TTL: u32 = 60;

/// 腾讯云 PrivateDNS 适配器
///
/// Zones are paged by offset with a total count, and the API has no fuzzy
/// record search, so keyword listings walk every page and filter locally.
/// Record status and remarks cannot be set through this API.
pub struct TencentPrivateDnsAdapter {
    pub(crate) factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>,
    pub(crate) page_size: u32,
    pub(crate) default_ttl: u32,
}

/// PrivateDNS Adapter Builder
pub struct TencentPrivateDnsAdapterBuilder {
    factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>,
    page_size: u32,
    default_ttl: u32,
}

impl TencentPrivateDnsAdapterBuilder {
    fn new(factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>) -> Self {
        Self {
            factory,
            page_size: DEFAULT_PAGE_SIZE,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Page size used when walking every page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// TTL applied when a create request carries none.
    pub fn default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn build(self) -> TencentPrivateDnsAdapter {
        TencentPrivateDnsAdapter {
            factory: self.factory,
            page_size: self.page_size,
            default_ttl: self.default_ttl,
        }
    }
}

impl TencentPrivateDnsAdapter {
    pub fn new(factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>) -> Self {
        Self::builder(factory).build()
    }

    pub fn builder(
        factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>,
    ) -> TencentPrivateDnsAdapterBuilder {
        TencentPrivateDnsAdapterBuilder::new(factory)
    }
}
