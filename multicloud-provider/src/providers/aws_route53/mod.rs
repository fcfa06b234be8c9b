//! AWS Route 53 适配器

mod adapter;
mod client;
mod error;
mod types;

use std::sync::Arc;

use crate::factory::ClientFactory;

pub use client::Route53Client;
pub use types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, ChangeInfo, ChangeResourceRecordSetsInput,
    ChangeResourceRecordSetsOutput, GetHostedZoneOutput, HostedZone, HostedZoneConfig,
    ListHostedZonesInput, ListHostedZonesOutput, ListResourceRecordSetsInput,
    ListResourceRecordSetsOutput, ResourceRecord, ResourceRecordSet,
};

pub(crate) const PROVIDER_NAME: &str = "aws_route53";
pub(crate) const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";
/// `MaxItems` per listing call
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 100;
pub(crate) const DEFAULT_TTL: u32 = 300;

/// AWS Route 53 适配器
///
/// Record sets are addressed by name and type, so record ids are synthetic
/// (`<fqdn>|<type>`). A record set holding several values is reported with its
/// first value only; listing a multi-value set and writing it back loses the
/// other values. Alias record sets report the alias target as their value.
///
/// Record pages are cursor-based: the next record name, type and set identifier
/// are packed into one opaque cursor. Numbered pages beyond the first are not
/// supported. Status, weight and remarks are rejected on writes.
pub struct Route53Adapter {
    pub(crate) factory: Arc<dyn ClientFactory<dyn Route53Client>>,
    pub(crate) page_size: u32,
    pub(crate) default_ttl: u32,
}

/// Route 53 Adapter Builder
pub struct Route53AdapterBuilder {
    factory: Arc<dyn ClientFactory<dyn Route53Client>>,
    page_size: u32,
    default_ttl: u32,
}

impl Route53AdapterBuilder {
    fn new(factory: Arc<dyn ClientFactory<dyn Route53Client>>) -> Self {
        Self {
            factory,
            page_size: DEFAULT_PAGE_SIZE,
            default_ttl: DEFAULT_TTL,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn build(self) -> Route53Adapter {
        Route53Adapter {
            factory: self.factory,
            page_size: self.page_size,
            default_ttl: self.default_ttl,
        }
    }
}

impl Route53Adapter {
    pub fn new(factory: Arc<dyn ClientFactory<dyn Route53Client>>) -> Self {
        Self::builder(factory).build()
    }

    pub fn builder(factory: Arc<dyn ClientFactory<dyn Route53Client>>) -> Route53AdapterBuilder {
        Route53AdapterBuilder::new(factory)
    }
}
