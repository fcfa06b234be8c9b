//! 测试辅助模块
//!
//! 提供 mock adapter 和便捷的测试工厂方法。

use std::sync::Arc;

use async_trait::async_trait;
use multicloud_provider::{
    Bucket, BucketList, CallContext, ClusterAdapter, ClusterDetail, ClusterList,
    CreateBucketRequest, CreateClusterRequest, CreateRecordRequest, CreatedCluster,
    CreatedRecord, DeleteRecordRequest, DescribeClustersRequest, DescribeRecordRequest,
    DnsAdapter, DnsRecord, LifecycleRule, ListBucketsRequest, ListClustersRequest,
    ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, ProviderError, RecordList,
    RecordPage, RecordPageRequest, Result, Selector, StorageAdapter, Tags, Zone, ZoneList,
};
use tokio::sync::RwLock;

use crate::config::NormalizerConfig;
use crate::services::ServiceContext;
use crate::traits::InMemoryAdapterRegistry;

// ===== Recorder =====

/// 记录每次调用收到的 selector，并可注入失败
#[derive(Default)]
pub struct Recorder {
    selectors: RwLock<Vec<Selector>>,
    failure: RwLock<Option<ProviderError>>,
}

impl Recorder {
    async fn record(&self, selector: &Selector) -> Result<()> {
        self.selectors.write().await.push(selector.clone());
        match &*self.failure.read().await {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub async fn selectors(&self) -> Vec<Selector> {
        self.selectors.read().await.clone()
    }

    pub async fn fail_with(&self, err: ProviderError) {
        *self.failure.write().await = Some(err);
    }
}

// ===== MockDnsAdapter =====

pub struct MockDnsAdapter {
    id: &'static str,
    pub recorder: Recorder,
}

impl MockDnsAdapter {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            recorder: Recorder::default(),
        }
    }
}

#[async_trait]
impl DnsAdapter for MockDnsAdapter {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn list_zones(
        &self,
        selector: &Selector,
        req: &ListZonesRequest,
        _cx: &CallContext,
    ) -> Result<ZoneList> {
        self.recorder.record(selector).await?;
        let zones: Vec<Zone> = ["corp.internal", "dev.internal"]
            .into_iter()
            .filter(|name| req.keyword.as_deref().is_none_or(|k| name.contains(k)))
            .map(|name| Zone {
                id: format!("zone-{name}"),
                name: name.to_string(),
                record_count: None,
                diagnostics: None,
            })
            .collect();
        Ok(ZoneList {
            total: zones.len() as u64,
            zones,
        })
    }

    async fn resolve_zone(
        &self,
        selector: &Selector,
        name_or_id: &str,
        _cx: &CallContext,
    ) -> Result<String> {
        self.recorder.record(selector).await?;
        Ok(format!("zone-{name_or_id}"))
    }

    async fn list_records(
        &self,
        selector: &Selector,
        _req: &ListRecordsRequest,
        _cx: &CallContext,
    ) -> Result<RecordList> {
        self.recorder.record(selector).await?;
        Ok(RecordList {
            records: Vec::new(),
            total: 0,
        })
    }

    async fn list_records_page(
        &self,
        selector: &Selector,
        _req: &RecordPageRequest,
        _cx: &CallContext,
    ) -> Result<RecordPage> {
        self.recorder.record(selector).await?;
        Ok(RecordPage {
            records: Vec::new(),
            next_page: None,
            prev_page: None,
            next_cursor: None,
        })
    }

    async fn describe_records(
        &self,
        selector: &Selector,
        _req: &DescribeRecordRequest,
        _cx: &CallContext,
    ) -> Result<Vec<DnsRecord>> {
        self.recorder.record(selector).await?;
        Ok(Vec::new())
    }

    async fn create_record(
        &self,
        selector: &Selector,
        req: &CreateRecordRequest,
        _cx: &CallContext,
    ) -> Result<CreatedRecord> {
        self.recorder.record(selector).await?;
        Ok(CreatedRecord {
            record_id: format!("{}|{}", req.sub_domain, req.record_type),
            diagnostics: None,
        })
    }

    async fn modify_record(
        &self,
        selector: &Selector,
        _req: &ModifyRecordRequest,
        _cx: &CallContext,
    ) -> Result<()> {
        self.recorder.record(selector).await
    }

    async fn delete_record(
        &self,
        selector: &Selector,
        _req: &DeleteRecordRequest,
        _cx: &CallContext,
    ) -> Result<()> {
        self.recorder.record(selector).await
    }
}

// ===== MockClusterAdapter =====

pub struct MockClusterAdapter {
    id: &'static str,
    pub recorder: Recorder,
}

impl MockClusterAdapter {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            recorder: Recorder::default(),
        }
    }
}

#[async_trait]
impl ClusterAdapter for MockClusterAdapter {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn list_clusters(
        &self,
        selector: &Selector,
        _req: &ListClustersRequest,
        _cx: &CallContext,
    ) -> Result<ClusterList> {
        self.recorder.record(selector).await?;
        Ok(ClusterList {
            clusters: Vec::new(),
            next_cursor: None,
        })
    }

    async fn describe_clusters(
        &self,
        selector: &Selector,
        _req: &DescribeClustersRequest,
        _cx: &CallContext,
    ) -> Result<Vec<ClusterDetail>> {
        self.recorder.record(selector).await?;
        Ok(Vec::new())
    }

    async fn create_cluster(
        &self,
        selector: &Selector,
        req: &CreateClusterRequest,
        _cx: &CallContext,
    ) -> Result<CreatedCluster> {
        self.recorder.record(selector).await?;
        Ok(CreatedCluster {
            cluster_id: format!("j-{}", req.name),
            cluster_arn: None,
            diagnostics: None,
        })
    }
}

// ===== MockStorageAdapter =====

pub struct MockStorageAdapter {
    id: &'static str,
    pub recorder: Recorder,
    /// 每次 list_buckets 收到的 `with_tags`
    pub with_tags_seen: RwLock<Vec<bool>>,
    lifecycles: RwLock<Vec<(String, Vec<LifecycleRule>)>>,
}

impl MockStorageAdapter {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            recorder: Recorder::default(),
            with_tags_seen: RwLock::new(Vec::new()),
            lifecycles: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StorageAdapter for MockStorageAdapter {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn list_buckets(
        &self,
        selector: &Selector,
        req: &ListBucketsRequest,
        _cx: &CallContext,
    ) -> Result<BucketList> {
        self.recorder.record(selector).await?;
        self.with_tags_seen.write().await.push(req.with_tags);
        Ok(BucketList {
            buckets: Vec::new(),
            next_cursor: None,
        })
    }

    async fn create_bucket(
        &self,
        selector: &Selector,
        req: &CreateBucketRequest,
        _cx: &CallContext,
    ) -> Result<Bucket> {
        self.recorder.record(selector).await?;
        Ok(Bucket {
            name: req.name.clone(),
            created_at: None,
            location: selector.region.clone(),
            tags: req.tags.clone(),
        })
    }

    async fn delete_bucket(&self, selector: &Selector, _bucket: &str, _cx: &CallContext) -> Result<()> {
        self.recorder.record(selector).await
    }

    async fn put_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        rules: &[LifecycleRule],
        _cx: &CallContext,
    ) -> Result<()> {
        self.recorder.record(selector).await?;
        self.lifecycles
            .write()
            .await
            .push((bucket.to_string(), rules.to_vec()));
        Ok(())
    }

    async fn get_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        _cx: &CallContext,
    ) -> Result<Vec<LifecycleRule>> {
        self.recorder.record(selector).await?;
        Ok(self
            .lifecycles
            .read()
            .await
            .iter()
            .rev()
            .find(|(name, _)| name == bucket)
            .map(|(_, rules)| rules.clone())
            .unwrap_or_default())
    }
}

// ===== 便捷构造 =====

/// 默认 profile 为 "default-profile"、默认 region 为 "ap-guangzhou" 的配置
pub fn create_test_config() -> NormalizerConfig {
    NormalizerConfig {
        default_profile: Some("default-profile".to_string()),
        default_region: Some("ap-guangzhou".to_string()),
        ..NormalizerConfig::default()
    }
}

/// 空注册表 + 给定配置的服务上下文
pub fn create_test_context(
    config: NormalizerConfig,
) -> (Arc<ServiceContext>, Arc<InMemoryAdapterRegistry>) {
    let registry = Arc::new(InMemoryAdapterRegistry::new());
    let ctx = Arc::new(ServiceContext::new(registry.clone(), Arc::new(config)));
    (ctx, registry)
}

pub fn test_tags() -> Tags {
    Tags::new().with("team", "platform")
}
