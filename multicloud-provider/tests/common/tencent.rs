//! 腾讯云 PrivateDNS / COS 内存实现

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use multicloud_provider::providers::tencent_cos::{
    CosBucket, CosClient, CosLifecycleConfiguration, CosTag, ListAllMyBucketsResult,
};
use multicloud_provider::providers::tencent_privatedns::{
    ActionResponse, CreatePrivateZoneRecordRequest, CreatePrivateZoneRecordResponse,
    DeletePrivateZoneRecordRequest, DescribePrivateZoneListRequest,
    DescribePrivateZoneListResponse, DescribePrivateZoneRecordListRequest,
    DescribePrivateZoneRecordListResponse, ModifyPrivateZoneRecordRequest, PrivateDnsClient,
    PrivateZone, PrivateZoneRecord,
};
use multicloud_provider::{ClientError, TencentCosAdapter, TencentPrivateDnsAdapter};

use super::{CallLog, CountingFactory, api_error};

// ============ PrivateDNS ============

pub fn zone(id: &str, domain: &str) -> PrivateZone {
    PrivateZone {
        zone_id: id.to_string(),
        domain: domain.to_string(),
        record_count: None,
        status: Some("ENABLED".to_string()),
        remark: None,
        updated_on: None,
    }
}

pub fn record(id: &str, zone_id: &str, sub_domain: &str, record_type: &str, value: &str) -> PrivateZoneRecord {
    PrivateZoneRecord {
        record_id: id.to_string(),
        zone_id: Some(zone_id.to_string()),
        sub_domain: sub_domain.to_string(),
        record_type: record_type.to_string(),
        record_value: value.to_string(),
        ttl: 600,
        mx: None,
        status: Some("enabled".to_string()),
        weight: None,
        updated_on: Some("2024-03-01 10:00:00".to_string()),
    }
}

/// 250 records in `zone-corp`, 12 of them under "api-", spread over offsets 0-299.
pub fn bulk_records() -> Vec<PrivateZoneRecord> {
    (0..250)
        .map(|i| {
            let sub = if i % 21 == 0 && i < 240 {
                format!("api-{i}")
            } else {
                format!("web-{i}")
            };
            record(&format!("r-{i}"), "zone-corp", &sub, "A", &format!("10.0.{}.{}", i / 256, i % 256))
        })
        .collect()
}

#[derive(Default)]
pub struct FakePrivateDns {
    pub zones: Vec<PrivateZone>,
    pub records: Mutex<Vec<PrivateZoneRecord>>,
    pub calls: CallLog,
    pub created: Mutex<Vec<CreatePrivateZoneRecordRequest>>,
    pub modified: Mutex<Vec<ModifyPrivateZoneRecordRequest>>,
    pub deleted: Mutex<Vec<DeletePrivateZoneRecordRequest>>,
}

impl FakePrivateDns {
    pub fn new(zones: Vec<PrivateZone>, records: Vec<PrivateZoneRecord>) -> Self {
        Self {
            zones,
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// Record list offsets seen so far, in call order.
    pub fn record_offsets(&self) -> Vec<u64> {
        self.calls
            .of("DescribePrivateZoneRecordList")
            .iter()
            .filter_map(|e| e.rsplit_once("offset=").and_then(|(_, o)| o.parse().ok()))
            .collect()
    }
}

fn page<T: Clone>(items: &[T], offset: Option<u64>, limit: Option<u32>) -> Vec<T> {
    let start = usize::try_from(offset.unwrap_or(0)).unwrap_or(usize::MAX).min(items.len());
    let end = start.saturating_add(limit.unwrap_or(20) as usize).min(items.len());
    items[start..end].to_vec()
}

#[async_trait]
impl PrivateDnsClient for FakePrivateDns {
    async fn describe_private_zone_list(
        &self,
        req: DescribePrivateZoneListRequest,
    ) -> Result<DescribePrivateZoneListResponse, ClientError> {
        self.calls
            .push(format!("DescribePrivateZoneList offset={}", req.offset.unwrap_or(0)));
        let keyword = req
            .filters
            .iter()
            .find(|f| f.name == "Domain")
            .and_then(|f| f.values.first().cloned());
        let matching: Vec<PrivateZone> = self
            .zones
            .iter()
            .filter(|z| keyword.as_deref().is_none_or(|k| z.domain.contains(k)))
            .cloned()
            .collect();
        Ok(DescribePrivateZoneListResponse {
            total_count: matching.len() as u64,
            private_zone_set: page(&matching, req.offset, req.limit),
            request_id: Some("req-zones".into()),
        })
    }

    async fn describe_private_zone_record_list(
        &self,
        req: DescribePrivateZoneRecordListRequest,
    ) -> Result<DescribePrivateZoneRecordListResponse, ClientError> {
        self.calls.push(format!(
            "DescribePrivateZoneRecordList zone={} offset={}",
            req.zone_id,
            req.offset.unwrap_or(0)
        ));
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let in_zone: Vec<PrivateZoneRecord> = records
            .iter()
            .filter(|r| r.zone_id.as_deref() == Some(req.zone_id.as_str()))
            .cloned()
            .collect();
        if in_zone.is_empty() && !self.zones.iter().any(|z| z.zone_id == req.zone_id) {
            return Err(api_error("ResourceNotFound", "zone does not exist"));
        }
        Ok(DescribePrivateZoneRecordListResponse {
            total_count: in_zone.len() as u64,
            record_set: page(&in_zone, req.offset, req.limit),
            request_id: Some("req-records".into()),
        })
    }

    async fn create_private_zone_record(
        &self,
        req: CreatePrivateZoneRecordRequest,
    ) -> Result<CreatePrivateZoneRecordResponse, ClientError> {
        self.calls.push("CreatePrivateZoneRecord");
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let id = format!("r-new-{}", records.len());
        let mut created = record(&id, &req.zone_id, &req.sub_domain, &req.record_type, &req.record_value);
        created.ttl = req.ttl;
        records.push(created);
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req);
        Ok(CreatePrivateZoneRecordResponse {
            record_id: id,
            request_id: Some("req-create".into()),
        })
    }

    async fn modify_private_zone_record(
        &self,
        req: ModifyPrivateZoneRecordRequest,
    ) -> Result<ActionResponse, ClientError> {
        self.calls.push("ModifyPrivateZoneRecord");
        self.modified
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req);
        Ok(ActionResponse::default())
    }

    async fn delete_private_zone_record(
        &self,
        req: DeletePrivateZoneRecordRequest,
    ) -> Result<ActionResponse, ClientError> {
        self.calls.push("DeletePrivateZoneRecord");
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req);
        Ok(ActionResponse::default())
    }
}

pub fn private_dns(
    fake: FakePrivateDns,
) -> (
    TencentPrivateDnsAdapter,
    Arc<FakePrivateDns>,
    Arc<CountingFactory<dyn PrivateDnsClient>>,
) {
    let fake = Arc::new(fake);
    let client: Arc<dyn PrivateDnsClient> = fake.clone();
    let factory = CountingFactory::new(client);
    let adapter = TencentPrivateDnsAdapter::new(factory.clone());
    (adapter, fake, factory)
}

// ============ COS ============

pub fn cos_bucket(name: &str) -> CosBucket {
    CosBucket {
        name: name.to_string(),
        location: Some("ap-guangzhou".to_string()),
        creation_date: Some("2024-01-02T03:04:05Z".to_string()),
    }
}

#[derive(Default)]
pub struct FakeCos {
    pub buckets: Vec<CosBucket>,
    pub page_size: usize,
    pub tags: HashMap<String, Vec<CosTag>>,
    pub lifecycles: Mutex<HashMap<String, CosLifecycleConfiguration>>,
    pub calls: CallLog,
    pub tagged: Mutex<Vec<(String, Vec<CosTag>)>>,
}

impl FakeCos {
    pub fn new(buckets: Vec<CosBucket>, page_size: usize) -> Self {
        Self {
            buckets,
            page_size,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CosClient for FakeCos {
    async fn get_service(
        &self,
        marker: Option<String>,
        _max_keys: u32,
    ) -> Result<ListAllMyBucketsResult, ClientError> {
        self.calls
            .push(format!("GetService marker={}", marker.as_deref().unwrap_or("")));
        let start = marker.and_then(|m| m.parse::<usize>().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(self.buckets.len());
        let truncated = end < self.buckets.len();
        Ok(ListAllMyBucketsResult {
            buckets: self.buckets[start..end].to_vec(),
            is_truncated: Some(truncated),
            next_marker: truncated.then(|| end.to_string()),
        })
    }

    async fn put_bucket(&self, bucket: String) -> Result<(), ClientError> {
        self.calls.push(format!("PutBucket {bucket}"));
        Ok(())
    }

    async fn delete_bucket(&self, bucket: String) -> Result<(), ClientError> {
        self.calls.push(format!("DeleteBucket {bucket}"));
        Ok(())
    }

    async fn get_bucket_tagging(&self, bucket: String) -> Result<Vec<CosTag>, ClientError> {
        self.calls.push(format!("GetBucketTagging {bucket}"));
        self.tags
            .get(&bucket)
            .cloned()
            .ok_or_else(|| api_error("NoSuchTagSet", "The TagSet does not exist"))
    }

    async fn put_bucket_tagging(&self, bucket: String, tags: Vec<CosTag>) -> Result<(), ClientError> {
        self.calls.push(format!("PutBucketTagging {bucket}"));
        self.tagged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((bucket, tags));
        Ok(())
    }

    async fn put_bucket_lifecycle(
        &self,
        bucket: String,
        config: CosLifecycleConfiguration,
    ) -> Result<(), ClientError> {
        self.calls.push(format!("PutBucketLifecycle {bucket}"));
        self.lifecycles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(bucket, config);
        Ok(())
    }

    async fn get_bucket_lifecycle(&self, bucket: String) -> Result<CosLifecycleConfiguration, ClientError> {
        self.calls.push(format!("GetBucketLifecycle {bucket}"));
        self.lifecycles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&bucket)
            .cloned()
            .ok_or_else(|| {
                api_error(
                    "NoSuchLifecycleConfiguration",
                    "The lifecycle configuration does not exist",
                )
            })
    }
}

pub fn cos(fake: FakeCos) -> (TencentCosAdapter, Arc<FakeCos>, Arc<CountingFactory<dyn CosClient>>) {
    let fake = Arc::new(fake);
    let client: Arc<dyn CosClient> = fake.clone();
    let factory = CountingFactory::new(client);
    let adapter = TencentCosAdapter::new(factory.clone());
    (adapter, fake, factory)
}
