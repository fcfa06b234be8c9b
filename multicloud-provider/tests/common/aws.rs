//! AWS Route 53 / EMR / S3 内存实现

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use multicloud_provider::providers::aws_emr::{
    ClusterSummary, ClusterTimeline, DescribeClusterOutput, EmrClient, EmrCluster,
    EmrClusterStatus, EmrTag, ListClustersInput, ListClustersOutput, RunJobFlowInput,
    RunJobFlowOutput,
};
use multicloud_provider::providers::aws_route53::{
    ChangeAction, ChangeInfo, ChangeResourceRecordSetsInput, ChangeResourceRecordSetsOutput,
    GetHostedZoneOutput, HostedZone, ListHostedZonesInput, ListHostedZonesOutput,
    ListResourceRecordSetsInput, ListResourceRecordSetsOutput, ResourceRecord, ResourceRecordSet,
    Route53Client,
};
use multicloud_provider::providers::aws_s3::{
    CreateBucketInput, CreateBucketOutput, ListBucketsInput, ListBucketsOutput, PutLifecycleInput,
    S3Bucket, S3Client, S3LifecycleConfiguration, S3Tag,
};
use multicloud_provider::{ClientError, EmrAdapter, Route53Adapter, S3Adapter};

use super::{CallLog, CountingFactory, api_error};

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============ Route 53 ============

pub fn hosted_zone(id: &str, name: &str) -> HostedZone {
    HostedZone {
        id: id.to_string(),
        name: name.to_string(),
        caller_reference: None,
        config: None,
        resource_record_set_count: None,
    }
}

pub fn record_set(name: &str, record_type: &str, values: &[&str]) -> ResourceRecordSet {
    ResourceRecordSet {
        name: name.to_string(),
        record_type: record_type.to_string(),
        ttl: Some(300),
        resource_records: values
            .iter()
            .map(|v| ResourceRecord {
                value: (*v).to_string(),
            })
            .collect(),
        set_identifier: None,
        weight: None,
        alias_target: None,
    }
}

/// Route 53 in memory. Record sets are kept sorted by (name, type), and
/// `max_items` is capped by `page_size`.
pub struct FakeRoute53 {
    pub zones: Vec<HostedZone>,
    pub zone_page_size: usize,
    pub page_size: usize,
    pub sets: Mutex<HashMap<String, Vec<ResourceRecordSet>>>,
    pub calls: CallLog,
    pub changes: Mutex<Vec<ChangeResourceRecordSetsInput>>,
}

impl FakeRoute53 {
    pub fn new(zones: Vec<HostedZone>) -> Self {
        Self {
            zones,
            zone_page_size: 100,
            page_size: 100,
            sets: Mutex::new(HashMap::new()),
            calls: CallLog::default(),
            changes: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_sets(self, zone_id: &str, mut sets: Vec<ResourceRecordSet>) -> Self {
        sets.sort_by(|a, b| (&a.name, &a.record_type).cmp(&(&b.name, &b.record_type)));
        lock(&self.sets).insert(zone_id.to_string(), sets);
        self
    }

    #[must_use]
    pub fn with_page_sizes(mut self, zone_page_size: usize, page_size: usize) -> Self {
        self.zone_page_size = zone_page_size;
        self.page_size = page_size;
        self
    }

    pub fn sets_in(&self, zone_id: &str) -> Vec<ResourceRecordSet> {
        lock(&self.sets).get(zone_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Route53Client for FakeRoute53 {
    async fn list_hosted_zones(
        &self,
        input: ListHostedZonesInput,
    ) -> Result<ListHostedZonesOutput, ClientError> {
        self.calls.push(format!(
            "ListHostedZones marker={}",
            input.marker.as_deref().unwrap_or("")
        ));
        let start = input.marker.and_then(|m| m.parse::<usize>().ok()).unwrap_or(0);
        let end = (start + self.zone_page_size).min(self.zones.len());
        let truncated = end < self.zones.len();
        Ok(ListHostedZonesOutput {
            hosted_zones: self.zones[start..end].to_vec(),
            is_truncated: truncated,
            next_marker: truncated.then(|| end.to_string()),
        })
    }

    async fn get_hosted_zone(&self, id: String) -> Result<GetHostedZoneOutput, ClientError> {
        self.calls.push(format!("GetHostedZone {id}"));
        self.zones
            .iter()
            .find(|z| z.id == id)
            .cloned()
            .map(|hosted_zone| GetHostedZoneOutput { hosted_zone })
            .ok_or_else(|| api_error("NoSuchHostedZone", "No hosted zone found"))
    }

    async fn list_resource_record_sets(
        &self,
        input: ListResourceRecordSetsInput,
    ) -> Result<ListResourceRecordSetsOutput, ClientError> {
        self.calls.push(format!(
            "ListResourceRecordSets start={}|{}",
            input.start_record_name.as_deref().unwrap_or(""),
            input.start_record_type.as_deref().unwrap_or("")
        ));
        let sets = self.sets_in(&input.hosted_zone_id);
        let start = match input.start_record_name.as_deref() {
            None => 0,
            Some(name) => {
                let key = (name, input.start_record_type.as_deref().unwrap_or(""));
                sets.iter()
                    .position(|s| (s.name.as_str(), s.record_type.as_str()) >= key)
                    .unwrap_or(sets.len())
            }
        };
        let limit = (input.max_items.unwrap_or(100) as usize).min(self.page_size);
        let end = (start + limit).min(sets.len());
        let next = sets.get(end);
        Ok(ListResourceRecordSetsOutput {
            resource_record_sets: sets[start..end].to_vec(),
            is_truncated: next.is_some(),
            next_record_name: next.map(|s| s.name.clone()),
            next_record_type: next.map(|s| s.record_type.clone()),
            next_record_identifier: None,
        })
    }

    async fn change_resource_record_sets(
        &self,
        input: ChangeResourceRecordSetsInput,
    ) -> Result<ChangeResourceRecordSetsOutput, ClientError> {
        self.calls.push("ChangeResourceRecordSets");
        {
            let mut all = lock(&self.sets);
            let sets = all.entry(input.hosted_zone_id.clone()).or_default();
            // 整批校验后再应用
            let mut next = sets.clone();
            for change in &input.change_batch.changes {
                let set = &change.resource_record_set;
                let existing = next
                    .iter()
                    .position(|s| s.name == set.name && s.record_type == set.record_type);
                match (change.action, existing) {
                    (ChangeAction::Create, Some(_)) => {
                        return Err(api_error("InvalidChangeBatch", "record set already exists"));
                    }
                    (ChangeAction::Delete, None) => {
                        return Err(api_error("InvalidChangeBatch", "record set not found"));
                    }
                    (ChangeAction::Delete, Some(i)) if next[i] != *set => {
                        return Err(api_error("InvalidChangeBatch", "values do not match"));
                    }
                    (ChangeAction::Delete, Some(i)) => {
                        next.remove(i);
                    }
                    (ChangeAction::Upsert, Some(i)) => next[i] = set.clone(),
                    (ChangeAction::Create | ChangeAction::Upsert, None) => next.push(set.clone()),
                }
            }
            next.sort_by(|a, b| (&a.name, &a.record_type).cmp(&(&b.name, &b.record_type)));
            *sets = next;
        }
        lock(&self.changes).push(input);
        Ok(ChangeResourceRecordSetsOutput {
            change_info: ChangeInfo {
                id: "/change/C1".to_string(),
                status: "PENDING".to_string(),
                submitted_at: Some("2024-05-01T08:00:00Z".to_string()),
            },
        })
    }
}

pub fn route53(fake: FakeRoute53) -> (Route53Adapter, Arc<FakeRoute53>, Arc<CountingFactory<dyn Route53Client>>) {
    let fake = Arc::new(fake);
    let client: Arc<dyn Route53Client> = fake.clone();
    let factory = CountingFactory::new(client);
    let adapter = Route53Adapter::new(factory.clone());
    (adapter, fake, factory)
}

// ============ EMR ============

pub fn cluster_summary(id: &str, state: &str, created: Option<&str>) -> ClusterSummary {
    ClusterSummary {
        id: id.to_string(),
        name: format!("cluster {id}"),
        status: EmrClusterStatus {
            state: state.to_string(),
            state_change_reason: None,
            timeline: Some(ClusterTimeline {
                creation_date_time: created.map(str::to_string),
                ..Default::default()
            }),
        },
        cluster_arn: Some(format!("arn:aws:elasticmapreduce:eu-west-1:123:cluster/{id}")),
        normalized_instance_hours: Some(8),
    }
}

/// EMR in memory, paging clusters `page_size` at a time.
pub struct FakeEmr {
    pub clusters: Vec<ClusterSummary>,
    pub page_size: usize,
    pub tags: HashMap<String, Vec<EmrTag>>,
    pub calls: CallLog,
    pub list_inputs: Mutex<Vec<ListClustersInput>>,
    pub runs: Mutex<Vec<RunJobFlowInput>>,
}

impl FakeEmr {
    pub fn new(clusters: Vec<ClusterSummary>, page_size: usize) -> Self {
        Self {
            clusters,
            page_size,
            tags: HashMap::new(),
            calls: CallLog::default(),
            list_inputs: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmrClient for FakeEmr {
    async fn list_clusters(&self, input: ListClustersInput) -> Result<ListClustersOutput, ClientError> {
        self.calls.push(format!(
            "ListClusters marker={}",
            input.marker.as_deref().unwrap_or("")
        ));
        let matching: Vec<ClusterSummary> = self
            .clusters
            .iter()
            .filter(|c| input.cluster_states.is_empty() || input.cluster_states.contains(&c.status.state))
            .cloned()
            .collect();
        let start = input.marker.as_deref().and_then(|m| m.parse::<usize>().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(matching.len());
        lock(&self.list_inputs).push(input);
        Ok(ListClustersOutput {
            clusters: matching[start..end].to_vec(),
            marker: (end < matching.len()).then(|| end.to_string()),
        })
    }

    async fn describe_cluster(&self, cluster_id: String) -> Result<DescribeClusterOutput, ClientError> {
        self.calls.push(format!("DescribeCluster {cluster_id}"));
        let summary = self
            .clusters
            .iter()
            .find(|c| c.id == cluster_id)
            .ok_or_else(|| api_error("InvalidRequestException", "Cluster id is not valid."))?;
        Ok(DescribeClusterOutput {
            cluster: EmrCluster {
                id: summary.id.clone(),
                name: summary.name.clone(),
                status: summary.status.clone(),
                cluster_arn: summary.cluster_arn.clone(),
                release_label: Some("emr-7.1.0".to_string()),
                applications: Vec::new(),
                master_public_dns_name: Some("ec2-1-2-3-4.compute.amazonaws.com".to_string()),
                log_uri: None,
                tags: self.tags.get(&cluster_id).cloned().unwrap_or_default(),
                auto_terminate: Some(false),
            },
        })
    }

    async fn run_job_flow(&self, input: RunJobFlowInput) -> Result<RunJobFlowOutput, ClientError> {
        self.calls.push("RunJobFlow");
        lock(&self.runs).push(input);
        Ok(RunJobFlowOutput {
            job_flow_id: "j-NEW".to_string(),
            cluster_arn: Some("arn:aws:elasticmapreduce:eu-west-1:123:cluster/j-NEW".to_string()),
        })
    }
}

pub fn emr(fake: FakeEmr) -> (EmrAdapter, Arc<FakeEmr>, Arc<CountingFactory<dyn EmrClient>>) {
    let fake = Arc::new(fake);
    let client: Arc<dyn EmrClient> = fake.clone();
    let factory = CountingFactory::new(client);
    let adapter = EmrAdapter::new(factory.clone());
    (adapter, fake, factory)
}

// ============ S3 ============

pub fn s3_bucket(name: &str) -> S3Bucket {
    S3Bucket {
        name: name.to_string(),
        creation_date: Some("2024-01-02T03:04:05Z".to_string()),
        bucket_region: Some("eu-west-1".to_string()),
    }
}

#[derive(Default)]
pub struct FakeS3 {
    pub buckets: Vec<S3Bucket>,
    pub page_size: usize,
    pub tags: HashMap<String, Vec<S3Tag>>,
    pub lifecycles: Mutex<HashMap<String, S3LifecycleConfiguration>>,
    pub calls: CallLog,
    pub created: Mutex<Vec<CreateBucketInput>>,
    pub tagged: Mutex<Vec<(String, Vec<S3Tag>)>>,
}

impl FakeS3 {
    pub fn new(buckets: Vec<S3Bucket>, page_size: usize) -> Self {
        Self {
            buckets,
            page_size,
            ..Default::default()
        }
    }
}

#[async_trait]
impl S3Client for FakeS3 {
    async fn list_buckets(&self, input: ListBucketsInput) -> Result<ListBucketsOutput, ClientError> {
        self.calls.push(format!(
            "ListBuckets token={}",
            input.continuation_token.as_deref().unwrap_or("")
        ));
        let start = input
            .continuation_token
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0);
        let end = (start + self.page_size).min(self.buckets.len());
        Ok(ListBucketsOutput {
            buckets: self.buckets[start..end].to_vec(),
            continuation_token: (end < self.buckets.len()).then(|| end.to_string()),
        })
    }

    async fn create_bucket(&self, input: CreateBucketInput) -> Result<CreateBucketOutput, ClientError> {
        self.calls.push(format!("CreateBucket {}", input.bucket));
        let location = format!("/{}", input.bucket);
        lock(&self.created).push(input);
        Ok(CreateBucketOutput {
            location: Some(location),
        })
    }

    async fn delete_bucket(&self, bucket: String) -> Result<(), ClientError> {
        self.calls.push(format!("DeleteBucket {bucket}"));
        if self.buckets.iter().any(|b| b.name == bucket) {
            Ok(())
        } else {
            Err(api_error("NoSuchBucket", "The specified bucket does not exist"))
        }
    }

    async fn get_bucket_tagging(&self, bucket: String) -> Result<Vec<S3Tag>, ClientError> {
        self.calls.push(format!("GetBucketTagging {bucket}"));
        self.tags
            .get(&bucket)
            .cloned()
            .ok_or_else(|| api_error("NoSuchTagSet", "The TagSet does not exist"))
    }

    async fn put_bucket_tagging(&self, bucket: String, tags: Vec<S3Tag>) -> Result<(), ClientError> {
        self.calls.push(format!("PutBucketTagging {bucket}"));
        lock(&self.tagged).push((bucket, tags));
        Ok(())
    }

    async fn put_bucket_lifecycle_configuration(&self, input: PutLifecycleInput) -> Result<(), ClientError> {
        self.calls
            .push(format!("PutBucketLifecycleConfiguration {}", input.bucket));
        lock(&self.lifecycles).insert(input.bucket, input.lifecycle_configuration);
        Ok(())
    }

    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: String,
    ) -> Result<S3LifecycleConfiguration, ClientError> {
        self.calls
            .push(format!("GetBucketLifecycleConfiguration {bucket}"));
        lock(&self.lifecycles).get(&bucket).cloned().ok_or_else(|| {
            api_error(
                "NoSuchLifecycleConfiguration",
                "The lifecycle configuration does not exist",
            )
        })
    }
}

pub fn s3(fake: FakeS3) -> (S3Adapter, Arc<FakeS3>, Arc<CountingFactory<dyn S3Client>>) {
    let fake = Arc::new(fake);
    let client: Arc<dyn S3Client> = fake.clone();
    let factory = CountingFactory::new(client);
    let adapter = S3Adapter::new(factory.clone());
    (adapter, fake, factory)
}
