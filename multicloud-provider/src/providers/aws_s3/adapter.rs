//! S3 StorageAdapter trait 实现

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::factory::obtain_client;
use crate::lifecycle::{from_s3_rules, to_s3_lifecycle};
use crate::pagination::{collect_cursor, cursor_page, matches_keyword};
use crate::providers::common::{
    log_request, native_call, native_call_optional, validate_bucket_name,
};
use crate::traits::StorageAdapter;
use crate::types::{
    Bucket, BucketList, CreateBucketRequest, CursorPage, LifecycleRule, ListBucketsRequest,
    Selector, Tags,
};
use crate::utils::datetime::parse_provider_timestamp;

use super::{
    CreateBucketConfiguration, CreateBucketInput, DEFAULT_REGION, ListBucketsInput,
    PROVIDER_NAME, S3Adapter, S3Bucket, S3Client, S3Tag,
};

fn to_bucket(bucket: S3Bucket) -> Result<Bucket> {
    let created_at = match bucket.creation_date.as_deref() {
        Some(t) => parse_provider_timestamp(PROVIDER_NAME, t)?,
        None => None,
    };
    Ok(Bucket {
        name: bucket.name,
        created_at,
        location: bucket.bucket_region,
        tags: Tags::new(),
    })
}

impl S3Adapter {
    fn client(&self, selector: &Selector) -> Result<Arc<dyn S3Client>> {
        selector.require_any(PROVIDER_NAME)?;
        obtain_client(self.factory.as_ref(), self, selector)
    }

    async fn bucket_page(
        &self,
        client: &dyn S3Client,
        continuation_token: Option<String>,
    ) -> Result<CursorPage<S3Bucket>> {
        let input = ListBucketsInput {
            continuation_token,
            max_buckets: Some(self.page_size),
            bucket_region: None,
        };
        let out = native_call(self, "ListBuckets", client.list_buckets(input)).await?;
        Ok(CursorPage {
            items: out.buckets,
            next_cursor: out.continuation_token,
        })
    }

    /// 没有标签时 S3 返回 `NoSuchTagSet`
    async fn bucket_tags(&self, client: &dyn S3Client, bucket: &str, cx: &CallContext) -> Result<Tags> {
        let tags = cx
            .run(
                PROVIDER_NAME,
                native_call_optional(
                    self,
                    "GetBucketTagging",
                    "NoSuchTagSet",
                    client.get_bucket_tagging(bucket.to_string()),
                ),
            )
            .await?
            .unwrap_or_default();
        Tags::from_pairs(PROVIDER_NAME, tags.into_iter().map(|t| (t.key, t.value)))
    }
}

#[async_trait]
impl StorageAdapter for S3Adapter {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_buckets(
        &self,
        selector: &Selector,
        req: &ListBucketsRequest,
        cx: &CallContext,
    ) -> Result<BucketList> {
        let client = self.client(selector)?;
        let fetch = |token| self.bucket_page(client.as_ref(), token);

        let (raw, next_cursor) = if req.fetch_all {
            let all = collect_cursor(cx, PROVIDER_NAME, req.cursor.clone(), fetch).await?;
            (all, None)
        } else {
            let page = cursor_page(cx, PROVIDER_NAME, req.cursor.clone(), fetch).await?;
            (page.items, page.next_cursor)
        };

        let keyword = req.keyword.as_deref();
        let mut buckets = Vec::new();
        for native in raw.into_iter().filter(|b| matches_keyword(&b.name, keyword)) {
            let mut bucket = to_bucket(native)?;
            if req.with_tags {
                bucket.tags = self.bucket_tags(client.as_ref(), &bucket.name, cx).await?;
            }
            buckets.push(bucket);
        }
        Ok(BucketList {
            buckets,
            next_cursor,
        })
    }

    async fn create_bucket(
        &self,
        selector: &Selector,
        req: &CreateBucketRequest,
        cx: &CallContext,
    ) -> Result<Bucket> {
        let name = validate_bucket_name(PROVIDER_NAME, "name", &req.name, true)?;
        req.tags.validate(PROVIDER_NAME, "tags")?;
        let client = self.client(selector)?;

        let region = selector
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        let input = CreateBucketInput {
            bucket: name.to_string(),
            create_bucket_configuration: region.filter(|r| *r != DEFAULT_REGION).map(|r| {
                CreateBucketConfiguration {
                    location_constraint: r.to_string(),
                }
            }),
        };
        log_request(PROVIDER_NAME, "CreateBucket", &input);
        cx.run(
            PROVIDER_NAME,
            native_call(self, "CreateBucket", client.create_bucket(input)),
        )
        .await?;

        // 标签需单独设置
        if !req.tags.is_empty() {
            let tags = req
                .tags
                .iter()
                .map(|(key, value)| S3Tag {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect();
            cx.run(
                PROVIDER_NAME,
                native_call(
                    self,
                    "PutBucketTagging",
                    client.put_bucket_tagging(name.to_string(), tags),
                ),
            )
            .await?;
        }

        Ok(Bucket {
            name: name.to_string(),
            created_at: None,
            location: Some(region.unwrap_or(DEFAULT_REGION).to_string()),
            tags: req.tags.clone(),
        })
    }

    async fn delete_bucket(&self, selector: &Selector, bucket: &str, cx: &CallContext) -> Result<()> {
        let bucket = validate_bucket_name(PROVIDER_NAME, "bucket", bucket, true)?;
        let client = self.client(selector)?;
        cx.run(
            PROVIDER_NAME,
            native_call(self, "DeleteBucket", client.delete_bucket(bucket.to_string())),
        )
        .await
    }

    async fn put_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        rules: &[LifecycleRule],
        cx: &CallContext,
    ) -> Result<()> {
        let bucket = validate_bucket_name(PROVIDER_NAME, "bucket", bucket, true)?;
        if rules.is_empty() {
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "rules",
                "at least one rule is required",
            ));
        }
        let input = to_s3_lifecycle(bucket, rules)?;
        let client = self.client(selector)?;

        log_request(PROVIDER_NAME, "PutBucketLifecycleConfiguration", &input);
        cx.run(
            PROVIDER_NAME,
            native_call(
                self,
                "PutBucketLifecycleConfiguration",
                client.put_bucket_lifecycle_configuration(input),
            ),
        )
        .await
    }

    async fn get_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        cx: &CallContext,
    ) -> Result<Vec<LifecycleRule>> {
        let bucket = validate_bucket_name(PROVIDER_NAME, "bucket", bucket, true)?;
        let client = self.client(selector)?;

        let config = cx
            .run(
                PROVIDER_NAME,
                native_call_optional(
                    self,
                    "GetBucketLifecycleConfiguration",
                    "NoSuchLifecycleConfiguration",
                    client.get_bucket_lifecycle_configuration(bucket.to_string()),
                ),
            )
            .await?;
        match config {
            Some(config) => from_s3_rules(&config.rules),
            None => Ok(Vec::new()),
        }
    }
}
