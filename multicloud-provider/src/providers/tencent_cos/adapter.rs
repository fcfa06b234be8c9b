//! COS StorageAdapter trait 实现

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::factory::obtain_client;
use crate::lifecycle::{from_cos_rules, to_cos_lifecycle};
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

use super::{CosBucket, CosClient, CosTag, PROVIDER_NAME, TencentCosAdapter};

/// COS 存储桶全名：`<name>-<appid>`，appid 为纯数字
fn validate_cos_bucket<'a>(field: &str, bucket: &'a str) -> Result<&'a str> {
    let bucket = validate_bucket_name(PROVIDER_NAME, field, bucket, false)?;
    let has_app_id = bucket.rsplit_once('-').is_some_and(|(name, app_id)| {
        !name.is_empty() && !app_id.is_empty() && app_id.chars().all(|c| c.is_ascii_digit())
    });
    if !has_app_id {
        return Err(ProviderError::validation(
            PROVIDER_NAME,
            field,
            format!("'{bucket}' must end with the account appid, e.g. '{bucket}-1250000000'"),
        ));
    }
    Ok(bucket)
}

fn to_bucket(bucket: CosBucket) -> Result<Bucket> {
    let created_at = match bucket.creation_date.as_deref() {
        Some(t) => parse_provider_timestamp(PROVIDER_NAME, t)?,
        None => None,
    };
    Ok(Bucket {
        name: bucket.name,
        created_at,
        location: bucket.location,
        tags: Tags::new(),
    })
}

impl TencentCosAdapter {
    fn client(&self, selector: &Selector) -> Result<Arc<dyn CosClient>> {
        selector.require_profile(PROVIDER_NAME)?;
        obtain_client(self.factory.as_ref(), self, selector)
    }

    async fn bucket_page(
        &self,
        client: &dyn CosClient,
        marker: Option<String>,
    ) -> Result<CursorPage<CosBucket>> {
        let out = native_call(self, "GetService", client.get_service(marker, self.page_size)).await?;
        let next_cursor = if out.is_truncated.unwrap_or(false) {
            out.next_marker
        } else {
            None
        };
        Ok(CursorPage {
            items: out.buckets,
            next_cursor,
        })
    }

    async fn bucket_tags(&self, client: &dyn CosClient, bucket: &str, cx: &CallContext) -> Result<Tags> {
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
impl StorageAdapter for TencentCosAdapter {
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
        let fetch = |marker| self.bucket_page(client.as_ref(), marker);

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
        let name = validate_cos_bucket("name", &req.name)?;
        req.tags.validate(PROVIDER_NAME, "tags")?;
        let client = self.client(selector)?;

        cx.run(
            PROVIDER_NAME,
            native_call(self, "PutBucket", client.put_bucket(name.to_string())),
        )
        .await?;

        if !req.tags.is_empty() {
            let tags: Vec<CosTag> = req
                .tags
                .iter()
                .map(|(key, value)| CosTag {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect();
            log_request(PROVIDER_NAME, "PutBucketTagging", &tags);
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
            location: selector.region.clone(),
            tags: req.tags.clone(),
        })
    }

    async fn delete_bucket(&self, selector: &Selector, bucket: &str, cx: &CallContext) -> Result<()> {
        let bucket = validate_cos_bucket("bucket", bucket)?;
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
        let bucket = validate_cos_bucket("bucket", bucket)?;
        if rules.is_empty() {
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "rules",
                "at least one rule is required",
            ));
        }
        let config = to_cos_lifecycle(rules)?;
        let client = self.client(selector)?;

        log_request(PROVIDER_NAME, "PutBucketLifecycle", &config);
        cx.run(
            PROVIDER_NAME,
            native_call(
                self,
                "PutBucketLifecycle",
                client.put_bucket_lifecycle(bucket.to_string(), config),
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
        let bucket = validate_cos_bucket("bucket", bucket)?;
        let client = self.client(selector)?;

        let config = cx
            .run(
                PROVIDER_NAME,
                native_call_optional(
                    self,
                    "GetBucketLifecycle",
                    "NoSuchLifecycleConfiguration",
                    client.get_bucket_lifecycle(bucket.to_string()),
                ),
            )
            .await?;
        match config {
            Some(config) => from_cos_rules(&config.rules),
            None => Ok(Vec::new()),
        }
    }
}
