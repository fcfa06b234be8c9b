//! 对象存储服务

use std::sync::Arc;

use multicloud_provider::{
    Bucket, BucketList, CallContext, CreateBucketRequest, LifecycleRule, ListBucketsRequest,
    Selector,
};

use crate::error::CoreResult;
use crate::services::ServiceContext;

/// 对象存储服务（bucket + 生命周期规则）
pub struct StorageService {
    ctx: Arc<ServiceContext>,
}

impl StorageService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出 bucket
    ///
    /// 配置中 `storage.withTags` 打开时，无论请求如何都会拉取标签。
    pub async fn list_buckets(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &ListBucketsRequest,
        cx: &CallContext,
    ) -> CoreResult<BucketList> {
        let adapter = self.ctx.storage_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);
        let request = ListBucketsRequest {
            with_tags: request.with_tags || self.ctx.config.storage.with_tags,
            ..request.clone()
        };

        match adapter.list_buckets(&selector, &request, cx).await {
            Ok(list) => Ok(list),
            Err(e) => Err(self.ctx.handle_provider_error("list_buckets", e)),
        }
    }

    pub async fn create_bucket(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &CreateBucketRequest,
        cx: &CallContext,
    ) -> CoreResult<Bucket> {
        let adapter = self.ctx.storage_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.create_bucket(&selector, request, cx).await {
            Ok(bucket) => {
                log::info!("{provider_id}: created bucket {}", bucket.name);
                Ok(bucket)
            }
            Err(e) => Err(self.ctx.handle_provider_error("create_bucket", e)),
        }
    }

    pub async fn delete_bucket(
        &self,
        provider_id: &str,
        selector: &Selector,
        bucket: &str,
        cx: &CallContext,
    ) -> CoreResult<()> {
        let adapter = self.ctx.storage_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.delete_bucket(&selector, bucket, cx).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.ctx.handle_provider_error("delete_bucket", e)),
        }
    }

    /// 替换 bucket 的生命周期规则，规则全部校验通过才会发送
    pub async fn put_lifecycle(
        &self,
        provider_id: &str,
        selector: &Selector,
        bucket: &str,
        rules: &[LifecycleRule],
        cx: &CallContext,
    ) -> CoreResult<()> {
        let adapter = self.ctx.storage_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.put_lifecycle(&selector, bucket, rules, cx).await {
            Ok(()) => {
                log::info!("{provider_id}: {} lifecycle rules set on {bucket}", rules.len());
                Ok(())
            }
            Err(e) => Err(self.ctx.handle_provider_error("put_lifecycle", e)),
        }
    }

    pub async fn get_lifecycle(
        &self,
        provider_id: &str,
        selector: &Selector,
        bucket: &str,
        cx: &CallContext,
    ) -> CoreResult<Vec<LifecycleRule>> {
        let adapter = self.ctx.storage_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        adapter
            .get_lifecycle(&selector, bucket, cx)
            .await
            .map_err(|e| self.ctx.handle_provider_error("get_lifecycle", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NormalizerConfig, StorageSettings};
    use crate::error::CoreError;
    use crate::test_utils::{
        MockStorageAdapter, create_test_config, create_test_context, test_tags,
    };
    use crate::traits::AdapterRegistry;
    use multicloud_provider::{Expiration, LifecycleFilter, ProviderError};

    async fn create_test_service(
        config: NormalizerConfig,
    ) -> (StorageService, Arc<MockStorageAdapter>) {
        let (ctx, registry) = create_test_context(config);
        let adapter = Arc::new(MockStorageAdapter::new("mock_storage"));
        registry.register_storage(adapter.clone()).await;
        (StorageService::new(ctx), adapter)
    }

    #[tokio::test]
    async fn test_with_tags_follows_request_when_config_off() {
        let (service, adapter) = create_test_service(create_test_config()).await;
        let cx = CallContext::new();

        let plain = ListBucketsRequest::default();
        let tagged = ListBucketsRequest {
            with_tags: true,
            ..Default::default()
        };
        service
            .list_buckets("mock_storage", &Selector::default(), &plain, &cx)
            .await
            .unwrap();
        service
            .list_buckets("mock_storage", &Selector::default(), &tagged, &cx)
            .await
            .unwrap();

        assert_eq!(*adapter.with_tags_seen.read().await, vec![false, true]);
    }

    #[tokio::test]
    async fn test_with_tags_forced_by_config() {
        let config = NormalizerConfig {
            storage: StorageSettings {
                with_tags: true,
                ..StorageSettings::default()
            },
            ..create_test_config()
        };
        let (service, adapter) = create_test_service(config).await;

        service
            .list_buckets(
                "mock_storage",
                &Selector::default(),
                &ListBucketsRequest::default(),
                &CallContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(*adapter.with_tags_seen.read().await, vec![true]);
    }

    #[tokio::test]
    async fn test_create_bucket() {
        let (service, _) = create_test_service(create_test_config()).await;
        let request = CreateBucketRequest {
            name: "logs-1250000000".to_string(),
            tags: test_tags(),
        };

        let bucket = service
            .create_bucket("mock_storage", &Selector::default(), &request, &CallContext::new())
            .await
            .unwrap();

        assert_eq!(bucket.name, "logs-1250000000");
        assert_eq!(bucket.location.as_deref(), Some("ap-guangzhou"));
        assert_eq!(bucket.tags, test_tags());
    }

    #[tokio::test]
    async fn test_lifecycle_round_trip() {
        let (service, _) = create_test_service(create_test_config()).await;
        let cx = CallContext::new();
        let rules = vec![LifecycleRule {
            filter: Some(LifecycleFilter {
                prefix: Some("logs/".to_string()),
            }),
            expiration: Some(Expiration {
                days: Some(30),
                ..Default::default()
            }),
            ..LifecycleRule::with_id("expire-logs")
        }];

        service
            .put_lifecycle("mock_storage", &Selector::default(), "logs", &rules, &cx)
            .await
            .unwrap();
        let stored = service
            .get_lifecycle("mock_storage", &Selector::default(), "logs", &cx)
            .await
            .unwrap();

        assert_eq!(stored, rules);
    }

    #[tokio::test]
    async fn test_lifecycle_validation_error() {
        let (service, adapter) = create_test_service(create_test_config()).await;
        adapter
            .recorder
            .fail_with(ProviderError::RequestValidation {
                provider: "mock_storage".to_string(),
                field: "rules[0].filter".to_string(),
                detail: "filter is required".to_string(),
            })
            .await;

        let err = service
            .put_lifecycle(
                "mock_storage",
                &Selector::default(),
                "logs",
                &[LifecycleRule::with_id("r1")],
                &CallContext::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_expected());
        assert!(matches!(
            err,
            CoreError::Provider(ProviderError::RequestValidation { ref field, .. }) if field == "rules[0].filter"
        ));
    }
}
