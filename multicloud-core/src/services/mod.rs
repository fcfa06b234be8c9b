//! 业务逻辑服务层
//!
//! 每个服务按 provider id 从注册表取出 adapter，先用配置补全 selector，
//! 再把请求原样转交给 adapter。

mod cluster_service;
mod dns_service;
mod storage_service;

pub use cluster_service::ClusterService;
pub use dns_service::DnsService;
pub use storage_service::StorageService;

use std::sync::Arc;

use multicloud_provider::{ClusterAdapter, DnsAdapter, ProviderError, Selector, StorageAdapter};

use crate::config::NormalizerConfig;
use crate::error::{CoreError, CoreResult};
use crate::traits::AdapterRegistry;

/// 服务上下文 - 持有所有依赖
pub struct ServiceContext {
    /// Adapter 注册表
    pub registry: Arc<dyn AdapterRegistry>,
    /// 默认 selector 与各 provider 调优参数
    pub config: Arc<NormalizerConfig>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(registry: Arc<dyn AdapterRegistry>, config: Arc<NormalizerConfig>) -> Self {
        Self { registry, config }
    }

    pub async fn dns_adapter(&self, provider_id: &str) -> CoreResult<Arc<dyn DnsAdapter>> {
        self.registry
            .dns(provider_id)
            .await
            .ok_or_else(|| CoreError::ProviderNotRegistered(provider_id.to_string()))
    }

    pub async fn cluster_adapter(&self, provider_id: &str) -> CoreResult<Arc<dyn ClusterAdapter>> {
        self.registry
            .cluster(provider_id)
            .await
            .ok_or_else(|| CoreError::ProviderNotRegistered(provider_id.to_string()))
    }

    pub async fn storage_adapter(&self, provider_id: &str) -> CoreResult<Arc<dyn StorageAdapter>> {
        self.registry
            .storage(provider_id)
            .await
            .ok_or_else(|| CoreError::ProviderNotRegistered(provider_id.to_string()))
    }

    /// 用配置中的默认 profile/region 补全 selector
    pub fn selector(&self, selector: &Selector) -> Selector {
        self.config.fill_selector(selector)
    }

    /// 记录 Provider 错误并转换为 `CoreError`
    ///
    /// 预期错误（校验失败、provider 拒绝等）记为 warn，其余记为 error。
    pub fn handle_provider_error(&self, operation: &str, err: ProviderError) -> CoreError {
        if err.is_expected() {
            log::warn!("{operation} failed: {err}");
        } else {
            log::error!("{operation} failed: {err}");
        }
        CoreError::Provider(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockDnsAdapter, create_test_config, create_test_context};

    #[tokio::test]
    async fn unknown_provider_is_not_registered() {
        let (ctx, _) = create_test_context(create_test_config());
        let result = ctx.dns_adapter("gcp_dns").await;
        assert!(matches!(
            result,
            Err(CoreError::ProviderNotRegistered(ref id)) if id == "gcp_dns"
        ));
    }

    #[tokio::test]
    async fn adapters_are_looked_up_per_family() {
        let (ctx, registry) = create_test_context(create_test_config());
        registry
            .register_dns(Arc::new(MockDnsAdapter::new("mock_dns")))
            .await;

        assert!(ctx.dns_adapter("mock_dns").await.is_ok());
        assert!(matches!(
            ctx.storage_adapter("mock_dns").await,
            Err(CoreError::ProviderNotRegistered(_))
        ));
    }

    #[test]
    fn provider_errors_are_wrapped() {
        let (ctx, _) = create_test_context(create_test_config());
        let err = ctx.handle_provider_error(
            "list_records",
            ProviderError::Transport {
                provider: "mock_dns".to_string(),
                detail: "connection reset".to_string(),
            },
        );
        assert!(matches!(err, CoreError::Provider(ProviderError::Transport { .. })));
        assert!(!err.is_expected());
    }
}
