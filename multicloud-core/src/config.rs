//! 规范化层配置
//!
//! 所有字段都有默认值，空 JSON 对象即为完整配置。

use std::path::Path;
#[cfg(any(feature = "aws", feature = "tencent"))]
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[cfg(any(feature = "aws", feature = "tencent"))]
use multicloud_provider::ClientFactory;
#[cfg(feature = "aws")]
use multicloud_provider::providers::aws_emr::EmrClient;
#[cfg(feature = "aws")]
use multicloud_provider::providers::aws_route53::Route53Client;
#[cfg(feature = "aws")]
use multicloud_provider::providers::aws_s3::S3Client;
#[cfg(feature = "tencent")]
use multicloud_provider::providers::tencent_cos::CosClient;
#[cfg(feature = "tencent")]
use multicloud_provider::providers::tencent_privatedns::PrivateDnsClient;
#[cfg(feature = "aws")]
use multicloud_provider::{EmrAdapter, Route53Adapter, S3Adapter};
#[cfg(feature = "tencent")]
use multicloud_provider::{TencentCosAdapter, TencentPrivateDnsAdapter};
use multicloud_provider::Selector;

use crate::error::{CoreError, CoreResult};

/// 指向 JSON 配置文件的环境变量
pub const CONFIG_ENV_VAR: &str = "MULTICLOUD_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizerConfig {
    /// Profile used when a request's selector has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Region used when a request's selector has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,
    pub privatedns: DnsSettings,
    pub route53: DnsSettings,
    pub storage: StorageSettings,
}

/// Per-provider DNS tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSettings {
    pub page_size: u32,
    pub default_ttl: u32,
}

impl DnsSettings {
    const fn with_ttl(default_ttl: u32) -> Self {
        Self {
            page_size: 100,
            default_ttl,
        }
    }
}

/// Bucket listing tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    pub page_size: u32,
    /// Fetch tag sets on every listing, regardless of the request flag.
    pub with_tags: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            page_size: 1000,
            with_tags: false,
        }
    }
}

// 部分字段缺省时回落到对应 provider 的默认值
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialDnsSettings {
    page_size: Option<u32>,
    default_ttl: Option<u32>,
}

impl PartialDnsSettings {
    fn resolve(self, defaults: &DnsSettings) -> DnsSettings {
        DnsSettings {
            page_size: self.page_size.unwrap_or(defaults.page_size),
            default_ttl: self.default_ttl.unwrap_or(defaults.default_ttl),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    default_profile: Option<String>,
    default_region: Option<String>,
    privatedns: Option<PartialDnsSettings>,
    route53: Option<PartialDnsSettings>,
    storage: StorageSettings,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_profile: None,
            default_region: None,
            privatedns: DnsSettings::with_ttl(60),
            route53: DnsSettings::with_ttl(300),
            storage: StorageSettings::default(),
        }
    }
}

impl NormalizerConfig {
    /// 解析 JSON 字符串并校验
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: RawConfig = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("invalid configuration JSON: {e}")))?;

        let defaults = Self::default();
        let config = Self {
            default_profile: raw.default_profile,
            default_region: raw.default_region,
            privatedns: match raw.privatedns {
                Some(p) => p.resolve(&defaults.privatedns),
                None => defaults.privatedns.clone(),
            },
            route53: match raw.route53 {
                Some(p) => p.resolve(&defaults.route53),
                None => defaults.route53.clone(),
            },
            storage: raw.storage,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// 读取 `MULTICLOUD_CONFIG` 指向的文件；未设置时返回默认配置。
    pub fn from_env() -> CoreResult<Self> {
        Self::from_optional_path(std::env::var_os(CONFIG_ENV_VAR).as_deref().map(Path::new))
    }

    fn from_optional_path(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        let page_sizes = [
            ("privatedns.pageSize", self.privatedns.page_size),
            ("route53.pageSize", self.route53.page_size),
            ("storage.pageSize", self.storage.page_size),
        ];
        if let Some((field, _)) = page_sizes.iter().find(|(_, size)| *size == 0) {
            return Err(CoreError::Config(format!("{field} must be greater than 0")));
        }
        Ok(())
    }

    /// Fill the missing half of a selector from the configured defaults.
    pub fn fill_selector(&self, selector: &Selector) -> Selector {
        let pick = |value: &Option<String>, fallback: &Option<String>| {
            value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .or(fallback.as_ref())
                .cloned()
        };
        Selector {
            profile: pick(&selector.profile, &self.default_profile),
            region: pick(&selector.region, &self.default_region),
        }
    }

    #[cfg(feature = "tencent")]
    pub fn build_privatedns(
        &self,
        factory: Arc<dyn ClientFactory<dyn PrivateDnsClient>>,
    ) -> TencentPrivateDnsAdapter {
        TencentPrivateDnsAdapter::builder(factory)
            .page_size(self.privatedns.page_size)
            .default_ttl(self.privatedns.default_ttl)
            .build()
    }

    #[cfg(feature = "tencent")]
    pub fn build_cos(&self, factory: Arc<dyn ClientFactory<dyn CosClient>>) -> TencentCosAdapter {
        TencentCosAdapter::new(factory).with_page_size(self.storage.page_size)
    }

    #[cfg(feature = "aws")]
    pub fn build_route53(&self, factory: Arc<dyn ClientFactory<dyn Route53Client>>) -> Route53Adapter {
        Route53Adapter::builder(factory)
            .page_size(self.route53.page_size)
            .default_ttl(self.route53.default_ttl)
            .build()
    }

    #[cfg(feature = "aws")]
    pub fn build_s3(&self, factory: Arc<dyn ClientFactory<dyn S3Client>>) -> S3Adapter {
        S3Adapter::new(factory).with_page_size(self.storage.page_size)
    }

    #[cfg(feature = "aws")]
    #[allow(clippy::unused_self)]
    pub fn build_emr(&self, factory: Arc<dyn ClientFactory<dyn EmrClient>>) -> EmrAdapter {
        EmrAdapter::new(factory)
    }
}
