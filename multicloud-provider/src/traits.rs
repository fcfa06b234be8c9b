use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::types::{
    Bucket, BucketList, ClusterDetail, ClusterList, CreateBucketRequest, CreateClusterRequest,
    CreateRecordRequest, CreatedCluster, CreatedRecord, DeleteRecordRequest,
    DescribeClustersRequest, DescribeRecordRequest, DnsRecord, LifecycleRule, ListBucketsRequest,
    ListClustersRequest, ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, RecordList,
    RecordPage, RecordPageRequest, Selector, ZoneList,
};

/// 原始 API 错误（由原生客户端返回）
///
/// Native clients report structured API failures through this type; adapters
/// never look at anything else the client produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// 请求 ID
    pub request_id: Option<String>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            request_id: None,
        }
    }

    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Failure reported by a native client or a client factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The provider API answered with a structured error.
    Api(RawApiError),
    /// Anything else: connection failures, credential lookup, client construction.
    Transport(String),
}

impl ClientError {
    /// True for an API error carrying exactly this code.
    pub fn is_api_code(&self, code: &str) -> bool {
        matches!(self, Self::Api(raw) if raw.code.as_deref() == Some(code))
    }
}

impl From<RawApiError> for ClientError {
    fn from(raw: RawApiError) -> Self {
        Self::Api(raw)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(raw) => match &raw.code {
                Some(code) => write!(f, "{code}: {}", raw.message),
                None => write!(f, "{}", raw.message),
            },
            Self::Transport(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Unified DNS operations.
///
/// Every method takes the selector choosing the native client, the unified
/// request and the caller's [`CallContext`]. Zone-scoped requests accept either a
/// zone name or the provider's native zone id.
#[async_trait]
pub trait DnsAdapter: Send + Sync {
    /// Provider identifier (e.g. `"tencent_privatedns"`).
    fn id(&self) -> &'static str;

    /// Zones whose name matches the optional keyword.
    async fn list_zones(
        &self,
        selector: &Selector,
        req: &ListZonesRequest,
        cx: &CallContext,
    ) -> Result<ZoneList>;

    /// Zone name (or native id) to native zone id.
    async fn resolve_zone(&self, selector: &Selector, name_or_id: &str, cx: &CallContext)
    -> Result<String>;

    /// Every record of a zone, filtered by keyword on the subdomain label.
    async fn list_records(
        &self,
        selector: &Selector,
        req: &ListRecordsRequest,
        cx: &CallContext,
    ) -> Result<RecordList>;

    /// One bounded page of records.
    async fn list_records_page(
        &self,
        selector: &Selector,
        req: &RecordPageRequest,
        cx: &CallContext,
    ) -> Result<RecordPage>;

    /// Records of one subdomain (optionally one type).
    async fn describe_records(
        &self,
        selector: &Selector,
        req: &DescribeRecordRequest,
        cx: &CallContext,
    ) -> Result<Vec<DnsRecord>>;

    async fn create_record(
        &self,
        selector: &Selector,
        req: &CreateRecordRequest,
        cx: &CallContext,
    ) -> Result<CreatedRecord>;

    async fn modify_record(
        &self,
        selector: &Selector,
        req: &ModifyRecordRequest,
        cx: &CallContext,
    ) -> Result<()>;

    async fn delete_record(
        &self,
        selector: &Selector,
        req: &DeleteRecordRequest,
        cx: &CallContext,
    ) -> Result<()>;
}

/// Unified managed-cluster operations.
#[async_trait]
pub trait ClusterAdapter: Send + Sync {
    fn id(&self) -> &'static str;

    /// One page of clusters, or all of them when `fetch_all` is set.
    async fn list_clusters(
        &self,
        selector: &Selector,
        req: &ListClustersRequest,
        cx: &CallContext,
    ) -> Result<ClusterList>;

    /// Details of each requested cluster, in request order.
    async fn describe_clusters(
        &self,
        selector: &Selector,
        req: &DescribeClustersRequest,
        cx: &CallContext,
    ) -> Result<Vec<ClusterDetail>>;

    async fn create_cluster(
        &self,
        selector: &Selector,
        req: &CreateClusterRequest,
        cx: &CallContext,
    ) -> Result<CreatedCluster>;
}

/// Unified object-storage operations.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    fn id(&self) -> &'static str;

    async fn list_buckets(
        &self,
        selector: &Selector,
        req: &ListBucketsRequest,
        cx: &CallContext,
    ) -> Result<BucketList>;

    async fn create_bucket(
        &self,
        selector: &Selector,
        req: &CreateBucketRequest,
        cx: &CallContext,
    ) -> Result<Bucket>;

    async fn delete_bucket(&self, selector: &Selector, bucket: &str, cx: &CallContext)
    -> Result<()>;

    /// Replace the bucket's lifecycle configuration with `rules`.
    ///
    /// Every rule is validated before anything is sent.
    async fn put_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        rules: &[LifecycleRule],
        cx: &CallContext,
    ) -> Result<()>;

    /// Current lifecycle rules; a bucket without configuration yields none.
    async fn get_lifecycle(
        &self,
        selector: &Selector,
        bucket: &str,
        cx: &CallContext,
    ) -> Result<Vec<LifecycleRule>>;
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorContext {
    /// Native operation being executed (e.g. `"ListClusters"`).
    pub operation: &'static str,
}

impl ErrorContext {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原生错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 将客户端错误映射到统一错误类型
    fn map_client_error(&self, err: ClientError, context: ErrorContext) -> ProviderError {
        match err {
            ClientError::Api(raw) => {
                log::debug!(
                    "[{}] {} failed: {:?} - {}",
                    self.provider_name(),
                    context.operation,
                    raw.code,
                    raw.message
                );
                self.map_error(raw, context)
            }
            ClientError::Transport(detail) => ProviderError::Transport {
                provider: self.provider_name().to_string(),
                detail,
            },
        }
    }

    /// 快捷方法：保留原始消息的拒绝错误（fallback）
    fn rejected(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        ProviderError::ProviderRejected {
            provider: self.provider_name().to_string(),
            operation: context.operation.to_string(),
            raw_code: raw.code,
            message: raw.message,
            request_id: raw.request_id,
        }
    }

    /// 快捷方法：Provider 不支持
    fn unsupported(&self, raw: RawApiError) -> ProviderError {
        ProviderError::UnsupportedByProvider {
            provider: self.provider_name().to_string(),
            feature: raw.message,
        }
    }
}
