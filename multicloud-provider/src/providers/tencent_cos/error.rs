//! 腾讯云 COS 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::TencentCosAdapter;

/// Reference: <https://cloud.tencent.com/document/product/436/7730>
impl ProviderErrorMapper for TencentCosAdapter {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("NotImplemented" | "MethodNotAllowed") => self.unsupported(raw),
            // BucketAlreadyExists / BucketNotEmpty / InvalidBucketName ...
            _ => self.rejected(raw, context),
        }
    }
}
