//! 腾讯云 PrivateDNS 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::TencentPrivateDnsAdapter;

/// Reference: <https://cloud.tencent.com/document/api/1338/55953>
impl ProviderErrorMapper for TencentPrivateDnsAdapter {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 不支持的操作 ============
            Some(code) if code.starts_with("UnsupportedOperation") => self.unsupported(raw),
            // 其余错误保留原始 code/message
            _ => self.rejected(raw, context),
        }
    }
}
