//! EMR 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::EmrAdapter;

/// Reference: <https://docs.aws.amazon.com/emr/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for EmrAdapter {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("UnsupportedOperationException") => self.unsupported(raw),
            _ => self.rejected(raw, context),
        }
    }
}
