//! S3 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::S3Adapter;

/// Reference: <https://docs.aws.amazon.com/AmazonS3/latest/API/ErrorResponses.html>
impl ProviderErrorMapper for S3Adapter {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("NotImplemented") => self.unsupported(raw),
            // BucketAlreadyExists / BucketNotEmpty / MalformedXML ...
            _ => self.rejected(raw, context),
        }
    }
}
