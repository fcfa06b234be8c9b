//! Route 53 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Adapter;

/// Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for Route53Adapter {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 私有域不支持的记录类型、DNSSEC 等
            Some("UnsupportedOperation" | "NotImplemented") => self.unsupported(raw),
            // InvalidChangeBatch / NoSuchHostedZone / Throttling ... 原样保留
            _ => self.rejected(raw, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::factory::client_factory_fn;
    use crate::providers::aws_route53::Route53Client;
    use crate::traits::ClientError;
    use crate::types::Selector;

    fn adapter() -> Route53Adapter {
        let factory = client_factory_fn(|_: &Selector| {
            Err::<Arc<dyn Route53Client>, _>(ClientError::Transport("offline".into()))
        });
        Route53Adapter::new(Arc::new(factory))
    }

    #[test]
    fn invalid_change_batch_is_rejected_verbatim() {
        let raw = RawApiError::with_code(
            "InvalidChangeBatch",
            "[Tried to create resource record set [name='www.example.com.', type='A'] but it already exists]",
        );
        let err = adapter().map_error(raw.clone(), ErrorContext::new("ChangeResourceRecordSets"));
        match err {
            ProviderError::ProviderRejected { raw_code, message, operation, .. } => {
                assert_eq!(raw_code.as_deref(), Some("InvalidChangeBatch"));
                assert_eq!(message, raw.message);
                assert_eq!(operation, "ChangeResourceRecordSets");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unsupported_operation() {
        let err = adapter().map_error(
            RawApiError::with_code("UnsupportedOperation", "DNSSEC is not supported"),
            ErrorContext::new("ListResourceRecordSets"),
        );
        assert!(matches!(err, ProviderError::UnsupportedByProvider { .. }));
    }
}
