use serde::{Deserialize, Serialize};

/// Unified error type for every normalized operation.
///
/// Each variant carries a `provider` field identifying which adapter produced the
/// error. Provider-native error types never cross this boundary: adapters inspect
/// them once and re-wrap them into one of these kinds. All variants are
/// serializable for structured error reporting.
///
/// None of these are retried internally. A failure in the middle of a pagination
/// loop discards whatever pages were already accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A required field is missing or conflicts with another field.
    ///
    /// Always raised before any network call is made.
    RequestValidation {
        /// Provider that produced the error.
        provider: String,
        /// Name of the offending field (e.g. `"rules[1].id"`).
        field: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Name resolution matched zero or more than one zone.
    ResolutionAmbiguous {
        /// Provider that produced the error.
        provider: String,
        /// Keyword the listing was filtered by.
        keyword: String,
        /// Number of zones the listing returned.
        matches: usize,
    },

    /// The provider's own API returned a structured error.
    ProviderRejected {
        /// Provider that produced the error.
        provider: String,
        /// Native operation that was rejected (e.g. `"DescribePrivateZoneList"`).
        operation: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Original error message, preserved verbatim.
        message: String,
        /// Provider request id, if available.
        request_id: Option<String>,
    },

    /// A requested field or operation has no equivalent on this provider.
    UnsupportedByProvider {
        /// Provider that produced the error.
        provider: String,
        /// The unsupported field or operation.
        feature: String,
    },

    /// The provider returned data that cannot be mapped into the unified model
    /// (an unmapped enumeration value, a stalled cursor, ...).
    InvalidResponse {
        /// Provider that produced the error.
        provider: String,
        /// Details about the mapping failure.
        detail: String,
    },

    /// Any other failure reported by the client (connection, client construction, ...).
    Transport {
        /// Provider that produced the error.
        provider: String,
        /// Error details, passed through unmodified.
        detail: String,
    },

    /// The caller cancelled the operation or its deadline passed.
    Cancelled {
        /// Provider whose call was interrupted.
        provider: String,
        /// `"cancelled"` or `"deadline exceeded"`.
        reason: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、名称解析失败等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::RequestValidation { .. }
                | Self::ResolutionAmbiguous { .. }
                | Self::ProviderRejected { .. }
                | Self::UnsupportedByProvider { .. }
                | Self::Cancelled { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::RequestValidation { provider, .. }
            | Self::ResolutionAmbiguous { provider, .. }
            | Self::ProviderRejected { provider, .. }
            | Self::UnsupportedByProvider { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Cancelled { provider, .. } => provider,
        }
    }

    pub(crate) fn validation(
        provider: &str,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::RequestValidation {
            provider: provider.to_string(),
            field: field.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn unsupported(provider: &str, feature: impl Into<String>) -> Self {
        Self::UnsupportedByProvider {
            provider: provider.to_string(),
            feature: feature.into(),
        }
    }

    pub(crate) fn invalid_response(provider: &str, detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.to_string(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestValidation {
                provider,
                field,
                detail,
            } => {
                write!(f, "[{provider}] Invalid request field '{field}': {detail}")
            }
            Self::ResolutionAmbiguous {
                provider,
                keyword,
                matches,
            } => {
                if *matches == 0 {
                    write!(f, "[{provider}] No zone matches '{keyword}'")
                } else {
                    write!(
                        f,
                        "[{provider}] {matches} zones match '{keyword}', expected exactly one"
                    )
                }
            }
            Self::ProviderRejected {
                provider,
                operation,
                raw_code,
                message,
                ..
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] {operation} rejected ({code}): {message}")
                } else {
                    write!(f, "[{provider}] {operation} rejected: {message}")
                }
            }
            Self::UnsupportedByProvider { provider, feature } => {
                write!(f, "[{provider}] Not supported by provider: {feature}")
            }
            Self::InvalidResponse { provider, detail } => {
                write!(f, "[{provider}] Invalid response: {detail}")
            }
            Self::Transport { provider, detail } => {
                write!(f, "[{provider}] {detail}")
            }
            Self::Cancelled { provider, reason } => {
                write!(f, "[{provider}] Operation aborted: {reason}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
