//! Lifecycle policy translation.
//!
//! One abstract rule set, two native schemas. Translation is all-or-nothing:
//! the first invalid rule fails the whole call and nothing is produced. Input
//! order is preserved and every rule is written as `Enabled`.

#[cfg(feature = "tencent")]
mod cos;
#[cfg(feature = "aws")]
mod s3;

#[cfg(feature = "tencent")]
pub use cos::{from_cos_rules, to_cos_lifecycle};
#[cfg(feature = "aws")]
pub use s3::{from_s3_rules, to_s3_lifecycle};

use chrono::{DateTime, NaiveDate};

use crate::error::{ProviderError, Result};
use crate::types::LifecycleRule;

pub(crate) const STATUS_ENABLED: &str = "Enabled";

/// Rule id, required by both providers.
fn rule_id(provider: &str, index: usize, rule: &LifecycleRule) -> Result<String> {
    match rule.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ProviderError::validation(
            provider,
            format!("rules[{index}].id"),
            "rule id is required",
        )),
    }
}

fn required<T>(provider: &str, index: usize, path: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        ProviderError::validation(provider, format!("rules[{index}].{path}"), "is required")
    })
}

fn required_class(provider: &str, index: usize, path: &str, value: Option<&String>) -> Result<String> {
    match value.map(|v| v.trim()) {
        Some(class) if !class.is_empty() => Ok(class.to_string()),
        _ => Err(ProviderError::validation(
            provider,
            format!("rules[{index}].{path}"),
            "is required",
        )),
    }
}

/// Midnight UTC, the form both providers accept.
fn render_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

fn parse_date(provider: &str, value: &str) -> Result<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ProviderError::invalid_response(provider, format!("unparseable lifecycle date '{value}': {e}"))
    })
}
