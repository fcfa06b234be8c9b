//! 日期时间序列化/反序列化工具
//!
//! - 序列化: `DateTime`<Utc> -> RFC3339 字符串
//! - 反序列化: RFC3339 字符串 或 Unix 时间戳 -> `DateTime`<Utc>
//! - [`parse_provider_timestamp`]: 解析各云厂商返回的时间字符串

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{ProviderError, Result};

/// 腾讯云返回的无时区时间为北京时间 (UTC+8)
const TENCENT_OFFSET_SECS: i32 = 8 * 3600;

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化：支持 RFC3339 字符串或 Unix 时间戳（秒/毫秒自动识别）
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
    }

    match Option::<OptionalTimestamp>::deserialize(deserializer)? {
        Some(OptionalTimestamp::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        Some(OptionalTimestamp::I64(ts)) => parse_unix_timestamp(ts)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        None => Ok(None),
    }
}

/// 解析 Unix 时间戳（自动判断秒/毫秒）
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // > 10^11 视为毫秒
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// 解析云厂商返回的时间字符串
///
/// Accepts RFC3339 (AWS, COS) and the naive `YYYY-MM-DD HH:MM:SS` form Tencent
/// APIs return, which is interpreted as UTC+8. Blank input yields `None`.
pub(crate) fn parse_provider_timestamp(provider: &str, value: &str) -> Result<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        ProviderError::invalid_response(provider, format!("unparseable timestamp '{value}': {e}"))
    })?;
    let offset = FixedOffset::east_opt(TENCENT_OFFSET_SECS)
        .ok_or_else(|| ProviderError::invalid_response(provider, "invalid UTC offset"))?;
    naive
        .and_local_timezone(offset)
        .single()
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .ok_or_else(|| ProviderError::invalid_response(provider, format!("ambiguous timestamp '{value}'")))
}
