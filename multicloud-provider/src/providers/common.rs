//! Provider 公共工具函数

use std::future::Future;

use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::traits::{ClientError, ErrorContext, ProviderErrorMapper};
use crate::types::Diagnostics;
use crate::utils::log_sanitizer::truncate_for_log;

// ============ 原生调用 ============

/// 调用原生客户端并映射错误
///
/// Cancellation and deadlines are applied by the caller (`CallContext::run` or
/// the pagination streams); this only logs and maps.
pub(crate) async fn native_call<T, M, Fut>(mapper: &M, operation: &'static str, call: Fut) -> Result<T>
where
    M: ProviderErrorMapper + ?Sized,
    Fut: Future<Output = std::result::Result<T, ClientError>>,
{
    log::debug!("[{}] {operation}", mapper.provider_name());
    call.await
        .map_err(|e| mapper.map_client_error(e, ErrorContext::new(operation)))
}

/// 调用原生客户端；`missing_code` 表示资源不存在，返回 `None`
pub(crate) async fn native_call_optional<T, M, Fut>(
    mapper: &M,
    operation: &'static str,
    missing_code: &str,
    call: Fut,
) -> Result<Option<T>>
where
    M: ProviderErrorMapper + ?Sized,
    Fut: Future<Output = std::result::Result<T, ClientError>>,
{
    log::debug!("[{}] {operation}", mapper.provider_name());
    match call.await {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_api_code(missing_code) => {
            log::debug!("[{}] {operation}: {missing_code}", mapper.provider_name());
            Ok(None)
        }
        Err(e) => Err(mapper.map_client_error(e, ErrorContext::new(operation))),
    }
}

/// 记录请求体（截断后）
pub(crate) fn log_request<R: Serialize>(provider: &str, operation: &str, request: &R) {
    if log::log_enabled!(log::Level::Debug) {
        let body = serde_json::to_string(request).unwrap_or_default();
        log::debug!("[{provider}] {operation} request: {}", truncate_for_log(&body));
    }
}

/// 原生响应转为诊断信息
pub(crate) fn diagnostics<R: Serialize>(native: &R) -> Option<Diagnostics> {
    serde_json::to_value(native).ok()
}

// ============ 参数校验 ============

/// 必填字符串字段不能为空
pub(crate) fn require_non_blank<'a>(provider: &str, field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::validation(provider, field, "must not be empty"));
    }
    Ok(trimmed)
}

/// 存储桶名称：小写字母、数字和 `-`（S3 另允许 `.`），首尾须为字母或数字
pub(crate) fn validate_bucket_name<'a>(
    provider: &str,
    field: &str,
    name: &'a str,
    allow_dots: bool,
) -> Result<&'a str> {
    let name = require_non_blank(provider, field, name)?;
    let allowed = |c: char| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_dots && c == '.')
    };
    let alnum = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !(3..=63).contains(&name.len())
        || !name.chars().all(allowed)
        || !alnum(name.chars().next())
        || !alnum(name.chars().last())
    {
        return Err(ProviderError::validation(
            provider,
            field,
            format!("'{name}' is not a valid bucket name"),
        ));
    }
    Ok(name)
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "@"
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full.eq_ignore_ascii_case(&zone) {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// 将相对名称转换为完整域名（带末尾点）
/// 如: "www" + "example.com" -> "www.example.com."
/// 如: "@" + "example.com" -> "example.com."
pub fn relative_to_fqdn(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        format!("{zone}.")
    } else {
        format!("{relative_name}.{zone}.")
    }
}
