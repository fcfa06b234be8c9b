//! 腾讯云 COS 原生请求/响应结构

use serde::{Deserialize, Serialize};

// ============ 存储桶 ============

/// `GET Service` (list buckets) response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListAllMyBucketsResult {
    #[serde(default)]
    pub buckets: Vec<CosBucket>,
    pub is_truncated: Option<bool>,
    pub next_marker: Option<String>,
}

/// One bucket of `GET Service`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosBucket {
    /// `<name>-<appid>`
    pub name: String,
    /// Region, e.g. `ap-guangzhou`.
    pub location: Option<String>,
    /// RFC3339.
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosTag {
    pub key: String,
    pub value: String,
}

// ============ 生命周期 ============

/// `PUT Bucket lifecycle` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosLifecycleConfiguration {
    #[serde(rename = "Rule", default)]
    pub rules: Vec<CosLifecycleRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosLifecycleRule {
    #[serde(rename = "ID")]
    pub id: String,
    /// 缺省表示整个存储桶
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<CosLifecycleFilter>,
    /// `"Enabled"` / `"Disabled"`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CosExpiration>,
    #[serde(rename = "Transition", default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<CosTransition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noncurrent_version_expiration: Option<CosNoncurrentVersion>,
    #[serde(
        rename = "NoncurrentVersionTransition",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub noncurrent_version_transitions: Vec<CosNoncurrentVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_incomplete_multipart_upload: Option<CosAbortIncompleteMultipartUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosLifecycleFilter {
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosExpiration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_object_delete_marker: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosTransition {
    pub days: u32,
    /// `STANDARD_IA`, `ARCHIVE`, ...
    pub storage_class: String,
}

/// 非当前版本的过期/沉降共用结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosNoncurrentVersion {
    pub noncurrent_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosAbortIncompleteMultipartUpload {
    pub days_after_initiation: u32,
}
