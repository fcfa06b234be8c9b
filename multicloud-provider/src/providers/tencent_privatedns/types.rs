//! 腾讯云私有域解析 (PrivateDNS) API 类型定义

use serde::{Deserialize, Serialize};

/// Generic name/values filter used by the `Describe*` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Values")]
    pub values: Vec<String>,
}

// ============ 私有域 ============

/// `DescribePrivateZoneList` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribePrivateZoneListRequest {
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(rename = "Limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "Filters", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

/// `DescribePrivateZoneList` response payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescribePrivateZoneListResponse {
    #[serde(rename = "TotalCount")]
    pub total_count: u64,
    #[serde(rename = "PrivateZoneSet", default)]
    pub private_zone_set: Vec<PrivateZone>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// Private zone item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateZone {
    /// `zone-xxxxxxxx`
    #[serde(rename = "ZoneId")]
    pub zone_id: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "RecordCount")]
    pub record_count: Option<u64>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Remark")]
    pub remark: Option<String>,
    #[serde(rename = "UpdatedOn")]
    pub updated_on: Option<String>,
}

// ============ 解析记录 ============

/// `DescribePrivateZoneRecordList` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribePrivateZoneRecordListRequest {
    #[serde(rename = "ZoneId")]
    pub zone_id: String,
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(rename = "Limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `DescribePrivateZoneRecordList` response payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescribePrivateZoneRecordListResponse {
    #[serde(rename = "TotalCount")]
    pub total_count: u64,
    #[serde(rename = "RecordSet", default)]
    pub record_set: Vec<PrivateZoneRecord>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// Record item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateZoneRecord {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "ZoneId")]
    pub zone_id: Option<String>,
    #[serde(rename = "SubDomain")]
    pub sub_domain: String,
    #[serde(rename = "RecordType")]
    pub record_type: String,
    #[serde(rename = "RecordValue")]
    pub record_value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "MX")]
    pub mx: Option<u32>,
    /// `enabled` / `disabled`
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Weight")]
    pub weight: Option<u32>,
    /// `2024-03-01 10:00:00`，北京时间
    #[serde(rename = "UpdatedOn")]
    pub updated_on: Option<String>,
}

/// `CreatePrivateZoneRecord` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePrivateZoneRecordRequest {
    #[serde(rename = "ZoneId")]
    pub zone_id: String,
    #[serde(rename = "SubDomain")]
    pub sub_domain: String,
    #[serde(rename = "RecordType")]
    pub record_type: String,
    #[serde(rename = "RecordValue")]
    pub record_value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

/// `CreatePrivateZoneRecord` response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrivateZoneRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// `ModifyPrivateZoneRecord` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyPrivateZoneRecordRequest {
    #[serde(rename = "ZoneId")]
    pub zone_id: String,
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "SubDomain")]
    pub sub_domain: String,
    #[serde(rename = "RecordType")]
    pub record_type: String,
    #[serde(rename = "RecordValue")]
    pub record_value: String,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

/// `DeletePrivateZoneRecord` request. One of the two id fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePrivateZoneRecordRequest {
    #[serde(rename = "ZoneId")]
    pub zone_id: String,
    #[serde(rename = "RecordId", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(rename = "RecordIdSet", default, skip_serializing_if = "Vec::is_empty")]
    pub record_id_set: Vec<String>,
}

/// Response of actions that only return a request id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}
