use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

use super::Diagnostics;

// ============ Zones ============

/// A DNS zone (domain) managed by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone name without the trailing dot (e.g. `"corp.internal"`).
    pub name: String,
    /// Number of records in the zone, if the provider reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    /// Native zone payload, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Zone listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListZonesRequest {
    /// Match zones whose name contains this keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Every zone matching a [`ListZonesRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneList {
    pub zones: Vec<Zone>,
    pub total: u64,
}

// ============ Records ============

/// DNS record type.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Ds,
    Https,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Svcb,
    Tlsa,
    Txt,
}

impl RecordType {
    /// Wire spelling shared by every provider.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Ds => "DS",
            Self::Https => "HTTPS",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Svcb => "SVCB",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
        }
    }

    /// Parse a provider-returned type. Unknown spellings are an invalid response.
    pub(crate) fn parse(provider: &str, value: &str) -> Result<Self> {
        let parsed = match value.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CAA" => Self::Caa,
            "CNAME" => Self::Cname,
            "DS" => Self::Ds,
            "HTTPS" => Self::Https,
            "MX" => Self::Mx,
            "NAPTR" => Self::Naptr,
            "NS" => Self::Ns,
            "PTR" => Self::Ptr,
            "SOA" => Self::Soa,
            "SPF" => Self::Spf,
            "SRV" => Self::Srv,
            "SSHFP" => Self::Sshfp,
            "SVCB" => Self::Svcb,
            "TLSA" => Self::Tlsa,
            "TXT" => Self::Txt,
            _ => {
                return Err(ProviderError::invalid_response(
                    provider,
                    format!("unknown record type '{value}'"),
                ));
            }
        };
        Ok(parsed)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a record is answering queries. Not every provider can toggle this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Enabled,
    Disabled,
}

impl RecordStatus {
    /// Parse a provider status (`ENABLE`, `enabled`, `DISABLE`, ...).
    pub(crate) fn parse(provider: &str, value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ENABLE" | "ENABLED" => Ok(Self::Enabled),
            "DISABLE" | "DISABLED" => Ok(Self::Disabled),
            _ => Err(ProviderError::invalid_response(
                provider,
                format!("unknown record status '{value}'"),
            )),
        }
    }
}

/// A DNS record in unified form.
///
/// `value` is always a single string. Providers returning several values for
/// one record collapse to the first; see the adapter docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Subdomain label relative to the zone (`"@"` for the apex).
    pub sub_domain: String,
    pub record_type: RecordType,
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Load-balancing weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// When the record was last updated, if known.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Materialize every record of a zone, optionally filtered by keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecordsRequest {
    /// Zone name or provider zone id.
    pub domain: String,
    /// Substring matched against the subdomain label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Every record matching a [`ListRecordsRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordList {
    pub records: Vec<DnsRecord>,
    /// Number of records returned (after filtering).
    pub total: u64,
}

/// One page of records.
///
/// Offset-paginated providers take `page`/`page_size`; cursor-paginated providers
/// take `cursor`. Supplying the other style is rejected by the adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPageRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// A page of records plus the tokens to move around.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub records: Vec<DnsRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Look up the records of one subdomain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeRecordRequest {
    pub domain: String,
    pub sub_domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
}

/// Request to create a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Zone name or provider zone id.
    pub domain: String,
    /// Subdomain label (`"@"` for the apex).
    pub sub_domain: String,
    pub record_type: RecordType,
    pub value: String,
    /// TTL in seconds; the adapter's default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Free-form note describing why the record exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Identifier of a freshly created record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecord {
    pub record_id: String,
    /// Native create response, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Request to modify a record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRecordRequest {
    pub domain: String,
    /// Record to modify. Required by providers with record ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub sub_domain: String,
    pub record_type: RecordType,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Request to delete records.
///
/// Providers with record ids use `record_ids`; name-addressed providers use
/// `sub_domain` + `record_type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRequest {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
}
