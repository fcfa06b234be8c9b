//! Unified domain model shared by every adapter.

mod cluster;
mod dns;
mod pagination;
mod storage;

pub use cluster::{
    Cluster, ClusterDetail, ClusterList, ClusterStatus, CreateClusterRequest, CreatedCluster,
    DescribeClustersRequest, ListClustersRequest, TimeWindow,
};
pub use dns::{
    CreateRecordRequest, CreatedRecord, DeleteRecordRequest, DescribeRecordRequest, DnsRecord,
    ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, RecordList, RecordPage,
    RecordPageRequest, RecordStatus, RecordType, Zone, ZoneList,
};
pub use pagination::PageWindow;
pub use storage::{
    AbortIncompleteUpload, Bucket, BucketList, CreateBucketRequest, Expiration, LifecycleFilter,
    LifecycleRule, ListBucketsRequest, NoncurrentExpiration, NoncurrentTransition, Transition,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Native payload passed through for diagnostics only.
///
/// Never consulted by normalization logic.
pub type Diagnostics = serde_json::Value;

/// Chooses which native client the factory builds.
///
/// Which of the two fields is mandatory depends on the provider; adapters check
/// it before touching the factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    /// Named credential profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Provider region (e.g. `"ap-guangzhou"`, `"us-east-1"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Selector {
    pub fn profile(profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            region: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// True when neither field is set (or both are blank).
    pub fn is_empty(&self) -> bool {
        non_blank(self.profile.as_deref()).is_none() && non_blank(self.region.as_deref()).is_none()
    }

    /// Require at least one of profile/region.
    pub fn require_any(&self, provider: &str) -> Result<()> {
        if self.is_empty() {
            return Err(ProviderError::validation(
                provider,
                "selector",
                "region or profile is required",
            ));
        }
        Ok(())
    }

    /// Require the profile.
    pub fn require_profile(&self, provider: &str) -> Result<&str> {
        non_blank(self.profile.as_deref())
            .ok_or_else(|| ProviderError::validation(provider, "selector.profile", "profile is required"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Tag set attached to buckets and clusters. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from a native key/value list, rejecting duplicate keys.
    pub(crate) fn from_pairs<I>(provider: &str, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut tags = Self::new();
        for (key, value) in pairs {
            if tags.0.contains_key(&key) {
                return Err(ProviderError::invalid_response(
                    provider,
                    format!("duplicate tag key '{key}'"),
                ));
            }
            tags.0.insert(key, value);
        }
        Ok(tags)
    }

    /// Reject blank keys before they are sent to a provider.
    pub(crate) fn validate(&self, provider: &str, field: &str) -> Result<()> {
        if self.0.keys().any(|k| k.trim().is_empty()) {
            return Err(ProviderError::validation(
                provider,
                field,
                "tag keys must not be empty",
            ));
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for Tags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Offset-style page with the provider's running total.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetPage<T> {
    /// Raw items of this page, unfiltered.
    pub items: Vec<T>,
    /// Total reported by the provider.
    pub total_count: u64,
}

/// Cursor-style page.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    /// Items of this page in provider order.
    pub items: Vec<T>,
    /// Opaque marker to resubmit, `None` on the last page.
    pub next_cursor: Option<String>,
}
