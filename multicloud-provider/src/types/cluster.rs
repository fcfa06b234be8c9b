use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

use super::{Diagnostics, Tags};

/// Cluster lifecycle state as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    Terminating,
    Terminated,
    TerminatedWithErrors,
}

impl ClusterStatus {
    pub const ALL: [Self; 7] = [
        Self::Starting,
        Self::Bootstrapping,
        Self::Running,
        Self::Waiting,
        Self::Terminating,
        Self::Terminated,
        Self::TerminatedWithErrors,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "STARTING",
            Self::Bootstrapping => "BOOTSTRAPPING",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminating => "TERMINATING",
            Self::Terminated => "TERMINATED",
            Self::TerminatedWithErrors => "TERMINATED_WITH_ERRORS",
        }
    }

    /// Map a native state string. Unknown states are an invalid response.
    pub(crate) fn parse(provider: &str, value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                ProviderError::invalid_response(provider, format!("unknown cluster state '{value}'"))
            })
    }
}

impl std::fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation-time filter. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Everything created within the last `period`.
    pub fn last(period: TimeDelta) -> Self {
        Self {
            after: Some(Utc::now() - period),
            before: None,
        }
    }
}

/// Cluster summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub status: ClusterStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

/// Cluster summary plus the details only a describe call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetail {
    #[serde(flatten)]
    pub cluster: Cluster,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_public_dns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    /// Native describe payload, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Cluster listing request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    /// Only clusters in these states. Empty means any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<ClusterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Follow cursors until the listing is exhausted.
    #[serde(default)]
    pub fetch_all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterList {
    pub clusters: Vec<Cluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClustersRequest {
    pub cluster_ids: Vec<String>,
}

/// Request to create (and start) a cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterRequest {
    pub name: String,
    /// Software release, e.g. `"emr-7.1.0"`.
    pub release_label: String,
    pub master_instance_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_instance_type: Option<String>,
    /// Number of core nodes; zero means master only.
    #[serde(default)]
    pub core_instance_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<String>,
    pub service_role: String,
    pub job_flow_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    /// Keep the cluster alive once all steps finished.
    #[serde(default)]
    pub keep_alive: bool,
}

impl CreateClusterRequest {
    /// One master plus the core nodes; `None` when the sum does not fit.
    pub fn instance_count(&self) -> Option<u32> {
        self.core_instance_count.checked_add(1)
    }

    /// Check the structurally required fields.
    pub(crate) fn validate(&self, provider: &str) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("release_label", &self.release_label),
            ("master_instance_type", &self.master_instance_type),
            ("service_role", &self.service_role),
            ("job_flow_role", &self.job_flow_role),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProviderError::validation(provider, field, "must not be empty"));
            }
        }
        if self.instance_count().is_none() {
            return Err(ProviderError::validation(
                provider,
                "core_instance_count",
                "too many core instances",
            ));
        }
        if self.core_instance_count > 0 && self.core_instance_type.is_none() {
            return Err(ProviderError::validation(
                provider,
                "core_instance_type",
                "required when core_instance_count is positive",
            ));
        }
        self.tags.validate(provider, "tags")
    }
}

/// Identifier of a freshly created cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCluster {
    pub cluster_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}
