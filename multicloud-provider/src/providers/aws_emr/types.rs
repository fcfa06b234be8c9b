//! AWS EMR native request/response shapes

use serde::{Deserialize, Serialize};

// ============ ListClusters ============

/// `ListClusters` input. Timestamps are RFC3339.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListClustersInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_states: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// `ListClusters` output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListClustersOutput {
    #[serde(default)]
    pub clusters: Vec<ClusterSummary>,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterSummary {
    /// `j-XXXXXXXXXXXXX`
    pub id: String,
    pub name: String,
    pub status: EmrClusterStatus,
    pub cluster_arn: Option<String>,
    pub normalized_instance_hours: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmrClusterStatus {
    /// `STARTING`, `RUNNING`, ...
    pub state: String,
    pub state_change_reason: Option<StateChangeReason>,
    pub timeline: Option<ClusterTimeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateChangeReason {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterTimeline {
    pub creation_date_time: Option<String>,
    pub ready_date_time: Option<String>,
    pub end_date_time: Option<String>,
}

// ============ DescribeCluster ============

/// `DescribeCluster` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeClusterOutput {
    pub cluster: EmrCluster,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmrCluster {
    pub id: String,
    pub name: String,
    pub status: EmrClusterStatus,
    pub cluster_arn: Option<String>,
    pub release_label: Option<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
    pub master_public_dns_name: Option<String>,
    pub log_uri: Option<String>,
    #[serde(default)]
    pub tags: Vec<EmrTag>,
    pub auto_terminate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Application {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmrTag {
    pub key: String,
    pub value: String,
}

// ============ RunJobFlow ============

/// `RunJobFlow` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunJobFlowInput {
    pub name: String,
    pub release_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    pub instances: JobFlowInstancesConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<Application>,
    pub service_role: String,
    pub job_flow_role: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<EmrTag>,
    pub visible_to_all_users: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobFlowInstancesConfig {
    pub master_instance_type: String,
    /// Core node type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slave_instance_type: Option<String>,
    /// Master plus core nodes.
    pub instance_count: u32,
    pub keep_job_flow_alive_when_no_steps: bool,
    #[serde(rename = "Ec2SubnetId", skip_serializing_if = "Option::is_none")]
    pub ec2_subnet_id: Option<String>,
    #[serde(rename = "Ec2KeyName", skip_serializing_if = "Option::is_none")]
    pub ec2_key_name: Option<String>,
}

/// `RunJobFlow` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunJobFlowOutput {
    pub job_flow_id: String,
    pub cluster_arn: Option<String>,
}
