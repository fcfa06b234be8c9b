use async_trait::async_trait;

use crate::traits::ClientError;

use super::types::{
    DescribeClusterOutput, ListClustersInput, ListClustersOutput, RunJobFlowInput,
    RunJobFlowOutput,
};

/// Native EMR client, one per (profile, region).
#[async_trait]
pub trait EmrClient: Send + Sync {
    async fn list_clusters(&self, input: ListClustersInput)
    -> Result<ListClustersOutput, ClientError>;

    async fn describe_cluster(&self, cluster_id: String)
    -> Result<DescribeClusterOutput, ClientError>;

    async fn run_job_flow(&self, input: RunJobFlowInput) -> Result<RunJobFlowOutput, ClientError>;
}
