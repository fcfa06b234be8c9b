//! AWS EMR 适配器

mod adapter;
mod client;
mod error;
mod types;

use std::sync::Arc;

use crate::factory::ClientFactory;

pub use client::EmrClient;
pub use types::{
    Application, ClusterSummary, ClusterTimeline, DescribeClusterOutput, EmrCluster,
    EmrClusterStatus, EmrTag, JobFlowInstancesConfig, ListClustersInput, ListClustersOutput,
    RunJobFlowInput, RunJobFlowOutput, StateChangeReason,
};

pub(crate) const PROVIDER_NAME: &str = "aws_emr";

/// AWS EMR 适配器
///
/// Listings follow EMR's `Marker`. Every cluster must report a creation time
/// and a known state, otherwise the page is an invalid response.
pub struct EmrAdapter {
    pub(crate) factory: Arc<dyn ClientFactory<dyn EmrClient>>,
}

impl EmrAdapter {
    pub fn new(factory: Arc<dyn ClientFactory<dyn EmrClient>>) -> Self {
        Self { factory }
    }
}
