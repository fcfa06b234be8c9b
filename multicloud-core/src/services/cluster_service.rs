//! 托管集群服务

use std::sync::Arc;

use multicloud_provider::{
    CallContext, ClusterDetail, ClusterList, CreateClusterRequest, CreatedCluster,
    DescribeClustersRequest, ListClustersRequest, Selector,
};

use crate::error::CoreResult;
use crate::services::ServiceContext;

/// 托管集群服务
pub struct ClusterService {
    ctx: Arc<ServiceContext>,
}

impl ClusterService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 单页集群，`fetch_all` 时为全部
    pub async fn list_clusters(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &ListClustersRequest,
        cx: &CallContext,
    ) -> CoreResult<ClusterList> {
        let adapter = self.ctx.cluster_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.list_clusters(&selector, request, cx).await {
            Ok(list) => Ok(list),
            Err(e) => Err(self.ctx.handle_provider_error("list_clusters", e)),
        }
    }

    pub async fn describe_clusters(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &DescribeClustersRequest,
        cx: &CallContext,
    ) -> CoreResult<Vec<ClusterDetail>> {
        let adapter = self.ctx.cluster_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        adapter
            .describe_clusters(&selector, request, cx)
            .await
            .map_err(|e| self.ctx.handle_provider_error("describe_clusters", e))
    }

    pub async fn create_cluster(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &CreateClusterRequest,
        cx: &CallContext,
    ) -> CoreResult<CreatedCluster> {
        let adapter = self.ctx.cluster_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.create_cluster(&selector, request, cx).await {
            Ok(created) => {
                log::info!("{provider_id}: started cluster {} ({})", request.name, created.cluster_id);
                Ok(created)
            }
            Err(e) => Err(self.ctx.handle_provider_error("create_cluster", e)),
        }
    }
}
