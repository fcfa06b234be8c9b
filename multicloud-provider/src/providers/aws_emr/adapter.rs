//! EMR ClusterAdapter trait 实现

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::factory::obtain_client;
use crate::pagination::{collect_cursor, cursor_page};
use crate::providers::common::{diagnostics, log_request, native_call, require_non_blank};
use crate::traits::ClusterAdapter;
use crate::types::{
    Cluster, ClusterDetail, ClusterList, ClusterStatus, CreateClusterRequest, CreatedCluster,
    CursorPage, DescribeClustersRequest, ListClustersRequest, Selector, Tags, TimeWindow,
};
use crate::utils::datetime::parse_provider_timestamp;

use super::{
    Application, ClusterSummary, EmrAdapter, EmrClient, EmrClusterStatus, EmrTag,
    JobFlowInstancesConfig, ListClustersInput, PROVIDER_NAME, RunJobFlowInput,
};

/// 状态 + 创建时间；缺少创建时间视为无效响应
fn status_and_created(id: &str, status: &EmrClusterStatus) -> Result<(ClusterStatus, DateTime<Utc>)> {
    let state = ClusterStatus::parse(PROVIDER_NAME, &status.state)?;
    let created = status
        .timeline
        .as_ref()
        .and_then(|t| t.creation_date_time.as_deref())
        .map(|t| parse_provider_timestamp(PROVIDER_NAME, t))
        .transpose()?
        .flatten()
        .ok_or_else(|| {
            ProviderError::invalid_response(PROVIDER_NAME, format!("cluster {id} has no creation time"))
        })?;
    Ok((state, created))
}

fn to_cluster(summary: ClusterSummary) -> Result<Cluster> {
    let (status, created_at) = status_and_created(&summary.id, &summary.status)?;
    Ok(Cluster {
        id: summary.id,
        name: summary.name,
        status,
        created_at,
        tags: Tags::new(),
    })
}

fn list_input(window: Option<&TimeWindow>, states: &[ClusterStatus]) -> Result<ListClustersInput> {
    let window = window.copied().unwrap_or_default();
    if let (Some(after), Some(before)) = (window.after, window.before)
        && after > before
    {
        return Err(ProviderError::validation(
            PROVIDER_NAME,
            "window",
            "`after` must not be later than `before`",
        ));
    }
    Ok(ListClustersInput {
        created_after: window.after.map(|t| t.to_rfc3339()),
        created_before: window.before.map(|t| t.to_rfc3339()),
        cluster_states: states.iter().map(|s| s.as_str().to_string()).collect(),
        marker: None,
    })
}

impl EmrAdapter {
    fn client(&self, selector: &Selector) -> Result<Arc<dyn EmrClient>> {
        selector.require_any(PROVIDER_NAME)?;
        obtain_client(self.factory.as_ref(), self, selector)
    }

    async fn cluster_page(
        &self,
        client: &dyn EmrClient,
        input: &ListClustersInput,
        marker: Option<String>,
    ) -> Result<CursorPage<Cluster>> {
        let input = ListClustersInput {
            marker,
            ..input.clone()
        };
        let out = native_call(self, "ListClusters", client.list_clusters(input)).await?;
        let clusters = out
            .clusters
            .into_iter()
            .map(to_cluster)
            .collect::<Result<Vec<_>>>()?;
        Ok(CursorPage {
            items: clusters,
            next_cursor: out.marker,
        })
    }
}

#[async_trait]
impl ClusterAdapter for EmrAdapter {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_clusters(
        &self,
        selector: &Selector,
        req: &ListClustersRequest,
        cx: &CallContext,
    ) -> Result<ClusterList> {
        let input = list_input(req.window.as_ref(), &req.states)?;
        let client = self.client(selector)?;
        let fetch = |marker| self.cluster_page(client.as_ref(), &input, marker);

        if req.fetch_all {
            let clusters = collect_cursor(cx, PROVIDER_NAME, req.cursor.clone(), fetch).await?;
            return Ok(ClusterList {
                clusters,
                next_cursor: None,
            });
        }
        let page = cursor_page(cx, PROVIDER_NAME, req.cursor.clone(), fetch).await?;
        Ok(ClusterList {
            clusters: page.items,
            next_cursor: page.next_cursor,
        })
    }

    async fn describe_clusters(
        &self,
        selector: &Selector,
        req: &DescribeClustersRequest,
        cx: &CallContext,
    ) -> Result<Vec<ClusterDetail>> {
        if req.cluster_ids.is_empty() {
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "cluster_ids",
                "at least one cluster id is required",
            ));
        }
        for id in &req.cluster_ids {
            require_non_blank(PROVIDER_NAME, "cluster_ids", id)?;
        }
        let client = self.client(selector)?;

        let mut details = Vec::with_capacity(req.cluster_ids.len());
        for id in &req.cluster_ids {
            let out = cx
                .run(
                    PROVIDER_NAME,
                    native_call(self, "DescribeCluster", client.describe_cluster(id.trim().to_string())),
                )
                .await?;
            let diagnostics = diagnostics(&out);
            let cluster = out.cluster;
            let (status, created_at) = status_and_created(&cluster.id, &cluster.status)?;
            let tags = Tags::from_pairs(
                PROVIDER_NAME,
                cluster.tags.into_iter().map(|t| (t.key, t.value)),
            )?;
            details.push(ClusterDetail {
                cluster: Cluster {
                    id: cluster.id,
                    name: cluster.name,
                    status,
                    created_at,
                    tags,
                },
                release_label: cluster.release_label,
                applications: cluster.applications.into_iter().map(|a| a.name).collect(),
                master_public_dns: cluster.master_public_dns_name,
                log_uri: cluster.log_uri,
                diagnostics,
            });
        }
        Ok(details)
    }

    async fn create_cluster(
        &self,
        selector: &Selector,
        req: &CreateClusterRequest,
        cx: &CallContext,
    ) -> Result<CreatedCluster> {
        req.validate(PROVIDER_NAME)?;
        let instance_count = req.instance_count().ok_or_else(|| {
            ProviderError::validation(PROVIDER_NAME, "core_instance_count", "too many core instances")
        })?;
        let client = self.client(selector)?;

        let input = RunJobFlowInput {
            name: req.name.trim().to_string(),
            release_label: req.release_label.trim().to_string(),
            log_uri: req.log_uri.clone(),
            instances: JobFlowInstancesConfig {
                master_instance_type: req.master_instance_type.clone(),
                slave_instance_type: req.core_instance_type.clone(),
                instance_count,
                keep_job_flow_alive_when_no_steps: req.keep_alive,
                ec2_subnet_id: req.subnet_id.clone(),
                ec2_key_name: req.key_name.clone(),
            },
            applications: req
                .applications
                .iter()
                .map(|name| Application {
                    name: name.clone(),
                    version: None,
                })
                .collect(),
            service_role: req.service_role.clone(),
            job_flow_role: req.job_flow_role.clone(),
            tags: req
                .tags
                .iter()
                .map(|(key, value)| EmrTag {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            visible_to_all_users: true,
        };
        log_request(PROVIDER_NAME, "RunJobFlow", &input);

        let out = cx
            .run(
                PROVIDER_NAME,
                native_call(self, "RunJobFlow", client.run_job_flow(input)),
            )
            .await?;
        Ok(CreatedCluster {
            diagnostics: diagnostics(&out),
            cluster_id: out.job_flow_id,
            cluster_arn: out.cluster_arn,
        })
    }
}
