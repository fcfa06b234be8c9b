//! DNS 记录管理服务

use std::sync::Arc;

use multicloud_provider::{
    CallContext, CreateRecordRequest, CreatedRecord, DeleteRecordRequest, DescribeRecordRequest,
    DnsRecord, ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, RecordList,
    RecordPage, RecordPageRequest, Selector, ZoneList,
};

use crate::error::CoreResult;
use crate::services::ServiceContext;

/// DNS 记录管理服务
pub struct DnsService {
    ctx: Arc<ServiceContext>,
}

impl DnsService {
    /// 创建 DNS 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出匹配关键字的 zone
    pub async fn list_zones(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &ListZonesRequest,
        cx: &CallContext,
    ) -> CoreResult<ZoneList> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.list_zones(&selector, request, cx).await {
            Ok(zones) => Ok(zones),
            Err(e) => Err(self.ctx.handle_provider_error("list_zones", e)),
        }
    }

    /// zone 名称（或原生 id）解析为原生 zone id
    pub async fn resolve_zone(
        &self,
        provider_id: &str,
        selector: &Selector,
        name_or_id: &str,
        cx: &CallContext,
    ) -> CoreResult<String> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.resolve_zone(&selector, name_or_id, cx).await {
            Ok(zone_id) => Ok(zone_id),
            Err(e) => Err(self.ctx.handle_provider_error("resolve_zone", e)),
        }
    }

    /// 列出 zone 下的全部记录（自动翻页 + 关键字过滤）
    pub async fn list_records(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &ListRecordsRequest,
        cx: &CallContext,
    ) -> CoreResult<RecordList> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.list_records(&selector, request, cx).await {
            Ok(records) => {
                log::debug!(
                    "{provider_id}: {} records in {}",
                    records.total,
                    request.domain
                );
                Ok(records)
            }
            Err(e) => Err(self.ctx.handle_provider_error("list_records", e)),
        }
    }

    /// 单页记录
    pub async fn list_records_page(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &RecordPageRequest,
        cx: &CallContext,
    ) -> CoreResult<RecordPage> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.list_records_page(&selector, request, cx).await {
            Ok(page) => Ok(page),
            Err(e) => Err(self.ctx.handle_provider_error("list_records_page", e)),
        }
    }

    pub async fn describe_records(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &DescribeRecordRequest,
        cx: &CallContext,
    ) -> CoreResult<Vec<DnsRecord>> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.describe_records(&selector, request, cx).await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.ctx.handle_provider_error("describe_records", e)),
        }
    }

    /// 创建 DNS 记录
    pub async fn create_record(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &CreateRecordRequest,
        cx: &CallContext,
    ) -> CoreResult<CreatedRecord> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.create_record(&selector, request, cx).await {
            Ok(created) => {
                log::info!(
                    "{provider_id}: created {} {} in {} ({})",
                    request.sub_domain,
                    request.record_type,
                    request.domain,
                    created.record_id
                );
                Ok(created)
            }
            Err(e) => Err(self.ctx.handle_provider_error("create_record", e)),
        }
    }

    /// 修改 DNS 记录
    pub async fn modify_record(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &ModifyRecordRequest,
        cx: &CallContext,
    ) -> CoreResult<()> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.modify_record(&selector, request, cx).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.ctx.handle_provider_error("modify_record", e)),
        }
    }

    /// 删除 DNS 记录
    pub async fn delete_record(
        &self,
        provider_id: &str,
        selector: &Selector,
        request: &DeleteRecordRequest,
        cx: &CallContext,
    ) -> CoreResult<()> {
        let adapter = self.ctx.dns_adapter(provider_id).await?;
        let selector = self.ctx.selector(selector);

        match adapter.delete_record(&selector, request, cx).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.ctx.handle_provider_error("delete_record", e)),
        }
    }
}
