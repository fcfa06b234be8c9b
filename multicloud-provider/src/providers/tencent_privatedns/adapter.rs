//! PrivateDNS DnsAdapter trait 实现

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::factory::obtain_client;
use crate::pagination::{collect_offset_filtered, matches_keyword};
use crate::providers::common::{
    diagnostics, log_request, native_call, normalize_domain_name, require_non_blank,
};
use crate::resolver::{ZoneDirectory, resolve_zone};
use crate::traits::DnsAdapter;
use crate::types::{
    CreateRecordRequest, CreatedRecord, DeleteRecordRequest, DescribeRecordRequest, DnsRecord,
    ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, OffsetPage, PageWindow,
    RecordList, RecordPage, RecordPageRequest, RecordStatus, RecordType, Selector, Zone,
    ZoneList,
};
use crate::utils::datetime::parse_provider_timestamp;

use super::{
    CreatePrivateZoneRecordRequest, DeletePrivateZoneRecordRequest,
    DescribePrivateZoneListRequest, DescribePrivateZoneRecordListRequest, Filter,
    ModifyPrivateZoneRecordRequest, PROVIDER_NAME, PrivateDnsClient, PrivateZone,
    PrivateZoneRecord, TencentPrivateDnsAdapter, ZONE_ID_PREFIX,
};

impl TencentPrivateDnsAdapter {
    /// 获取原生客户端（需要 profile）
    fn client(&self, selector: &Selector) -> Result<Arc<dyn PrivateDnsClient>> {
        selector.require_profile(PROVIDER_NAME)?;
        obtain_client(self.factory.as_ref(), self, selector)
    }

    async fn zone_id(&self, selector: &Selector, domain: &str, cx: &CallContext) -> Result<String> {
        resolve_zone(self, selector, domain, cx).await.map(|zone| zone.id)
    }

    async fn zone_page(
        &self,
        client: &dyn PrivateDnsClient,
        filters: &[Filter],
        offset: u64,
        limit: u32,
    ) -> Result<OffsetPage<PrivateZone>> {
        let req = DescribePrivateZoneListRequest {
            offset: Some(offset),
            limit: Some(limit),
            filters: filters.to_vec(),
        };
        let resp = native_call(self, "DescribePrivateZoneList", client.describe_private_zone_list(req)).await?;
        Ok(OffsetPage {
            items: resp.private_zone_set,
            total_count: resp.total_count,
        })
    }

    async fn record_page(
        &self,
        client: &dyn PrivateDnsClient,
        zone_id: &str,
        offset: u64,
        limit: u32,
    ) -> Result<OffsetPage<PrivateZoneRecord>> {
        let req = DescribePrivateZoneRecordListRequest {
            zone_id: zone_id.to_string(),
            offset: Some(offset),
            limit: Some(limit),
        };
        let resp = native_call(
            self,
            "DescribePrivateZoneRecordList",
            client.describe_private_zone_record_list(req),
        )
        .await?;
        Ok(OffsetPage {
            items: resp.record_set,
            total_count: resp.total_count,
        })
    }

    /// 按域名关键字（服务端过滤）列出所有私有域
    async fn fetch_zones(
        &self,
        client: &dyn PrivateDnsClient,
        keyword: Option<&str>,
        cx: &CallContext,
    ) -> Result<Vec<Zone>> {
        let filters: Vec<Filter> = keyword
            .filter(|k| !k.is_empty())
            .map(|k| Filter {
                name: "Domain".to_string(),
                values: vec![k.to_string()],
            })
            .into_iter()
            .collect();
        let zones = collect_offset_filtered(
            cx,
            PROVIDER_NAME,
            self.page_size,
            |offset, limit| self.zone_page(client, &filters, offset, limit),
            |_| true,
        )
        .await?;
        Ok(zones.into_iter().map(to_zone).collect())
    }

    /// 遍历所有记录页，客户端过滤（官方接口不支持模糊匹配）
    async fn fetch_records<P>(
        &self,
        client: &dyn PrivateDnsClient,
        zone_id: &str,
        keep: P,
        cx: &CallContext,
    ) -> Result<Vec<DnsRecord>>
    where
        P: FnMut(&PrivateZoneRecord) -> bool + Send,
    {
        let raw = collect_offset_filtered(
            cx,
            PROVIDER_NAME,
            self.page_size,
            |offset, limit| self.record_page(client, zone_id, offset, limit),
            keep,
        )
        .await?;
        raw.into_iter().map(to_record).collect()
    }
}

fn to_zone(zone: PrivateZone) -> Zone {
    Zone {
        diagnostics: diagnostics(&zone),
        name: normalize_domain_name(&zone.domain),
        id: zone.zone_id,
        record_count: zone.record_count,
    }
}

fn to_record(record: PrivateZoneRecord) -> Result<DnsRecord> {
    let record_type = RecordType::parse(PROVIDER_NAME, &record.record_type)?;
    let status = record
        .status
        .as_deref()
        .map(|s| RecordStatus::parse(PROVIDER_NAME, s))
        .transpose()?;
    let updated_at = match record.updated_on.as_deref() {
        Some(t) => parse_provider_timestamp(PROVIDER_NAME, t)?,
        None => None,
    };
    Ok(DnsRecord {
        id: record.record_id,
        sub_domain: record.sub_domain,
        record_type,
        value: record.record_value,
        ttl: record.ttl,
        status,
        weight: record.weight,
        updated_at,
    })
}

#[async_trait]
impl ZoneDirectory for TencentPrivateDnsAdapter {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn native_id_prefix(&self) -> &'static str {
        ZONE_ID_PREFIX
    }

    async fn search_zones(
        &self,
        selector: &Selector,
        keyword: &str,
        cx: &CallContext,
    ) -> Result<Vec<Zone>> {
        let client = self.client(selector)?;
        self.fetch_zones(client.as_ref(), Some(keyword), cx).await
    }
}

#[async_trait]
impl DnsAdapter for TencentPrivateDnsAdapter {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_zones(
        &self,
        selector: &Selector,
        req: &ListZonesRequest,
        cx: &CallContext,
    ) -> Result<ZoneList> {
        let client = self.client(selector)?;
        let zones = self
            .fetch_zones(client.as_ref(), req.keyword.as_deref(), cx)
            .await?;
        Ok(ZoneList {
            total: zones.len() as u64,
            zones,
        })
    }

    async fn resolve_zone(
        &self,
        selector: &Selector,
        name_or_id: &str,
        cx: &CallContext,
    ) -> Result<String> {
        selector.require_profile(PROVIDER_NAME)?;
        self.zone_id(selector, name_or_id, cx).await
    }

    async fn list_records(
        &self,
        selector: &Selector,
        req: &ListRecordsRequest,
        cx: &CallContext,
    ) -> Result<RecordList> {
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;
        let keyword = req.keyword.as_deref();

        let records = self
            .fetch_records(
                client.as_ref(),
                &zone_id,
                |r| matches_keyword(&r.sub_domain, keyword),
                cx,
            )
            .await?;
        Ok(RecordList {
            total: records.len() as u64,
            records,
        })
    }

    async fn list_records_page(
        &self,
        selector: &Selector,
        req: &RecordPageRequest,
        cx: &CallContext,
    ) -> Result<RecordPage> {
        if req.cursor.is_some() {
            return Err(ProviderError::unsupported(
                PROVIDER_NAME,
                "cursor pagination (use page/page_size)",
            ));
        }
        let window = PageWindow::new(PROVIDER_NAME, req.page, req.page_size, self.page_size)?;
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;

        let page = cx
            .run(
                PROVIDER_NAME,
                self.record_page(client.as_ref(), &zone_id, window.offset(), window.page_size),
            )
            .await?;
        let next_page = window.next_page(page.items.len());
        let records = page
            .items
            .into_iter()
            .map(to_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(RecordPage {
            records,
            next_page,
            prev_page: window.prev_page(),
            next_cursor: None,
        })
    }

    async fn describe_records(
        &self,
        selector: &Selector,
        req: &DescribeRecordRequest,
        cx: &CallContext,
    ) -> Result<Vec<DnsRecord>> {
        let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", &req.sub_domain)?;
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;
        let record_type = req.record_type;

        self.fetch_records(
            client.as_ref(),
            &zone_id,
            |r| {
                r.sub_domain == sub_domain
                    && record_type.is_none_or(|t| r.record_type.eq_ignore_ascii_case(t.as_str()))
            },
            cx,
        )
        .await
    }

    async fn create_record(
        &self,
        selector: &Selector,
        req: &CreateRecordRequest,
        cx: &CallContext,
    ) -> Result<CreatedRecord> {
        if req.remark.is_some() {
            return Err(ProviderError::unsupported(PROVIDER_NAME, "remark"));
        }
        let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", &req.sub_domain)?;
        let value = require_non_blank(PROVIDER_NAME, "value", &req.value)?;
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;

        let native = CreatePrivateZoneRecordRequest {
            zone_id,
            sub_domain: sub_domain.to_string(),
            record_type: req.record_type.as_str().to_string(),
            record_value: value.to_string(),
            ttl: req.ttl.unwrap_or(self.default_ttl),
            weight: req.weight,
        };
        log_request(PROVIDER_NAME, "CreatePrivateZoneRecord", &native);

        let resp = cx
            .run(
                PROVIDER_NAME,
                native_call(
                    self,
                    "CreatePrivateZoneRecord",
                    client.create_private_zone_record(native),
                ),
            )
            .await?;
        Ok(CreatedRecord {
            diagnostics: diagnostics(&resp),
            record_id: resp.record_id,
        })
    }

    async fn modify_record(
        &self,
        selector: &Selector,
        req: &ModifyRecordRequest,
        cx: &CallContext,
    ) -> Result<()> {
        if req.status.is_some() {
            return Err(ProviderError::unsupported(PROVIDER_NAME, "status"));
        }
        if req.remark.is_some() {
            return Err(ProviderError::unsupported(PROVIDER_NAME, "remark"));
        }
        let record_id = require_non_blank(
            PROVIDER_NAME,
            "record_id",
            req.record_id.as_deref().unwrap_or_default(),
        )?;
        let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", &req.sub_domain)?;
        let value = require_non_blank(PROVIDER_NAME, "value", &req.value)?;
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;

        let native = ModifyPrivateZoneRecordRequest {
            zone_id,
            record_id: record_id.to_string(),
            sub_domain: sub_domain.to_string(),
            record_type: req.record_type.as_str().to_string(),
            record_value: value.to_string(),
            ttl: req.ttl,
            weight: req.weight,
        };
        log_request(PROVIDER_NAME, "ModifyPrivateZoneRecord", &native);

        cx.run(
            PROVIDER_NAME,
            native_call(
                self,
                "ModifyPrivateZoneRecord",
                client.modify_private_zone_record(native),
            ),
        )
        .await?;
        Ok(())
    }

    async fn delete_record(
        &self,
        selector: &Selector,
        req: &DeleteRecordRequest,
        cx: &CallContext,
    ) -> Result<()> {
        if req.record_ids.is_empty() {
            if req.sub_domain.is_some() || req.record_type.is_some() {
                return Err(ProviderError::unsupported(
                    PROVIDER_NAME,
                    "delete by sub_domain/record_type (pass record_ids)",
                ));
            }
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "record_ids",
                "at least one record id is required",
            ));
        }
        let client = self.client(selector)?;
        let zone_id = self.zone_id(selector, &req.domain, cx).await?;

        let native = match req.record_ids.as_slice() {
            [single] => DeletePrivateZoneRecordRequest {
                zone_id,
                record_id: Some(single.clone()),
                record_id_set: Vec::new(),
            },
            many => DeletePrivateZoneRecordRequest {
                zone_id,
                record_id: None,
                record_id_set: many.to_vec(),
            },
        };
        log_request(PROVIDER_NAME, "DeletePrivateZoneRecord", &native);

        cx.run(
            PROVIDER_NAME,
            native_call(
                self,
                "DeletePrivateZoneRecord",
                client.delete_private_zone_record(native),
            ),
        )
        .await?;
        Ok(())
    }
}
