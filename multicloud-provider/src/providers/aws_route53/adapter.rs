//! Route 53 DnsAdapter trait 实现

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::factory::obtain_client;
use crate::pagination::{collect_cursor, cursor_page, cursor_pages, matches_keyword};
use crate::providers::common::{
    diagnostics, full_name_to_relative, log_request, native_call, normalize_domain_name,
    relative_to_fqdn, require_non_blank,
};
use crate::resolver::{ZoneDirectory, resolve_zone};
use crate::traits::DnsAdapter;
use crate::types::{
    CreateRecordRequest, CreatedRecord, CursorPage, DeleteRecordRequest, DescribeRecordRequest,
    DnsRecord, ListRecordsRequest, ListZonesRequest, ModifyRecordRequest, PageWindow, RecordList,
    RecordPage, RecordPageRequest, RecordStatus, RecordType, Selector, Zone, ZoneList,
};

use super::{
    Change, ChangeAction, ChangeBatch, ChangeResourceRecordSetsInput,
    ChangeResourceRecordSetsOutput, HOSTED_ZONE_PREFIX, HostedZone, ListHostedZonesInput,
    ListResourceRecordSetsInput, ListResourceRecordSetsOutput, PROVIDER_NAME, ResourceRecord,
    ResourceRecordSet, Route53Adapter, Route53Client,
};

/// 记录分页游标，序列化后对调用方不透明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RecordCursor {
    #[serde(rename = "n")]
    name: String,
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    record_type: Option<String>,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
}

impl RecordCursor {
    fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|_| {
            ProviderError::validation(
                PROVIDER_NAME,
                "cursor",
                "not a cursor issued by this provider",
            )
        })
    }

    /// 仅在 `IsTruncated` 时继续
    fn from_output(out: &ListResourceRecordSetsOutput) -> Option<Self> {
        if !out.is_truncated {
            return None;
        }
        out.next_record_name.as_ref().map(|name| Self {
            name: name.clone(),
            record_type: out.next_record_type.clone(),
            identifier: out.next_record_identifier.clone(),
        })
    }
}

/// 已解析的 hosted zone
struct ZoneRef {
    id: String,
    name: String,
}

/// Synthetic record id: `<name>|<TYPE>`, name without the trailing dot.
fn record_id(fqdn: &str, record_type: &str) -> String {
    format!(
        "{}|{}",
        normalize_domain_name(fqdn).to_ascii_lowercase(),
        record_type.to_ascii_uppercase()
    )
}

fn parse_record_id(id: &str) -> Result<(String, RecordType)> {
    let invalid = || {
        ProviderError::validation(
            PROVIDER_NAME,
            "record_ids",
            format!("'{id}' is not a Route 53 record id (<name>|<TYPE>)"),
        )
    };
    let (name, record_type) = id.rsplit_once('|').ok_or_else(invalid)?;
    if name.trim().is_empty() {
        return Err(invalid());
    }
    let record_type = RecordType::parse(PROVIDER_NAME, record_type).map_err(|_| invalid())?;
    Ok((format!("{}.", normalize_domain_name(name)), record_type))
}

fn same_name(a: &str, b: &str) -> bool {
    normalize_domain_name(a).eq_ignore_ascii_case(&normalize_domain_name(b))
}

/// Route 53 没有记录状态、权重需配合 SetIdentifier、也没有备注
fn reject_write_extras(
    weight: Option<u32>,
    status: Option<RecordStatus>,
    remark: Option<&String>,
) -> Result<()> {
    if weight.is_some() {
        return Err(ProviderError::unsupported(PROVIDER_NAME, "weight"));
    }
    if status.is_some() {
        return Err(ProviderError::unsupported(PROVIDER_NAME, "status"));
    }
    if remark.is_some() {
        return Err(ProviderError::unsupported(PROVIDER_NAME, "remark"));
    }
    Ok(())
}

fn to_zone(zone: HostedZone) -> Zone {
    Zone {
        diagnostics: diagnostics(&zone),
        name: normalize_domain_name(&zone.name),
        id: zone.id,
        record_count: zone.resource_record_set_count,
    }
}

fn to_record(set: ResourceRecordSet, zone_name: &str) -> Result<DnsRecord> {
    let record_type = RecordType::parse(PROVIDER_NAME, &set.record_type)?;
    let value = match (set.resource_records.first(), &set.alias_target) {
        (Some(first), _) => {
            if set.resource_records.len() > 1 {
                log::debug!(
                    "[{PROVIDER_NAME}] {} {} has {} values, keeping the first",
                    set.name,
                    set.record_type,
                    set.resource_records.len()
                );
            }
            first.value.clone()
        }
        (None, Some(alias)) => normalize_domain_name(&alias.dns_name),
        (None, None) => {
            return Err(ProviderError::invalid_response(
                PROVIDER_NAME,
                format!("record set {} {} has no value", set.name, set.record_type),
            ));
        }
    };
    Ok(DnsRecord {
        id: record_id(&set.name, &set.record_type),
        sub_domain: full_name_to_relative(&set.name, zone_name),
        record_type,
        value,
        // alias 记录没有 TTL
        ttl: set.ttl.unwrap_or(0),
        status: None,
        weight: set.weight,
        updated_at: None,
    })
}

impl Route53Adapter {
    fn client(&self, selector: &Selector) -> Result<Arc<dyn Route53Client>> {
        selector.require_any(PROVIDER_NAME)?;
        obtain_client(self.factory.as_ref(), self, selector)
    }

    /// 解析 zone；直接传入 id 时再查一次名称
    async fn zone(
        &self,
        client: &dyn Route53Client,
        selector: &Selector,
        domain: &str,
        cx: &CallContext,
    ) -> Result<ZoneRef> {
        let resolved = resolve_zone(self, selector, domain, cx).await?;
        let name = match resolved.name {
            Some(name) => name,
            None => {
                let out = cx
                    .run(
                        PROVIDER_NAME,
                        native_call(self, "GetHostedZone", client.get_hosted_zone(resolved.id.clone())),
                    )
                    .await?;
                normalize_domain_name(&out.hosted_zone.name)
            }
        };
        Ok(ZoneRef {
            id: resolved.id,
            name,
        })
    }

    async fn zone_page(
        &self,
        client: &dyn Route53Client,
        marker: Option<String>,
    ) -> Result<CursorPage<HostedZone>> {
        let input = ListHostedZonesInput {
            marker,
            max_items: Some(self.page_size),
        };
        let out = native_call(self, "ListHostedZones", client.list_hosted_zones(input)).await?;
        let next_cursor = if out.is_truncated { out.next_marker } else { None };
        Ok(CursorPage {
            items: out.hosted_zones,
            next_cursor,
        })
    }

    /// 全量列出 hosted zone，按名称做客户端过滤
    ///
    /// 关键字去掉末尾的点后不区分大小写匹配，`example.com.` 与 `Example.COM` 等价。
    async fn fetch_zones(
        &self,
        client: &dyn Route53Client,
        keyword: Option<&str>,
        cx: &CallContext,
    ) -> Result<Vec<Zone>> {
        let zones = collect_cursor(cx, PROVIDER_NAME, None, |marker| {
            self.zone_page(client, marker)
        })
        .await?;
        let keyword = keyword.map(|k| normalize_domain_name(k).to_ascii_lowercase());
        Ok(zones
            .into_iter()
            .map(to_zone)
            .filter(|zone| matches_keyword(&zone.name.to_ascii_lowercase(), keyword.as_deref()))
            .collect())
    }

    async fn record_page(
        &self,
        client: &dyn Route53Client,
        zone_id: &str,
        cursor: Option<String>,
        max_items: u32,
    ) -> Result<CursorPage<ResourceRecordSet>> {
        let start = cursor.as_deref().map(RecordCursor::decode).transpose()?;
        let (start_record_name, start_record_type, start_record_identifier) = match start {
            Some(c) => (Some(c.name), c.record_type, c.identifier),
            None => (None, None, None),
        };
        let input = ListResourceRecordSetsInput {
            hosted_zone_id: zone_id.to_string(),
            start_record_name,
            start_record_type,
            start_record_identifier,
            max_items: Some(max_items),
        };
        let out = native_call(
            self,
            "ListResourceRecordSets",
            client.list_resource_record_sets(input),
        )
        .await?;
        let next_cursor = RecordCursor::from_output(&out).map(|c| c.encode());
        Ok(CursorPage {
            items: out.resource_record_sets,
            next_cursor,
        })
    }

    /// 从 `fqdn` 开始列出，名称变化即停止
    async fn record_sets_named(
        &self,
        client: &dyn Route53Client,
        zone_id: &str,
        fqdn: &str,
        record_type: Option<RecordType>,
        cx: &CallContext,
    ) -> Result<Vec<ResourceRecordSet>> {
        let start = RecordCursor {
            name: fqdn.to_string(),
            record_type: record_type.map(|t| t.as_str().to_string()),
            identifier: None,
        };
        let pages = cursor_pages(cx, PROVIDER_NAME, Some(start.encode()), |cursor| {
            self.record_page(client, zone_id, cursor, self.page_size)
        });
        futures::pin_mut!(pages);

        let mut found = Vec::new();
        while let Some(page) = pages.try_next().await? {
            let mut past_name = false;
            for set in page.items {
                if !same_name(&set.name, fqdn) {
                    past_name = true;
                    break;
                }
                if record_type.is_none_or(|t| set.record_type.eq_ignore_ascii_case(t.as_str())) {
                    found.push(set);
                }
            }
            if past_name {
                break;
            }
        }
        Ok(found)
    }

    async fn change(
        &self,
        client: &dyn Route53Client,
        zone_id: &str,
        action: ChangeAction,
        sets: Vec<ResourceRecordSet>,
        cx: &CallContext,
    ) -> Result<ChangeResourceRecordSetsOutput> {
        let input = ChangeResourceRecordSetsInput {
            hosted_zone_id: zone_id.to_string(),
            change_batch: ChangeBatch {
                comment: None,
                changes: sets
                    .into_iter()
                    .map(|set| Change {
                        action,
                        resource_record_set: set,
                    })
                    .collect(),
            },
        };
        log_request(PROVIDER_NAME, "ChangeResourceRecordSets", &input);
        cx.run(
            PROVIDER_NAME,
            native_call(
                self,
                "ChangeResourceRecordSets",
                client.change_resource_record_sets(input),
            ),
        )
        .await
    }

    fn record_set(&self, fqdn: String, record_type: RecordType, value: &str, ttl: Option<u32>) -> ResourceRecordSet {
        ResourceRecordSet {
            name: fqdn,
            record_type: record_type.as_str().to_string(),
            ttl: Some(ttl.unwrap_or(self.default_ttl)),
            resource_records: vec![ResourceRecord {
                value: value.to_string(),
            }],
            set_identifier: None,
            weight: None,
            alias_target: None,
        }
    }
}

#[async_trait]
impl ZoneDirectory for Route53Adapter {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn native_id_prefix(&self) -> &'static str {
        HOSTED_ZONE_PREFIX
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
impl DnsAdapter for Route53Adapter {
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
        selector.require_any(PROVIDER_NAME)?;
        resolve_zone(self, selector, name_or_id, cx)
            .await
            .map(|zone| zone.id)
    }

    async fn list_records(
        &self,
        selector: &Selector,
        req: &ListRecordsRequest,
        cx: &CallContext,
    ) -> Result<RecordList> {
        let client = self.client(selector)?;
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;

        let sets = collect_cursor(cx, PROVIDER_NAME, None, |cursor| {
            self.record_page(client.as_ref(), &zone.id, cursor, self.page_size)
        })
        .await?;
        let keyword = req.keyword.as_deref();
        let mut records = Vec::new();
        for set in sets {
            let record = to_record(set, &zone.name)?;
            if matches_keyword(&record.sub_domain, keyword) {
                records.push(record);
            }
        }
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
        let window = PageWindow::new(PROVIDER_NAME, req.page, req.page_size, self.page_size)?;
        if window.page > 1 && req.cursor.is_none() {
            return Err(ProviderError::unsupported(
                PROVIDER_NAME,
                "numbered pages beyond the first (use cursor)",
            ));
        }
        let client = self.client(selector)?;
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;

        let page = cursor_page(cx, PROVIDER_NAME, req.cursor.clone(), |cursor| {
            self.record_page(client.as_ref(), &zone.id, cursor, window.page_size)
        })
        .await?;
        let records = page
            .items
            .into_iter()
            .map(|set| to_record(set, &zone.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(RecordPage {
            records,
            next_page: None,
            prev_page: None,
            next_cursor: page.next_cursor,
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
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;
        let fqdn = relative_to_fqdn(sub_domain, &zone.name);

        let sets = self
            .record_sets_named(client.as_ref(), &zone.id, &fqdn, req.record_type, cx)
            .await?;
        sets.into_iter()
            .map(|set| to_record(set, &zone.name))
            .collect()
    }

    async fn create_record(
        &self,
        selector: &Selector,
        req: &CreateRecordRequest,
        cx: &CallContext,
    ) -> Result<CreatedRecord> {
        reject_write_extras(req.weight, None, req.remark.as_ref())?;
        let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", &req.sub_domain)?;
        let value = require_non_blank(PROVIDER_NAME, "value", &req.value)?;
        let client = self.client(selector)?;
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;

        let fqdn = relative_to_fqdn(sub_domain, &zone.name);
        let record_id = record_id(&fqdn, req.record_type.as_str());
        let set = self.record_set(fqdn, req.record_type, value, req.ttl);
        let out = self
            .change(client.as_ref(), &zone.id, ChangeAction::Create, vec![set], cx)
            .await?;

        Ok(CreatedRecord {
            record_id,
            diagnostics: diagnostics(&out),
        })
    }

    async fn modify_record(
        &self,
        selector: &Selector,
        req: &ModifyRecordRequest,
        cx: &CallContext,
    ) -> Result<()> {
        reject_write_extras(req.weight, req.status, req.remark.as_ref())?;
        let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", &req.sub_domain)?;
        let value = require_non_blank(PROVIDER_NAME, "value", &req.value)?;
        let client = self.client(selector)?;
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;

        let fqdn = relative_to_fqdn(sub_domain, &zone.name);
        // 记录按名称+类型寻址，id 只能与之一致
        if let Some(id) = req.record_id.as_deref()
            && !id.eq_ignore_ascii_case(&record_id(&fqdn, req.record_type.as_str()))
        {
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "record_id",
                "does not match sub_domain and record_type",
            ));
        }
        let set = self.record_set(fqdn, req.record_type, value, req.ttl);
        self.change(client.as_ref(), &zone.id, ChangeAction::Upsert, vec![set], cx)
            .await?;
        Ok(())
    }

    /// Route 53 deletes need the exact current record set, so each target is
    /// looked up first and all deletions go out in one atomic batch.
    async fn delete_record(
        &self,
        selector: &Selector,
        req: &DeleteRecordRequest,
        cx: &CallContext,
    ) -> Result<()> {
        let by_id = req
            .record_ids
            .iter()
            .map(|id| parse_record_id(id))
            .collect::<Result<Vec<_>>>()?;
        if by_id.is_empty() && req.sub_domain.is_none() {
            return Err(ProviderError::validation(
                PROVIDER_NAME,
                "record_ids",
                "record ids or a sub_domain are required",
            ));
        }
        let client = self.client(selector)?;
        let zone = self.zone(client.as_ref(), selector, &req.domain, cx).await?;

        let targets: Vec<(String, Option<RecordType>)> = if by_id.is_empty() {
            let sub_domain = req.sub_domain.as_deref().unwrap_or_default();
            let sub_domain = require_non_blank(PROVIDER_NAME, "sub_domain", sub_domain)?;
            vec![(relative_to_fqdn(sub_domain, &zone.name), req.record_type)]
        } else {
            by_id.into_iter().map(|(name, t)| (name, Some(t))).collect()
        };

        let mut sets = Vec::new();
        for (fqdn, record_type) in targets {
            let found = self
                .record_sets_named(client.as_ref(), &zone.id, &fqdn, record_type, cx)
                .await?;
            if found.is_empty() {
                return Err(ProviderError::validation(
                    PROVIDER_NAME,
                    "record_ids",
                    format!("no record set named {fqdn}"),
                ));
            }
            sets.extend(found);
        }

        self.change(client.as_ref(), &zone.id, ChangeAction::Delete, sets, cx)
            .await?;
        Ok(())
    }
}
