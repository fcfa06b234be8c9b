//! Zone name to provider identifier resolution.

use async_trait::async_trait;

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::types::{Selector, Zone};

/// Provider-side zone lookup used by [`resolve_zone`].
#[async_trait]
pub trait ZoneDirectory: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Prefix every native zone id carries (`zone-`, `/hostedzone/`, ...).
    fn native_id_prefix(&self) -> &'static str;

    /// Zones matching `keyword`, however the provider implements the match.
    async fn search_zones(
        &self,
        selector: &Selector,
        keyword: &str,
        cx: &CallContext,
    ) -> Result<Vec<Zone>>;
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedZone {
    pub id: String,
    /// Zone name, known only when resolution went through a listing.
    pub name: Option<String>,
}

/// Resolve a zone name (or pass through a native id).
///
/// Input already carrying the native prefix is returned without any call.
/// Otherwise the listing must yield exactly one zone; zero or several is
/// [`ProviderError::ResolutionAmbiguous`]. The first match is never picked.
pub async fn resolve_zone<D>(
    directory: &D,
    selector: &Selector,
    name_or_id: &str,
    cx: &CallContext,
) -> Result<ResolvedZone>
where
    D: ZoneDirectory + ?Sized,
{
    let provider = directory.provider_name();
    let input = name_or_id.trim();
    if input.is_empty() {
        return Err(ProviderError::validation(provider, "domain", "zone name or id is required"));
    }
    if input.starts_with(directory.native_id_prefix()) {
        return Ok(ResolvedZone {
            id: input.to_string(),
            name: None,
        });
    }

    let mut zones = directory.search_zones(selector, input, cx).await?;
    if zones.len() != 1 {
        log::debug!("[{provider}] '{input}' resolved to {} zones", zones.len());
        return Err(ProviderError::ResolutionAmbiguous {
            provider: provider.to_string(),
            keyword: input.to_string(),
            matches: zones.len(),
        });
    }
    let zone = zones.remove(0);
    Ok(ResolvedZone {
        id: zone.id,
        name: Some(zone.name),
    })
}
