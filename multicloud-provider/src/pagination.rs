//! Pagination reconciler.
//!
//! Providers page either by opaque cursor or by numeric offset with a running
//! total. Both are exposed here as lazy streams of pages. A stream can be started
//! from a cursor or offset the caller already holds, and it stops issuing calls
//! as soon as it is dropped. The collectors on top materialize complete results.
//!
//! Calls inside one loop are strictly sequential and each one is raced against
//! the caller's [`CallContext`].

use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};

use crate::context::CallContext;
use crate::error::{ProviderError, Result};
use crate::types::{CursorPage, OffsetPage};

enum CursorState {
    Pending(Option<String>),
    Done,
}

/// Fetch a single cursor page.
///
/// A provider handing back the marker it was just given would loop forever, so
/// that is reported as an invalid response.
pub async fn cursor_page<T, F, Fut>(
    cx: &CallContext,
    provider: &str,
    cursor: Option<String>,
    fetch: F,
) -> Result<CursorPage<T>>
where
    F: FnOnce(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let page = cx.run(provider, fetch(cursor.clone())).await?;
    if page.next_cursor.is_some() && page.next_cursor == cursor {
        return Err(ProviderError::invalid_response(
            provider,
            "pagination cursor did not advance",
        ));
    }
    Ok(page)
}

/// Lazy stream of cursor pages, starting at `start` (or the beginning).
pub fn cursor_pages<T, F, Fut>(
    cx: &CallContext,
    provider: &str,
    start: Option<String>,
    fetch: F,
) -> impl Stream<Item = Result<CursorPage<T>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    stream::try_unfold(
        (CursorState::Pending(start), fetch),
        move |(state, mut fetch)| async move {
            let cursor = match state {
                CursorState::Done => return Ok(None),
                CursorState::Pending(cursor) => cursor,
            };
            let page = cursor_page(cx, provider, cursor, &mut fetch).await?;
            let next = match &page.next_cursor {
                Some(marker) => CursorState::Pending(Some(marker.clone())),
                None => CursorState::Done,
            };
            Ok::<_, ProviderError>(Some((page, (next, fetch))))
        },
    )
}

/// Follow cursors until the provider stops returning one. Order is preserved.
pub async fn collect_cursor<T, F, Fut>(
    cx: &CallContext,
    provider: &str,
    start: Option<String>,
    fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let pages = cursor_pages(cx, provider, start, fetch);
    futures::pin_mut!(pages);

    let mut items = Vec::new();
    while let Some(page) = pages.try_next().await? {
        items.extend(page.items);
    }
    Ok(items)
}

/// Lazy stream of offset pages of `limit` items, starting at `start_offset`.
///
/// The offset advances by the number of raw items the provider returned, and the
/// stream ends once that reaches the provider-reported total. An empty page
/// before the total is reached is an invalid response.
pub fn offset_pages<T, F, Fut>(
    cx: &CallContext,
    provider: &str,
    start_offset: u64,
    limit: u32,
    fetch: F,
) -> impl Stream<Item = Result<OffsetPage<T>>>
where
    F: FnMut(u64, u32) -> Fut,
    Fut: Future<Output = Result<OffsetPage<T>>>,
{
    stream::try_unfold(
        (Some(start_offset), fetch),
        move |(offset, mut fetch)| async move {
            let Some(offset) = offset else {
                return Ok(None);
            };
            let page = cx.run(provider, fetch(offset, limit)).await?;
            let seen = offset + page.items.len() as u64;
            if page.items.is_empty() && seen < page.total_count {
                return Err(ProviderError::invalid_response(
                    provider,
                    format!(
                        "empty page at offset {offset} before reported total {}",
                        page.total_count
                    ),
                ));
            }
            let next = (seen < page.total_count).then_some(seen);
            log::debug!(
                "[{provider}] offset page: offset={offset}, raw={}, total={}",
                page.items.len(),
                page.total_count
            );
            Ok::<_, ProviderError>(Some((page, (next, fetch))))
        },
    )
}

/// Walk every offset page and keep the items `keep` accepts.
///
/// The number of calls depends only on the provider total, never on how many
/// items survive the filter.
pub async fn collect_offset_filtered<T, F, Fut, P>(
    cx: &CallContext,
    provider: &str,
    limit: u32,
    fetch: F,
    mut keep: P,
) -> Result<Vec<T>>
where
    F: FnMut(u64, u32) -> Fut,
    Fut: Future<Output = Result<OffsetPage<T>>>,
    P: FnMut(&T) -> bool,
{
    if limit == 0 {
        return Err(ProviderError::validation(
            provider,
            "page_size",
            "page size must be positive",
        ));
    }
    let pages = offset_pages(cx, provider, 0, limit, fetch);
    futures::pin_mut!(pages);

    let mut items = Vec::new();
    while let Some(page) = pages.try_next().await? {
        items.extend(page.items.into_iter().filter(|item| keep(item)));
    }
    Ok(items)
}

/// Client-side keyword match. A missing or empty keyword matches everything.
pub fn matches_keyword(haystack: &str, keyword: Option<&str>) -> bool {
    match keyword {
        Some(k) if !k.is_empty() => haystack.contains(k),
        _ => true,
    }
}
