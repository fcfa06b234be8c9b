//! 日志脱敏
//!
//! Native request bodies can carry tag values, record values and whole
//! lifecycle documents. Debug logs only ever see a bounded prefix.

/// 日志中保留的最大字节数
const LOG_BODY_LIMIT: usize = 256;

/// Cut `body` to at most [`LOG_BODY_LIMIT`] bytes on a char boundary,
/// appending the original length when anything was dropped.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= LOG_BODY_LIMIT {
        return body.to_string();
    }
    let cut = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= LOG_BODY_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... ({} bytes)", &body[..cut], body.len())
}
