//! 共享测试工具和辅助函数
//!
//! In-memory fakes of the native clients. Each fake records the calls it
//! receives so tests can assert on call counts, offsets and payloads.

#![allow(dead_code)]

#[cfg(feature = "aws")]
pub mod aws;
#[cfg(feature = "tencent")]
pub mod tencent;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use multicloud_provider::{ClientError, ClientFactory, RawApiError, Selector};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Ordered log of native calls, e.g. `"DescribePrivateZoneRecordList offset=100"`.
#[derive(Debug, Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Entries starting with `operation`.
    pub fn of(&self, operation: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.starts_with(operation))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Factory handing out one shared client and counting how often it was asked.
pub struct CountingFactory<C: ?Sized> {
    client: Arc<C>,
    calls: AtomicUsize,
}

impl<C: ?Sized> CountingFactory<C> {
    pub fn new(client: Arc<C>) -> Arc<Self> {
        Arc::new(Self {
            client,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<C: ?Sized + Send + Sync> ClientFactory<C> for CountingFactory<C> {
    fn client(&self, _selector: &Selector) -> Result<Arc<C>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.client))
    }
}

pub fn api_error(code: &str, message: &str) -> ClientError {
    ClientError::Api(RawApiError::with_code(code, message).request_id("req-test"))
}

pub fn tencent_selector() -> Selector {
    Selector::profile("test").with_region("ap-guangzhou")
}

pub fn aws_selector() -> Selector {
    Selector::default().with_region("eu-west-1")
}
