use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// One bounded page of an offset-paginated listing. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl PageWindow {
    /// Build a window from optional caller input.
    ///
    /// Missing values default to page 1 and `default_page_size`; zero is rejected.
    pub fn new(
        provider: &str,
        page: Option<u32>,
        page_size: Option<u32>,
        default_page_size: u32,
    ) -> Result<Self> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(default_page_size);
        if page == 0 {
            return Err(ProviderError::validation(provider, "page", "pages start at 1"));
        }
        if page_size == 0 {
            return Err(ProviderError::validation(
                provider,
                "page_size",
                "page size must be positive",
            ));
        }
        Ok(Self { page, page_size })
    }

    /// Absolute provider offset: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Next page number, only when the returned page was exactly full.
    ///
    /// A short page means the end of the data, and so does the last
    /// representable page number.
    pub fn next_page(&self, returned: usize) -> Option<u32> {
        if returned != self.page_size as usize {
            return None;
        }
        self.page.checked_add(1)
    }

    /// Previous page number whenever this is not the first page.
    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }
}
