//! Wire envelope types for the console backend.
//!
//! Every backend response is wrapped in a `{success, data, message}`
//! envelope, used uniformly for success/failure signaling. Paginated
//! endpoints nest their items and counters inside `data`.

use serde::Deserialize;

use rosterly_types::error::StoreError;
use rosterly_types::page::{Page, PageMeta};

/// The `{success, data, message}` wrapper around every response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload of a successful envelope.
    ///
    /// `success: false` maps to [`StoreError::Rejected`] carrying the
    /// backend's message; a successful envelope with no data is a decode
    /// error, not a silent `None`.
    pub fn into_result(self) -> Result<T, StoreError> {
        if !self.success {
            return Err(StoreError::Rejected(
                self.message
                    .unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| StoreError::Decode("missing data in successful response".to_string()))
    }

    /// Acknowledge an envelope whose payload is irrelevant (deletes).
    pub fn into_ack(self) -> Result<(), StoreError> {
        if self.success {
            Ok(())
        } else {
            Err(StoreError::Rejected(
                self.message
                    .unwrap_or_else(|| "request rejected".to_string()),
            ))
        }
    }
}

/// Paginated payload nested inside a successful envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedData<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> From<PagedData<T>> for Page<T> {
    fn from(paged: PagedData<T>) -> Self {
        Page {
            items: paged.items,
            meta: PageMeta {
                page: paged.page,
                limit: paged.limit,
                total: paged.total,
                total_pages: paged.total_pages,
            },
        }
    }
}
