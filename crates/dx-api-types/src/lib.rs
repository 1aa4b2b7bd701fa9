//! Shared API response types for Dexter services.
//!
//! Every backend operation returns an [`ApiResult`]; the JSON shape that
//! crosses the wire is the [`Envelope`] (`{success, data, error, meta}`).
//! The conversions here are the only place the two representations meet, so
//! the mock backend, the HTTP bridge and the HTTP client all agree on it.

mod error;

pub use error::{ApiError, ApiResult};

use serde::{Deserialize, Serialize};

// ── Pagination ──

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub page: u32,
    pub per_page: usize,
}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// A page holding every item, with no slicing applied.
    pub fn whole(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            meta: PageMeta {
                total,
                page: 1,
                per_page: total,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ── Envelope ──

/// The uniform response wrapper used on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable machine-readable error code (see [`ApiError::code`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Upstream HTTP status, carried for `HTTP` failures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            status: None,
            meta: None,
        }
    }

    pub fn failure(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
            status: err.status(),
            meta: None,
        }
    }

    /// Wrap any tagged result.
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failure(&err),
        }
    }

    /// Convert back into the tagged result, reconstructing the error from
    /// the `code` / `error` fields.
    pub fn into_result(self) -> ApiResult<T> {
        if !self.success {
            return Err(self.take_error());
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful envelope carried no data".into()))
    }

    fn take_error(&self) -> ApiError {
        let message = self
            .error
            .clone()
            .unwrap_or_else(|| "request failed".to_string());
        ApiError::from_code(self.code.as_deref(), message, self.status)
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn page(page: Page<T>) -> Self {
        Self {
            success: true,
            data: Some(page.items),
            error: None,
            code: None,
            status: None,
            meta: Some(page.meta),
        }
    }

    pub fn from_page_result(result: ApiResult<Page<T>>) -> Self {
        match result {
            Ok(page) => Self::page(page),
            Err(err) => Self::failure(&err),
        }
    }

    /// Convert a list envelope into a [`Page`]. A missing `meta` block means
    /// the whole collection was returned.
    pub fn into_page(self) -> ApiResult<Page<T>> {
        let meta = self.meta;
        let items = self.into_result()?;
        Ok(match meta {
            Some(meta) => Page { items, meta },
            None => Page::whole(items),
        })
    }
}

impl Envelope<serde_json::Value> {
    /// Envelope for operations that carry no payload (e.g. logout).
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            code: None,
            status: None,
            meta: None,
        }
    }

    /// Like [`Envelope::into_result`] but tolerates an absent payload.
    pub fn into_unit(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.take_error())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_fields() {
        let env = Envelope::ok(json!({"id": "1"}));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": "1"}}));
    }

    #[test]
    fn failure_envelope_carries_message_and_code() {
        let env: Envelope<()> = Envelope::failure(&ApiError::not_found("Narrative"));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Narrative not found");
        assert_eq!(value["code"], "NOT_FOUND");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn not_found_survives_the_wire() {
        let env: Envelope<String> = Envelope::failure(&ApiError::not_found("Actor"));
        let text = serde_json::to_string(&env).unwrap();
        let back: Envelope<String> = serde_json::from_str(&text).unwrap();
        match back.into_result() {
            Err(ApiError::NotFound { entity }) => assert_eq!(entity, "Actor"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn list_envelope_keeps_meta() {
        let page = Page {
            items: vec!["a", "b"],
            meta: PageMeta {
                total: 5,
                page: 2,
                per_page: 2,
            },
        };
        let value = serde_json::to_value(Envelope::page(page)).unwrap();
        assert_eq!(value["meta"], json!({"total": 5, "page": 2, "perPage": 2}));
    }

    #[test]
    fn missing_meta_means_whole_collection() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": [1, 2, 3]})).unwrap();
        let page = env.into_page().unwrap();
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.per_page, 3);
    }

    #[test]
    fn success_without_data_is_a_decode_error() {
        let env: Envelope<u32> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(env.into_result(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn empty_envelope_is_unit_success() {
        assert!(Envelope::empty().into_unit().is_ok());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id: String,
    }

    #[test]
    fn decodes_payload_without_default_impl() {
        fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> ApiResult<T> {
            serde_json::from_value::<Envelope<T>>(value)
                .unwrap()
                .into_result()
        }
        let ticket: Ticket = decode(json!({"success": true, "data": {"id": "7"}})).unwrap();
        assert_eq!(ticket, Ticket { id: "7".into() });
        assert!(decode::<Ticket>(json!({"success": true})).is_err());
    }

    #[test]
    fn upstream_http_status_survives_the_wire() {
        let err = ApiError::Http {
            status: 429,
            message: "slow down".into(),
        };
        let env: Envelope<u32> = Envelope::failure(&err);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["status"], 429);
        let back: Envelope<u32> = serde_json::from_value(value).unwrap();
        assert_eq!(back.into_result(), Err(err));
    }

    #[test]
    fn failure_without_code_is_transient() {
        let env: Envelope<u32> =
            serde_json::from_value(json!({"success": false, "error": "boom"})).unwrap();
        match env.into_result() {
            Err(ApiError::Transient(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
