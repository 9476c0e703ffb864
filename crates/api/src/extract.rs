//! Request extractors with API-shaped rejections.
//!
//! Axum's stock `Json` and `Query` reject with 415/422 and a verbose body.
//! These wrappers route every rejection through [`AppError`] so a malformed
//! request is always a 400 with a short message.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use pachara_core::ProductId;

use crate::error::AppError;

/// JSON request body; any decoding failure is 400 "Error decoding JSON".
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string parameters; any decoding failure is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// The `?id=` parameter of the product routes.
///
/// Held as raw text so that "missing" and "not a number" get different
/// messages.
#[derive(Debug, Default, Deserialize)]
pub struct ProductIdQuery {
    pub id: Option<String>,
}

impl ProductIdQuery {
    /// Parse the product ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` with "ID is required" when the parameter
    /// is absent or blank, and "Invalid product ID" when it is not an integer.
    pub fn product_id(&self) -> Result<ProductId, AppError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("ID is required".to_owned()))?;

        raw.parse()
            .map_err(|_| AppError::BadRequest("Invalid product ID".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(id: Option<&str>) -> ProductIdQuery {
        ProductIdQuery {
            id: id.map(String::from),
        }
    }

    fn message(result: Result<ProductId, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_parses_integer_id() {
        assert_eq!(query(Some("42")).product_id().unwrap(), ProductId::new(42));
        assert_eq!(query(Some(" 7 ")).product_id().unwrap(), ProductId::new(7));
    }

    #[test]
    fn test_missing_or_blank_id_is_required() {
        assert_eq!(message(query(None).product_id()), "ID is required");
        assert_eq!(message(query(Some("")).product_id()), "ID is required");
        assert_eq!(message(query(Some("   ")).product_id()), "ID is required");
    }

    #[test]
    fn test_non_integer_id_is_invalid() {
        for raw in ["abc", "1.5", "12abc", "99999999999"] {
            assert_eq!(
                message(query(Some(raw)).product_id()),
                "Invalid product ID",
                "id {raw:?}"
            );
        }
    }
}
