//! Product domain types.
//!
//! Field names on the wire are `pro_name`, `pro_price` and `pro_desc`, the
//! column names the catalog frontend was written against. Prices travel as
//! JSON numbers but are held as exact decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pachara_core::ProductId;

/// Number of decimal places a stored price keeps.
pub const PRICE_SCALE: u32 = 2;

/// Largest price a `NUMERIC(12, 2)` column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "pro_name")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "pro_price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Free-text description.
    #[serde(rename = "pro_desc")]
    pub description: String,
}

/// Product fields accepted by the add and update endpoints.
///
/// Missing fields decode to their empty values so that [`validate`] can
/// reject them with a single message instead of a decoding error.
///
/// [`validate`]: ProductInput::validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductInput {
    #[serde(default, rename = "pro_name")]
    pub name: String,
    #[serde(default, rename = "pro_price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, rename = "pro_desc")]
    pub description: String,
}

/// Reasons a [`ProductInput`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductInputError {
    #[error("name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("price must be greater than zero")]
    InvalidPrice,
    #[error("price must be at most 9999999999.99")]
    PriceTooLarge,
}

impl ProductInput {
    /// Check the fields and return the input normalized for storage.
    ///
    /// Name and description are trimmed; the price is rounded to
    /// [`PRICE_SCALE`] places.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: blank name, blank description, or a
    /// price that is not positive once rounded.
    pub fn validate(self) -> Result<Self, ProductInputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductInputError::MissingName);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ProductInputError::MissingDescription);
        }

        let price = self.price.round_dp(PRICE_SCALE);
        if price <= Decimal::ZERO {
            return Err(ProductInputError::InvalidPrice);
        }
        if price > MAX_PRICE {
            return Err(ProductInputError::PriceTooLarge);
        }

        Ok(Self {
            name: name.to_owned(),
            price,
            description: description.to_owned(),
        })
    }
}
