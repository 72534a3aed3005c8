use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use domain_events::IntegrationEvent;

/// Default page size for catalog listings
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Custom validator for non-negative prices
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Catalog item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Full description
    pub description: String,
    /// Unit price
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    /// Picture file name, if the item has one
    pub picture_file_name: Option<String>,
    /// Catalog type this item belongs to
    pub catalog_type_id: i32,
    /// Catalog brand this item belongs to
    pub catalog_brand_id: i32,
    /// Units currently in stock
    pub available_stock: i32,
    /// Stock level that triggers a reorder
    pub restock_threshold: i32,
    /// Maximum units the warehouse can hold
    pub max_stock_threshold: i32,
    /// Whether a reorder is in flight
    pub on_reorder: bool,
}

/// Catalog brand lookup entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogBrand {
    pub id: i32,
    pub brand: String,
}

/// Catalog type lookup entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogType {
    pub id: i32,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// DTO for creating a catalog item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogItem {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = validate_price))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub picture_file_name: Option<String>,
    pub catalog_type_id: i32,
    pub catalog_brand_id: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub available_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub restock_threshold: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_stock_threshold: i32,
    #[serde(default)]
    pub on_reorder: bool,
}

/// DTO for updating a catalog item. Carries the full replacement state,
/// including the item id in the body, matching the storefront client.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCatalogItem {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = validate_price))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub picture_file_name: Option<String>,
    pub catalog_type_id: i32,
    pub catalog_brand_id: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub available_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub restock_threshold: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_stock_threshold: i32,
    #[serde(default)]
    pub on_reorder: bool,
}

impl CatalogItem {
    /// Applies a full replacement update, keeping the id.
    pub fn apply_update(&mut self, update: UpdateCatalogItem) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.picture_file_name = update.picture_file_name;
        self.catalog_type_id = update.catalog_type_id;
        self.catalog_brand_id = update.catalog_brand_id;
        self.available_stock = update.available_stock;
        self.restock_threshold = update.restock_threshold;
        self.max_stock_threshold = update.max_stock_threshold;
        self.on_reorder = update.on_reorder;
    }

    /// Text the embedding is computed from.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

/// Pagination parameters shared by all listing endpoints
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
pub struct PageRequest {
    /// Zero-based page index
    #[serde(default)]
    pub page_index: u64,
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

pub(crate) fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Row offset for this page. `None` when the multiplication overflows.
    pub fn offset(&self) -> Option<u64> {
        self.page_index.checked_mul(self.page_size)
    }
}

/// Conjunctive filters for catalog listings
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CatalogFilter {
    /// Case-insensitive name prefix
    pub name: Option<String>,
    /// Restrict to a catalog type
    pub type_id: Option<i32>,
    /// Restrict to a catalog brand
    pub brand_id: Option<i32>,
}

/// One page of catalog items plus the total count under the same filters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedItems {
    pub page_index: u64,
    pub page_size: u64,
    /// Total matching items across all pages
    pub count: u64,
    pub data: Vec<CatalogItem>,
}

/// Integration event raised when an item's price changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPriceChangedIntegrationEvent {
    pub event_id: Uuid,
    pub product_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub new_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub old_price: Decimal,
}

impl ProductPriceChangedIntegrationEvent {
    pub fn new(product_id: i64, new_price: Decimal, old_price: Decimal) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            product_id,
            new_price,
            old_price,
        }
    }
}

impl IntegrationEvent for ProductPriceChangedIntegrationEvent {
    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn event_type(&self) -> &'static str {
        "ProductPriceChangedIntegrationEvent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_multiplies_index_by_size() {
        let page = PageRequest {
            page_index: 3,
            page_size: 10,
        };
        assert_eq!(page.offset(), Some(30));
    }

    #[test]
    fn test_offset_overflow_is_none() {
        let page = PageRequest {
            page_index: u64::MAX,
            page_size: 2,
        };
        assert_eq!(page.offset(), None);
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let input = CreateCatalogItem {
            name: "Alpine Fork".to_string(),
            description: String::new(),
            price: Decimal::new(-100, 2),
            picture_file_name: None,
            catalog_type_id: 1,
            catalog_brand_id: 1,
            available_stock: 0,
            restock_threshold: 0,
            max_stock_threshold: 0,
            on_reorder: false,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_price_changed_event_serializes_prices_as_strings() {
        let event = ProductPriceChangedIntegrationEvent::new(
            7,
            Decimal::new(1250, 2),
            Decimal::new(999, 2),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["new_price"], "12.50");
        assert_eq!(json["old_price"], "9.99");
        assert_eq!(event.event_type(), "ProductPriceChangedIntegrationEvent");
    }
}
