use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cart line as submitted by the client: a snapshot of the product at the
/// moment it was added, not a reference that is resolved later.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

/// Serialized into the order row as a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Transient, client-supplied pre-order state. Exists only for the duration
/// of the request that converts it into an order.
#[derive(Debug, Clone)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_date_index: Option<usize>,
    pub payment_method: Option<String>,
}

/// Fully-priced order ready for persistence. Prices come from the pricing
/// engine, never from the client.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: BigDecimal,
    pub shipping_price: BigDecimal,
    pub tax_price: BigDecimal,
    pub total_price: BigDecimal,
    pub expected_delivery_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: BigDecimal,
    pub shipping_price: BigDecimal,
    pub tax_price: BigDecimal,
    pub total_price: BigDecimal,
    pub expected_delivery_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Admin-facing listing row: the buyer's name is resolved, items are not
/// loaded.
#[derive(Debug, Clone)]
pub struct OrderListItem {
    pub id: Uuid,
    pub buyer_name: String,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// One labelled point of a sales series (a month, or a day of the chart).
#[derive(Debug, Clone, PartialEq)]
pub struct SalesBucket {
    pub label: String,
    pub value: BigDecimal,
}

/// Units sold per item category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySales {
    pub category: String,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub total_sales: BigDecimal,
}

/// Dashboard snapshot produced by the summary aggregator.
///
/// `monthly_sales` covers the trailing six months from "now" regardless of
/// the queried range; everything else is scoped to the range.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub orders_count: i64,
    pub products_count: i64,
    pub users_count: i64,
    pub total_sales: BigDecimal,
    pub monthly_sales: Vec<SalesBucket>,
    pub sales_chart_data: Vec<SalesBucket>,
    pub top_sales_categories: Vec<CategorySales>,
    pub top_sales_products: Vec<ProductSales>,
    pub latest_orders: Vec<OrderListItem>,
}
