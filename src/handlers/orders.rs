use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::order::{Cart, CartItem, OrderListItem, OrderView, ShippingAddress};
use crate::errors::{format_validation_errors, AppError};
use crate::AppService;

use super::auth::AuthenticatedUser;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CartItemRequest {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub image: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ShippingAddressRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub street: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    pub province: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub country: String,
    pub phone: String,
}

/// A client-side cart. Shared by checkout (`POST /orders`) and pricing
/// quotes (`POST /cart/price`); the latter tolerates the missing address and
/// payment method that checkout rejects.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CartRequest {
    #[validate]
    pub items: Vec<CartItemRequest>,
    #[validate]
    pub shipping_address: Option<ShippingAddressRequest>,
    pub payment_method: Option<String>,
    pub delivery_date_index: Option<usize>,
}

impl CartItemRequest {
    fn into_domain(self) -> Result<CartItem, AppError> {
        let price = BigDecimal::from_str(&self.price).map_err(|e| {
            AppError::Validation(format!("Invalid price '{}': {}", self.price, e))
        })?;
        Ok(CartItem {
            product_id: self.product_id,
            name: self.name,
            image: self.image,
            category: self.category,
            price,
            quantity: self.quantity,
        })
    }
}

impl ShippingAddressRequest {
    fn into_domain(self) -> ShippingAddress {
        ShippingAddress {
            full_name: self.full_name,
            street: self.street,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            country: self.country,
            phone: self.phone,
        }
    }
}

impl CartRequest {
    /// Validate and convert into the domain cart, parsing prices. Called by
    /// every handler that accepts a cart, so malformed payloads are rejected
    /// with one readable message before any domain logic runs.
    pub fn into_cart(self) -> Result<Cart, AppError> {
        self.validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        let items = self
            .items
            .into_iter()
            .map(CartItemRequest::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart {
            items,
            shipping_address: self.shipping_address.map(ShippingAddressRequest::into_domain),
            delivery_date_index: self.delivery_date_index,
            payment_method: self.payment_method,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShippingAddressResponse {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub shipping_address: ShippingAddressResponse,
    pub payment_method: String,
    pub items_price: String,
    pub shipping_price: String,
    pub tax_price: String,
    pub total_price: String,
    pub expected_delivery_date: String,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        OrderResponse {
            id: order.id,
            user_id: order.user_id,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id,
                    name: item.name,
                    image: item.image,
                    category: item.category,
                    price: item.price.to_string(),
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address: ShippingAddressResponse {
                full_name: order.shipping_address.full_name,
                street: order.shipping_address.street,
                city: order.shipping_address.city,
                province: order.shipping_address.province,
                postal_code: order.shipping_address.postal_code,
                country: order.shipping_address.country,
                phone: order.shipping_address.phone,
            },
            payment_method: order.payment_method,
            items_price: order.items_price.to_string(),
            shipping_price: order.shipping_price.to_string(),
            tax_price: order.tax_price.to_string(),
            total_price: order.total_price.to_string(),
            expected_delivery_date: order.expected_delivery_date.to_rfc3339(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListItemResponse {
    pub id: Uuid,
    pub buyer_name: String,
    pub total_price: String,
    pub created_at: String,
}

impl From<OrderListItem> for OrderListItemResponse {
    fn from(item: OrderListItem) -> Self {
        OrderListItemResponse {
            id: item.id,
            buyer_name: item.buyer_name,
            total_price: item.total_price.to_string(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page. Defaults to the configured page size.
    pub limit: Option<i64>,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total_pages: i64,
    pub page: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderListItemResponse>,
    pub total_pages: i64,
    pub page: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Converts the submitted cart into a persisted order. Prices are recomputed
/// server-side; client-supplied totals are never trusted.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CartRequest,
    responses(
        (status = 201, description = "Order placed successfully"),
        (status = 400, description = "Cart failed validation"),
        (status = 401, description = "Caller is not authenticated"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppService>,
    user: AuthenticatedUser,
    body: web::Json<CartRequest>,
) -> Result<HttpResponse, AppError> {
    let cart = body.into_inner().into_cart()?;

    let service = service.clone();
    let order_id = web::block(move || service.create_order(cart, user.0))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Order placed successfully",
        "id": order_id
    })))
}

/// GET /orders/{id}
///
/// Returns the order together with its item snapshots.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let service = service.clone();
    let order = web::block(move || service.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders/mine
///
/// The authenticated caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/orders/mine",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: configured page size)"),
    ),
    responses(
        (status = 200, description = "Paginated list of the caller's orders", body = MyOrdersResponse),
        (status = 401, description = "Caller is not authenticated"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn my_orders(
    service: web::Data<AppService>,
    user: AuthenticatedUser,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);

    let service = service.clone();
    let result = web::block(move || service.get_my_orders(user.0, page, params.limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MyOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total_pages: result.total_pages,
        page,
    }))
}

/// GET /orders
///
/// Admin listing across all users, buyer names resolved, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: configured page size)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);

    let service = service.clone();
    let result = web::block(move || service.get_all_orders(page, params.limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result
            .items
            .into_iter()
            .map(OrderListItemResponse::from)
            .collect(),
        total_pages: result.total_pages,
        page,
    }))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order deleted successfully"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<AppService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let service = service.clone();
    web::block(move || service.delete_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order deleted successfully"
    })))
}
