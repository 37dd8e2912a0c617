use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{DateRange, OrderSummary};
use crate::errors::AppError;
use crate::AppService;

use super::orders::OrderListItemResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DateRangeParams {
    /// Range start, RFC 3339 (inclusive).
    pub from: DateTime<Utc>,
    /// Range end, RFC 3339 (inclusive).
    pub to: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesBucketResponse {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySalesResponse {
    pub category: String,
    pub units_sold: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSalesResponse {
    pub id: Uuid,
    pub label: String,
    pub image: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub orders_count: i64,
    pub products_count: i64,
    pub users_count: i64,
    pub total_sales: String,
    pub monthly_sales: Vec<SalesBucketResponse>,
    pub sales_chart_data: Vec<SalesBucketResponse>,
    pub top_sales_categories: Vec<CategorySalesResponse>,
    pub top_sales_products: Vec<ProductSalesResponse>,
    pub latest_orders: Vec<OrderListItemResponse>,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        let buckets = |series: Vec<crate::domain::order::SalesBucket>| {
            series
                .into_iter()
                .map(|bucket| SalesBucketResponse {
                    label: bucket.label,
                    value: bucket.value.to_string(),
                })
                .collect()
        };
        OrderSummaryResponse {
            orders_count: summary.orders_count,
            products_count: summary.products_count,
            users_count: summary.users_count,
            total_sales: summary.total_sales.to_string(),
            monthly_sales: buckets(summary.monthly_sales),
            sales_chart_data: buckets(summary.sales_chart_data),
            top_sales_categories: summary
                .top_sales_categories
                .into_iter()
                .map(|category| CategorySalesResponse {
                    category: category.category,
                    units_sold: category.units_sold,
                })
                .collect(),
            top_sales_products: summary
                .top_sales_products
                .into_iter()
                .map(|product| ProductSalesResponse {
                    id: product.product_id,
                    label: product.name,
                    image: product.image,
                    value: product.total_sales.to_string(),
                })
                .collect(),
            latest_orders: summary
                .latest_orders
                .into_iter()
                .map(OrderListItemResponse::from)
                .collect(),
        }
    }
}

/// GET /dashboard/summary
///
/// Admin dashboard snapshot for the given date range. The monthly sales
/// series always covers the trailing six months from today, whatever range
/// is asked for; everything else is scoped to the range.
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    params(
        ("from" = String, Query, description = "Range start, RFC 3339 (inclusive)"),
        ("to" = String, Query, description = "Range end, RFC 3339 (inclusive)"),
    ),
    responses(
        (status = 200, description = "Dashboard snapshot", body = OrderSummaryResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn order_summary(
    service: web::Data<AppService>,
    query: web::Query<DateRangeParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let range = DateRange {
        from: params.from,
        to: params.to,
    };

    let service = service.clone();
    let summary = web::block(move || service.get_order_summary(range))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderSummaryResponse::from(summary)))
}
