use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::pricing::{DeliveryTier, PriceQuote};
use crate::errors::AppError;
use crate::AppService;

use super::orders::CartRequest;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryTierResponse {
    pub name: String,
    pub days_to_deliver: i64,
    pub shipping_price: String,
    pub free_shipping_min_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub items_price: String,
    /// Absent until a shipping address and delivery tier are known.
    pub shipping_price: Option<String>,
    /// Absent until a shipping address is known.
    pub tax_price: Option<String>,
    pub total_price: String,
    pub delivery_date_index: usize,
    pub available_delivery_dates: Vec<DeliveryTierResponse>,
}

impl QuoteResponse {
    fn new(quote: PriceQuote, tiers: &[DeliveryTier]) -> Self {
        QuoteResponse {
            items_price: quote.items_price.to_string(),
            shipping_price: quote.shipping_price.map(|p| p.to_string()),
            tax_price: quote.tax_price.map(|p| p.to_string()),
            total_price: quote.total_price.to_string(),
            delivery_date_index: quote.delivery_date_index,
            available_delivery_dates: tiers
                .iter()
                .map(|tier| DeliveryTierResponse {
                    name: tier.name.clone(),
                    days_to_deliver: tier.days_to_deliver,
                    shipping_price: tier.shipping_price.to_string(),
                    free_shipping_min_price: tier.free_shipping_min_price.to_string(),
                })
                .collect(),
        }
    }
}

/// POST /cart/price
///
/// Prices a cart without persisting anything. The storefront calls this on
/// every cart change to refresh the displayed totals; checkout recomputes
/// the same quote server-side, so nothing returned here is trusted later.
#[utoipa::path(
    post,
    path = "/cart/price",
    request_body = CartRequest,
    responses(
        (status = 200, description = "Quote for the submitted cart", body = QuoteResponse),
        (status = 400, description = "Cart failed validation"),
    ),
    tag = "cart"
)]
pub async fn price_cart(
    service: web::Data<AppService>,
    body: web::Json<CartRequest>,
) -> Result<HttpResponse, AppError> {
    let cart = body.into_inner().into_cart()?;
    let quote = service.quote(&cart);
    Ok(HttpResponse::Ok().json(QuoteResponse::new(quote, service.delivery_tiers())))
}
