use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    Cart, DateRange, ListResult, NewOrder, OrderListItem, OrderSummary, OrderView,
};
use crate::domain::ports::OrderRepository;
use crate::domain::pricing::{price_cart, DeliveryTier, PriceQuote};

/// A page of results together with the total page count
/// (`ceil(total / limit)`).
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_pages: i64,
}

pub struct OrderService<R> {
    repo: R,
    tiers: Vec<DeliveryTier>,
    page_size: i64,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, tiers: Vec<DeliveryTier>, page_size: i64) -> Self {
        Self {
            repo,
            tiers,
            page_size,
        }
    }

    pub fn delivery_tiers(&self) -> &[DeliveryTier] {
        &self.tiers
    }

    /// Price a cart without persisting anything. Used by the storefront to
    /// refresh totals as the cart changes.
    pub fn quote(&self, cart: &Cart) -> PriceQuote {
        price_cart(
            &cart.items,
            cart.shipping_address.as_ref(),
            cart.delivery_date_index,
            &self.tiers,
        )
    }

    /// Convert a client-submitted cart into a persisted order.
    ///
    /// Prices and the delivery date are recomputed here; whatever totals the
    /// client displayed are ignored. A persisted order always carries
    /// shipping and tax, so a missing address, payment method, or delivery
    /// tier is rejected up front.
    pub fn create_order(&self, cart: Cart, user_id: Uuid) -> Result<Uuid, DomainError> {
        if cart.items.is_empty() {
            return Err(DomainError::InvalidInput("cart has no items".to_string()));
        }

        let quote = self.quote(&cart);

        let shipping_address = cart.shipping_address.ok_or_else(|| {
            DomainError::InvalidInput("shipping address is required".to_string())
        })?;
        let payment_method = cart.payment_method.ok_or_else(|| {
            DomainError::InvalidInput("payment method is required".to_string())
        })?;
        let tier = self.tiers.get(quote.delivery_date_index).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "delivery option {} does not exist",
                quote.delivery_date_index
            ))
        })?;

        // Both are Some once the address and tier checks above have passed.
        let shipping_price = quote.shipping_price.ok_or_else(|| {
            DomainError::Internal("shipping price missing after tier resolution".to_string())
        })?;
        let tax_price = quote.tax_price.ok_or_else(|| {
            DomainError::Internal("tax price missing despite shipping address".to_string())
        })?;

        self.repo.create(NewOrder {
            user_id,
            items: cart.items,
            shipping_address,
            payment_method,
            items_price: quote.items_price,
            shipping_price,
            tax_price,
            total_price: quote.total_price,
            expected_delivery_date: Utc::now() + Duration::days(tier.days_to_deliver),
        })
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    /// The caller's own orders, newest first.
    pub fn get_my_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: Option<i64>,
    ) -> Result<Paged<OrderView>, DomainError> {
        let limit = limit.unwrap_or(self.page_size).max(1);
        let page = page.max(1);
        let result = self.repo.list_by_user(user_id, page, limit)?;
        Ok(paged(result, limit))
    }

    /// Admin listing across all users, buyer names resolved.
    pub fn get_all_orders(
        &self,
        page: i64,
        limit: Option<i64>,
    ) -> Result<Paged<OrderListItem>, DomainError> {
        let limit = limit.unwrap_or(self.page_size).max(1);
        let page = page.max(1);
        let result = self.repo.list_all(page, limit)?;
        Ok(paged(result, limit))
    }

    pub fn delete_order(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    pub fn get_order_summary(&self, range: DateRange) -> Result<OrderSummary, DomainError> {
        self.repo.summary(&range, Utc::now(), self.page_size)
    }
}

fn paged<T>(result: ListResult<T>, limit: i64) -> Paged<T> {
    Paged {
        items: result.items,
        total_pages: (result.total + limit - 1) / limit,
    }
}
