use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{
    DateRange, ListResult, NewOrder, OrderListItem, OrderSummary, OrderView,
};

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: NewOrder) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_by_user(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<OrderView>, DomainError>;
    fn list_all(&self, page: i64, limit: i64) -> Result<ListResult<OrderListItem>, DomainError>;
    /// Returns whether a matching order existed.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    /// `now` anchors the trailing-six-months window of the monthly series;
    /// `latest_limit` caps the latest-orders list.
    fn summary(
        &self,
        range: &DateRange,
        now: DateTime<Utc>,
        latest_limit: i64,
    ) -> Result<OrderSummary, DomainError>;
}
