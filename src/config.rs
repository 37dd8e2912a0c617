use std::env;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::domain::pricing::DeliveryTier;

pub const DEFAULT_PAGE_SIZE: i64 = 9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} is not a valid number: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Default page size for order listings and the latest-orders panel.
    pub page_size: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };
        let page_size = match env::var("PAGE_SIZE") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PAGE_SIZE", raw))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Config {
            database_url,
            host,
            port,
            page_size,
        })
    }
}

fn cents(value: i64) -> BigDecimal {
    BigDecimal::new(value.into(), 2)
}

/// The delivery options offered at checkout, slowest last. The pricing
/// engine falls back to the last entry when the client has not picked one.
/// Not editable at runtime.
pub fn available_delivery_dates() -> Vec<DeliveryTier> {
    vec![
        DeliveryTier {
            name: "Tomorrow".to_string(),
            days_to_deliver: 1,
            shipping_price: cents(1290),
            free_shipping_min_price: cents(0),
        },
        DeliveryTier {
            name: "Next 3 Days".to_string(),
            days_to_deliver: 3,
            shipping_price: cents(690),
            free_shipping_min_price: cents(0),
        },
        DeliveryTier {
            name: "Next 5 Days".to_string(),
            days_to_deliver: 5,
            shipping_price: cents(490),
            free_shipping_min_price: cents(3500),
        },
    ]
}
