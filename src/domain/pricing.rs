//! Cart pricing: items subtotal, delivery-tier shipping, tax, and total.
//!
//! Pure functions only. Prices are `BigDecimal` throughout; every monetary
//! subtotal is rounded to 2 decimal places (half-up) independently before
//! entering the total.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::order::{CartItem, ShippingAddress};

/// One entry in the delivery-date configuration table.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTier {
    pub name: String,
    pub days_to_deliver: i64,
    pub shipping_price: BigDecimal,
    /// Free shipping applies when this is positive and the items subtotal
    /// reaches it.
    pub free_shipping_min_price: BigDecimal,
}

/// Result of pricing a cart.
///
/// `shipping_price` and `tax_price` are `None` until a shipping address is
/// known (and, for shipping, until the delivery index resolves to a tier);
/// the total then degrades to the items subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub items_price: BigDecimal,
    pub shipping_price: Option<BigDecimal>,
    pub tax_price: Option<BigDecimal>,
    pub total_price: BigDecimal,
    /// The tier index the quote was computed against. Defaults to the last
    /// (slowest, cheapest) tier when the caller did not pick one. Returned
    /// verbatim even when out of range.
    pub delivery_date_index: usize,
}

/// Round to 2 decimal places, half-up. Idempotent.
pub fn round2(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

fn tax_rate() -> BigDecimal {
    // 15%, flat; not configurable per region.
    BigDecimal::from(15) / BigDecimal::from(100)
}

/// Price a cart against the delivery-tier table.
///
/// The items subtotal is always computed. Shipping requires both an address
/// and a resolvable tier; tax requires only an address. An out-of-range
/// `delivery_date_index` is not an error: it simply resolves to no tier, so
/// shipping stays unknown.
pub fn price_cart(
    items: &[CartItem],
    shipping_address: Option<&ShippingAddress>,
    delivery_date_index: Option<usize>,
    tiers: &[DeliveryTier],
) -> PriceQuote {
    let items_price = round2(
        &items
            .iter()
            .map(|item| &item.price * BigDecimal::from(item.quantity))
            .sum::<BigDecimal>(),
    );

    let index = delivery_date_index.unwrap_or(tiers.len().saturating_sub(1));
    let tier = tiers.get(index);

    let shipping_price = match (shipping_address, tier) {
        (Some(_), Some(tier)) => {
            if tier.free_shipping_min_price > BigDecimal::zero()
                && items_price >= tier.free_shipping_min_price
            {
                Some(BigDecimal::zero())
            } else {
                Some(tier.shipping_price.clone())
            }
        }
        _ => None,
    };

    let tax_price = shipping_address.map(|_| round2(&(&items_price * tax_rate())));

    let total_price = round2(
        &(&items_price
            + shipping_price.as_ref().map(round2).unwrap_or_default()
            + tax_price.as_ref().map(round2).unwrap_or_default()),
    );

    PriceQuote {
        items_price,
        shipping_price,
        tax_price,
        total_price,
        delivery_date_index: index,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use uuid::Uuid;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn item(price: &str, quantity: i32) -> CartItem {
        CartItem {
            product_id: Uuid::new_v4(),
            name: "Test product".to_string(),
            image: "/images/test.jpg".to_string(),
            category: "Shirts".to_string(),
            price: dec(price),
            quantity,
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Jane Buyer".to_string(),
            street: "12 High St".to_string(),
            city: "Springfield".to_string(),
            province: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "USA".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn tiers() -> Vec<DeliveryTier> {
        vec![
            DeliveryTier {
                name: "Tomorrow".to_string(),
                days_to_deliver: 1,
                shipping_price: dec("12.9"),
                free_shipping_min_price: dec("0"),
            },
            DeliveryTier {
                name: "Next 3 Days".to_string(),
                days_to_deliver: 3,
                shipping_price: dec("6.9"),
                free_shipping_min_price: dec("0"),
            },
            DeliveryTier {
                name: "Next 5 Days".to_string(),
                days_to_deliver: 5,
                shipping_price: dec("4.9"),
                free_shipping_min_price: dec("35"),
            },
        ]
    }

    #[test]
    fn items_price_sums_price_times_quantity() {
        let quote = price_cart(&[item("10.00", 2), item("3.25", 3)], None, None, &tiers());
        assert_eq!(quote.items_price, dec("29.75"));
    }

    #[test]
    fn no_address_means_no_shipping_or_tax() {
        let quote = price_cart(&[item("10.00", 2)], None, None, &tiers());
        assert_eq!(quote.items_price, dec("20.00"));
        assert_eq!(quote.shipping_price, None);
        assert_eq!(quote.tax_price, None);
        assert_eq!(quote.total_price, dec("20.00"));
    }

    #[test]
    fn default_index_is_last_tier() {
        let quote = price_cart(&[item("10.00", 1)], Some(&address()), None, &tiers());
        assert_eq!(quote.delivery_date_index, 2);
        // 10 < 35 threshold, so the last tier's price applies.
        assert_eq!(quote.shipping_price, Some(dec("4.9")));
    }

    #[test]
    fn free_shipping_threshold_reached() {
        let quote = price_cart(&[item("100.00", 1)], Some(&address()), Some(2), &tiers());
        assert_eq!(quote.shipping_price, Some(dec("0")));
        assert_eq!(quote.tax_price, Some(dec("15.00")));
        assert_eq!(quote.total_price, dec("115.00"));
    }

    #[test]
    fn zero_threshold_never_grants_free_shipping() {
        let quote = price_cart(&[item("500.00", 1)], Some(&address()), Some(0), &tiers());
        assert_eq!(quote.shipping_price, Some(dec("12.9")));
    }

    #[test]
    fn tax_is_fifteen_percent_of_items_price() {
        let quote = price_cart(&[item("19.99", 1)], Some(&address()), Some(1), &tiers());
        // 19.99 * 0.15 = 2.9985 -> 3.00 half-up
        assert_eq!(quote.tax_price, Some(dec("3.00")));
    }

    #[test]
    fn out_of_range_index_leaves_shipping_unknown_but_taxes_apply() {
        let quote = price_cart(&[item("10.00", 1)], Some(&address()), Some(99), &tiers());
        assert_eq!(quote.delivery_date_index, 99);
        assert_eq!(quote.shipping_price, None);
        assert_eq!(quote.tax_price, Some(dec("1.50")));
        assert_eq!(quote.total_price, dec("11.50"));
    }

    #[test]
    fn empty_tier_table_prices_items_only() {
        let quote = price_cart(&[item("10.00", 1)], Some(&address()), None, &[]);
        assert_eq!(quote.delivery_date_index, 0);
        assert_eq!(quote.shipping_price, None);
    }

    #[test]
    fn round2_is_idempotent() {
        for s in ["1.005", "2.675", "0.1", "100", "-3.456"] {
            let once = round2(&dec(s));
            assert_eq!(round2(&once), once, "round2(round2({s}))");
        }
    }

    #[test]
    fn each_subtotal_rounds_before_summation() {
        let quote = price_cart(&[item("33.333", 1)], Some(&address()), Some(1), &tiers());
        // items: 33.333 -> 33.33; tax: 33.33 * 0.15 = 4.9995 -> 5.00
        assert_eq!(quote.items_price, dec("33.33"));
        assert_eq!(quote.tax_price, Some(dec("5.00")));
        assert_eq!(quote.total_price, dec("45.23"));
    }
}
