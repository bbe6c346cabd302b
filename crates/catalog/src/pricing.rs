//! Price step: list price and discount, entered as free text.

use serde::{Deserialize, Serialize};

use shopdesk_core::ValueObject;

/// Strip every non-digit character.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Sanitize and parse; nothing left means zero. Overflow saturates.
fn parse_amount(raw: &str) -> u64 {
    let digits = sanitize_digits(raw);
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMethod {
    /// Percentage of the price.
    #[default]
    Pct,
    /// Flat amount in rupees.
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount {
    pub method: DiscountMethod,
    pub value: u64,
}

impl ValueObject for Discount {}

/// Price info collected by the last wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub price_inr: u64,
    pub discount: Discount,
}

impl ValueObject for Pricing {}

impl Pricing {
    pub fn set_price(&mut self, raw: &str) -> u64 {
        self.price_inr = parse_amount(raw);
        self.price_inr
    }

    pub fn set_discount_value(&mut self, raw: &str) -> u64 {
        self.discount.value = parse_amount(raw);
        self.discount.value
    }

    /// Switching the method keeps the entered value.
    pub fn set_discount_method(&mut self, method: DiscountMethod) {
        self.discount.method = method;
    }
}
