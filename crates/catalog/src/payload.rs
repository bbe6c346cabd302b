//! Submission payload produced when the wizard finishes.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use shopdesk_core::ProductId;

use crate::combination::{CombinationMap, CombinationRecord};
use crate::pricing::Discount;
use crate::variant::Variant;

/// Row label used in the payload: `a`..`z`, then `aa`, `ab`, ...
pub fn letter_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index;
    loop {
        label.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    label.into_iter().map(char::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationPayload {
    /// Display form of the combination key (`Red/S`).
    pub name: String,
    pub sku: String,
    pub quantity: Option<u64>,
    pub in_stock: bool,
}

impl From<&CombinationRecord> for CombinationPayload {
    fn from(record: &CombinationRecord) -> Self {
        Self {
            name: record.key.to_string(),
            sku: record.sku.clone(),
            quantity: record.quantity,
            in_stock: record.in_stock,
        }
    }
}

/// Combination rows keyed by letter label, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetteredCombinations(Vec<CombinationPayload>);

impl LetteredCombinations {
    pub fn iter(&self) -> impl Iterator<Item = (String, &CombinationPayload)> {
        self.0.iter().enumerate().map(|(i, c)| (letter_label(i), c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&CombinationMap> for LetteredCombinations {
    fn from(map: &CombinationMap) -> Self {
        Self(map.iter().map(CombinationPayload::from).collect())
    }
}

impl Serialize for LetteredCombinations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, combination) in self.iter() {
            map.serialize_entry(&label, combination)?;
        }
        map.end()
    }
}

/// The `products` object of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub variants: Vec<Variant>,
    pub combinations: LetteredCombinations,
    pub price_inr: u64,
    pub discount: Discount,
}

#[derive(Serialize)]
struct Envelope<'a> {
    products: &'a ProductPayload,
}

/// A finished product, ready to hand to whatever stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSubmission {
    pub id: ProductId,
    pub submitted_at: DateTime<Utc>,
    pub product: ProductPayload,
}

impl ProductSubmission {
    /// `{ "products": { ... } }` with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Envelope {
            products: &self.product,
        })
    }
}
