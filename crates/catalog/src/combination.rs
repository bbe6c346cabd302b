//! Combination engine: cartesian product of variant values and reconciliation
//! against previously entered per-combination data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shopdesk_core::{DomainError, DomainResult, ValueObject};

use crate::pricing::sanitize_digits;
use crate::sku::detect_duplicate_skus;
use crate::variant::Variant;

/// Separator used for the display form of a combination key.
pub const KEY_SEPARATOR: &str = "/";

/// Identity of one combination: one value per contributing variant, in
/// variant declaration order.
///
/// Identity is the tuple itself; `Red/S` is only the display form, so values
/// containing `/` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationKey(Vec<String>);

impl CombinationKey {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// The key produced by an empty variant list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.join(KEY_SEPARATOR))
    }
}

/// User-entered data for a single combination row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationRecord {
    pub key: CombinationKey,
    pub sku: String,
    /// Only meaningful while `in_stock` is true; the engine does not enforce it.
    pub quantity: Option<u64>,
    pub in_stock: bool,
}

impl ValueObject for CombinationRecord {}

impl CombinationRecord {
    pub fn blank(key: CombinationKey) -> Self {
        Self {
            key,
            sku: String::new(),
            quantity: None,
            in_stock: false,
        }
    }
}

/// What happens to records whose key the current variants no longer produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Drop them so the map holds exactly the current cartesian product.
    #[default]
    Prune,
    /// Leave them in place while they still have one value per contributing
    /// variant (additive regeneration).
    Retain,
}

impl OrphanPolicy {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prune" => Ok(OrphanPolicy::Prune),
            "retain" => Ok(OrphanPolicy::Retain),
            other => Err(DomainError::validation(format!(
                "unknown orphan policy '{other}' (expected 'prune' or 'retain')"
            ))),
        }
    }
}

/// Session-scoped store of combination records.
///
/// Rows keep insertion order for display; lookups go through a key index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinationMap {
    records: Vec<CombinationRecord>,
    index: HashMap<CombinationKey, usize>,
}

impl CombinationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &CombinationKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &CombinationKey) -> Option<&CombinationRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// Rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CombinationRecord> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CombinationKey> {
        self.records.iter().map(|r| &r.key)
    }

    /// Insert a record, replacing any existing record with the same key in place.
    pub fn insert(&mut self, record: CombinationRecord) {
        match self.index.get(&record.key) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn set_sku(&mut self, key: &CombinationKey, sku: impl Into<String>) -> DomainResult<()> {
        self.record_mut(key)?.sku = sku.into();
        Ok(())
    }

    pub fn toggle_in_stock(&mut self, key: &CombinationKey) -> DomainResult<bool> {
        let record = self.record_mut(key)?;
        record.in_stock = !record.in_stock;
        Ok(record.in_stock)
    }

    pub fn set_quantity(&mut self, key: &CombinationKey, raw: &str) -> DomainResult<Option<u64>> {
        let record = self.record_mut(key)?;
        *record = update_quantity(record, raw);
        Ok(record.quantity)
    }

    /// Current SKU per key, in display order.
    pub fn sku_by_key(&self) -> Vec<(&CombinationKey, &str)> {
        self.records
            .iter()
            .map(|r| (&r.key, r.sku.as_str()))
            .collect()
    }

    /// Keys whose trimmed SKU is shared with another row.
    pub fn duplicate_skus(&self) -> std::collections::HashSet<CombinationKey> {
        detect_duplicate_skus(self.sku_by_key())
    }

    fn record_mut(&mut self, key: &CombinationKey) -> DomainResult<&mut CombinationRecord> {
        match self.index.get(key) {
            Some(&i) => Ok(&mut self.records[i]),
            None => Err(DomainError::not_found(format!("combination '{key}'"))),
        }
    }
}

impl<'a> IntoIterator for &'a CombinationMap {
    type Item = &'a CombinationRecord;
    type IntoIter = std::slice::Iter<'a, CombinationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Cartesian product of `lists`, preserving list order as tuple field order.
///
/// An empty `lists` yields the single empty tuple; any empty list yields nothing.
pub fn cartesian_product<T: Clone>(lists: &[&[T]]) -> Vec<Vec<T>> {
    lists.iter().fold(vec![Vec::new()], |acc, list| {
        acc.iter()
            .flat_map(|prefix| {
                list.iter().map(move |item| {
                    let mut tuple = Vec::with_capacity(prefix.len() + 1);
                    tuple.extend_from_slice(prefix);
                    tuple.push(item.clone());
                    tuple
                })
            })
            .collect()
    })
}

/// Every key producible from the contributing variants, in product order.
///
/// Variants without values are skipped. With no contributing variants the
/// result is the single empty key.
pub fn combination_keys(variants: &[Variant]) -> Vec<CombinationKey> {
    let lists: Vec<&[String]> = variants
        .iter()
        .filter(|v| v.contributes())
        .map(|v| v.values.as_slice())
        .collect();

    cartesian_product(&lists)
        .into_iter()
        .map(CombinationKey)
        .collect()
}

/// Add a blank record for every newly producible key.
///
/// Existing records are never touched, including ones the variants no longer
/// produce. Rows come out in product order, followed by the unproducible ones.
pub fn generate_combinations(variants: &[Variant], existing: &CombinationMap) -> CombinationMap {
    merge(variants, existing, |_, _| true)
}

/// Like [`generate_combinations`], then applies `policy` to orphaned records.
///
/// `Retain` only keeps orphans with one value per contributing variant (those
/// left behind by a removed value). Rows from an earlier variant count are
/// dropped under either policy.
pub fn reconcile_combinations(
    variants: &[Variant],
    existing: &CombinationMap,
    policy: OrphanPolicy,
) -> CombinationMap {
    match policy {
        OrphanPolicy::Prune => merge(variants, existing, |_, _| false),
        OrphanPolicy::Retain => merge(variants, existing, |key, arity| key.values().len() == arity),
    }
}

/// Rebuild `existing` in product order, keeping orphans for which
/// `keep_orphan(key, arity)` holds.
fn merge(
    variants: &[Variant],
    existing: &CombinationMap,
    keep_orphan: impl Fn(&CombinationKey, usize) -> bool,
) -> CombinationMap {
    let arity = variants.iter().filter(|v| v.contributes()).count();
    let mut map = CombinationMap::new();
    let mut added = 0usize;

    for key in combination_keys(variants) {
        if map.contains(&key) {
            // duplicate values within a variant repeat keys
            continue;
        }
        match existing.get(&key) {
            Some(record) => map.insert(record.clone()),
            None => {
                map.insert(CombinationRecord::blank(key));
                added += 1;
            }
        }
    }

    let mut pruned = 0usize;
    for record in existing {
        if map.contains(&record.key) {
            continue;
        }
        if keep_orphan(&record.key, arity) {
            map.insert(record.clone());
        } else {
            pruned += 1;
        }
    }

    tracing::debug!(
        variants = variants.len(),
        combinations = map.len(),
        added,
        pruned,
        "combinations reconciled"
    );

    map
}

/// Apply raw quantity input to a record.
///
/// Non-digits are stripped; nothing left means no quantity. Values beyond
/// `u64::MAX` saturate.
pub fn update_quantity(record: &CombinationRecord, raw_input: &str) -> CombinationRecord {
    let digits = sanitize_digits(raw_input);
    let quantity = if digits.is_empty() {
        None
    } else {
        // all-digit input can only fail to parse on overflow
        Some(digits.parse::<u64>().unwrap_or(u64::MAX))
    };

    CombinationRecord {
        quantity,
        ..record.clone()
    }
}
