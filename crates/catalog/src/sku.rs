//! Duplicate SKU detection across combination rows.

use std::collections::{HashMap, HashSet};

use crate::combination::CombinationKey;

/// Keys whose SKU is shared with at least one other key.
///
/// SKUs are compared exactly after trimming (no case folding). Blank SKUs are
/// "not set" and never count as duplicates. The result is a soft warning for
/// the caller to flag per row.
pub fn detect_duplicate_skus<'a, I, S>(sku_by_key: I) -> HashSet<CombinationKey>
where
    I: IntoIterator<Item = (&'a CombinationKey, S)>,
    S: AsRef<str>,
{
    let mut groups: HashMap<String, Vec<&'a CombinationKey>> = HashMap::new();

    for (key, sku) in sku_by_key {
        let trimmed = sku.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        groups.entry(trimmed.to_string()).or_default().push(key);
    }

    groups
        .into_values()
        .filter(|keys| keys.len() > 1)
        .flatten()
        .cloned()
        .collect()
}
