use serde::{Deserialize, Serialize};

use shopdesk_core::{DomainError, DomainResult, ValueObject};

/// A named axis of product differentiation (e.g. Color) with ordered values.
///
/// Values are kept in entry order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub values: Vec<String>,
}

impl ValueObject for Variant {}

impl Variant {
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this variant takes part in the cartesian product.
    pub fn contributes(&self) -> bool {
        !self.values.is_empty()
    }

    /// An option without a name is flagged in the form but never blocks it.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a trimmed value. Whitespace-only input is ignored (returns `false`).
    pub fn add_value(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    pub fn remove_value(&mut self, index: usize) -> DomainResult<String> {
        if index >= self.values.len() {
            return Err(DomainError::not_found(format!(
                "value #{index} of option '{}'",
                self.name
            )));
        }
        Ok(self.values.remove(index))
    }
}

/// Ordered list of variants as edited in the variants step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantList(Vec<Variant>);

impl VariantList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[Variant] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.0.iter()
    }

    /// Append a blank option (empty name, no values) and return its index.
    pub fn add_option(&mut self) -> usize {
        self.0.push(Variant::default());
        self.0.len() - 1
    }

    pub fn push(&mut self, variant: Variant) {
        self.0.push(variant);
    }

    pub fn remove_option(&mut self, index: usize) -> DomainResult<Variant> {
        if index >= self.0.len() {
            return Err(DomainError::not_found(format!("option #{index}")));
        }
        Ok(self.0.remove(index))
    }

    pub fn variant_mut(&mut self, index: usize) -> DomainResult<&mut Variant> {
        self.0
            .get_mut(index)
            .ok_or_else(|| DomainError::not_found(format!("option #{index}")))
    }

    /// True when at least one variant has values to combine.
    pub fn has_contributing(&self) -> bool {
        self.0.iter().any(Variant::contributes)
    }

    /// Indices of options whose name is still empty.
    pub fn unnamed_options(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_unnamed())
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<Variant>> for VariantList {
    fn from(value: Vec<Variant>) -> Self {
        Self(value)
    }
}

impl AsRef<[Variant]> for VariantList {
    fn as_ref(&self) -> &[Variant] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_value_trims_and_ignores_blank_input() {
        let mut color = Variant::new("Color", Vec::<String>::new());
        assert!(color.add_value("  Red "));
        assert!(!color.add_value("   "));
        assert!(!color.add_value(""));
        assert_eq!(color.values, vec!["Red"]);
    }

    #[test]
    fn duplicate_values_are_kept() {
        let mut size = Variant::new("Size", ["S"]);
        assert!(size.add_value("S"));
        assert_eq!(size.values, vec!["S", "S"]);
    }

    #[test]
    fn remove_value_rejects_out_of_range_index() {
        let mut size = Variant::new("Size", ["S", "M"]);
        assert_eq!(size.remove_value(0).unwrap(), "S");
        let err = size.remove_value(5).unwrap_err();
        match err {
            DomainError::NotFound(_) => {}
            _ => panic!("Expected NotFound error"),
        }
        assert_eq!(size.values, vec!["M"]);
    }

    #[test]
    fn blank_option_does_not_contribute_and_is_flagged() {
        let mut list = VariantList::new();
        let idx = list.add_option();
        assert_eq!(idx, 0);
        assert!(!list.has_contributing());
        assert_eq!(list.unnamed_options(), vec![0]);

        let v = list.variant_mut(0).unwrap();
        v.rename("Color");
        v.add_value("Red");
        assert!(list.has_contributing());
        assert!(list.unnamed_options().is_empty());
    }

    #[test]
    fn remove_option_shifts_following_options() {
        let mut list = VariantList::from(vec![
            Variant::new("Color", ["Red"]),
            Variant::new("Size", ["S"]),
        ]);
        let removed = list.remove_option(0).unwrap();
        assert_eq!(removed.name, "Color");
        assert_eq!(list.as_slice()[0].name, "Size");
        assert!(list.remove_option(3).is_err());
    }
}
