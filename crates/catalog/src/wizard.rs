//! "Add product" wizard session.
//!
//! The session is a plain value owned by whoever presents the wizard: create it
//! when the dialog opens, feed it edits, drop it on close. All operations run to
//! completion synchronously.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use shopdesk_core::{DomainError, DomainResult, Entity, ProductId, SessionId};

use crate::combination::{reconcile_combinations, CombinationKey, CombinationMap, OrphanPolicy};
use crate::payload::{LetteredCombinations, ProductPayload, ProductSubmission};
use crate::pricing::Pricing;
use crate::variant::VariantList;

/// Wizard steps, strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Description,
    Variants,
    Combinations,
    Price,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Description,
        WizardStep::Variants,
        WizardStep::Combinations,
        WizardStep::Price,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Description => "Description",
            WizardStep::Variants => "Variants",
            WizardStep::Combinations => "Combinations",
            WizardStep::Price => "Price info",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    pub orphan_policy: OrphanPolicy,
}

/// Everything the user has entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub variants: VariantList,
    pub combinations: CombinationMap,
    pub pricing: Pricing,
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    id: SessionId,
    config: WizardConfig,
    categories: Vec<String>,
    step: WizardStep,
    draft: ProductDraft,
}

impl Entity for WizardSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl WizardSession {
    /// Open a session offering `categories` for selection.
    pub fn open(categories: Vec<String>, config: WizardConfig) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, categories = categories.len(), "wizard opened");
        Self {
            id,
            config,
            categories,
            step: WizardStep::Description,
            draft: ProductDraft::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn config(&self) -> WizardConfig {
        self.config
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    // --- Description ---

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) {
        self.draft.brand = brand.into();
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.draft.image = image.into();
    }

    pub fn select_category(&mut self, category: &str) -> DomainResult<()> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(DomainError::not_found(format!("category '{category}'")));
        }
        self.draft.category = category.to_string();
        Ok(())
    }

    // --- Variants ---

    /// Apply an edit to the variant list, then reconcile the combinations.
    pub fn edit_variants<R>(&mut self, edit: impl FnOnce(&mut VariantList) -> R) -> R {
        let out = edit(&mut self.draft.variants);
        self.regenerate();
        out
    }

    pub fn add_option(&mut self) -> usize {
        self.edit_variants(VariantList::add_option)
    }

    pub fn remove_option(&mut self, index: usize) -> DomainResult<()> {
        self.edit_variants(|v| v.remove_option(index).map(|_| ()))
    }

    pub fn rename_option(&mut self, index: usize, name: &str) -> DomainResult<()> {
        self.edit_variants(|v| v.variant_mut(index).map(|variant| variant.rename(name)))
    }

    /// Returns `false` when the trimmed value is empty and nothing was added.
    pub fn add_value(&mut self, index: usize, raw: &str) -> DomainResult<bool> {
        self.edit_variants(|v| v.variant_mut(index).map(|variant| variant.add_value(raw)))
    }

    pub fn remove_value(&mut self, index: usize, value_index: usize) -> DomainResult<()> {
        self.edit_variants(|v| -> DomainResult<()> {
            v.variant_mut(index)?.remove_value(value_index)?;
            Ok(())
        })
    }

    fn regenerate(&mut self) {
        // no contributing variants means no rows, not one row keyed ""
        self.draft.combinations = if self.draft.variants.has_contributing() {
            reconcile_combinations(
                self.draft.variants.as_slice(),
                &self.draft.combinations,
                self.config.orphan_policy,
            )
        } else {
            CombinationMap::new()
        };
    }

    // --- Combinations ---

    pub fn set_sku(&mut self, key: &CombinationKey, sku: impl Into<String>) -> DomainResult<()> {
        self.draft.combinations.set_sku(key, sku)
    }

    pub fn toggle_in_stock(&mut self, key: &CombinationKey) -> DomainResult<bool> {
        self.draft.combinations.toggle_in_stock(key)
    }

    pub fn set_quantity(&mut self, key: &CombinationKey, raw: &str) -> DomainResult<Option<u64>> {
        self.draft.combinations.set_quantity(key, raw)
    }

    /// Rows to flag with "Duplicate SKU".
    pub fn duplicate_skus(&self) -> std::collections::HashSet<CombinationKey> {
        self.draft.combinations.duplicate_skus()
    }

    // --- Price ---

    pub fn pricing_mut(&mut self) -> &mut Pricing {
        &mut self.draft.pricing
    }

    // --- Navigation ---

    pub fn next(&mut self) -> DomainResult<WizardStep> {
        let next = self.step.next().ok_or_else(|| {
            DomainError::invariant("already on the last step; finish instead")
        })?;
        tracing::debug!(
            session_id = %self.id,
            from = self.step.label(),
            to = next.label(),
            "wizard advanced"
        );
        self.step = next;
        Ok(next)
    }

    pub fn can_finish(&self) -> bool {
        self.step.is_last()
    }

    /// Build the submission and reset the session.
    ///
    /// Duplicate SKUs are logged, not rejected.
    pub fn finish(&mut self) -> DomainResult<ProductSubmission> {
        if !self.can_finish() {
            return Err(DomainError::invariant(format!(
                "cannot finish from step '{}'",
                self.step.label()
            )));
        }

        let duplicates = self.duplicate_skus();
        if !duplicates.is_empty() {
            let mut rows: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
            rows.sort();
            tracing::warn!(session_id = %self.id, ?rows, "finishing with duplicate SKUs");
        }

        let draft = std::mem::take(&mut self.draft);
        self.step = WizardStep::Description;

        let submission = ProductSubmission {
            id: ProductId::new(),
            submitted_at: Utc::now(),
            product: ProductPayload {
                combinations: LetteredCombinations::from(&draft.combinations),
                price_inr: draft.pricing.price_inr,
                discount: draft.pricing.discount,
                variants: draft.variants.as_slice().to_vec(),
                name: draft.name,
                category: draft.category,
                brand: draft.brand,
                image: draft.image,
            },
        };

        tracing::info!(
            session_id = %self.id,
            product_id = %submission.id,
            name = %submission.product.name,
            category = %submission.product.category,
            combinations = submission.product.combinations.len(),
            "product submitted"
        );

        Ok(submission)
    }

    /// Discard everything entered and return to the first step.
    pub fn cancel(&mut self) {
        tracing::debug!(session_id = %self.id, step = self.step.label(), "wizard canceled");
        self.draft = ProductDraft::default();
        self.step = WizardStep::Description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DiscountMethod;

    fn session() -> WizardSession {
        WizardSession::open(
            vec!["Shirts".to_string(), "Shoes".to_string()],
            WizardConfig::default(),
        )
    }

    fn with_color_size(s: &mut WizardSession) {
        let color = s.add_option();
        s.rename_option(color, "Color").unwrap();
        s.add_value(color, "Red").unwrap();
        s.add_value(color, "Blue").unwrap();
        let size = s.add_option();
        s.rename_option(size, "Size").unwrap();
        s.add_value(size, "S").unwrap();
        s.add_value(size, "M").unwrap();
    }

    #[test]
    fn steps_are_strictly_linear() {
        let mut s = session();
        assert_eq!(s.step(), WizardStep::Description);
        assert!(!s.can_finish());
        assert_eq!(s.next().unwrap(), WizardStep::Variants);
        assert_eq!(s.next().unwrap(), WizardStep::Combinations);
        assert_eq!(s.next().unwrap(), WizardStep::Price);
        assert!(s.can_finish());

        let err = s.next().unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation on last step"),
        }
        assert_eq!(WizardStep::Price.label(), "Price info");
    }

    #[test]
    fn finish_is_rejected_before_last_step() {
        let mut s = session();
        s.set_name("Tee");
        let err = s.finish().unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation"),
        }
        assert_eq!(s.draft().name, "Tee");
    }

    #[test]
    fn select_category_must_be_offered() {
        let mut s = session();
        s.select_category("Shoes").unwrap();
        assert_eq!(s.draft().category, "Shoes");
        match s.select_category("Hats").unwrap_err() {
            DomainError::NotFound(_) => {}
            _ => panic!("Expected NotFound"),
        }
        assert_eq!(s.draft().category, "Shoes");
    }

    #[test]
    fn variant_edits_regenerate_combinations() {
        let mut s = session();
        let idx = s.add_option();
        assert!(s.draft().combinations.is_empty());

        s.add_value(idx, "Red").unwrap();
        assert_eq!(s.draft().combinations.len(), 1);

        assert!(!s.add_value(idx, "  ").unwrap());
        with_color_size(&mut s);
        // first option holds only "Red"; the other two give Red/Blue x S/M
        assert_eq!(s.draft().combinations.len(), 4);
    }

    #[test]
    fn removing_a_value_prunes_by_default() {
        let mut s = session();
        with_color_size(&mut s);
        let blue_m = CombinationKey::new(["Blue", "M"]);
        s.set_sku(&blue_m, "B-M").unwrap();

        s.remove_value(1, 1).unwrap();
        let keys: Vec<String> = s.draft().combinations.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Red/S", "Blue/S"]);
    }

    #[test]
    fn rows_follow_product_order_when_values_are_entered_one_by_one() {
        let mut s = session();
        with_color_size(&mut s);
        let keys: Vec<String> = s.draft().combinations.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Red/S", "Red/M", "Blue/S", "Blue/M"]);
    }

    #[test]
    fn retain_policy_keeps_orphans() {
        let mut s = WizardSession::open(
            vec!["Shirts".to_string()],
            WizardConfig {
                orphan_policy: OrphanPolicy::Retain,
            },
        );
        with_color_size(&mut s);
        // no single-value rows left over from before Size had values
        let keys: Vec<String> = s.draft().combinations.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Red/S", "Red/M", "Blue/S", "Blue/M"]);

        let red_m = CombinationKey::new(["Red", "M"]);
        s.set_sku(&red_m, "R-M").unwrap();
        s.remove_value(1, 1).unwrap();
        let keys: Vec<String> = s.draft().combinations.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Red/S", "Blue/S", "Red/M", "Blue/M"]);
        assert_eq!(s.draft().combinations.get(&red_m).unwrap().sku, "R-M");
    }

    #[test]
    fn removing_all_values_clears_combinations() {
        let mut s = session();
        let idx = s.add_option();
        s.add_value(idx, "Red").unwrap();
        s.remove_value(idx, 0).unwrap();
        assert!(s.draft().combinations.is_empty());
    }

    #[test]
    fn finish_builds_submission_and_resets() {
        let mut s = session();
        s.set_name("Tee");
        s.select_category("Shirts").unwrap();
        s.set_brand("Acme");
        with_color_size(&mut s);

        let red_s = CombinationKey::new(["Red", "S"]);
        let red_m = CombinationKey::new(["Red", "M"]);
        s.set_sku(&red_s, "DUP").unwrap();
        s.set_sku(&red_m, " DUP ").unwrap();
        assert_eq!(s.duplicate_skus().len(), 2);
        assert!(s.toggle_in_stock(&red_s).unwrap());
        assert_eq!(s.set_quantity(&red_s, "1x0").unwrap(), Some(10));

        s.pricing_mut().set_price("₹999");
        s.pricing_mut().set_discount_method(DiscountMethod::Flat);
        s.pricing_mut().set_discount_value("100");

        for _ in 0..3 {
            s.next().unwrap();
        }
        let submission = s.finish().unwrap();

        assert_eq!(submission.product.name, "Tee");
        assert_eq!(submission.product.category, "Shirts");
        assert_eq!(submission.product.combinations.len(), 4);
        assert_eq!(submission.product.price_inr, 999);
        assert_eq!(submission.product.discount.value, 100);

        let (label, first) = submission.product.combinations.iter().next().unwrap();
        assert_eq!(label, "a");
        assert_eq!(first.name, "Red/S");
        assert_eq!(first.quantity, Some(10));

        assert_eq!(s.step(), WizardStep::Description);
        assert_eq!(s.draft(), &ProductDraft::default());
    }

    #[test]
    fn cancel_discards_everything() {
        let mut s = session();
        s.set_name("Tee");
        with_color_size(&mut s);
        s.next().unwrap();
        s.cancel();
        assert_eq!(s.step(), WizardStep::Description);
        assert_eq!(s.draft(), &ProductDraft::default());
    }
}
