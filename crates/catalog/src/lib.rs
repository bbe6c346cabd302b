//! Product catalog domain for the shopdesk admin console.
//!
//! Deterministic domain logic only (no IO, no UI): variant editing, the
//! combination engine behind the "add product" wizard, duplicate SKU
//! detection, pricing input, and the category board.

pub mod category;
pub mod combination;
pub mod payload;
pub mod pricing;
pub mod sku;
pub mod variant;
pub mod wizard;

pub use category::{Category, CategoryBoard, ProductSummary};
pub use combination::{
    cartesian_product, combination_keys, generate_combinations, reconcile_combinations,
    update_quantity, CombinationKey, CombinationMap, CombinationRecord, OrphanPolicy,
    KEY_SEPARATOR,
};
pub use payload::{
    letter_label, CombinationPayload, LetteredCombinations, ProductPayload, ProductSubmission,
};
pub use pricing::{sanitize_digits, Discount, DiscountMethod, Pricing};
pub use sku::detect_duplicate_skus;
pub use variant::{Variant, VariantList};
pub use wizard::{ProductDraft, WizardConfig, WizardSession, WizardStep};
