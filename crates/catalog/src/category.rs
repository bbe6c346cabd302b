//! Category board: the product listing grouped into category cards.

use serde::{Deserialize, Serialize};

use shopdesk_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

use crate::payload::ProductSubmission;
use crate::wizard::{WizardConfig, WizardSession};

/// What a category card shows for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub brand: String,
    pub image: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    products: Vec<ProductSummary>,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBoard {
    categories: Vec<Category>,
}

impl CategoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Add a category. Names are trimmed and must be unique ignoring case.
    pub fn add_category(&mut self, raw: &str) -> DomainResult<CategoryId> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        let lowered = name.to_lowercase();
        if self.categories.iter().any(|c| c.name.to_lowercase() == lowered) {
            return Err(DomainError::conflict(
                "Category name already exists. Please choose a unique name.",
            ));
        }

        let id = CategoryId::new();
        self.categories.push(Category {
            id,
            name: name.to_string(),
            products: Vec::new(),
        });
        tracing::info!(category_id = %id, name, "category added");
        Ok(id)
    }

    /// Start an "add product" session. Requires at least one category.
    pub fn open_wizard(&self, config: WizardConfig) -> DomainResult<WizardSession> {
        if self.categories.is_empty() {
            return Err(DomainError::validation(
                "Please add a category before adding a product.",
            ));
        }
        Ok(WizardSession::open(self.category_names(), config))
    }

    /// File a finished product under its category card.
    pub fn record_submission(&mut self, submission: &ProductSubmission) -> DomainResult<ProductId> {
        let product = &submission.product;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.name == product.category)
            .ok_or_else(|| DomainError::not_found(format!("category '{}'", product.category)))?;

        category.products.push(ProductSummary {
            id: submission.id,
            name: product.name.clone(),
            price: product.price_inr,
            brand: product.brand.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
        });
        Ok(submission.id)
    }
}
