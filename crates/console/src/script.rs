//! JSON description of one "add product" session, replayed step by step.

use anyhow::Context;
use serde::Deserialize;

use shopdesk_catalog::{
    CategoryBoard, CombinationKey, DiscountMethod, ProductSubmission, Variant, WizardConfig,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScript {
    pub categories: Vec<String>,
    pub product: ProductScript,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductScript {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub variants: Vec<Variant>,
    pub combinations: Vec<CombinationScript>,
    /// Raw price text, sanitized like form input.
    pub price: String,
    pub discount: Option<DiscountScript>,
}

/// Edits to one combination row, addressed by its value tuple.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationScript {
    pub key: Vec<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountScript {
    pub method: DiscountMethod,
    pub value: String,
}

impl SessionScript {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("session script is not valid JSON")
    }

    /// Drive the board and a wizard session through every step.
    pub fn replay(
        &self,
        board: &mut CategoryBoard,
        config: WizardConfig,
    ) -> anyhow::Result<ProductSubmission> {
        for name in &self.categories {
            board
                .add_category(name)
                .with_context(|| format!("adding category '{name}'"))?;
        }

        let p = &self.product;
        let mut session = board.open_wizard(config)?;

        session.set_name(p.name.as_str());
        session
            .select_category(&p.category)
            .context("description step")?;
        session.set_brand(p.brand.as_str());
        session.set_image(p.image.as_str());
        session.next()?;

        for variant in &p.variants {
            let idx = session.add_option();
            session.rename_option(idx, &variant.name)?;
            for value in &variant.values {
                if !session.add_value(idx, value)? {
                    tracing::warn!(option = %variant.name, "ignoring blank variant value");
                }
            }
        }
        session.next()?;

        for edit in &p.combinations {
            let key = CombinationKey::new(edit.key.iter().cloned());
            if let Some(sku) = &edit.sku {
                session
                    .set_sku(&key, sku.as_str())
                    .with_context(|| format!("combination '{key}'"))?;
            }
            if edit.in_stock {
                session.toggle_in_stock(&key)?;
            }
            if let Some(quantity) = &edit.quantity {
                session.set_quantity(&key, quantity)?;
            }
        }
        for key in session.duplicate_skus() {
            tracing::warn!(combination = %key, "duplicate SKU");
        }
        session.next()?;

        let pricing = session.pricing_mut();
        pricing.set_price(&p.price);
        if let Some(discount) = &p.discount {
            pricing.set_discount_method(discount.method);
            pricing.set_discount_value(&discount.value);
        }

        let submission = session.finish()?;
        if submission.product.combinations.is_empty() {
            tracing::warn!(product = %submission.product.name, "submitted without combinations");
        }
        board.record_submission(&submission)?;
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "categories": ["Shirts"],
        "product": {
            "name": "Tee",
            "category": "Shirts",
            "variants": [
                { "name": "Color", "values": ["Red", "Blue"] },
                { "name": "Size", "values": ["S"] }
            ],
            "combinations": [
                { "key": ["Red", "S"], "sku": "T-R", "inStock": true, "quantity": "3" },
                { "key": ["Blue", "S"], "sku": "T-R" }
            ],
            "price": "499",
            "discount": { "method": "flat", "value": "50" }
        }
    }"#;

    #[test]
    fn replay_produces_submission() {
        let script = SessionScript::parse(SCRIPT).unwrap();
        let mut board = CategoryBoard::new();
        let submission = script.replay(&mut board, WizardConfig::default()).unwrap();

        assert_eq!(submission.product.combinations.len(), 2);
        assert_eq!(submission.product.price_inr, 499);
        assert_eq!(submission.product.discount.method, DiscountMethod::Flat);
        assert_eq!(board.categories()[0].products().len(), 1);
    }

    #[test]
    fn unknown_combination_is_reported() {
        let raw = SCRIPT.replace(r#"["Blue", "S"]"#, r#"["Green", "S"]"#);
        let script = SessionScript::parse(&raw).unwrap();
        let err = script
            .replay(&mut CategoryBoard::new(), WizardConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("Green/S"));
    }

    #[test]
    fn product_without_variants_has_no_rows() {
        let raw = r#"{
            "categories": ["Mugs"],
            "product": { "name": "Plain Mug", "category": "Mugs", "price": "199" }
        }"#;
        let script = SessionScript::parse(raw).unwrap();
        let submission = script
            .replay(&mut CategoryBoard::new(), WizardConfig::default())
            .unwrap();
        assert!(submission.product.combinations.is_empty());
        assert_eq!(submission.product.price_inr, 199);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(SessionScript::parse("{").is_err());
    }
}
