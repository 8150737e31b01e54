use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Product, DEFAULT_LIMIT};

use super::entity::ProductFilter;
use super::error::ProductError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validated payload for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tags: Vec<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json(value: Value) -> Result<Self, ProductError> {
        serde_json::from_value(value).map_err(|e| ProductError::Validation(e.to_string()))
    }

    pub fn validate(self) -> Result<(Option<String>, ProductDraft), ProductError> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ProductError::Validation("name is required".to_string()))?;
        let price = self.price.unwrap_or(0.0);
        check_price(price)?;

        Ok((
            self.id.filter(|id| !id.is_empty()),
            ProductDraft {
                name,
                description: self.description,
                price,
                tags: self.tags,
            },
        ))
    }
}

/// Partial update over the editable product fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductChange {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ProductChange {
    /// Rejects unknown keys and mistyped values. Field values are checked
    /// by [`check`](Self::check).
    pub fn from_json(value: Value) -> Result<Self, ProductError> {
        serde_json::from_value(value).map_err(|e| ProductError::Validation(e.to_string()))
    }

    /// Field values must satisfy the same rules as on create.
    pub fn check(&self) -> Result<(), ProductError> {
        if self.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductError::Validation("name is required".to_string()));
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(tags) = self.tags {
            product.tags = tags;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListProducts {
    pub offset: usize,
    pub limit: usize,
    pub tag: Option<String>,
}

impl Default for ListProducts {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            tag: None,
        }
    }
}

impl ListProducts {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            tag: self.tag.clone().filter(|tag| !tag.is_empty()),
        }
    }
}

fn check_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_product_requires_a_name() {
        let err = NewProduct::from_json(json!({ "price": 3.5 }))
            .and_then(NewProduct::validate)
            .unwrap_err();
        assert_eq!(err, ProductError::Validation("name is required".to_string()));
    }

    #[test]
    fn new_product_defaults_price_and_rejects_negative() {
        let (_, draft) = NewProduct::from_json(json!({ "name": "Lamp" }))
            .and_then(NewProduct::validate)
            .unwrap();
        assert_eq!(draft.price, 0.0);

        let err = NewProduct::new("Lamp", -1.0).validate().unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn change_rejects_id() {
        let err = ProductChange::from_json(json!({ "id": "p2" })).unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn change_checks_name_and_price() {
        let change = ProductChange::from_json(json!({ "name": "", "price": -5.0 })).unwrap();
        assert!(matches!(change.check(), Err(ProductError::Validation(_))));

        let change = ProductChange::from_json(json!({ "price": -5.0 })).unwrap();
        assert!(matches!(change.check(), Err(ProductError::Validation(_))));

        let change = ProductChange::from_json(json!({ "name": "Desk", "price": 0.0 })).unwrap();
        assert_eq!(change.check(), Ok(()));
    }
}
