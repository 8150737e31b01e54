use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Order, OrderStatus, DEFAULT_LIMIT};

use super::entity::OrderFilter;
use super::error::OrderError;

/// Create request as received from a caller. Everything is optional here so
/// that a missing field becomes a validation error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated payload for a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub buyer_email: String,
    pub products: Vec<String>,
    pub status: Option<OrderStatus>,
}

impl NewOrder {
    pub fn new<I, S>(buyer_email: impl Into<String>, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            buyer_email: Some(buyer_email.into()),
            products: Some(products.into_iter().map(|p| Some(p.into())).collect()),
            status: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn from_json(value: Value) -> Result<Self, OrderError> {
        serde_json::from_value(value).map_err(|e| OrderError::Validation(e.to_string()))
    }

    /// Checks required fields and the status enumeration. Returns the caller's
    /// id (if any) and the draft to store.
    pub fn validate(self) -> Result<(Option<String>, OrderDraft), OrderError> {
        let buyer_email = match self.buyer_email {
            Some(email) => non_empty_email(email)?,
            None => return Err(OrderError::Validation("buyerEmail is required".to_string())),
        };

        let products = match self.products {
            Some(products) => products
                .into_iter()
                .enumerate()
                .map(|(i, product)| match product {
                    Some(id) if !id.is_empty() => Ok(id),
                    _ => Err(OrderError::Validation(format!("products[{i}] is required"))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => return Err(OrderError::Validation("products is required".to_string())),
        };
        at_least_one_product(&products)?;

        let status = self
            .status
            .map(|s| s.parse::<OrderStatus>().map_err(OrderError::Validation))
            .transpose()?;

        let id = self.id.filter(|id| !id.is_empty());

        Ok((
            id,
            OrderDraft {
                buyer_email,
                products,
                status,
            },
        ))
    }
}

/// Partial update. Only these three fields may change; `id` in particular is
/// rejected along with any other unknown key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderChange {
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl OrderChange {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Rejects unknown keys and mistyped values. Field values are checked
    /// later by [`check`](Self::check), once the target order is known to exist.
    pub fn from_json(value: Value) -> Result<Self, OrderError> {
        serde_json::from_value(value).map_err(|e| OrderError::Validation(e.to_string()))
    }

    /// Field values must satisfy the same rules as on create.
    pub fn check(&self) -> Result<(), OrderError> {
        if let Some(email) = &self.buyer_email {
            non_empty_email(email.clone())?;
        }
        if let Some(products) = &self.products {
            if let Some(i) = products.iter().position(String::is_empty) {
                return Err(OrderError::Validation(format!("products[{i}] is required")));
            }
            at_least_one_product(products)?;
        }
        Ok(())
    }

    /// Overwrites each provided field on `order`.
    pub fn apply(self, order: &mut Order) {
        if let Some(buyer_email) = self.buyer_email {
            order.buyer_email = buyer_email;
        }
        if let Some(products) = self.products {
            order.products = products;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
    }
}

/// Paging and filters for listing orders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOrders {
    pub offset: usize,
    pub limit: usize,
    pub product_id: Option<String>,
    pub status: Option<String>,
}

impl Default for ListOrders {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            product_id: None,
            status: None,
        }
    }
}

impl ListOrders {
    /// Empty query values count as "not supplied".
    pub fn filter(&self) -> OrderFilter {
        OrderFilter {
            product_id: self.product_id.clone().filter(|p| !p.is_empty()),
            status: self.status.clone().filter(|s| !s.is_empty()),
        }
    }
}

fn non_empty_email(email: String) -> Result<String, OrderError> {
    if email.trim().is_empty() {
        return Err(OrderError::Validation("buyerEmail is required".to_string()));
    }
    Ok(email)
}

fn at_least_one_product(products: &[String]) -> Result<(), OrderError> {
    if products.is_empty() {
        return Err(OrderError::Validation(
            "products must reference at least one product".to_string(),
        ));
    }
    Ok(())
}
