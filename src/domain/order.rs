use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Product;

/// Lifecycle status of an order. Only these three values can ever be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Created,
    Pending,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Created, Self::Pending, Self::Completed];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Exact match against the stored spelling; `"pending"` is not a status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("`{s}` is not a valid status (expected CREATED, PENDING or COMPLETED)"))
    }
}

/// Represents a customer order as stored. `products` holds bare product ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_email: String,
    pub products: Vec<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// An order as returned to callers, with each product id replaced by the
/// product record it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedOrder {
    pub id: String,
    pub buyer_email: String,
    pub products: Vec<Product>,
    pub status: OrderStatus,
}

impl PopulatedOrder {
    pub fn new(order: Order, products: Vec<Product>) -> Self {
        Self {
            id: order.id,
            buyer_email: order.buyer_email,
            products,
            status: order.status,
        }
    }
}
