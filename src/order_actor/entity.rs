use crate::actor_framework::Document;
use crate::domain::{Order, OrderStatus};

use super::dtos::OrderDraft;

/// Which orders a list call should return. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// Orders whose `products` contain this id.
    pub product_id: Option<String>,
    /// Orders whose status is spelled exactly like this. A value outside the
    /// enumeration is allowed here and simply matches nothing.
    pub status: Option<String>,
}

impl Document for Order {
    type Id = String;
    type Draft = OrderDraft;
    type Filter = OrderFilter;

    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &String {
        &self.id
    }

    /// Builds the stored order. Drafts only come out of validation, so every
    /// field is already known to be acceptable.
    fn from_draft(id: String, draft: OrderDraft) -> Self {
        Self {
            id,
            buyer_email: draft.buyer_email,
            products: draft.products,
            status: draft.status.unwrap_or(OrderStatus::Created),
        }
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        let product_matches = filter
            .product_id
            .as_ref()
            .map_or(true, |product_id| self.products.contains(product_id));
        let status_matches = filter
            .status
            .as_deref()
            .map_or(true, |status| self.status.as_str() == status);
        product_matches && status_matches
    }
}
