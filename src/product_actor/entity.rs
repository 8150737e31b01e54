use crate::actor_framework::Document;
use crate::domain::Product;

use super::dtos::ProductDraft;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Products carrying this tag.
    pub tag: Option<String>,
}

impl Document for Product {
    type Id = String;
    type Draft = ProductDraft;
    type Filter = ProductFilter;

    const COLLECTION: &'static str = "products";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_draft(id: String, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            tags: draft.tags,
        }
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        filter
            .tag
            .as_ref()
            .map_or(true, |tag| self.tags.contains(tag))
    }
}
