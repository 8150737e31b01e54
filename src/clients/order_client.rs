use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::CollectionClient;
use crate::clients::ProductClient;
use crate::domain::{Order, PopulatedOrder, Product};
use crate::order_actor::{ListOrders, NewOrder, OrderChange, OrderError};

/// Data access for orders.
///
/// Holds the order collection handle plus a [`ProductClient`] used to
/// resolve product references on read. Reads that return a single order
/// replace its product ids with the full product records; `list` returns
/// stored orders as-is.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>, product_client: ProductClient) -> Self {
        Self {
            inner,
            product_client,
        }
    }

    /// Orders matching every supplied filter, ascending by id, with `offset`
    /// skipped and at most `limit` returned.
    #[instrument(skip(self))]
    pub async fn list(&self, options: ListOrders) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = self
            .inner
            .find(options.filter(), options.offset, options.limit)
            .await?;
        Ok(orders)
    }

    /// `Ok(None)` when no order has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<PopulatedOrder>, OrderError> {
        debug!("Sending request");
        match self.inner.find_by_id(id.to_string()).await? {
            Some(order) => Ok(Some(self.populate(order).await?)),
            None => {
                debug!("Order not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, fields: NewOrder) -> Result<PopulatedOrder, OrderError> {
        let (id, draft) = fields.validate()?;
        let order = self.inner.insert(id, draft).await?;
        info!(order_id = %order.id, "Order created");
        self.populate(order).await
    }

    /// Unlike [`get`](Self::get), a missing order is an error here.
    ///
    /// Products resolved while fetching are reused in the result unless the
    /// change replaced the product list.
    #[instrument(skip(self))]
    pub async fn edit(&self, id: &str, change: OrderChange) -> Result<PopulatedOrder, OrderError> {
        let Some(mut order) = self.inner.find_by_id(id.to_string()).await? else {
            warn!("Edit on missing order");
            return Err(OrderError::NotFound(id.to_string()));
        };
        change.check()?;
        let resolved = self.resolve(&order.products).await?;

        let products_changed = change.products.is_some();
        change.apply(&mut order);

        let order = self
            .inner
            .replace(order)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        info!(status = %order.status, "Order updated");

        let products = if products_changed {
            self.resolve(&order.products).await?
        } else {
            resolved
        };
        Ok(PopulatedOrder::new(order, products))
    }

    /// Removing an unknown id is not an error. Referenced products are untouched.
    #[instrument(skip(self))]
    pub async fn destroy(&self, id: &str) -> Result<(), OrderError> {
        let removed = self.inner.delete(id.to_string()).await?;
        debug!(removed, "Destroy finished");
        Ok(())
    }

    async fn populate(&self, order: Order) -> Result<PopulatedOrder, OrderError> {
        let products = self.resolve(&order.products).await?;
        Ok(PopulatedOrder::new(order, products))
    }

    /// One batch fetch, then reassembled in reference order. References to
    /// products that no longer exist are dropped from the result.
    async fn resolve(&self, ids: &[String]) -> Result<Vec<Product>, OrderError> {
        let found = self.product_client.get_many(ids).await?;
        let by_id: HashMap<&str, &Product> = found.iter().map(|p| (p.id.as_str(), p)).collect();

        let mut products = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.get(id.as_str()) {
                Some(product) => products.push((*product).clone()),
                None => warn!(product_id = %id, "Dropping unresolved product reference"),
            }
        }
        Ok(products)
    }
}
