use tracing::{debug, info, instrument};

use crate::actor_framework::{CollectionClient, StoreError};
use crate::domain::Product;
use crate::product_actor::{ListProducts, NewProduct, ProductChange, ProductError};

/// Data access for products.
#[derive(Clone, Debug)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl ProductClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, options: ListProducts) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let products = self
            .inner
            .find(options.filter(), options.offset, options.limit)
            .await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.find_by_id(id.to_string()).await?)
    }

    /// Batch lookup used when resolving order references. Ids with no
    /// matching product are left out of the result.
    #[instrument(skip(self))]
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        self.inner.find_many(ids.to_vec()).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, fields: NewProduct) -> Result<Product, ProductError> {
        let (id, draft) = fields.validate()?;
        let product = self.inner.insert(id, draft).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn edit(&self, id: &str, change: ProductChange) -> Result<Product, ProductError> {
        let mut product = self
            .inner
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        change.check()?;
        change.apply(&mut product);

        self.inner
            .replace(product)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Removing an unknown id is not an error. Orders referencing the
    /// product are left alone.
    #[instrument(skip(self))]
    pub async fn destroy(&self, id: &str) -> Result<(), ProductError> {
        let removed = self.inner.delete(id.to_string()).await?;
        debug!(removed, "Destroy finished");
        Ok(())
    }
}
