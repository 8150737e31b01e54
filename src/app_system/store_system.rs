use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::{CollectionActor, CollectionClient, Document, StoreError};
use crate::clients::{OrderClient, ProductClient};
use crate::config::StoreSettings;
use crate::domain::{Order, Product};

/// Owns the running collection actors and the clients wired to them.
pub struct StoreSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the product and order collections, loading snapshots first
    /// when a data directory is configured.
    pub async fn start(settings: &StoreSettings) -> Result<Self, StoreError> {
        info!(data_dir = ?settings.data_dir, "Starting store system");

        let (product_actor, products) = open_collection::<Product>(settings).await?;
        let product_client = ProductClient::new(products);
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, orders) = open_collection::<Order>(settings).await?;
        let order_client = OrderClient::new(orders, product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        Ok(Self {
            order_client,
            product_client,
            handles: vec![product_handle, order_handle],
        })
    }

    /// Drops this system's clients and waits for the actors to drain.
    ///
    /// Actors stop once every clone of their client is gone, so any clones
    /// handed out (for example to the HTTP router) must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");
        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}

async fn open_collection<T>(
    settings: &StoreSettings,
) -> Result<(CollectionActor<T>, CollectionClient<T>), StoreError>
where
    T: Document<Id = String>,
{
    let (actor, client) = CollectionActor::<T>::new(settings.channel_capacity, new_id);
    let actor = match &settings.data_dir {
        Some(dir) => actor.with_data_dir(dir).await?,
        None => actor,
    };
    Ok((actor, client))
}

/// Opaque, collision-resistant ids. Not ordered by creation time.
fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_actor::NewOrder;
    use crate::product_actor::NewProduct;

    #[tokio::test]
    async fn test_start_generates_ids_and_shuts_down() {
        let system = StoreSystem::start(&StoreSettings::default()).await.unwrap();

        let product = system
            .product_client
            .create(NewProduct::new("Desk", 120.0))
            .await
            .unwrap();
        assert_eq!(product.id.len(), 32);

        let order = system
            .order_client
            .create(NewOrder::new("a@b.com", [product.id.clone()]))
            .await
            .unwrap();
        assert_ne!(order.id, product.id);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_data_dir_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StoreSettings {
            data_dir: Some(dir.path().to_path_buf()),
            ..StoreSettings::default()
        };

        let system = StoreSystem::start(&settings).await.unwrap();
        system
            .product_client
            .create(NewProduct::new("Desk", 120.0).with_id("p1"))
            .await
            .unwrap();
        let order = system
            .order_client
            .create(NewOrder::new("a@b.com", ["p1"]))
            .await
            .unwrap();
        system.shutdown().await.unwrap();

        let system = StoreSystem::start(&settings).await.unwrap();
        let reloaded = system.order_client.get(&order.id).await.unwrap().unwrap();
        assert_eq!(reloaded, order);
        system.shutdown().await.unwrap();
    }
}
