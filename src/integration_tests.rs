#[cfg(test)]
mod tests {
    use crate::actor_framework::StoreError;
    use crate::app_system::StoreSystem;
    use crate::clients::{OrderClient, ProductClient};
    use crate::config::StoreSettings;
    use crate::domain::{Order, OrderStatus, Product};
    use crate::mock_framework::{
        create_mock_client, expect_find_by_id, expect_find_many, expect_insert, expect_replace,
    };
    use crate::order_actor::{NewOrder, OrderChange, OrderError};
    use crate::product_actor::NewProduct;

    #[tokio::test]
    async fn test_order_lifecycle_end_to_end() {
        let system = StoreSystem::start(&StoreSettings::default()).await.unwrap();
        let p1 = system
            .product_client
            .create(NewProduct::new("Desk", 120.0).with_id("p1"))
            .await
            .unwrap();

        let created = system
            .order_client
            .create(NewOrder::new("a@b.com", ["p1"]).with_status("CREATED"))
            .await
            .unwrap();

        let fetched = system.order_client.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.buyer_email, "a@b.com");
        assert_eq!(fetched.status, OrderStatus::Created);
        assert_eq!(fetched.products, vec![p1]);

        system
            .order_client
            .edit(&created.id, OrderChange::status(OrderStatus::Completed))
            .await
            .unwrap();
        let fetched = system.order_client.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Completed);

        system.order_client.destroy(&created.id).await.unwrap();
        assert_eq!(system.order_client.get(&created.id).await.unwrap(), None);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        // 1. Setup Mocks
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let order_client = OrderClient::new(order_inner, ProductClient::new(product_inner));

        // 2. Execute Order Creation in background
        let order_task = tokio::spawn(async move {
            order_client
                .create(NewOrder::new("a@b.com", ["p1", "gone", "p1"]))
                .await
        });

        // 3. Verify Interactions

        // Expect Order Insert with a validated draft and no caller id
        let (id, draft, responder) = expect_insert(&mut order_rx).await.expect("Expected Order Insert");
        assert_eq!(id, None);
        assert_eq!(draft.buyer_email, "a@b.com");
        assert_eq!(draft.status, None);
        responder
            .send(Ok(Order {
                id: "order_1".to_string(),
                buyer_email: draft.buyer_email,
                products: draft.products,
                status: OrderStatus::Created,
            }))
            .unwrap();

        // Expect a single batch fetch for all references
        let (ids, responder) = expect_find_many(&mut product_rx).await.expect("Expected Product FindMany");
        assert_eq!(ids, ["p1", "gone", "p1"]);
        responder.send(Ok(vec![Product::new("p1", "Desk", 120.0)])).unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.id, "order_1");
        let ids: Vec<_> = order.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p1"]);
    }

    #[tokio::test]
    async fn test_edit_after_concurrent_delete_is_not_found() {
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let order_client = OrderClient::new(order_inner, ProductClient::new(product_inner));

        let edit_task = tokio::spawn(async move {
            order_client
                .edit("order_1", OrderChange::status(OrderStatus::Pending))
                .await
        });

        let (id, responder) = expect_find_by_id(&mut order_rx).await.expect("Expected Order FindById");
        assert_eq!(id, "order_1");
        responder
            .send(Ok(Some(Order {
                id: "order_1".to_string(),
                buyer_email: "a@b.com".to_string(),
                products: vec!["p1".to_string()],
                status: OrderStatus::Created,
            })))
            .unwrap();

        let (_, responder) = expect_find_many(&mut product_rx).await.expect("Expected Product FindMany");
        responder.send(Ok(vec![])).unwrap();

        // The record vanished between the fetch and the save
        let (document, responder) = expect_replace(&mut order_rx).await.expect("Expected Order Replace");
        assert_eq!(document.status, OrderStatus::Pending);
        responder.send(Ok(None)).unwrap();

        let result = edit_task.await.unwrap();
        assert_eq!(result, Err(OrderError::NotFound("order_1".to_string())));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (product_inner, _product_rx) = create_mock_client::<Product>(10);
        let order_client = OrderClient::new(order_inner, ProductClient::new(product_inner));

        let get_task = tokio::spawn(async move { order_client.get("order_1").await });

        let (_, responder) = expect_find_by_id(&mut order_rx).await.expect("Expected Order FindById");
        responder.send(Err(StoreError::Io("disk full".to_string()))).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result, Err(OrderError::Store(StoreError::Io("disk full".to_string()))));
    }
}
