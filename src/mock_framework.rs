//! # Mock Framework
//!
//! Utilities for testing data-access clients without a running collection actor.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_find_by_id`] or [`expect_insert`] to assert
//! what the client asked for and to script the reply.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{CollectionClient, CollectionRequest, Document, StoreError};

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends its requests to a channel the test controls, so store
/// replies (success, failure, missing records) can be simulated deterministically.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FindById request
pub async fn expect_find_by_id<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::FindById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindMany request
pub async fn expect_find_many<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(Vec<T::Id>, Reply<Vec<T>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::FindMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(Option<T::Id>, T::Draft, Reply<T>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Insert { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Replace request
pub async fn expect_replace<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Replace { document, respond_to }) => Some((document, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let lookup = tokio::spawn(async move { client.find_by_id("p1".to_string()).await });

        let (id, responder) = expect_find_by_id(&mut receiver)
            .await
            .expect("Expected FindById request");
        assert_eq!(id, "p1");
        responder.send(Ok(Some(Product::new("p1", "Desk", 120.0)))).unwrap();

        let result = lookup.await.unwrap().unwrap();
        assert_eq!(result.map(|p| p.name), Some("Desk".to_string()));
    }
}
