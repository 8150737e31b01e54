//! Data-access clients. Each wraps the [`CollectionClient`](crate::actor_framework::CollectionClient)
//! handle it is given, so no connection state lives anywhere else.

pub mod order_client;
pub mod product_client;

pub use order_client::*;
pub use product_client::*;
