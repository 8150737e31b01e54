//! # Storefront
//!
//! A small HTTP backend for products and orders.
//!
//! - **Collections** - each record type lives in a [`CollectionActor`](actor_framework::CollectionActor)
//!   that owns its data and optionally snapshots it to disk
//! - **Data access** - [`OrderClient`](clients::OrderClient) and [`ProductClient`](clients::ProductClient)
//!   validate input, query the collections, and resolve an order's product references on read
//! - **HTTP** - [`api::create_router`] maps routes onto the clients and errors onto status codes
//! - **System** - [`StoreSystem`](app_system::StoreSystem) starts and stops the collections

pub mod actor_framework;
pub mod api;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod order_actor;
pub mod product_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
