//! Plain records shared by the collections, the data-access clients, and the HTTP layer.

pub mod order;
pub mod product;

pub use order::*;
pub use product::*;

/// Page size used by list calls when the caller does not give one.
pub const DEFAULT_LIMIT: usize = 25;
