//! How products are stored and what callers may send to create or change one.

mod dtos;
pub mod entity;
pub mod error;

pub use dtos::*;
pub use entity::*;
pub use error::*;
