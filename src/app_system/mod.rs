//! System orchestration, startup, and shutdown logic.

pub mod store_system;
pub mod telemetry;

pub use store_system::*;
pub use telemetry::*;
