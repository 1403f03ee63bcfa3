//! Network layer - HTTP request execution
//!
//! The Network actor receives request commands and sends back outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{HttpExecutor, Transport};
