//! Network layer - API client and the actor executing calls
//!
//! The Network actor receives API calls and sends back their outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ApiClient, RequestOptions};
