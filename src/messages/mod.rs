//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Network layers.

pub mod network;
pub mod render;
pub mod ui_events;

pub use network::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse, ScreenId};
pub use render::RenderState;
pub use ui_events::{key_to_ui_event, KeyContext, UiEvent, View};
