//! # coursedesk
//!
//! Terminal admin client for the courses platform backend.
//!
//! ## Features
//! - Login / registration against the platform API, token kept across runs
//! - Course list with status filter and pagination
//! - Create, delete, publish and unpublish courses
//! - Bulk course import from an `.xlsx` spreadsheet
//! - Per-course lesson manager with server-side reordering
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine over one live screen)
//! - Network Layer (Tokio runtime, one task per API call)
//!
//! A 401 from any authenticated call tears the session down and the app
//! falls back to the login screen.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod screens;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::{ApiError, ConfigError, ErrorKind};
pub use messages::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Course, CourseStatus, Lesson, Page, StatusFilter};
pub use network::{ApiClient, NetworkActor};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionEvent, TokenStore};
