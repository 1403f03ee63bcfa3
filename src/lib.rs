//! # tinypost
//!
//! A small terminal HTTP request composer.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH
//! - Free-form header text and JSON request bodies
//! - Named environments with `{{variable}}` URL templating
//! - Raw / JSON / Headers response views
//! - Bounded request history with replay
//! - Save requests to a collection directory
//!
//! ## Architecture
//! The engine (`Session`) composes, executes and records requests. The
//! binary wraps it in actors connected by channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod classify;
pub mod composer;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod headers;
pub mod history;
pub mod messages;
pub mod models;
pub mod network;
pub mod session;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use classify::{classify, RenderableViews};
pub use composer::compose;
pub use config::Config;
pub use environment::{DirEnvironmentSource, EnvironmentSource, EnvironmentStore};
pub use error::ValidationError;
pub use headers::parse_headers;
pub use history::HistoryLog;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{
    Environment, Header, HeaderSet, HistoryEntry, HttpMethod, HttpSuccess, RequestDescriptor,
    RequestDraft, RequestSnapshot, ResponseOutcome,
};
pub use network::{HttpExecutor, NetworkActor, Transport};
pub use session::{PreparedSend, SendReport, Session};
pub use storage::CollectionStore;
