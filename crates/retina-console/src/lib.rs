//! Retina admin console
//!
//! Server-rendered web console for platform operators: system analytics with a
//! risk distribution breakdown, and a filterable audit log browser with export.
//! All data comes from the platform admin API; the console keeps only sessions.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod components;
pub mod error;
pub mod export;
pub mod extractors;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod view_state;

// Re-export the main functions
pub use error::{ConsoleError, ConsoleResult};
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
