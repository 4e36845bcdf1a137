//! # MyCircle 📷
//!
//! A terminal client for the MyCircle social feed.
//!
//! ## Overview
//!
//! MyCircle is a two-screen client: sign in, then browse a feed of
//! image posts you can like, comment on, delete, and share. All
//! business logic lives in the remote service; the client is a thin
//! request/response layer over it plus per-screen view state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Orchestrates all components and runs the main event loop   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │       UI        │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Users/Login   │ │ • Login form    │
//! │ • Theme         │ │ • Posts         │ │ • Feed + modals │
//! │ • Service URL   │ │ • Comments      │ │ • Handle input  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Media      │ │      Share      │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • base64 codec  │ │ • Host opener   │ │ • User          │
//! │ • Terminal      │ │ • Temp files    │ │ • Post          │
//! │   graphics      │ │                 │ │ • Comment       │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — REST client for the MyCircle service
//! - [`app`] — TUI application state and event loop
//! - [`auth`] — Login flow against the user collection
//! - [`config`] — Configuration management
//! - [`media`] — Image payload codec (file ↔ base64)
//! - [`models`] — Data models (User, Post, Comment)
//! - [`share`] — Share handoff to the host
//! - [`theme`] — Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use mycircle::app;
//!
//! fn main() -> anyhow::Result<()> {
//!     app::run()
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod demo;
pub mod images;
pub mod media;
pub mod models;
pub mod paths;
pub mod share;
pub mod theme;

// Re-export main types for convenience
pub use api::CircleClient;
pub use app::AppState;
pub use auth::LoginOutcome;
pub use config::Config;
pub use models::{Comment, Post, User};
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
   __  ___     _____         __
  /  |/  /_ __/ ___/__ _____/ /__
 / /|_/ / // / /__/ / __/ __/ -_)
/_/  /_/\_, /\___/_/_/  \__/\__/
       /___/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository URL
pub const REPO_URL: &str = "https://github.com/mycircle/mycircle-tui";
