//! # API Module
//!
//! HTTP endpoints served by the local axum server:
//!
//! - [`callback`] - OAuth 2.0 PKCE redirect target, exchanges the code for a
//!   token during `spotify-additions auth`
//! - [`health`] - status and version
//! - [`action`] - `POST /actions/{action}` runs `create_song_radio` or
//!   `favorite_song`, so a home-automation host can trigger them over HTTP
//!
//! ```rust,ignore
//! use axum::{Router, routing::{get, post}};
//! use spotify_additions::api::{action, health};
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .route("/actions/{action}", post(action));
//! ```

mod action;
mod callback;
mod health;

pub use action::{ActionState, action};
pub use callback::callback;
pub use health::health;
