//! Spotify Additions Library
//!
//! Two convenience actions on top of the Spotify player: build a "song radio"
//! playlist seeded from the current track and start it, or add the current
//! track to the saved tracks. They can be run from the command line or
//! triggered over HTTP by a home-automation host.
//!
//! # Modules
//!
//! - `actions` - The song radio and favorite workflows and the action names
//! - `api` - HTTP endpoints for the local server (OAuth callback, actions)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token persistence and refresh
//! - `server` - Local HTTP servers
//! - `spotify` - Spotify Web API client and OAuth flow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotify_additions::{actions, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotify_additions::Res<()> {
//!     let client = SpotifyClient::from_cache().await?;
//!     let user = client.current_user().await?;
//!     actions::create_song_radio(&client, &user).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the application layers (CLI, server, auth flow). Calls against the
/// Web API return the more specific [`spotify::ApiError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the program cannot continue after; the process exits
/// with status 1 right after printing.
///
/// ```
/// error!("Failed to load token. Please run spotify-additions auth");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
