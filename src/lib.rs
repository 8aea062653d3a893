// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! av-settings - Media Frontend Settings
//!
//! A typed schema and validating merge loader for the settings a media
//! frontend reads at startup.
//!
//! # Features
//!
//! - **Typed Schema**: backend URLs, UI flags, waveform strategies, QC feature
//!   flags and preferred shape orderings
//! - **Layered Overrides**: deep merge of any number of override layers, later
//!   layers winning
//! - **Validation**: dangling waveform references, empty required values and
//!   unknown shape tokens are rejected up front
//! - **Templates**: the shipped frontend and asset templates as typed values
//!
//! # Example
//!
//! ```
//! use av_settings::config::{load, PartialSettings, Settings};
//!
//! let layer = PartialSettings {
//!     backend_url: Some("/v2/api".to_string()),
//!     ..Default::default()
//! };
//!
//! let settings = load(Settings::default(), [layer]).unwrap();
//! assert_eq!(settings.backend_url, "/v2/api");
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::{load, ConfigLoader, PartialSettings, ResolvedSettings, Settings};
pub use error::{Result, SettingsError, ShapeUnknownError, ValidationError};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of av-settings.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }

}
