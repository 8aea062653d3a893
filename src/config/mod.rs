// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Settings module for av-settings.
//!
//! This module holds the settings schema, the override layers and their
//! merge policy, the shape vocabulary, and the loader that turns a base
//! plus overrides into validated, read-only settings.

pub mod default;
mod loader;
mod overlay;
mod schema;
mod shapes;
pub mod sources;

pub use default::{default_settings, Template};
pub use loader::{load, ConfigLoader, ResolvedSettings};
pub use overlay::{
    merge_layers, MergeLayer, PartialAudioQc, PartialIngest, PartialQc, PartialSettings,
    PartialTimeline, PartialWaveformStrategy, PartialWaveforms,
};
pub use schema::*;
pub use shapes::{MediaKind, ShapeVocabulary, AUDIO_SHAPES, SUBTITLE_SHAPES, VIDEO_SHAPES};
