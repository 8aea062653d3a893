// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Settings schema definitions.
//!
//! Defines the fully populated settings value handed to the frontend. Keys
//! serialize in camelCase to match the settings documents the frontend
//! reads at startup. Every field has a default, so a document only needs
//! the keys it wants to change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::shapes::MediaKind;

/// The root settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the backend API.
    pub backend_url: String,

    /// URL of the backend event bus.
    pub event_bus_url: String,

    /// License key for the frontend.
    pub license_key: String,

    /// Whether the end frame of a range is inclusive.
    pub end_frame_inclusive: bool,

    /// Whether the theme selector is shown.
    pub show_theme_select: bool,

    /// Whether the asset view is shown.
    pub show_asset_view: bool,

    /// Preferred video shapes for playback, most preferred first.
    pub preferred_video_shapes: Vec<String>,

    /// Timeline configuration.
    pub timeline: TimelineConfig,

    /// QC configuration.
    pub qc: QcConfig,

    /// Audio QC configuration.
    pub audio_qc: AudioQcConfig,

    /// Ingest configuration.
    pub ingest: IngestConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "/api".to_string(),
            event_bus_url: "/api/eventbus".to_string(),
            license_key: "AV_LICENSE_KEY".to_string(),
            end_frame_inclusive: true,
            show_theme_select: false,
            show_asset_view: true,
            preferred_video_shapes: shapes(&["mp4", "original"]),
            timeline: TimelineConfig::default(),
            qc: QcConfig::default(),
            audio_qc: AudioQcConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

/// A preferred-shapes sequence together with where it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSequence<'a> {
    /// Dotted path of the field, e.g. `ingest.preferredAudioShapes`.
    pub field: &'static str,
    /// Vocabulary the tokens belong to.
    pub kind: MediaKind,
    /// Tokens, most preferred first.
    pub shapes: &'a [String],
}

impl Settings {
    /// All preferred-shapes sequences, in document order.
    pub fn shape_sequences(&self) -> [ShapeSequence<'_>; 6] {
        [
            ShapeSequence {
                field: "preferredVideoShapes",
                kind: MediaKind::Video,
                shapes: &self.preferred_video_shapes,
            },
            ShapeSequence {
                field: "audioQc.preferredAudioShapes",
                kind: MediaKind::Audio,
                shapes: &self.audio_qc.preferred_audio_shapes,
            },
            ShapeSequence {
                field: "audioQc.preferredVideoShapes",
                kind: MediaKind::Video,
                shapes: &self.audio_qc.preferred_video_shapes,
            },
            ShapeSequence {
                field: "ingest.preferredVideoShapes",
                kind: MediaKind::Video,
                shapes: &self.ingest.preferred_video_shapes,
            },
            ShapeSequence {
                field: "ingest.preferredAudioShapes",
                kind: MediaKind::Audio,
                shapes: &self.ingest.preferred_audio_shapes,
            },
            ShapeSequence {
                field: "ingest.preferredSubtitleShapes",
                kind: MediaKind::Subtitle,
                shapes: &self.ingest.preferred_subtitle_shapes,
            },
        ]
    }

    /// Mutable access to every preferred-shapes sequence, keyed by field path.
    pub(crate) fn shape_sequences_mut(&mut self) -> [(&'static str, &mut Vec<String>); 6] {
        [
            ("preferredVideoShapes", &mut self.preferred_video_shapes),
            (
                "audioQc.preferredAudioShapes",
                &mut self.audio_qc.preferred_audio_shapes,
            ),
            (
                "audioQc.preferredVideoShapes",
                &mut self.audio_qc.preferred_video_shapes,
            ),
            (
                "ingest.preferredVideoShapes",
                &mut self.ingest.preferred_video_shapes,
            ),
            (
                "ingest.preferredAudioShapes",
                &mut self.ingest.preferred_audio_shapes,
            ),
            (
                "ingest.preferredSubtitleShapes",
                &mut self.ingest.preferred_subtitle_shapes,
            ),
        ]
    }

    /// The strategy named by `timeline.waveforms.active`, if configured.
    pub fn active_waveform(&self) -> Option<&WaveformStrategy> {
        self.timeline.waveforms.active_strategy()
    }
}

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineConfig {
    /// Waveform strategies for the timeline audio track.
    pub waveforms: WaveformsConfig,
}

/// Waveform strategies and the one currently selected.
///
/// Serialized as a single object: `active` next to one key per strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformsConfig {
    /// Name of the selected strategy.
    pub active: String,

    /// Configured strategies by name.
    #[serde(flatten)]
    pub strategies: BTreeMap<String, WaveformStrategy>,
}

impl Default for WaveformsConfig {
    fn default() -> Self {
        let mut strategies = BTreeMap::new();
        strategies.insert(
            "analyze".to_string(),
            WaveformStrategy::with_url("/api/analyze"),
        );
        Self {
            active: "analyze".to_string(),
            strategies,
        }
    }
}

impl WaveformsConfig {
    /// The strategy named by `active`, if configured.
    pub fn active_strategy(&self) -> Option<&WaveformStrategy> {
        self.strategies.get(&self.active)
    }

    /// Names of the configured strategies, sorted.
    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }
}

/// Configuration of a single waveform strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaveformStrategy {
    /// Endpoint that produces waveform data.
    pub url: String,

    /// Strategy-specific keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl WaveformStrategy {
    /// Create a strategy with only a url.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// QC configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QcConfig {
    /// Feature flags by feature name.
    pub features: BTreeMap<String, bool>,
}

impl Default for QcConfig {
    fn default() -> Self {
        let mut features = BTreeMap::new();
        features.insert("markers".to_string(), false);
        features.insert("assetStatus".to_string(), false);
        Self { features }
    }
}

impl QcConfig {
    /// Whether a QC feature is enabled. Unlisted features are disabled.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

/// Audio QC configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AudioQcConfig {
    /// Preferred audio shapes, most preferred first.
    pub preferred_audio_shapes: Vec<String>,

    /// Preferred video shapes, most preferred first.
    pub preferred_video_shapes: Vec<String>,
}

impl Default for AudioQcConfig {
    fn default() -> Self {
        Self {
            preferred_audio_shapes: shapes(&[
                "aac-discrete-audio",
                "pcm-discrete-audio",
                "mp3-discrete-audio",
            ]),
            preferred_video_shapes: shapes(&["h264", "h264-timecode", "h265", "original", "AV1"]),
        }
    }
}

/// Ingest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IngestConfig {
    /// Preferred video shapes, most preferred first.
    pub preferred_video_shapes: Vec<String>,

    /// Preferred audio shapes, most preferred first.
    pub preferred_audio_shapes: Vec<String>,

    /// Preferred subtitle shapes, most preferred first.
    pub preferred_subtitle_shapes: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            preferred_video_shapes: shapes(&[
                "mp4-6track",
                "mp4",
                "original",
                "mp4-lowres",
                "lowres",
                "h264",
                "h265",
                "h264-timecode",
                "AV1",
            ]),
            preferred_audio_shapes: shapes(&[
                "mp4-6track",
                "mp4-8track",
                "acc-discrete-audio",
                "mp3-discrete-audio",
                "pcm-discrete-audio",
            ]),
            preferred_subtitle_shapes: shapes(&["original"]),
        }
    }
}

fn shapes(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
