// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Override layers and the deep-merge policy.
//!
//! A [`PartialSettings`] mirrors [`Settings`] with every field optional.
//! Merging a layer replaces scalars and preferred-shapes sequences wholly
//! and walks nested objects key by key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::schema::{
    AudioQcConfig, IngestConfig, QcConfig, Settings, TimelineConfig, WaveformStrategy,
    WaveformsConfig,
};

/// An override layer applied on top of a base [`Settings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_bus_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_frame_inclusive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_theme_select: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_asset_view: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_video_shapes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<PartialTimeline>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qc: Option<PartialQc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_qc: Option<PartialAudioQc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingest: Option<PartialIngest>,
}

impl PartialSettings {
    /// Whether the layer changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PartialTimeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveforms: Option<PartialWaveforms>,
}

/// Waveform overrides: an optional new `active` plus per-strategy patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialWaveforms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,

    #[serde(flatten)]
    pub strategies: BTreeMap<String, PartialWaveformStrategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialWaveformStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PartialQc {
    pub features: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialAudioQc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_audio_shapes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_video_shapes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialIngest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_video_shapes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_audio_shapes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_subtitle_shapes: Option<Vec<String>>,
}

/// A settings section that can absorb an override layer.
pub trait MergeLayer<L> {
    /// Apply `layer` on top of `self`.
    fn merge_layer(&mut self, layer: L);
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn merge_section<S: MergeLayer<L>, L>(section: &mut S, layer: Option<L>) {
    if let Some(layer) = layer {
        section.merge_layer(layer);
    }
}

impl MergeLayer<PartialSettings> for Settings {
    fn merge_layer(&mut self, layer: PartialSettings) {
        replace(&mut self.backend_url, layer.backend_url);
        replace(&mut self.event_bus_url, layer.event_bus_url);
        replace(&mut self.license_key, layer.license_key);
        replace(&mut self.end_frame_inclusive, layer.end_frame_inclusive);
        replace(&mut self.show_theme_select, layer.show_theme_select);
        replace(&mut self.show_asset_view, layer.show_asset_view);
        replace(&mut self.preferred_video_shapes, layer.preferred_video_shapes);
        merge_section(&mut self.timeline, layer.timeline);
        merge_section(&mut self.qc, layer.qc);
        merge_section(&mut self.audio_qc, layer.audio_qc);
        merge_section(&mut self.ingest, layer.ingest);
    }
}

impl MergeLayer<PartialTimeline> for TimelineConfig {
    fn merge_layer(&mut self, layer: PartialTimeline) {
        merge_section(&mut self.waveforms, layer.waveforms);
    }
}

impl MergeLayer<PartialWaveforms> for WaveformsConfig {
    fn merge_layer(&mut self, layer: PartialWaveforms) {
        replace(&mut self.active, layer.active);
        for (name, patch) in layer.strategies {
            self.strategies.entry(name).or_default().merge_layer(patch);
        }
    }
}

impl MergeLayer<PartialWaveformStrategy> for WaveformStrategy {
    fn merge_layer(&mut self, layer: PartialWaveformStrategy) {
        replace(&mut self.url, layer.url);
        self.extra.extend(layer.extra);
    }
}

impl MergeLayer<PartialQc> for QcConfig {
    fn merge_layer(&mut self, layer: PartialQc) {
        self.features.extend(layer.features);
    }
}

impl MergeLayer<PartialAudioQc> for AudioQcConfig {
    fn merge_layer(&mut self, layer: PartialAudioQc) {
        replace(&mut self.preferred_audio_shapes, layer.preferred_audio_shapes);
        replace(&mut self.preferred_video_shapes, layer.preferred_video_shapes);
    }
}

impl MergeLayer<PartialIngest> for IngestConfig {
    fn merge_layer(&mut self, layer: PartialIngest) {
        replace(&mut self.preferred_video_shapes, layer.preferred_video_shapes);
        replace(&mut self.preferred_audio_shapes, layer.preferred_audio_shapes);
        replace(
            &mut self.preferred_subtitle_shapes,
            layer.preferred_subtitle_shapes,
        );
    }
}

/// Merge a sequence of layers onto `base`, later layers winning.
pub fn merge_layers<I>(base: Settings, layers: I) -> Settings
where
    I: IntoIterator<Item = PartialSettings>,
{
    let mut merged = base;
    for (index, layer) in layers.into_iter().enumerate() {
        tracing::debug!("Applying settings layer {}", index);
        merged.merge_layer(layer);
    }
    merged
}
