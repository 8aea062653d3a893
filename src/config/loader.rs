// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Settings resolution.
//!
//! [`ConfigLoader::load`] merges override layers onto a base, normalizes
//! the preferred-shapes sequences and validates the result. It performs no
//! I/O; reading layers from files or the environment lives in
//! [`super::sources`].

use std::collections::HashSet;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{ShapeUnknownError, ValidationError};

use super::overlay::{merge_layers, PartialSettings};
use super::schema::Settings;
use super::shapes::ShapeVocabulary;

/// A fully resolved, read-only settings value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedSettings {
    inner: Settings,
}

impl ResolvedSettings {
    /// Borrow the resolved settings.
    pub fn settings(&self) -> &Settings {
        &self.inner
    }

    /// Give up the read-only wrapper, e.g. to use the value as a new base.
    pub fn into_inner(self) -> Settings {
        self.inner
    }
}

impl Deref for ResolvedSettings {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        &self.inner
    }
}

impl AsRef<Settings> for ResolvedSettings {
    fn as_ref(&self) -> &Settings {
        &self.inner
    }
}

/// Merges and validates settings layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    permissive: bool,
    vocabulary: ShapeVocabulary,
}

impl ConfigLoader {
    /// Create a strict loader with the built-in shape vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Downgrade unknown shape tokens to warnings. Off by default.
    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// Use a custom shape vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: ShapeVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Whether unknown shapes are only warned about.
    pub fn is_permissive(&self) -> bool {
        self.permissive
    }

    /// The vocabulary shape tokens are checked against.
    pub fn vocabulary(&self) -> &ShapeVocabulary {
        &self.vocabulary
    }

    /// Apply `overrides` in order on top of `base` and validate the result.
    pub fn load<I>(&self, base: Settings, overrides: I) -> Result<ResolvedSettings, ValidationError>
    where
        I: IntoIterator<Item = PartialSettings>,
    {
        let mut merged = merge_layers(base, overrides);
        dedup_shape_sequences(&mut merged);
        self.validate(&merged)?;
        Ok(ResolvedSettings { inner: merged })
    }

    /// Check a settings value without merging anything.
    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        if settings.backend_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired {
                key: "backendUrl".to_string(),
            });
        }

        self.validate_waveforms(settings)?;
        self.validate_shapes(settings)?;
        Ok(())
    }

    fn validate_waveforms(&self, settings: &Settings) -> Result<(), ValidationError> {
        let waveforms = &settings.timeline.waveforms;

        let Some(active) = waveforms.active_strategy() else {
            return Err(ValidationError::DanglingWaveform {
                active: waveforms.active.clone(),
                available: waveforms.strategy_names(),
            });
        };

        if active.url.trim().is_empty() {
            return Err(ValidationError::EmptyWaveformUrl {
                strategy: waveforms.active.clone(),
            });
        }

        // Every configured strategy needs a url, not only the active one.
        if let Some((name, _)) = waveforms
            .strategies
            .iter()
            .find(|(_, strategy)| strategy.url.trim().is_empty())
        {
            return Err(ValidationError::EmptyWaveformUrl {
                strategy: name.clone(),
            });
        }

        Ok(())
    }

    fn validate_shapes(&self, settings: &Settings) -> Result<(), ValidationError> {
        for sequence in settings.shape_sequences() {
            for token in sequence.shapes {
                if self.vocabulary.contains(sequence.kind, token) {
                    continue;
                }

                let err = ShapeUnknownError {
                    field: sequence.field.to_string(),
                    token: token.clone(),
                    kind: sequence.kind,
                };
                if !self.permissive {
                    return Err(err.into());
                }
                tracing::warn!("{} (kept, permissive mode)", err);
            }
        }
        Ok(())
    }
}

/// Resolve settings with a strict, default-vocabulary loader.
pub fn load<I>(base: Settings, overrides: I) -> Result<ResolvedSettings, ValidationError>
where
    I: IntoIterator<Item = PartialSettings>,
{
    ConfigLoader::new().load(base, overrides)
}

/// Drop repeated tokens, keeping the first (highest priority) occurrence.
fn dedup_shape_sequences(settings: &mut Settings) {
    for (field, shapes) in settings.shape_sequences_mut() {
        let mut seen = HashSet::new();
        shapes.retain(|token| {
            let first = seen.insert(token.clone());
            if !first {
                tracing::warn!("Dropping duplicate shape '{}' from {}", token, field);
            }
            first
        });
    }
}
