// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Known media shape tokens.
//!
//! A shape names an encoding/container profile the backend can produce for
//! an asset (`mp4`, `h264`, `pcm-discrete-audio`, ...). Preferred-shape
//! sequences in the settings rank these tokens, so every entry has to be a
//! token the vocabulary knows about for its media kind.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Built-in video shapes.
pub const VIDEO_SHAPES: &[&str] = &[
    "mp4",
    "mp4-6track",
    "mp4-lowres",
    "lowres",
    "original",
    "h264",
    "h264-timecode",
    "h265",
    "AV1",
];

/// Built-in audio shapes.
///
/// `acc-discrete-audio` is the spelling the shipped ingest template uses and
/// is accepted alongside `aac-discrete-audio`.
pub const AUDIO_SHAPES: &[&str] = &[
    "aac-discrete-audio",
    "acc-discrete-audio",
    "pcm-discrete-audio",
    "mp3-discrete-audio",
    "mp4-6track",
    "mp4-8track",
    "original",
];

/// Built-in subtitle shapes.
pub const SUBTITLE_SHAPES: &[&str] = &["original", "vtt", "srt"];

/// Media type a shape sequence ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Subtitle,
}

impl MediaKind {
    /// Get the string representation of the media kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Subtitle => "subtitle",
        }
    }

    /// Get all media kinds.
    pub fn all() -> &'static [MediaKind] {
        &[MediaKind::Video, MediaKind::Audio, MediaKind::Subtitle]
    }

    /// Built-in tokens for this kind.
    pub fn builtin_shapes(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => VIDEO_SHAPES,
            MediaKind::Audio => AUDIO_SHAPES,
            MediaKind::Subtitle => SUBTITLE_SHAPES,
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            "subtitle" | "subtitles" => Ok(MediaKind::Subtitle),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of shape tokens accepted per media kind.
///
/// Starts from the built-in lists; deployments with custom transcode
/// profiles can register extra tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeVocabulary {
    known: BTreeMap<MediaKind, BTreeSet<String>>,
}

impl Default for ShapeVocabulary {
    fn default() -> Self {
        let known = MediaKind::all()
            .iter()
            .map(|kind| {
                let tokens = kind
                    .builtin_shapes()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                (*kind, tokens)
            })
            .collect();
        Self { known }
    }
}

impl ShapeVocabulary {
    /// Create the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra token for a media kind.
    pub fn with_shape(mut self, kind: MediaKind, token: impl Into<String>) -> Self {
        self.known.entry(kind).or_default().insert(token.into());
        self
    }

    /// Check whether a token is known for a media kind. Case-sensitive.
    pub fn contains(&self, kind: MediaKind, token: &str) -> bool {
        self.known
            .get(&kind)
            .is_some_and(|tokens| tokens.contains(token))
    }

    /// Known tokens for a media kind, sorted.
    pub fn shapes(&self, kind: MediaKind) -> Vec<&str> {
        self.known
            .get(&kind)
            .map(|tokens| tokens.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let vocab = ShapeVocabulary::new();
        assert!(vocab.contains(MediaKind::Video, "AV1"));
        assert!(vocab.contains(MediaKind::Audio, "pcm-discrete-audio"));
        assert!(vocab.contains(MediaKind::Subtitle, "original"));
        assert!(!vocab.contains(MediaKind::Audio, "flac"));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let vocab = ShapeVocabulary::new();
        assert!(!vocab.contains(MediaKind::Video, "av1"));
        assert!(!vocab.contains(MediaKind::Video, "MP4"));
    }

    #[test]
    fn test_vocabulary_is_per_kind() {
        let vocab = ShapeVocabulary::new();
        assert!(vocab.contains(MediaKind::Video, "h264"));
        assert!(!vocab.contains(MediaKind::Audio, "h264"));
        assert!(!vocab.contains(MediaKind::Subtitle, "mp4"));
    }

    #[test]
    fn test_with_shape_extends_one_kind() {
        let vocab = ShapeVocabulary::new().with_shape(MediaKind::Audio, "flac");
        assert!(vocab.contains(MediaKind::Audio, "flac"));
        assert!(!vocab.contains(MediaKind::Video, "flac"));
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("VIDEO".parse::<MediaKind>(), Ok(MediaKind::Video));
        assert_eq!("subtitles".parse::<MediaKind>(), Ok(MediaKind::Subtitle));
        assert!("image".parse::<MediaKind>().is_err());
    }
}
