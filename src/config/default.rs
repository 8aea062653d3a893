// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Shipped settings templates.

use serde::{Deserialize, Serialize};

use super::schema::{Settings, WaveformStrategy};

/// Get the default settings (the frontend template).
pub fn default_settings() -> Settings {
    Settings::default()
}

/// Settings templates shipped with the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Full frontend template with event bus and QC feature flags.
    #[default]
    Frontend,
    /// Asset-bundle template; omits the event bus and QC keys.
    Assets,
}

impl Template {
    /// Get the string representation of the template.
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Frontend => "frontend",
            Template::Assets => "assets",
        }
    }

    /// Get all templates.
    pub fn all() -> &'static [Template] {
        &[Template::Frontend, Template::Assets]
    }

    /// The template as a settings value. Keys the template omits take the
    /// schema defaults.
    pub fn settings(&self) -> Settings {
        match self {
            Template::Frontend => Settings::default(),
            Template::Assets => {
                let mut settings = Settings::default();
                settings.license_key = "<licencense-key>".to_string();
                settings
                    .timeline
                    .waveforms
                    .strategies
                    .insert("analyze".to_string(), WaveformStrategy::with_url("/api/analyze/"));
                settings
            }
        }
    }

    /// The template as a JSON document.
    pub fn json(&self) -> &'static str {
        match self {
            Template::Frontend => FRONTEND_TEMPLATE,
            Template::Assets => ASSETS_TEMPLATE,
        }
    }
}

impl std::str::FromStr for Template {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frontend" => Ok(Template::Frontend),
            "assets" => Ok(Template::Assets),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const FRONTEND_TEMPLATE: &str = r#"{
  "backendUrl": "/api",
  "eventBusUrl": "/api/eventbus",
  "licenseKey": "AV_LICENSE_KEY",
  "endFrameInclusive": true,
  "showThemeSelect": false,
  "showAssetView": true,
  "preferredVideoShapes": ["mp4", "original"],
  "timeline": {
    "waveforms": {
      "active": "analyze",
      "analyze": {
        "url": "/api/analyze"
      }
    }
  },
  "qc": {
    "features": {
      "markers": false,
      "assetStatus": false
    }
  },
  "audioQc": {
    "preferredAudioShapes": ["aac-discrete-audio", "pcm-discrete-audio", "mp3-discrete-audio"],
    "preferredVideoShapes": ["h264", "h264-timecode", "h265", "original", "AV1"]
  },
  "ingest": {
    "preferredVideoShapes": [
      "mp4-6track",
      "mp4",
      "original",
      "mp4-lowres",
      "lowres",
      "h264",
      "h265",
      "h264-timecode",
      "AV1"
    ],
    "preferredAudioShapes": [
      "mp4-6track",
      "mp4-8track",
      "acc-discrete-audio",
      "mp3-discrete-audio",
      "pcm-discrete-audio"
    ],
    "preferredSubtitleShapes": ["original"]
  }
}
"#;

const ASSETS_TEMPLATE: &str = r#"{
  "backendUrl": "/api",
  "licenseKey": "<licencense-key>",
  "showThemeSelect": false,
  "showAssetView": true,
  "timeline": {
    "waveforms": {
      "active": "analyze",
      "analyze": {
        "url": "/api/analyze/"
      }
    }
  },
  "audioQc": {
    "preferredAudioShapes": ["aac-discrete-audio", "pcm-discrete-audio", "mp3-discrete-audio"],
    "preferredVideoShapes": ["h264", "h264-timecode", "h265", "original", "AV1"]
  },
  "ingest": {
    "preferredVideoShapes": [
      "mp4-6track",
      "mp4",
      "original",
      "mp4-lowres",
      "lowres",
      "h264",
      "h265",
      "h264-timecode",
      "AV1"
    ],
    "preferredAudioShapes": [
      "mp4-6track",
      "mp4-8track",
      "acc-discrete-audio",
      "mp3-discrete-audio",
      "pcm-discrete-audio"
    ],
    "preferredSubtitleShapes": ["original"]
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load;

    #[test]
    fn test_default_settings() {
        let settings = default_settings();
        assert_eq!(settings.backend_url, "/api");
        assert_eq!(settings, Template::Frontend.settings());
    }

    #[test]
    fn test_template_json_matches_settings() {
        for template in Template::all() {
            let parsed: Settings =
                serde_json::from_str(template.json()).expect("template should parse");
            assert_eq!(parsed, template.settings(), "template {}", template);
        }
    }

    #[test]
    fn test_templates_are_valid() {
        for template in Template::all() {
            assert!(load(template.settings(), []).is_ok(), "template {}", template);
        }
    }

    #[test]
    fn test_assets_template_differences() {
        let assets = Template::Assets.settings();
        assert_eq!(assets.license_key, "<licencense-key>");
        assert_eq!(assets.active_waveform().unwrap().url, "/api/analyze/");
        assert!(!Template::Assets.json().contains("eventBusUrl"));
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("Assets".parse::<Template>(), Ok(Template::Assets));
        assert!("legacy".parse::<Template>().is_err());
    }
}
