// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Reading settings layers from files and the environment.
//!
//! These helpers produce the already-parsed values that
//! [`super::ConfigLoader::load`] consumes.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result, SettingsError};

use super::overlay::{PartialSettings, PartialTimeline, PartialWaveforms};
use super::schema::Settings;

/// Settings file names to search for, in order of priority.
const SETTINGS_FILES: &[&str] = &[
    "av-settings.json",
    "av-settings.toml",
    ".av-settings.json",
    ".av-settings.toml",
];

/// Environment variable prefix for override values.
pub const ENV_PREFIX: &str = "AV_";

/// Document format of a settings layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(SettingsFormat::Json),
            "toml" => Ok(SettingsFormat::Toml),
            _ => Err(SettingsError::Config(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            })),
        }
    }
}

fn parse_document<T: DeserializeOwned>(content: &str, format: SettingsFormat) -> Result<T> {
    let parsed = match format {
        SettingsFormat::Json => serde_json::from_str(content)
            .map_err(|e| format!("Failed to parse JSON: {}", e)),
        SettingsFormat::Toml => {
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
        }
    };

    parsed.map_err(|message| SettingsError::Config(ConfigError::ParseError { message }))
}

/// Parse an override layer from a document.
pub fn parse_overrides(content: &str, format: SettingsFormat) -> Result<PartialSettings> {
    parse_document(content, format)
}

/// Parse a full base settings document. Missing keys take the defaults.
pub fn parse_settings(content: &str, format: SettingsFormat) -> Result<Settings> {
    parse_document(content, format)
}

fn read_document(path: &Path) -> Result<(String, SettingsFormat)> {
    tracing::debug!("Loading settings from: {:?}", path);

    if !path.exists() {
        return Err(SettingsError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let format = SettingsFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        SettingsError::Config(ConfigError::ParseError {
            message: format!("Failed to read settings file {}: {}", path.display(), e),
        })
    })?;

    Ok((content, format))
}

/// Load an override layer from a JSON or TOML file.
pub fn load_overrides_from(path: &Path) -> Result<PartialSettings> {
    let (content, format) = read_document(path)?;
    parse_overrides(&content, format)
}

/// Load a base settings value from a JSON or TOML file.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let (content, format) = read_document(path)?;
    parse_settings(&content, format)
}

/// Find a settings file in the current directory or its parents.
pub fn find_settings_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_settings_file_from(&current_dir)
}

/// Find a settings file starting from a specific directory.
pub fn find_settings_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in SETTINGS_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    // Fall back to the user config directory
    let config_dir = dirs::config_dir()?.join("av-settings");
    ["settings.json", "settings.toml"]
        .iter()
        .map(|name| config_dir.join(name))
        .find(|candidate| candidate.exists())
}

/// Build an override layer from the process environment.
pub fn env_overrides() -> Result<PartialSettings> {
    env_overrides_from(std::env::vars())
}

/// Build an override layer from `AV_*` variables.
///
/// Variables outside the known set are ignored.
pub fn env_overrides_from<I, K, V>(vars: I) -> Result<PartialSettings>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut layer = PartialSettings::default();

    for (key, value) in vars {
        let key = key.as_ref();
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let value: String = value.into();

        match name {
            "BACKEND_URL" => layer.backend_url = Some(value),
            "EVENT_BUS_URL" => layer.event_bus_url = Some(value),
            "LICENSE_KEY" => layer.license_key = Some(value),
            "END_FRAME_INCLUSIVE" => layer.end_frame_inclusive = Some(parse_bool(key, &value)?),
            "SHOW_THEME_SELECT" => layer.show_theme_select = Some(parse_bool(key, &value)?),
            "SHOW_ASSET_VIEW" => layer.show_asset_view = Some(parse_bool(key, &value)?),
            "WAVEFORM_ACTIVE" => {
                layer.timeline = Some(PartialTimeline {
                    waveforms: Some(PartialWaveforms {
                        active: Some(value),
                        ..Default::default()
                    }),
                })
            }
            _ => continue,
        }
        tracing::debug!("Applied environment override {}", key);
    }

    Ok(layer)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::Config(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", value),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_overrides() {
        let layer = parse_overrides(
            r#"{"backendUrl": "/v2/api", "qc": {"features": {"markers": true}}}"#,
            SettingsFormat::Json,
        )
        .unwrap();
        assert_eq!(layer.backend_url.as_deref(), Some("/v2/api"));
        assert_eq!(layer.qc.unwrap().features.get("markers"), Some(&true));
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
backendUrl = "/v2/api"
showThemeSelect = true

[ingest]
preferredAudioShapes = ["mp4-8track"]

[timeline.waveforms]
active = "peaks"

[timeline.waveforms.peaks]
url = "/peaks"
"#;
        let layer = parse_overrides(toml, SettingsFormat::Toml).unwrap();
        assert_eq!(layer.show_theme_select, Some(true));
        assert_eq!(
            layer.ingest.unwrap().preferred_audio_shapes,
            Some(vec!["mp4-8track".to_string()])
        );
        let waveforms = layer.timeline.unwrap().waveforms.unwrap();
        assert_eq!(waveforms.active.as_deref(), Some("peaks"));
        assert_eq!(waveforms.strategies["peaks"].url.as_deref(), Some("/peaks"));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse_overrides(r#"{"showThemeSelector": true}"#, SettingsFormat::Json)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(parse_overrides(r#"{"showAssetView": "yes"}"#, SettingsFormat::Json).is_err());
    }

    #[test]
    fn test_parse_settings_fills_defaults() {
        let settings = parse_settings(r#"{"licenseKey": "abc"}"#, SettingsFormat::Json).unwrap();
        assert_eq!(settings.license_key, "abc");
        assert_eq!(settings.backend_url, "/api");
    }

    #[test]
    fn test_parse_settings_rejects_typo() {
        let err = parse_settings(r#"{"backendURL": "/typo"}"#, SettingsFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_overrides_from(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_unsupported_extension() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "backendUrl: /api\n").expect("write");

        let err = load_overrides_from(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_settings_from_toml_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("base.TOML");
        fs::write(&path, "backendUrl = \"/base\"\n").expect("write");

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.backend_url, "/base");
    }

    #[test]
    fn test_find_settings_file_walks_up() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(tmp.path().join(".av-settings.toml"), "").expect("write");

        let found = find_settings_file_from(&nested).expect("should find settings file");
        assert_eq!(found, tmp.path().join(".av-settings.toml"));
    }

    #[test]
    fn test_find_settings_file_priority() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("av-settings.toml"), "").expect("write");
        fs::write(tmp.path().join("av-settings.json"), "{}").expect("write");

        let found = find_settings_file_from(tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join("av-settings.json"));
    }

    #[test]
    fn test_env_overrides() {
        let layer = env_overrides_from([
            ("AV_BACKEND_URL", "/env/api"),
            ("AV_SHOW_THEME_SELECT", "Yes"),
            ("AV_END_FRAME_INCLUSIVE", "0"),
            ("AV_WAVEFORM_ACTIVE", "peaks"),
            ("AV_UNRELATED", "ignored"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();

        assert_eq!(layer.backend_url.as_deref(), Some("/env/api"));
        assert_eq!(layer.show_theme_select, Some(true));
        assert_eq!(layer.end_frame_inclusive, Some(false));
        assert_eq!(
            layer.timeline.unwrap().waveforms.unwrap().active.as_deref(),
            Some("peaks")
        );
        assert!(layer.license_key.is_none());
    }

    #[test]
    fn test_env_overrides_invalid_bool() {
        let err = env_overrides_from([("AV_SHOW_ASSET_VIEW", "maybe")]).unwrap_err();
        match err {
            SettingsError::Config(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, "AV_SHOW_ASSET_VIEW")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_env_overrides_empty() {
        let layer = env_overrides_from(Vec::<(String, String)>::new()).unwrap();
        assert!(layer.is_empty());
    }
}
