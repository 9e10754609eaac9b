//! Persistent application settings.
//!
//! Settings are stored as pretty-printed JSON at a fixed path. A missing or
//! malformed file falls back entirely to the built-in defaults; there is no
//! partial recovery of individual fields. The file is rewritten on every
//! mutation (currently only language changes).
//!
//! Older settings files stored the language as a two-letter code; those
//! migrate to the full name on load via serde aliases and are written back
//! as full names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixed path of the settings document.
pub const SETTINGS_FILE: &str = "organizer_settings.json";

/// UI language for translated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(alias = "en")]
    English,
    #[serde(alias = "hi")]
    Hindi,
    #[serde(alias = "te")]
    Telugu,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    /// Full language name as stored in the settings file.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Telugu => "Telugu",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The persisted settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// UI language.
    pub language: Language,
    /// Credential checked before every organize pass (exact match).
    pub password: String,
    /// Size-gate threshold in MiB.
    pub size_limit: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            password: "1234".to_string(),
            size_limit: 100,
        }
    }
}

impl Settings {
    /// Loads settings from the fixed path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Loads settings from `path`.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    /// Saves settings to the fixed path.
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    /// Saves settings to `path` as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let settings = Settings::load_from(&temp_dir.path().join("nope.json"));

        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.password, "1234");
        assert_eq!(settings.size_limit, 100);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{not json").expect("Failed to write file");

        let settings = Settings::load_from(&path);
        assert_eq!(settings.password, "1234");
    }

    #[test]
    fn test_partial_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"language": "English"}"#).expect("Failed to write file");

        // Missing fields fail the whole load, no partial recovery.
        let settings = Settings::load_from(&path);
        assert_eq!(settings.size_limit, 100);
    }

    #[test]
    fn test_two_letter_code_migrates_to_full_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"language": "te", "password": "secret", "size_limit": 50}"#,
        )
        .expect("Failed to write file");

        let settings = Settings::load_from(&path);
        assert_eq!(settings.language, Language::Telugu);
        assert_eq!(settings.password, "secret");
        assert_eq!(settings.size_limit, 50);

        // Saving writes the full name, completing the migration.
        settings.save_to(&path).expect("Failed to save settings");
        let contents = fs::read_to_string(&path).expect("Failed to read settings");
        assert!(contents.contains("\"Telugu\""));
        assert!(!contents.contains("\"te\""));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            language: Language::Hindi,
            password: "pw".to_string(),
            size_limit: 25,
        };
        settings.save_to(&path).expect("Failed to save settings");

        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded.language, Language::Hindi);
        assert_eq!(reloaded.password, "pw");
        assert_eq!(reloaded.size_limit, 25);
    }
}
