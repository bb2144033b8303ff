use crate::error::{NotesError, Result};
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_EXPORT_FORMAT: &str = "export-format";
pub const KEY_EXPORT_DIR: &str = "export-dir";

/// Configuration for lownotes, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Format used by export when neither a flag nor the output name decides it
    #[serde(default)]
    pub export_format: ExportFormat,

    /// Directory suggested file names are placed in (current directory if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[KEY_EXPORT_FORMAT, KEY_EXPORT_DIR]
    }

    /// Display value for a config key, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_EXPORT_FORMAT => Some(self.export_format.to_string()),
            KEY_EXPORT_DIR => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Sets a config key from its string form. An empty export dir unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            KEY_EXPORT_FORMAT => {
                self.export_format = value.parse()?;
                Ok(())
            }
            KEY_EXPORT_DIR => {
                self.export_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Directory exports land in when no explicit output path is given
    pub fn export_dir_or(&self, fallback: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = NotesConfig::default();
        assert_eq!(config.export_format, ExportFormat::Text);
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = NotesConfig::load(dir.path().join("missing")).unwrap();
        assert_eq!(config, NotesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let mut config = NotesConfig::default();
        config.set(KEY_EXPORT_FORMAT, "pdf").unwrap();
        config.set(KEY_EXPORT_DIR, "/tmp/exports").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.export_format, ExportFormat::Pdf);
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"export_format":"docx"}"#).unwrap();
        let loaded = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.export_format, ExportFormat::Docx);
        assert_eq!(loaded.export_dir, None);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = NotesConfig::default();
        assert_eq!(config.get(KEY_EXPORT_FORMAT).as_deref(), Some("text"));
        assert_eq!(config.get(KEY_EXPORT_DIR).as_deref(), Some(""));
        assert_eq!(config.get("nope"), None);

        assert!(config.set(KEY_EXPORT_FORMAT, "word").is_err());
        assert!(config.set("nope", "x").is_err());

        config.set(KEY_EXPORT_DIR, "out").unwrap();
        config.set(KEY_EXPORT_DIR, "").unwrap();
        assert_eq!(config.export_dir, None);
    }
}
