//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MSGSHELL_CONFIG` (environment variable)
//! 2. `~/.config/msgshell/config.toml` (Linux/macOS)
//!    `%APPDATA%\msgshell\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Display and layout settings.
    pub display: DisplayConfig,
    /// Column widths for the attachment list.
    pub columns: ColumnsConfig,
    /// Export defaults.
    pub export: ExportConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// UI language ("en", "es"). `None` follows the system locale.
    pub language: Option<String>,
    /// `strftime` format string for the metadata panel date.
    pub date_format: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Display and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color theme: "dark" or "light".
    pub theme: String,
    /// Render image previews for the selected attachment when the
    /// terminal supports a graphics protocol.
    pub show_preview: bool,
    /// Preview pane width in terminal cells.
    pub preview_width: u16,
    /// Preview pane height in terminal cells.
    pub preview_height: u16,
}

/// Column width overrides for the attachment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Size column width.
    pub size_width: u16,
    /// MIME type column width.
    pub type_width: u16,
}

/// Export defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default directory for "save all attachments".
    pub default_output_dir: Option<PathBuf>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_preview: true,
            preview_width: 40,
            preview_height: 12,
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            size_width: 10,
            type_width: 24,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_output_dir: None,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MSGSHELL_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("msgshell").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("msgshell")
}

/// Directory offered for "save all attachments": the configured
/// default, then the system download dir, then the working directory.
pub fn download_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.export.default_output_dir {
        return dir.clone();
    }
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.display.theme, "dark");
        assert!(cfg.display.show_preview);
        assert_eq!(cfg.display.preview_width, 40);
        assert_eq!(cfg.columns.size_width, 10);
        assert!(cfg.export.default_output_dir.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.display.theme, cfg.display.theme);
        assert_eq!(parsed.display.preview_height, cfg.display.preview_height);
        assert_eq!(parsed.general.date_format, cfg.general.date_format);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[general]
language = "es"

[display]
theme = "light"
show_preview = false
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.general.language.as_deref(), Some("es"));
        assert_eq!(cfg.display.theme, "light");
        assert!(!cfg.display.show_preview);
        // Other fields use defaults
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.columns.type_width, 24);
    }

    #[test]
    fn test_download_dir_prefers_configured() {
        let mut cfg = Config::default();
        cfg.export.default_output_dir = Some(PathBuf::from("/srv/attachments"));
        assert_eq!(download_dir(&cfg), PathBuf::from("/srv/attachments"));
    }
}
