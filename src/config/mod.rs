pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{config_dir, load, save_theme};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

/// Upper bound on a single verification document, matching the copy shown
/// in the file picker ("up to 10MB").
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Servly".to_string(),
        }
    }
}

/// Connection settings for the Servly REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token issued by the auth provider, if the API requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.servly.test"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.servly.test");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.api.token.is_none());
        assert_eq!(config.theme.name, "Servly");
        assert_eq!(config.upload.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn test_rebinding_a_key() {
        let config: AppConfig = toml::from_str(
            r#"
            [keybindings.documents]
            upload = "ctrl+u"
            reload = "r"
            "#,
        )
        .unwrap();

        assert_eq!(config.keybindings.documents.upload.display(), "ctrl+u");
        assert_eq!(config.keybindings.global.quit.display(), "q");
    }
}
