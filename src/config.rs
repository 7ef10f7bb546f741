use crate::error::{PlantIdError, Result};
use plant_id_common::{DEFAULT_API_BASE, DEFAULT_LOCAL_LANGUAGE, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを読む環境変数（先頭が優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// localName に求める言語
    pub local_language: String,
    /// None でタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base: DEFAULT_API_BASE.into(),
            local_language: DEFAULT_LOCAL_LANGUAGE.into(),
            timeout_seconds: Some(120),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plant-id").join("config.json"))
    }

    /// APIキーを解決（環境変数を優先、空文字は未設定扱い）
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok());
        Self::first_non_blank(from_env.chain(self.api_key.clone()))
    }

    fn first_non_blank(candidates: impl Iterator<Item = String>) -> Option<String> {
        candidates
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 表示用にマスクしたAPIキー
    pub fn masked_api_key(&self) -> String {
        match self.resolve_api_key() {
            Some(key) if key.chars().count() > 8 => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("****{}", tail)
            }
            Some(_) => "****".to_string(),
            None => "未設定".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-flash-latest");
        assert_eq!(config.local_language, "Tamil");
        assert_eq!(config.timeout_seconds, Some(120));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.model, "gemini-flash-latest");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model": "gemini-2.0-flash", "timeout_seconds": null}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_seconds, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("abc".to_string()),
            local_language: "Hindi".to_string(),
            ..Default::default()
        };
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.local_language, "Hindi");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(PlantIdError::JsonParse(_))));
    }

    #[test]
    fn test_first_non_blank_skips_empty() {
        let keys = vec!["".to_string(), "   ".to_string(), " key-1 ".to_string()];
        assert_eq!(Config::first_non_blank(keys.into_iter()), Some("key-1".to_string()));
        assert_eq!(Config::first_non_blank(Vec::<String>::new().into_iter()), None);
    }
}
