use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: String,
    // Upstream bases are configurable so deployments (and tests) can
    // repoint them; defaults are the production hosts.
    #[serde(default = "default_bilibili_api_base")]
    pub bilibili_api_base: String,
    #[serde(default = "default_douyin_api_base")]
    pub douyin_api_base: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_bilibili_api_base() -> String {
    "https://api.live.bilibili.com".to_string()
}

fn default_douyin_api_base() -> String {
    "https://douyin.wtf".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            bilibili_api_base: default_bilibili_api_base(),
            douyin_api_base: default_douyin_api_base(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                    log::warn!("Failed to parse {}, using defaults", path.display());
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {e}, using defaults", path.display());
                }
            }
        }
        Self::default()
    }
}
