//! Configuration management for the Digitales Skript server

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory for server-side export archives
    pub export_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Credential for the completion API. Optional at startup; the
    /// flashcard route rejects requests when it is absent.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                export_dir: "./exports".to_string(),
            },
            ai: AiConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
                export_dir: env::var("EXPORT_DIR").unwrap_or(defaults.server.export_dir),
            },
            ai: AiConfig {
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.ai.base_url),
                model: env::var("OPENAI_MODEL").unwrap_or(defaults.ai.model),
            },
        }
    }
}
