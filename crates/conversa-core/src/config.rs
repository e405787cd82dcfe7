//! Configuration for the conversa backend
//!
//! Defaults mirror the deployed setup; every field can be overridden
//! through the environment. The API credential has no default and must
//! come from `ZAI_API_KEY`.

use serde::{Deserialize, Serialize};

/// System-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Path of the SQLite database file
    pub db_path: String,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
    /// Keep-alive ping target; `None` disables the ping task
    pub keepalive_url: Option<String>,
    /// External completion service settings
    pub completion: CompletionConfig,
}

/// Settings for the external completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Bearer credential
    pub api_key: String,
    /// Fixed model identifier sent with every request
    pub model: String,
    /// Request timeout in seconds; generous to tolerate slow upstreams
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            db_path: "conversas.db".to_string(),
            allowed_origins: vec![
                "http://localhost:4200".to_string(),
                "http://127.0.0.1:4200".to_string(),
                "https://go-ia.vercel.app".to_string(),
            ],
            keepalive_url: None,
            completion: CompletionConfig::default(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.z.ai/api/paas/v4/chat/completions".to_string(),
            api_key: String::new(),
            model: "glm-4.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CONVERSA_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(path) = std::env::var("CONVERSA_DB") {
            config.db_path = path;
        }
        if let Ok(origin) = std::env::var("CONVERSA_FRONTEND_ORIGIN") {
            if !config.allowed_origins.contains(&origin) {
                config.allowed_origins.push(origin);
            }
        }
        if let Ok(url) = std::env::var("CONVERSA_KEEPALIVE_URL") {
            config.keepalive_url = Some(url);
        }
        if let Ok(url) = std::env::var("ZAI_API_URL") {
            config.completion.api_url = url;
        }
        if let Ok(key) = std::env::var("ZAI_API_KEY") {
            config.completion.api_key = key;
        }
        if let Ok(model) = std::env::var("ZAI_MODEL") {
            config.completion.model = model;
        }

        config
    }
}
