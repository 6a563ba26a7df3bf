//! src/config.rs

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

/// Runtime configuration, resolved once at startup and passed by reference
/// to whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory scanned for git working copies.
    pub work_dir: PathBuf,
    /// Credential for the chat-completion endpoint.
    pub api_key: String,
    /// Base endpoint of the service (e.g. `https://api.deepseek.com`);
    /// `/chat/completions` is appended when calling.
    pub api_url: String,
    /// Model identifier sent with every request.
    pub model: String,
}

const DEFAULT_MODEL: &str = "deepseek-chat";

impl Config {
    /// Loads configuration from the environment, after giving a `.env`
    /// file in the current directory a chance to populate it. Every
    /// missing required variable is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; plain environment variables still apply.
        dotenvy::dotenv().ok();

        let work_dir = require("WORK_REPORT_DIR")?;
        let api_key = require("DEEPSEEK_API_KEY")?;
        let api_url = require("DEEPSEEK_API_URL")?;
        let model = env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            work_dir: PathBuf::from(work_dir),
            api_key,
            api_url,
            model,
        })
    }
}

fn require(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("请在 .env 文件中设置 {key}")),
    }
}
