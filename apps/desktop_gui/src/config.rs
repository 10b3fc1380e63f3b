use std::{collections::HashMap, fs, io, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use client_core::DEFAULT_REQUEST_TIMEOUT;

pub const DEFAULT_API_BASE_URL: &str = "https://berkaybln-heartguard.hf.space";
pub const DEFAULT_CONFIG_FILE: &str = "heartguard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
    rejected: Vec<RejectedValue>,
}

/// A setting value that was ignored in favour of the previous layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedValue {
    pub source: &'static str,
    pub key: &'static str,
    pub value: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            log_filter: "info".into(),
            rejected: Vec::new(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn set_api_base_url(&mut self, raw: &str) {
        let trimmed = raw.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_base_url = trimmed.to_string();
        }
    }

    /// Values ignored while layering; settings load before logging is up.
    pub fn rejected(&self) -> &[RejectedValue] {
        &self.rejected
    }

    pub fn log_rejected(&self) {
        for rejected in &self.rejected {
            tracing::warn!(
                source = rejected.source,
                key = rejected.key,
                value = %rejected.value,
                "ignoring invalid setting"
            );
        }
    }

    fn set_request_timeout(&mut self, source: &'static str, raw: &str) {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
            _ => self.rejected.push(RejectedValue {
                source,
                key: "request_timeout_secs",
                value: raw.to_string(),
            }),
        }
    }

    fn set_log_filter(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.log_filter = trimmed.to_string();
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "heartguard_gui", about = "Heart-sound diagnosis client")]
pub struct Args {
    /// Base URL of the inference service.
    #[arg(long)]
    pub api_base_url: Option<String>,
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    /// Optional TOML settings file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(&args.config) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read {}", args.config.display()));
        }
    };

    let mut settings = resolve_settings(file.as_deref(), |name| std::env::var(name).ok())
        .with_context(|| format!("invalid settings in {}", args.config.display()))?;
    apply_args(&mut settings, args);
    Ok(settings)
}

/// Layers defaults, the settings file, then environment variables.
pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: HashMap<String, toml::Value> =
            toml::from_str(raw).context("settings file is not valid TOML")?;
        if let Some(v) = file_cfg.get("api_base_url").and_then(toml_scalar) {
            settings.set_api_base_url(&v);
        }
        if let Some(v) = file_cfg.get("request_timeout_secs").and_then(toml_scalar) {
            settings.set_request_timeout("file", &v);
        }
        if let Some(v) = file_cfg.get("log_filter").and_then(toml_scalar) {
            settings.set_log_filter(&v);
        }
    }

    if let Some(v) = env("HEARTGUARD_API_URL") {
        settings.set_api_base_url(&v);
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.set_api_base_url(&v);
    }

    if let Some(v) = env("HEARTGUARD_REQUEST_TIMEOUT_SECS") {
        settings.set_request_timeout("env", &v);
    }

    if let Some(v) = env("HEARTGUARD_LOG") {
        settings.set_log_filter(&v);
    }

    Ok(settings)
}

pub fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(v) = &args.api_base_url {
        settings.set_api_base_url(v);
    }
    if let Some(secs) = args.request_timeout_secs {
        settings.set_request_timeout("cli", &secs.to_string());
    }
}

fn toml_scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
