use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion endpoint base URL.
    pub api_base: String,
    pub api_version: String,
    /// Fixed model identifier used for every stage.
    pub model: String,
    pub timeout_secs: u64,
    /// State directory for session + per-run artifacts.
    pub out_dir: String,
    /// Pause between printed conversation messages. Presentation-only; the
    /// pipeline itself never sleeps.
    pub message_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://api.anthropic.com".into(),
            api_version: "2023-06-01".into(),
            model: "claude-sonnet-4-5-20250929".into(),
            timeout_secs: 120,
            out_dir: ".launchbox".into(),
            message_delay_ms: 750,
        }
    }
}

impl Config {
    /// Defaults, optionally overridden by a TOML file.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let raw = fs_err::read_to_string(p)
                    .with_context(|| format!("reading config file {p}"))?;
                toml::from_str(&raw).with_context(|| format!("parsing config file {p}"))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_file_keeps_defaults() {
        let cfg: Config = toml::from_str("model = \"test-model\"").unwrap();
        assert_eq!(cfg.model, "test-model");
        assert_eq!(cfg.message_delay_ms, Config::default().message_delay_ms);
    }
}
