use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use edupanel_shared::Lang;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    #[serde(default)]
    pub language: Lang,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Where the values came from, for the startup log line.
    #[serde(skip)]
    pub source: String,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".edupanel/session.json")
}

fn default_page_size() -> u32 {
    10
}

impl ConsoleConfig {
    pub fn load() -> Result<Self> {
        let mut config_paths = vec![
            PathBuf::from("/etc/edupanel/console.toml"),
            PathBuf::from("./edupanel.toml"),
        ];
        if let Ok(explicit) = std::env::var("EDUPANEL_CONFIG") {
            config_paths.insert(0, PathBuf::from(explicit));
        }

        for path in config_paths {
            if let Ok(contents) = fs::read_to_string(&path) {
                let mut config = Self::parse(&contents)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
                config.source = path.display().to_string();
                return Ok(config);
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validated()
    }

    /// Environment fallback; `lookup` is `std::env::var` outside tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let language = match lookup("EDUPANEL_LANG") {
            Some(code) => code.parse::<Lang>()?,
            None => Lang::default(),
        };
        let page_size = match lookup("EDUPANEL_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("EDUPANEL_PAGE_SIZE must be a number, got '{}'", raw))?,
            None => default_page_size(),
        };

        Self {
            api_url: lookup("EDUPANEL_API_URL").unwrap_or_else(default_api_url),
            session_path: lookup("EDUPANEL_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_session_path),
            language,
            page_size,
            log_dir: lookup("EDUPANEL_LOG_DIR").map(PathBuf::from),
            source: "environment".to_string(),
        }
        .validated()
    }

    fn validated(self) -> Result<Self> {
        if self.page_size == 0 || self.page_size > 500 {
            anyhow::bail!("page_size must be between 1 and 500, got {}", self.page_size);
        }
        if self.api_url.trim().is_empty() {
            anyhow::bail!("api_url must not be empty");
        }
        Ok(self)
    }
}
