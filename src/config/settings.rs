use crate::adapters::http::{default_user_agent, HttpOptions};
use crate::utils::error::{NumintelError, Result};
use crate::utils::validation::{
    is_unset, validate_header_value, validate_range, validate_url, Validate,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV_VAR: &str = "NUMINTEL_CONFIG";
pub const DEFAULT_CONFIG_FILES: &[&str] = &["numintel.toml", "config.json"];

pub const NUMVERIFY_API_KEY: &str = "NUMVERIFY_API_KEY";
pub const ABSTRACT_API_KEY: &str = "ABSTRACT_API_KEY";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub numverify: ApiKeySettings,
    pub abstractapi: ApiKeySettings,
    pub twilio: TwilioSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiKeySettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TwilioSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub endpoint: Option<String>,
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// 從檔案載入設定；`.json` 走舊版扁平格式，其餘視為 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(NumintelError::IoError)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 舊版 `config.json`：`{"NUMVERIFY_API_KEY": "...", ...}`
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(content)?;
        let text = |key: &str| {
            raw.get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        Ok(Self {
            numverify: ApiKeySettings {
                api_key: text(NUMVERIFY_API_KEY),
                endpoint: None,
            },
            abstractapi: ApiKeySettings {
                api_key: text(ABSTRACT_API_KEY),
                endpoint: None,
            },
            twilio: TwilioSettings {
                account_sid: text(TWILIO_ACCOUNT_SID),
                auth_token: text(TWILIO_AUTH_TOKEN),
                ..TwilioSettings::default()
            },
            http: HttpSettings::default(),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 依序尋找設定檔：明確指定、`$NUMINTEL_CONFIG`、工作目錄下的預設檔名
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading settings from {}", path.display());
            return Self::from_file(path);
        }

        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let candidates = from_env
            .into_iter()
            .chain(DEFAULT_CONFIG_FILES.iter().map(PathBuf::from));

        for candidate in candidates {
            if candidate.is_file() {
                tracing::debug!("Loading settings from {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        tracing::debug!("No settings file found, using environment only");
        Ok(Self::default())
    }

    /// 以環境變數補齊尚未設定的憑證
    pub fn with_env_fallback<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fill(&mut self.numverify.api_key, NUMVERIFY_API_KEY, &lookup);
        fill(&mut self.abstractapi.api_key, ABSTRACT_API_KEY, &lookup);
        fill(&mut self.twilio.account_sid, TWILIO_ACCOUNT_SID, &lookup);
        fill(&mut self.twilio.auth_token, TWILIO_AUTH_TOKEN, &lookup);
        self
    }

    pub fn with_process_env(self) -> Self {
        self.with_env_fallback(|key| std::env::var(key).ok())
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: self.http.timeout_seconds.map(Duration::from_secs),
            user_agent: self
                .http
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        }
    }

    /// 驗證設定的合理性
    pub fn validate_config(&self) -> Result<()> {
        let endpoints = [
            ("numverify.endpoint", &self.numverify.endpoint),
            ("abstractapi.endpoint", &self.abstractapi.endpoint),
            ("twilio.endpoint", &self.twilio.endpoint),
        ];
        for (field, endpoint) in endpoints {
            if let Some(endpoint) = endpoint {
                validate_url(field, endpoint)?;
            }
        }

        if let Some(timeout) = self.http.timeout_seconds {
            validate_range("http.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(user_agent) = &self.http.user_agent {
            validate_header_value("http.user_agent", user_agent)?;
        }

        Ok(())
    }
}

fn fill<F>(slot: &mut Option<String>, key: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if is_unset(slot.as_deref()) {
        if let Some(value) = lookup(key) {
            *slot = Some(value);
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
