//! Loader for service configuration with YAML + environment overlays.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. built-in defaults ([`DEFAULT_CONFIG_YAML`])
//! 2. YAML files and inline snippets, in the order they were added
//! 3. `WIKISCRAPE__`-prefixed environment variables (`WIKISCRAPE__SERVER__BIND`)
//!
//! String values are then expanded against the process environment, so
//! `${OPENAI_API_KEY}` in any layer resolves to the variable's value. Unknown
//! variables are left as written.
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use wikiscrape_common::observability::LogFormat;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const ENV_PREFIX: &str = "WIKISCRAPE";

/// Defaults mirror the variables a bare deployment exports.
pub const DEFAULT_CONFIG_YAML: &str = r#"
server:
  bind: "0.0.0.0:8000"
auth:
  username: "${ADMIN_USERNAME}"
  password: "${ADMIN_PASSWORD}"
llm:
  provider: openai
  auth_token: "${OPENAI_API_KEY}"
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct WikiscrapeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Credentials for HTTP Basic auth on the API.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    Openai {
        #[serde(default = "default_openai_model")]
        model: String,
        auth_token: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
    },
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub emit_stderr: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            emit_stderr: true,
            filter: default_filter(),
            dir: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".into()
}
fn default_openai_model() -> String {
    "gpt-4o-mini".into()
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_retries() -> usize {
    2
}
fn default_user_agent() -> String {
    "wikiscrape/0.1".into()
}
fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "info".into()
}

/// True when `value` is empty or still holds an unexpanded `${VAR}`.
fn is_unresolved(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.contains("${")
}

impl WikiscrapeConfig {
    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_unresolved(&self.auth.username) || is_unresolved(&self.auth.password) {
            return Err(ConfigError::Message(
                "auth.username and auth.password must be set (ADMIN_USERNAME / ADMIN_PASSWORD)"
                    .into(),
            ));
        }
        self.server
            .bind
            .parse::<std::net::SocketAddr>()
            .map_err(|e| ConfigError::Message(format!("server.bind '{}': {e}", self.server.bind)))?;
        Ok(())
    }
}

impl LlmConfig {
    /// Provider settings for the LLM crate; a missing token disables answering.
    pub fn to_provider(&self) -> wikiscrape_common::LlmConfig {
        match self {
            LlmConfig::Openai {
                model,
                auth_token,
                endpoint,
                ..
            } if !is_unresolved(auth_token) => wikiscrape_common::LlmConfig::OpenAi {
                api_key: auth_token.clone(),
                model: model.clone(),
                base_url: Some(endpoint.clone()),
            },
            _ => wikiscrape_common::LlmConfig::None,
        }
    }

    pub fn temperature(&self) -> Option<f32> {
        match self {
            LlmConfig::Openai { temperature, .. } => *temperature,
            LlmConfig::None => None,
        }
    }

    pub fn max_tokens(&self) -> Option<u32> {
        match self {
            LlmConfig::Openai { max_tokens, .. } => *max_tokens,
            LlmConfig::None => None,
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct WikiscrapeConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for WikiscrapeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiscrapeConfigLoader {
    /// Start from the built-in defaults; env overrides are applied at [`load`](Self::load).
    ///
    /// ```
    /// use wikiscrape_config::WikiscrapeConfigLoader;
    ///
    /// let config = WikiscrapeConfigLoader::new()
    ///     .with_yaml_str("auth:\n  username: admin\n  password: secret")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.server.bind, "0.0.0.0:8000");
    /// assert_eq!(config.fetch.timeout_secs, 15);
    /// assert_eq!(config.auth.username, "admin");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file) but skipped when the file is missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use wikiscrape_config::{LlmConfig, WikiscrapeConfigLoader};
    ///
    /// unsafe { std::env::set_var("DOC_API_TOKEN", "injected-from-env"); }
    ///
    /// let config = WikiscrapeConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// auth:
    ///   username: admin
    ///   password: secret
    /// llm:
    ///   provider: openai
    ///   model: gpt-4o
    ///   auth_token: "${DOC_API_TOKEN}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// match &config.llm {
    ///     LlmConfig::Openai { model, auth_token, endpoint, .. } => {
    ///         assert_eq!(model, "gpt-4o");
    ///         assert_eq!(auth_token, "injected-from-env");
    ///         assert_eq!(endpoint, "https://api.openai.com/v1");
    ///     }
    ///     _ => panic!("expected OpenAI configuration"),
    /// }
    ///
    /// unsafe { std::env::remove_var("DOC_API_TOKEN"); }
    /// ```
    pub fn load(self) -> Result<WikiscrapeConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        // Re-read through `config` so env strings like "30" still coerce to numbers.
        let expanded = serde_json::to_string(&v).map_err(|e| ConfigError::Message(e.to_string()))?;
        Config::builder()
            .add_source(File::from_str(&expanded, FileFormat::Json))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Stretford")), ("COUNTY", Some("Lancs"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${COUNTY}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Stretford", { "loc": "Stretford-Lancs" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn unresolved_credentials_fail_validation() {
        let cfg = WikiscrapeConfig {
            server: ServerConfig::default(),
            auth: AuthConfig {
                username: "${ADMIN_USERNAME}".into(),
                password: "pw".into(),
            },
            llm: LlmConfig::None,
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_bind_address_fails_validation() {
        let cfg = WikiscrapeConfig {
            server: ServerConfig {
                bind: "localhost".into(),
            },
            auth: AuthConfig {
                username: "admin".into(),
                password: "pw".into(),
            },
            llm: LlmConfig::None,
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_token_disables_provider() {
        let llm = LlmConfig::Openai {
            model: default_openai_model(),
            auth_token: "${OPENAI_API_KEY}".into(),
            temperature: None,
            max_tokens: None,
            endpoint: default_openai_endpoint(),
        };
        assert!(matches!(llm.to_provider(), wikiscrape_common::LlmConfig::None));
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let auth = AuthConfig {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
