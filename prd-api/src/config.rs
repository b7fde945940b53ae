use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub openai: OpenAIConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Embed upstream and storage error text in 500 responses
    pub expose_error_details: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite URL, or "memory" for the in-process store
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenAIConfig {
    /// Process default credential, used when a request brings none
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    /// `["*"]` allows any origin
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: built-in defaults, `prd-expert.toml` in the
    /// working directory, `<config dir>/prd-expert/api.toml` (or only `explicit`
    /// when given), then `PRD_EXPERT_<SECTION>__<KEY>` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Self::builder()?;

        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path.to_path_buf()).required(true)),
            None => {
                let builder = match env::current_dir() {
                    Ok(current_dir) => builder
                        .add_source(File::from(current_dir.join("prd-expert.toml")).required(false)),
                    Err(_) => builder,
                };
                match get_config_path() {
                    Some(path) => builder.add_source(File::from(path).required(false)),
                    None => builder,
                }
            }
        };

        let builder = builder.add_source(
            Environment::with_prefix("PRD_EXPERT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        );

        let config: ApiConfig = builder.build()?.try_deserialize()?;
        Ok(config.with_env_credential(env::var("OPENAI_API_KEY").ok()))
    }

    /// Defaults only; further sources are layered on top by the caller.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8001)?
            .set_default("server.expose_error_details", true)?
            .set_default("database.url", "sqlite://prd_expert.db")?
            .set_default("database.max_connections", 5)?
            .set_default("logging.level", "info")?
            .set_default("openai.model", prd_llm_sdk::models::openai::GPT_4O_ID)?
            .set_default("openai.base_url", "https://api.openai.com")?
            .set_default("openai.timeout_secs", 300)?
            .set_default("openai.temperature", 0.7)?
            .set_default("openai.max_tokens", 2048)?
            .set_default("cors.allowed_origins", vec!["*"])
    }

    /// Fall back to the conventional `OPENAI_API_KEY` variable when the
    /// configured key is missing or blank.
    pub fn with_env_credential(mut self, env_key: Option<String>) -> Self {
        let configured = self
            .openai
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());
        self.openai.api_key = configured.or_else(|| env_key.filter(|key| !key.trim().is_empty()));
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prd-expert/api.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> ApiConfig {
        ApiConfig::builder()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 8001);
        assert!(config.server.expose_error_details);
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.max_tokens, 2048);
        assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
[server]
port = 9000
expose_error_details = false

[database]
url = "memory"

[openai]
api_key = "sk-file"
model = "gpt-4o-mini"
"#,
        );
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.expose_error_details);
        assert_eq!(config.database.url, "memory");
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_env_credential_fallback() {
        let config = from_toml("").with_env_credential(Some("sk-env".to_string()));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));

        let config = from_toml("[openai]\napi_key = \"sk-file\"")
            .with_env_credential(Some("sk-env".to_string()));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-file"));

        let config = from_toml("[openai]\napi_key = \"  \"").with_env_credential(None);
        assert!(config.openai.api_key.is_none());
    }
}
