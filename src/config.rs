pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Runtime configuration.
///
/// Credentials and identifiers are optional at startup: a missing one is an
/// operational problem that surfaces as a generic failure on the first
/// submission, not a reason to refuse to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub notion_api_key: Option<String>,
    pub notion_database_id: Option<String>,
    pub notion_base_url: String,
    pub notion_version: String,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_base_url: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            notion_api_key: None,
            notion_database_id: None,
            notion_base_url: DEFAULT_NOTION_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_base_url: DEFAULT_TELEGRAM_BASE_URL.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            notion_api_key: optional_secret("NOTION_API_KEY"),
            notion_database_id: optional_secret("NOTION_DATABASE_ID"),
            notion_base_url: base_url("NOTION_BASE_URL", DEFAULT_NOTION_BASE_URL)?,
            notion_version: std::env::var("NOTION_VERSION")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            telegram_bot_token: optional_secret("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: optional_secret("TELEGRAM_CHAT_ID"),
            telegram_base_url: base_url("TELEGRAM_BASE_URL", DEFAULT_TELEGRAM_BASE_URL)?,
            max_body_bytes: match std::env::var("MAX_BODY_BYTES") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a positive integer"))?,
                Err(_) => DEFAULT_MAX_BODY_BYTES,
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!("Notion Base URL: {}", config.notion_base_url);
        tracing::debug!("Telegram Base URL: {}", config.telegram_base_url);
        tracing::debug!("Server Port: {}", config.port);
        for name in config.missing_settings() {
            tracing::warn!(
                "{} is not set; reservations will fail until it is configured",
                name
            );
        }

        Ok(config)
    }

    /// Names of the credentials/identifiers that are not configured.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        [
            ("NOTION_API_KEY", self.notion_api_key.is_none()),
            ("NOTION_DATABASE_ID", self.notion_database_id.is_none()),
            ("TELEGRAM_BOT_TOKEN", self.telegram_bot_token.is_none()),
            ("TELEGRAM_CHAT_ID", self.telegram_chat_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

fn optional_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn base_url(name: &str, default: &str) -> anyhow::Result<String> {
    let raw = std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    validate_base_url(name, &raw)
}

fn validate_base_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(raw.trim_end_matches('/').to_string())
}
