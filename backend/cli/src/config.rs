/// PageTalk relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Provider API key
    pub api_key: Option<String>,
    /// Provider endpoint override
    pub api_url: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// Token budget for the history truncator
    pub context_limit_tokens: usize,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            api_url: None,
            model: "claude-3-5-sonnet-20241022".to_string(),
            context_limit_tokens: 900_000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            bind_address: std::env::var("PAGETALK_BIND").unwrap_or(defaults.bind_address),
            port: std::env::var("PAGETALK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            api_url: std::env::var("PAGETALK_API_URL").ok(),
            model: std::env::var("PAGETALK_MODEL").unwrap_or(defaults.model),
            context_limit_tokens: std::env::var("PAGETALK_CONTEXT_LIMIT_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.context_limit_tokens),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.context_limit_tokens, 900_000);
        assert!(config.api_key.is_none());
    }
}
