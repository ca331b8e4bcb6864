use crate::screening::{
    load_tokenizer, NormalizationOptions, Normalizer, ResumeRanker, TokenizerError,
    VectorizerConfig, DEFAULT_TOKENIZER_MODEL,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_MAX_DOCUMENTS: usize = 200;
const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ranking: RankingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tokenizer model, normalization switches and vectorizer weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub tokenizer_model: String,
    pub normalization: NormalizationOptions,
    pub vectorizer: VectorizerConfig,
    pub max_documents: usize,
    /// Rankings kept by the service's history log before the oldest is dropped.
    pub history_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            tokenizer_model: DEFAULT_TOKENIZER_MODEL.to_string(),
            normalization: NormalizationOptions::default(),
            vectorizer: VectorizerConfig::default(),
            max_documents: DEFAULT_MAX_DOCUMENTS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl RankingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tokenizer_model =
            env::var("RANKER_TOKENIZER_MODEL").unwrap_or(defaults.tokenizer_model);
        let normalization = NormalizationOptions {
            remove_punctuation: env_flag(
                "RANKER_REMOVE_PUNCTUATION",
                defaults.normalization.remove_punctuation,
            )?,
            remove_stopwords: env_flag(
                "RANKER_REMOVE_STOPWORDS",
                defaults.normalization.remove_stopwords,
            )?,
            lowercase: env_flag("RANKER_LOWERCASE", defaults.normalization.lowercase)?,
        };
        let vectorizer = VectorizerConfig {
            smooth_idf: env_flag("RANKER_SMOOTH_IDF", defaults.vectorizer.smooth_idf)?,
            sublinear_tf: env_flag("RANKER_SUBLINEAR_TF", defaults.vectorizer.sublinear_tf)?,
        };
        let max_documents = match env::var("RANKER_MAX_DOCUMENTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidDocumentLimit)?,
            Err(_) => defaults.max_documents,
        };
        let history_limit = match env::var("RANKER_HISTORY_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidHistoryLimit)?,
            Err(_) => defaults.history_limit,
        };

        Ok(Self {
            tokenizer_model,
            normalization,
            vectorizer,
            max_documents,
            history_limit,
        })
    }

    /// Load the tokenizer model and assemble the ranker. Runs once at startup.
    pub fn build_ranker(&self) -> Result<ResumeRanker, TokenizerError> {
        let tokenizer = load_tokenizer(&self.tokenizer_model)?;
        Ok(ResumeRanker::new(
            Normalizer::new(tokenizer, self.normalization),
            self.vectorizer,
        ))
    }
}

fn env_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag { name }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str },
    InvalidDocumentLimit,
    InvalidHistoryLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name } => {
                write!(f, "{name} must be one of true/false/1/0/yes/no/on/off")
            }
            ConfigError::InvalidDocumentLimit => {
                write!(f, "RANKER_MAX_DOCUMENTS must be a positive integer")
            }
            ConfigError::InvalidHistoryLimit => {
                write!(f, "RANKER_HISTORY_LIMIT must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidDocumentLimit
            | ConfigError::InvalidHistoryLimit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "RANKER_TOKENIZER_MODEL",
            "RANKER_REMOVE_STOPWORDS",
            "RANKER_REMOVE_PUNCTUATION",
            "RANKER_LOWERCASE",
            "RANKER_SMOOTH_IDF",
            "RANKER_SUBLINEAR_TF",
            "RANKER_MAX_DOCUMENTS",
            "RANKER_HISTORY_LIMIT",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.ranking, RankingConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_ranking_switches() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RANKER_REMOVE_STOPWORDS", "yes");
        env::set_var("RANKER_SUBLINEAR_TF", "1");
        env::set_var("RANKER_MAX_DOCUMENTS", "25");
        env::set_var("RANKER_HISTORY_LIMIT", "10");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert!(config.ranking.normalization.remove_stopwords);
        assert!(config.ranking.normalization.remove_punctuation);
        assert!(config.ranking.vectorizer.sublinear_tf);
        assert!(config.ranking.vectorizer.smooth_idf);
        assert_eq!(config.ranking.max_documents, 25);
        assert_eq!(config.ranking.history_limit, 10);
    }

    #[test]
    fn rejects_malformed_flags_and_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RANKER_LOWERCASE", "sometimes");
        let err = AppConfig::load().expect_err("flag rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidFlag {
                name: "RANKER_LOWERCASE"
            }
        ));

        reset_env();
        env::set_var("RANKER_MAX_DOCUMENTS", "0");
        let err = AppConfig::load().expect_err("limit rejected");
        reset_env();
        assert!(matches!(err, ConfigError::InvalidDocumentLimit));

        env::set_var("RANKER_HISTORY_LIMIT", "none");
        let err = AppConfig::load().expect_err("history limit rejected");
        reset_env();
        assert!(matches!(err, ConfigError::InvalidHistoryLimit));
    }

    #[test]
    fn build_ranker_fails_fast_on_unknown_models() {
        let config = RankingConfig {
            tokenizer_model: "xx_unknown".to_string(),
            ..RankingConfig::default()
        };
        assert!(config.build_ranker().is_err());

        let ranker = RankingConfig::default()
            .build_ranker()
            .expect("default model loads");
        assert_eq!(ranker.normalizer().model(), DEFAULT_TOKENIZER_MODEL);
    }
}
