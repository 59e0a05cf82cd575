use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub payments: PaymentsConfig,
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
            payments: PaymentsConfig::from_env(),
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

/// Payment provider credentials and return-URL settings. Every field is
/// optional at load time; the operation that needs a value fails with a
/// configuration error when it is absent.
#[derive(Debug, Clone, Default)]
pub struct PaymentsConfig {
    pub base_url: Option<String>,
    pub lemon_squeezy: LemonSqueezyConfig,
    pub paddle: PaddleConfig,
}

impl PaymentsConfig {
    fn from_env() -> Self {
        Self {
            base_url: optional_env("APP_BASE_URL"),
            lemon_squeezy: LemonSqueezyConfig {
                api_key: optional_env("LEMONSQUEEZY_API_KEY"),
                store_id: optional_env("LEMONSQUEEZY_STORE_ID"),
                variant_id: optional_env("LEMONSQUEEZY_VARIANT_ID"),
                webhook_secret: optional_env("LEMONSQUEEZY_WEBHOOK_SECRET"),
                test_mode: env::var("LEMONSQUEEZY_TEST_MODE")
                    .map(|value| value.trim().eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
            paddle: PaddleConfig {
                api_key: optional_env("PADDLE_API_KEY"),
                price_id: optional_env("PADDLE_PRICE_ID"),
                webhook_secret: optional_env("PADDLE_WEBHOOK_SECRET"),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LemonSqueezyConfig {
    pub api_key: Option<String>,
    pub store_id: Option<String>,
    pub variant_id: Option<String>,
    pub webhook_secret: Option<String>,
    pub test_mode: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PaddleConfig {
    pub api_key: Option<String>,
    pub price_id: Option<String>,
    pub webhook_secret: Option<String>,
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_BASE_URL",
            "LEMONSQUEEZY_API_KEY",
            "LEMONSQUEEZY_STORE_ID",
            "LEMONSQUEEZY_VARIANT_ID",
            "LEMONSQUEEZY_WEBHOOK_SECRET",
            "LEMONSQUEEZY_TEST_MODE",
            "PADDLE_API_KEY",
            "PADDLE_PRICE_ID",
            "PADDLE_WEBHOOK_SECRET",
        ] {
            env::remove_var(key);
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
        assert!(config.payments.base_url.is_none());
        assert!(config.payments.lemon_squeezy.api_key.is_none());
        assert!(!config.payments.lemon_squeezy.test_mode);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn blank_payment_credentials_count_as_absent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEMONSQUEEZY_API_KEY", "   ");
        env::set_var("PADDLE_WEBHOOK_SECRET", "pdl_secret");
        env::set_var("LEMONSQUEEZY_TEST_MODE", "TRUE");
        let config = AppConfig::load().expect("config loads");
        assert!(config.payments.lemon_squeezy.api_key.is_none());
        assert_eq!(
            config.payments.paddle.webhook_secret.as_deref(),
            Some("pdl_secret")
        );
        assert!(config.payments.lemon_squeezy.test_mode);
    }
}
