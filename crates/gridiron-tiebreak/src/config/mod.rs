use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Deployment stage. Only affects the default log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Filter used when `APP_LOG_LEVEL` is unset. Development surfaces the
    /// engine's skipped-entry and decision events.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info,gridiron_tiebreak=debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub league: LeagueConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env::var("APP_ENV").unwrap_or_default());

        let host = non_empty_var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty_var("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        let log_level = non_empty_var("APP_LOG_LEVEL")
            .unwrap_or_else(|| environment.default_log_level().to_string());

        let alignment_path = non_empty_var("TIEBREAK_ALIGNMENT").map(PathBuf::from);
        if let Some(path) = &alignment_path {
            if !path.is_file() {
                return Err(ConfigError::AlignmentNotFound { path: path.clone() });
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            league: LeagueConfig { alignment_path },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// League structure source. Without a CSV path the standard alignment is used.
#[derive(Debug, Clone, Default)]
pub struct LeagueConfig {
    pub alignment_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    AlignmentNotFound { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::AlignmentNotFound { path } => write!(
                f,
                "TIEBREAK_ALIGNMENT points at {}, which is not a readable file",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::AlignmentNotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    const FIXTURE_ALIGNMENT: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mini_league.csv");

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
            "TIEBREAK_ALIGNMENT",
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
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, "info,gridiron_tiebreak=debug");
        assert!(config.league.alignment_path.is_none());
    }

    #[test]
    fn environment_picks_default_log_filter() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("APP_ENV", "CI");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.telemetry.log_level, "warn");

        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_LEVEL", "gridiron_tiebreak=trace");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_level, "gridiron_tiebreak=trace");
        reset_env();
    }

    #[test]
    fn alignment_path_must_exist() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("TIEBREAK_ALIGNMENT", format!(" {FIXTURE_ALIGNMENT} "));
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.league.alignment_path,
            Some(PathBuf::from(FIXTURE_ALIGNMENT))
        );

        env::set_var("TIEBREAK_ALIGNMENT", "leagues/missing.csv");
        let err = AppConfig::load().expect_err("missing alignment rejected");
        assert!(matches!(err, ConfigError::AlignmentNotFound { .. }));
        reset_env();
    }

    #[test]
    fn rejects_bad_port_and_accepts_localhost() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("APP_PORT", "not-a-port");
        let err = AppConfig::load().expect_err("invalid port rejected");
        assert!(matches!(err, ConfigError::InvalidPort));

        env::set_var("APP_PORT", "8080");
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8080));
        reset_env();
    }
}
