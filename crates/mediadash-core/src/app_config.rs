#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Tracing filter used when `MEDIADASH_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "info",
            Environment::Production => "warn",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// How many locations the rankings keep.
    pub top_n: usize,
    pub demo_rows: usize,
    pub demo_seed: Option<u64>,
    /// Negative-sentiment share (percent) above which the report flags it.
    pub negative_alert_pct: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            log_level: Environment::Development.default_log_level().to_string(),
            top_n: 5,
            demo_rows: 100,
            demo_seed: None,
            negative_alert_pct: 15.0,
        }
    }
}
