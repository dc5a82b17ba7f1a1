use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/greenhouse | working directory (database, logs) |
/// | HTTP_PORT | 9000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | STRIPE_SECRET_KEY | dev placeholder | Stripe API key, required outside development |
/// | PAYMENT_CURRENCY | usd | currency for payment intents |
/// | SES_FROM_EMAIL | noreply@greenhouse.app | sender address for notifications |
/// | EMAIL_ENABLED | false | opt-in switch for SES sends |
/// | JWT_SECRET | dev key (debug builds only) | session signing secret |
/// | JWT_EXPIRATION_MINUTES | 525600 | session lifetime (one year) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/greenhouse HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Stripe API secret key
    pub stripe_secret_key: String,
    /// Currency code for payment intents
    pub payment_currency: String,
    /// Sender address for transactional email
    pub email_from: String,
    /// Whether SES sends are attempted at all
    pub email_enabled: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/greenhouse".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9000),
            stripe_secret_key: Self::require_secret("STRIPE_SECRET_KEY", &environment)?,
            payment_currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".into()),
            email_from: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@greenhouse.app".into()),
            email_enabled: std::env::var("EMAIL_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment,
        })
    }

    /// Build a configuration with fixed values, no environment reads
    ///
    /// Used by tests that spin up a full server state against a temp dir.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            environment: "development".into(),
            stripe_secret_key: "dev-STRIPE_SECRET_KEY-not-for-production".into(),
            payment_currency: "usd".into(),
            email_from: "noreply@greenhouse.app".into(),
            email_enabled: false,
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory the embedded database lives in
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the working directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_are_development() {
        let config = Config::with_overrides("/tmp/greenhouse-test", 0);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.http_port, 0);
        assert!(!config.email_enabled);
    }

    #[test]
    fn test_database_dir_under_work_dir() {
        let config = Config::with_overrides("/tmp/greenhouse-test", 0);
        assert_eq!(
            config.database_dir(),
            PathBuf::from("/tmp/greenhouse-test/database")
        );
    }
}
