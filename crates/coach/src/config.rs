//! Configuration for the coach engine.

use std::env;
use std::time::Duration;

/// Default bound on a single generation call, in seconds.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Default assistant name used in the prompt preamble.
pub const DEFAULT_ASSISTANT_NAME: &str = "VITA AI";

/// Default SQLite database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:vita_coach.db?mode=rwc";

/// Configuration for [`Coach`](crate::Coach) sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachConfig {
    /// Bound on one generation call. `None` waits indefinitely.
    pub generation_timeout: Option<Duration>,

    /// Extra attempts at persisting an exchange after the first write fails.
    pub persist_retries: u32,

    /// Name the assistant introduces itself with in the prompt.
    pub assistant_name: String,

    /// Database URL used by the chat binary.
    pub database_url: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Some(Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS)),
            persist_retries: 1,
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl CoachConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `COACH_GENERATION_TIMEOUT_SECS` - Generation bound in seconds, 0 disables (default: 60)
    /// - `COACH_PERSIST_RETRIES` - Persistence retries after a failed write (default: 1)
    /// - `COACH_ASSISTANT_NAME` - Assistant name (default: VITA AI)
    /// - `COACH_DATABASE_URL` - Database URL (default: sqlite:vita_coach.db?mode=rwc)
    pub fn from_env() -> Self {
        let generation_timeout = match env::var("COACH_GENERATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS)),
        };

        let persist_retries = env::var("COACH_PERSIST_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let assistant_name = env::var("COACH_ASSISTANT_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string());

        let database_url =
            env::var("COACH_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self {
            generation_timeout,
            persist_retries,
            assistant_name,
            database_url,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> CoachConfigBuilder {
        CoachConfigBuilder::default()
    }
}

/// Builder for CoachConfig.
#[derive(Debug, Default)]
pub struct CoachConfigBuilder {
    config: CoachConfig,
}

impl CoachConfigBuilder {
    /// Set the generation timeout. A zero duration disables the bound, as
    /// `COACH_GENERATION_TIMEOUT_SECS=0` does.
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.config.generation_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Wait for the generator without a bound.
    pub fn no_generation_timeout(mut self) -> Self {
        self.config.generation_timeout = None;
        self
    }

    /// Set the number of persistence retries.
    pub fn persist_retries(mut self, retries: u32) -> Self {
        self.config.persist_retries = retries;
        self
    }

    /// Set the assistant name.
    pub fn assistant_name(mut self, name: impl Into<String>) -> Self {
        self.config.assistant_name = name.into();
        self
    }

    /// Set the database URL.
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CoachConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoachConfig::default();

        assert_eq!(config.generation_timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.persist_retries, 1);
        assert_eq!(config.assistant_name, "VITA AI");
        assert_eq!(config.database_url, "sqlite:vita_coach.db?mode=rwc");
    }

    #[test]
    fn test_builder_all_options() {
        let config = CoachConfig::builder()
            .generation_timeout(Duration::from_secs(5))
            .persist_retries(3)
            .assistant_name("Coach Max")
            .database_url("sqlite::memory:")
            .build();

        assert_eq!(config.generation_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.persist_retries, 3);
        assert_eq!(config.assistant_name, "Coach Max");
        assert_eq!(config.database_url, "sqlite::memory:");

        let unbounded = CoachConfig::builder().no_generation_timeout().build();
        assert!(unbounded.generation_timeout.is_none());
    }

    #[test]
    fn test_zero_generation_timeout_disables_bound() {
        let config = CoachConfig::builder()
            .generation_timeout(Duration::ZERO)
            .build();

        assert!(config.generation_timeout.is_none());
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_coach_vars() {
            std::env::remove_var("COACH_GENERATION_TIMEOUT_SECS");
            std::env::remove_var("COACH_PERSIST_RETRIES");
            std::env::remove_var("COACH_ASSISTANT_NAME");
            std::env::remove_var("COACH_DATABASE_URL");
        }

        // Nothing set: defaults
        clear_all_coach_vars();
        assert_eq!(CoachConfig::from_env(), CoachConfig::default());

        // Everything set
        std::env::set_var("COACH_GENERATION_TIMEOUT_SECS", "15");
        std::env::set_var("COACH_PERSIST_RETRIES", "0");
        std::env::set_var("COACH_ASSISTANT_NAME", "Coach Max");
        std::env::set_var("COACH_DATABASE_URL", "sqlite:test.db");

        let config = CoachConfig::from_env();
        assert_eq!(config.generation_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.persist_retries, 0);
        assert_eq!(config.assistant_name, "Coach Max");
        assert_eq!(config.database_url, "sqlite:test.db");

        // Zero disables the timeout; junk falls back to defaults
        clear_all_coach_vars();
        std::env::set_var("COACH_GENERATION_TIMEOUT_SECS", "0");
        std::env::set_var("COACH_PERSIST_RETRIES", "many");
        std::env::set_var("COACH_ASSISTANT_NAME", "   ");

        let config = CoachConfig::from_env();
        assert!(config.generation_timeout.is_none());
        assert_eq!(config.persist_retries, 1);
        assert_eq!(config.assistant_name, "VITA AI");

        clear_all_coach_vars();
    }
}
