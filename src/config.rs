//! Configuration management with environment variable support.
//!
//! All values have defaults; environment variables override them and CLI
//! flags override the environment.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TELETEST_GENERATION_LATENCY_MS` | Simulated latency of the mock generator | `2000` |
//! | `TELETEST_GENERATION_TIMEOUT_SECS` | Upper bound on one generation run | `30` |
//! | `TELETEST_COPY_FEEDBACK_MS` | How long a "copied" marker stays visible | `2000` |
//! | `TELETEST_EXPORT_DIR` | Directory CSV exports are written to | `.` |
//! | `TELETEST_LOG` | `tracing` filter directive | `teletest=info` |
//! | `TELETEST_LOG_FILE` | Log file for the interactive page | unset |
//!
//! # Example
//!
//! ```bash
//! export TELETEST_GENERATION_LATENCY_MS=0
//! export TELETEST_EXPORT_DIR="$HOME/test-cases"
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

// ============================================================================
// Default Values
// ============================================================================

/// Default mock generation latency (milliseconds)
pub const DEFAULT_GENERATION_LATENCY_MS: u64 = 2000;

/// Default generation timeout (seconds)
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Default copy confirmation lifetime (milliseconds)
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;

/// Default export directory
pub const DEFAULT_EXPORT_DIR: &str = ".";

/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "teletest=info";

// ============================================================================
// Environment Variable Names
// ============================================================================

pub const ENV_GENERATION_LATENCY_MS: &str = "TELETEST_GENERATION_LATENCY_MS";

pub const ENV_GENERATION_TIMEOUT_SECS: &str = "TELETEST_GENERATION_TIMEOUT_SECS";

pub const ENV_COPY_FEEDBACK_MS: &str = "TELETEST_COPY_FEEDBACK_MS";

pub const ENV_EXPORT_DIR: &str = "TELETEST_EXPORT_DIR";

pub const ENV_LOG: &str = "TELETEST_LOG";

pub const ENV_LOG_FILE: &str = "TELETEST_LOG_FILE";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub generation: GenerationSettings,
    pub presentation: PresentationSettings,
    pub logging: LogSettings,
}

/// Generation run settings
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Simulated latency of the mock generator
    pub latency: Duration,
    /// Upper bound on one run
    pub timeout: Duration,
}

/// Settings of the summary/detail views
#[derive(Debug, Clone)]
pub struct PresentationSettings {
    /// Lifetime of the per-row "copied" marker
    pub copy_feedback: Duration,
    /// Directory CSV exports are written to
    pub export_dir: PathBuf,
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// `EnvFilter` directive
    pub filter: String,
    /// Optional log file
    pub file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            generation: GenerationSettings::from_env(),
            presentation: PresentationSettings::from_env(),
            logging: LogSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            generation: GenerationSettings::defaults(),
            presentation: PresentationSettings::defaults(),
            logging: LogSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl GenerationSettings {
    pub fn from_env() -> Self {
        Self {
            latency: Duration::from_millis(
                env_parse(ENV_GENERATION_LATENCY_MS).unwrap_or(DEFAULT_GENERATION_LATENCY_MS),
            ),
            timeout: Duration::from_secs(
                env_parse(ENV_GENERATION_TIMEOUT_SECS).unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS),
            ),
        }
    }

    pub fn defaults() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_GENERATION_LATENCY_MS),
            timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }
}

impl PresentationSettings {
    pub fn from_env() -> Self {
        Self {
            copy_feedback: Duration::from_millis(
                env_parse(ENV_COPY_FEEDBACK_MS).unwrap_or(DEFAULT_COPY_FEEDBACK_MS),
            ),
            export_dir: env::var(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR)),
        }
    }

    pub fn defaults() -> Self {
        Self {
            copy_feedback: Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self {
            filter: env::var(ENV_LOG).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            file: env::var(ENV_LOG_FILE).ok().filter(|s| !s.is_empty()).map(PathBuf::from),
        }
    }

    pub fn defaults() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn env_parse(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| parse_u64(&s))
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

/// Mock generation latency (convenience function)
pub fn generation_latency() -> Duration {
    get().generation.latency
}

/// Generation timeout (convenience function)
pub fn generation_timeout() -> Duration {
    get().generation.timeout
}

/// Export directory (convenience function)
pub fn export_dir() -> PathBuf {
    get().presentation.export_dir.clone()
}
