// Logger configuration
use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Coloured, human-readable lines for local development
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub redaction_enabled: bool,
    pub log_level: String,
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Pick format and level from the runtime environment
    ///
    /// `environment` is the value of `CASEWORKS_ENV`; pretty output is only
    /// used for development on a colour-capable terminal.
    pub fn for_environment(environment: &str, use_colors: bool, verbose: bool) -> Self {
        let format = if environment == "development" && use_colors {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        Self {
            redaction_enabled: true,
            log_level: if verbose { "debug" } else { "info" }.to_string(),
            format,
        }
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub fn default_directive(&self) -> String {
        format!(
            "caseworks_server={level},auth_identity={level},member_registry={level},database_layer={level},tower_http=info,sqlx=warn",
            level = self.log_level
        )
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            log_level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}
