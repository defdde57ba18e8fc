//! Runtime configuration
//!
//! Everything is read from the environment (and an optional `.env` file)
//! under the `PRACTICE_PARTNER` prefix, with `__` between nesting levels:
//!
//! ```text
//! PRACTICE_PARTNER__SERVER__PORT=8080
//! PRACTICE_PARTNER__COMPLETION__BACKEND=inference_api
//! PRACTICE_PARTNER__COMPLETION__API_KEY=...
//! PRACTICE_PARTNER__DIALOGUE__CORRECTION_RATE=0.5
//! ```

mod completion;
mod dialogue;
mod error;
mod server;

pub use completion::{CompletionBackend, CompletionConfig};
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// All settings. An empty environment yields a runnable template-only partner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Reads `.env` when present, then the prefixed environment.
    ///
    /// Only parsing happens here; call [`AppConfig::validate`] before use.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("PRACTICE_PARTNER").separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Checks every section, stopping at the first problem.
    ///
    /// With a backend enabled, a request must outlive the completion call
    /// it may wait on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.completion.validate()?;
        self.dialogue.validate()?;

        if self.completion.is_enabled()
            && self.server.request_timeout_secs <= self.completion.timeout_secs
        {
            return Err(ValidationError::RequestTimeoutTooShort {
                request: self.server.request_timeout_secs,
                completion: self.completion.timeout_secs,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
