//! Scribe: Arabic shaping and bidirectional reordering.
//!
//! Re-exports the text pipeline from `scribe-text` and the configuration
//! loader from `scribe-config`.

pub use scribe_config::{ConfigError, ScribeConfig};
pub use scribe_text::*;

/// Build a pipeline from `scribe.toml` and `SCRIBE_*` environment overrides.
pub fn pipeline_from_env() -> Result<Pipeline> {
    ScribeConfig::load().pipeline()
}
