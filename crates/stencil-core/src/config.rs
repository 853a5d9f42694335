//! Config - 設定
//!
//! すべての項目にデフォルトがあり、JSON で部分的に上書きできます。

use serde::Deserialize;
use std::path::Path;

/// Settings for driving components against a host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// フレーム間隔（ミリ秒）
    pub frame_interval_ms: u64,
    /// デモで回すフレーム数
    pub frames: u32,
    /// `RUST_LOG` が未設定のときに使う tracing のフィルタ
    pub log_filter: String,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            frames: 8,
            log_filter: "stencil_core=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StencilConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_object_uses_defaults() {
        let config = StencilConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StencilConfig::default());
        assert_eq!(config.frame_interval().as_millis(), 16);
    }

    #[rstest]
    #[case::interval(r#"{"frame_interval_ms": 33}"#, 33, 8)]
    #[case::frames(r#"{"frames": 2}"#, 16, 2)]
    fn fields_can_be_overridden(
        #[case] json: &str,
        #[case] interval: u64,
        #[case] frames: u32,
    ) {
        let config = StencilConfig::from_json_str(json).unwrap();
        assert_eq!(config.frame_interval_ms, interval);
        assert_eq!(config.frames, frames);
        assert_eq!(config.log_filter, "stencil_core=debug");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = StencilConfig::from_json_str("{ frames: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StencilConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
