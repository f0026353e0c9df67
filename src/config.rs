//! Configuration module for pipechat.

use serde::Deserialize;
use std::path::Path;

use crate::{PipechatError, Result};

/// Chat configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Base directory under which room directories are created.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Prefix prepended to the room name to form the room directory name.
    #[serde(default = "default_room_prefix")]
    pub room_prefix: String,
}

fn default_base_dir() -> String {
    "/tmp".to_string()
}

fn default_room_prefix() -> String {
    "chatroom-".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            room_prefix: default_room_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/pipechat.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chat configuration.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PipechatError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| PipechatError::Config(format!("{}: {e}", path.display())))
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// A present-but-malformed file is still an error; only absence is
    /// treated as "use defaults".
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_chat_config_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.base_dir, "/tmp");
        assert_eq!(config.room_prefix, "chatroom-");
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file, "logs/pipechat.log");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [chat]
            base_dir = "/var/run/chat"
            "#,
        )
        .unwrap();
        assert_eq!(config.chat.base_dir, "/var/run/chat");
        // Unspecified fields fall back to defaults
        assert_eq!(config.chat.room_prefix, "chatroom-");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chat.base_dir, "/tmp");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Config::load("/nonexistent/pipechat-config.toml");
        assert!(matches!(result, Err(PipechatError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/pipechat-config.toml").unwrap();
        assert_eq!(config.chat.base_dir, "/tmp");
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "this is not toml [[").unwrap();

        let result = Config::load_or_default(&path);
        assert!(matches!(result, Err(PipechatError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logging]\nlevel = \"debug\"\nfile = \"/tmp/test.log\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "/tmp/test.log");
    }
}
