//! Configuration validation
//!
//! Validates file group consistency:
//! - Group names are unique
//! - File names are present, plain names (no directories), and unique
//! - Rotation thresholds are non-zero

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::LogConfig;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &LogConfig) -> Result<()> {
    let mut seen = HashSet::new();
    let mut files: HashMap<&str, &str> = HashMap::new();

    for group in &config.files {
        if !seen.insert(group.name.as_str()) {
            return Err(ConfigError::duplicate_group(&group.name));
        }

        if group.file.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "file group",
                &group.name,
                "file",
                "file name is empty",
            ));
        }

        if Path::new(&group.file).components().count() != 1 {
            return Err(ConfigError::invalid_value(
                "file group",
                &group.name,
                "file",
                format!("'{}' must be a plain file name", group.file),
            ));
        }

        if let Some(owner) = files.insert(group.file.as_str(), group.name.as_str()) {
            return Err(ConfigError::invalid_value(
                "file group",
                &group.name,
                "file",
                format!("'{}' is already written by group '{owner}'", group.file),
            ));
        }

        if group.max_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "file group",
                &group.name,
                "max_bytes",
                "must be greater than zero",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileGroupConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LogConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let config = LogConfig::default().with_files(vec![
            FileGroupConfig::new("system", "a.log"),
            FileGroupConfig::new("system", "b.log"),
        ]);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateGroup { .. }));
    }

    #[test]
    fn test_empty_file_rejected() {
        let config = LogConfig::default().with_files(vec![FileGroupConfig::new("system", "  ")]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_nested_file_rejected() {
        let config =
            LogConfig::default().with_files(vec![FileGroupConfig::new("system", "sub/dir.log")]);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("plain file name"));
    }

    #[test]
    fn test_shared_file_rejected() {
        let config = LogConfig::default().with_files(vec![
            FileGroupConfig::new("system", "shared.log").with_rotation(300, 2),
            FileGroupConfig::new("driver", "shared.log").with_rotation(300, 2),
        ]);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("already written by group 'system'"));
    }

    #[test]
    fn test_zero_max_bytes_rejected() {
        let config = LogConfig::default()
            .with_files(vec![FileGroupConfig::new("system", "a.log").with_rotation(0, 3)]);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_bytes"));
    }
}
