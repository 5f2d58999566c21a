use crate::errors::ConfigError;
use crate::model::AppConfig;
use std::path::Path;

/// Loads `config.json`. A missing or malformed file is fatal; there are no
/// defaults for the credential fields and no partial config. The
/// config-supplied model is authoritative (nothing shadows it later).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let mut ignored_keys = std::collections::HashSet::new();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);

    // serde_ignored wrapper to capture unknown fields
    let cfg: AppConfig = serde_ignored::deserialize(&mut deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse JSON: {}", e)))?;

    if !ignored_keys.is_empty() {
        tracing::warn!(event = "config_unknown_keys", keys = ?ignored_keys);
    }

    if cfg.model.trim().is_empty() {
        return Err(ConfigError(format!(
            "'model' must not be empty (file: {})",
            path.display()
        )));
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_a_complete_config() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"{{"openaiKey": "sk-test", "orgId": "org-1", "model": "gpt-4"}}"#
        )?;

        let cfg = load_config(tmp.path()).map_err(|e| anyhow::anyhow!(e))?;
        assert_eq!(cfg.openai_key, "sk-test");
        assert_eq!(cfg.org_id, "org-1");
        assert_eq!(cfg.model, "gpt-4");
        assert_eq!(cfg.settings.max_tokens, 150);
        assert_eq!(cfg.settings.temperature, 0.7);
        assert!(cfg.settings.timeout_seconds.is_none());
        Ok(())
    }

    #[test]
    fn settings_override_defaults() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"{{"openaiKey": "k", "orgId": "o", "model": "gpt-4o-mini",
                 "settings": {{"max_tokens": 300, "timeout_seconds": 20}}}}"#
        )?;

        let cfg = load_config(tmp.path()).map_err(|e| anyhow::anyhow!(e))?;
        assert_eq!(cfg.settings.max_tokens, 300);
        assert_eq!(cfg.settings.temperature, 0.7);
        assert_eq!(cfg.settings.timeout_seconds, Some(20));
        Ok(())
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_config(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn malformed_json_is_fatal() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "{{not json")?;
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
        Ok(())
    }

    #[test]
    fn missing_required_field_is_fatal() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, r#"{{"openaiKey": "k", "model": "gpt-4"}}"#)?;
        assert!(load_config(tmp.path()).is_err());
        Ok(())
    }

    #[test]
    fn unknown_keys_are_tolerated() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"{{"openaiKey": "k", "orgId": "o", "model": "gpt-4", "legacyField": 1}}"#
        )?;
        let cfg = load_config(tmp.path()).map_err(|e| anyhow::anyhow!(e))?;
        assert_eq!(cfg.model, "gpt-4");
        Ok(())
    }
}
