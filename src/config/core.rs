use super::PassevalConfig;
use super::overrides::prune_unset;
use super::smart_load;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::Serialize;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "PASSEVAL_";

/// Layered configuration source
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Build the full chain, lowest priority first:
    /// embedded defaults, user config, repo config, `custom_config`,
    /// `PASSEVAL_*` environment, then `cli_overrides`.
    pub fn load_with<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let user_base = Self::user_config_base_path();
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(format!("{user_base}.toml")))
            .merge(Json::file(format!("{user_base}.json")))
            .merge(Yaml::file(format!("{user_base}.yaml")))
            .merge(Yaml::file(format!("{user_base}.yml")))
            .merge(Toml::file("passeval.toml"))
            .merge(Json::file("passeval.json"))
            .merge(Yaml::file("passeval.yaml"))
            .merge(Yaml::file("passeval.yml"));

        if let Some(custom_path) = custom_config {
            if !std::path::Path::new(custom_path).exists() {
                anyhow::bail!("Config file not found: {custom_path}");
            }
            tracing::debug!("CONFIG LOAD: Using custom config {}", custom_path);
            figment = figment.merge(smart_load::auto(custom_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(prune_unset(cli)));
        }

        Ok(ConfigLoader { figment })
    }

    /// Extract and validate the typed configuration
    pub fn extract(&self) -> Result<PassevalConfig> {
        let config: PassevalConfig = self
            .figment
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/passeval/config"),
            Err(_) => "~/.config/passeval/config".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_loads_defaults() {
        let loader = ConfigLoader::load_with(None, None::<&()>).unwrap();
        let full = loader.get_full_config().unwrap();
        assert_eq!(full["parallel"]["progress_interval"], 1000);
        assert_eq!(full["parallel"]["channel_buffer_multiplier"], 2);
        assert_eq!(full["evaluation"]["strength_threshold"], 0.5);
        assert_eq!(full["input"]["encoding"], "utf-8");
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = json!({
            "evaluation": { "strength_threshold": 0.8 },
            "parallel": { "max_threads": 3, "progress_interval": null },
        });
        let config = ConfigLoader::load_with(None, Some(overrides))
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config.evaluation.strength_threshold, 0.8);
        assert_eq!(config.parallel.max_threads, 3);
        // Unset flags do not clobber lower layers
        assert_eq!(config.parallel.progress_interval, 1000);
    }

    #[test]
    fn test_custom_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(
            &path,
            "evaluation:\n  strength_threshold: 0.3\ninput:\n  encoding: iso-8859-1\n",
        )
        .unwrap();

        let config = ConfigLoader::load_with(path.to_str(), None::<&()>)
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(config.evaluation.strength_threshold, 0.3);
        assert_eq!(config.input.encoding, crate::io::TextEncoding::Latin1);
        assert_eq!(config.output.format, crate::io::OutputFormat::Csv);
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        let result = ConfigLoader::load_with(Some("non_existent_passeval.toml"), None::<&()>);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_fail_extraction() {
        let overrides = json!({ "parallel": { "progress_interval": 0 } });
        let loader = ConfigLoader::load_with(None, Some(overrides)).unwrap();
        assert!(loader.extract().is_err());
    }
}
