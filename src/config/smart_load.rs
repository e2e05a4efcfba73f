use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// Pick a figment provider for `path` from its extension, sniffing the
/// content when the extension is unknown. Falls back to TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let format = match extension.to_lowercase().as_str() {
        "toml" => ConfigFormat::Toml,
        "json" => ConfigFormat::Json,
        "yaml" | "yml" => ConfigFormat::Yaml,
        _ => match std::fs::read_to_string(path) {
            Ok(content) => {
                let detected = detect_format_from_content(&content);
                tracing::debug!("Smart loader detected {:?} for {}", detected, path.display());
                detected.unwrap_or(ConfigFormat::Toml)
            }
            Err(e) => {
                tracing::debug!("Smart loader could not read {}: {}", path.display(), e);
                ConfigFormat::Toml
            }
        },
    };

    match format {
        ConfigFormat::Toml => SmartProvider::Toml(Toml::file(path)),
        ConfigFormat::Json => SmartProvider::Json(Json::file(path)),
        ConfigFormat::Yaml => SmartProvider::Yaml(Yaml::file(path)),
    }
}

enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<ConfigFormat> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(ConfigFormat::Json);
    }

    // TOML section headers are checked before YAML so `[parallel]` wins
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some(ConfigFormat::Toml);
    }

    if trimmed.starts_with("---") || trimmed.lines().any(|line| line.trim().contains(':')) {
        return Some(ConfigFormat::Yaml);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Figment;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            detect_format_from_content(r#"{"parallel": {"max_threads": 2}}"#),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            detect_format_from_content("parallel:\n  max_threads: 2"),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            detect_format_from_content("[parallel]\nmax_threads = 2"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(detect_format_from_content("plain words"), None);
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.conf");
        fs::write(&path, r#"{"parallel": {"max_threads": 6}}"#).unwrap();

        let threads: usize = Figment::new()
            .merge(auto(&path))
            .extract_inner("parallel.max_threads")
            .unwrap();
        assert_eq!(threads, 6);
    }
}
