//! Shared plumbing for the command-line tools: config loading and logging setup.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use station_core::GeneratorConfig;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Reads a TOML generator config; missing fields fall back to their defaults.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: GeneratorConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config TOML: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid generator config: {}", path.display()))?;
    Ok(config)
}

pub fn config_or_default(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Logs to stderr, filtered by `RUST_LOG` with warnings on by default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .init();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(text.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let file = write_config("width = 64\nheight = 40\n");
        let config = load_config(file.path()).expect("config loads");
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 40);
        assert_eq!(config.min_room_size, GeneratorConfig::default().min_room_size);
    }

    #[test]
    fn invalid_values_are_rejected_with_context() {
        let file = write_config("width = 4\n");
        let error = load_config(file.path()).expect_err("grid too small");
        assert!(format!("{error:#}").contains("smaller than"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_config("width = \"wide\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = load_config(Path::new("/nonexistent/station.toml")).expect_err("no file");
        assert!(error.to_string().contains("/nonexistent/station.toml"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(config_or_default(None).expect("defaults"), GeneratorConfig::default());
    }
}
