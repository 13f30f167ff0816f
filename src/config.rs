use anyhow::{Context, Result};
use rc_core::config::Config;
use std::path::Path;

/// Load configuration from a JSON file.
///
/// A relative `catalog.base_dir` is resolved against the file's directory so
/// a config can be used from any working directory.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {:?}", path);
    }

    let mut config = Config::load_or_default(Some(path))
        .with_context(|| format!("Failed to load config file: {:?}", path))?;

    if config.catalog.base_dir.is_relative() {
        if let Some(parent) = path.parent() {
            config.catalog.base_dir = parent.join(&config.catalog.base_dir);
        }
    }

    Ok(config)
}

/// Load config from the given path, the default locations, or defaults.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./reelcast.json", "~/.config/reelcast/config.json"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_dir_follows_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelcast.json");
        std::fs::write(&path, r#"{"catalog": {"base_dir": "media"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.catalog.base_dir, dir.path().join("media"));
    }

    #[test]
    fn absolute_base_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelcast.json");
        std::fs::write(&path, r#"{"catalog": {"base_dir": "/srv/media"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.catalog.base_dir, Path::new("/srv/media"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn bundled_example_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("reelcast.example.json");
        let config = load_config(&path).unwrap();
        assert!(config.validate().is_empty());
        assert_eq!(config.catalog.assets.len(), 1);
        assert!(config.catalog.base_dir.ends_with("media"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config_or_default(Some(Path::new("/nonexistent/reelcast.json"))).is_err());
    }
}
