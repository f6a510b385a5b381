// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::{Context, Result};
use challenchess_core::LevelOptions;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the options file, e.g. `~/.config/challenchess/config.toml`
pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "challenchess", "challenchess")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load level options from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields the default
/// options; keys absent from the file keep their defaults.
pub fn load_options(path: Option<&Path>) -> Result<LevelOptions> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = config_path()?;
            if !default_path.exists() {
                tracing::debug!("No config file at {}, using defaults", default_path.display());
                return Ok(LevelOptions::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let options = toml::from_str::<LevelOptions>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    tracing::info!("Loaded level options from {}", config_path.display());
    Ok(options)
}

/// Write `options` as TOML, creating parent directories as needed
pub fn save_options(options: &LevelOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(options).context("Failed to serialize options")?;
    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::info!("Saved level options to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use challenchess_core::Seed;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "xFieldsMin = 5\nstepCountMax = 12\nseed = \"daily\"\n")?;

        let options = load_options(Some(&path))?;
        assert_eq!(options.x_fields_min, 5);
        assert_eq!(options.step_count_max, 12);
        assert_eq!(options.y_fields_max, 8);
        assert_eq!(options.seed, Some(Seed::Text("daily".to_string())));
        assert!(options.replace_after_capture);
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let options = LevelOptions {
            y_fields_min: 6,
            y_fields_max: 10,
            replace_after_capture: false,
            ..Default::default()
        }
        .with_seed(1234.5);
        save_options(&options, &path)?;

        assert_eq!(load_options(Some(&path))?, options);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let err = load_options(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "xFieldsMin = \"many\"")?;
        assert!(load_options(Some(&path)).is_err());
        Ok(())
    }
}
